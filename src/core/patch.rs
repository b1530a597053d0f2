use std::{fs, io, path::Path};

use lazy_static::lazy_static;
use regex::{NoExpand, Regex};
use tracing::{debug, warn};

use crate::error::UpdaterError;

lazy_static! {
    static ref VERSION_LINE: Regex =
        Regex::new(r"(?m)^SERVER_VERSION=.*$").expect("valid version-line pattern");
    //Matches any COPY/ADD of a .jar or .sh, deliberately loose to keep the
    //behavior of the updater this replaces
    static ref COPY_LINE: Regex =
        Regex::new(r"(?m)^(?:COPY|ADD)\s+\S+\.(?:jar|sh)\s+.*$").expect("valid copy-line pattern");
}

fn config_write(path: &Path, source: io::Error) -> UpdaterError {
    UpdaterError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    }
}

/// Rewrite the `SERVER_VERSION=` line of a launch script in place.
///
/// Returns whether a line actually matched; on no match the file is written
/// back unchanged and the caller decides how loudly to complain.
pub fn patch_launch_script(
    path: impl AsRef<Path>,
    version_label: &str,
) -> Result<bool, UpdaterError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| config_write(path, e))?;

    let matched = VERSION_LINE.is_match(&text);
    let replacement = format!("SERVER_VERSION={version_label}");
    let patched = VERSION_LINE.replace(&text, NoExpand(&replacement));

    fs::write(path, patched.as_bytes()).map_err(|e| config_write(path, e))?;
    debug!("Patched {} with version {}", path.display(), version_label);
    Ok(matched)
}

/// Rewrite the first `COPY`/`ADD` directive of a Dockerfile to copy the new
/// server jar. A missing Dockerfile is skipped with a warning, not an error.
pub fn patch_dockerfile(path: impl AsRef<Path>, jar_name: &str) -> Result<bool, UpdaterError> {
    let path = path.as_ref();
    if !path.exists() {
        warn!("No Dockerfile at '{}', skipping", path.display());
        return Ok(false);
    }
    let text = fs::read_to_string(path).map_err(|e| config_write(path, e))?;

    let matched = COPY_LINE.is_match(&text);
    let replacement = format!("COPY {jar_name} /server/{jar_name}");
    let patched = COPY_LINE.replace(&text, NoExpand(&replacement));

    fs::write(path, patched.as_bytes()).map_err(|e| config_write(path, e))?;
    debug!("Patched {} with jar {}", path.display(), jar_name);
    Ok(matched)
}
