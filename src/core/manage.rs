use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::Path,
};

use tracing::{debug, trace, warn};
use zip::ZipArchive;

use crate::error::UpdaterError;

/// Download a file to `file_path`, overwriting it if it exists.
///
/// A non-2xx response fails before the destination file is created. If the
/// body stream fails partway, the partial file is removed before the error
/// is returned so a failed download never looks like a finished one.
pub fn download_file(url: &str, file_path: impl AsRef<Path>) -> Result<(), UpdaterError> {
    let file_path = file_path.as_ref();

    debug!("Starting download from {}", url);
    let res = ureq::get(url).call()?;
    let mut body = res.into_reader();

    let mut file = File::create(file_path)?;
    let streamed = io::copy(&mut body, &mut file).and_then(|written| {
        file.flush()?;
        Ok(written)
    });

    match streamed {
        Ok(written) => {
            debug!(
                "Finished download to {} ({} bytes)",
                file_path.display(),
                written
            );
            Ok(())
        }
        Err(e) => {
            drop(file);
            if let Err(re) = fs::remove_file(file_path) {
                debug!("Unable to remove partial download: {}", re);
            }
            Err(UpdaterError::Download(format!(
                "stream from {url} failed: {e}"
            )))
        }
    }
}

/// Expand every entry of the archive at `archive_path` into `dest_dir`,
/// keeping the relative paths declared in the entry table.
pub fn extract(
    archive_path: impl AsRef<Path>,
    dest_dir: impl AsRef<Path>,
) -> Result<(), UpdaterError> {
    let dest_dir = dest_dir.as_ref();
    let mut archive = ZipArchive::new(File::open(archive_path.as_ref())?)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let Some(relative) = entry.enclosed_name() else {
            trace!("Skip missing enclosed name '{}'", entry.name());
            continue;
        };
        let out = dest_dir.join(relative);

        if entry.name().ends_with('/') {
            trace!("Create directory {}", out.display());
            fs::create_dir_all(&out)?;
            continue;
        } else if let Some(p) = out.parent() {
            fs::create_dir_all(p)?;
        }

        trace!("Write file {}", out.display());
        let mut outfile = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&out)?;
        io::copy(&mut entry, &mut outfile)?;
    }

    Ok(())
}

/// Whether a file name looks like the runnable server jar. Substring test
/// only, case-sensitive.
pub fn is_server_jar(name: &str, excludes: &[impl AsRef<str>]) -> bool {
    name.ends_with(".jar") && !excludes.iter().any(|m| name.contains(m.as_ref()))
}

/// Scan the top level of `dir` for the server jar.
///
/// Best effort: an unreadable directory is logged and treated as "not
/// found", which downstream only costs the Dockerfile patch.
pub fn find_server_jar(dir: impl AsRef<Path>, excludes: &[impl AsRef<str>]) -> Option<String> {
    let dir = dir.as_ref();
    let entries = match dir.read_dir() {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Unable to scan '{}' for a server jar: {}", dir.display(), e);
            return None;
        }
    };

    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if is_server_jar(name, excludes) {
            debug!("Found server jar {}", name);
            return Some(name.to_string());
        }
    }

    None
}
