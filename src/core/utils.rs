use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Scratch directory for one run. Created on construction, removed when
/// dropped, so every exit path of the pipeline releases it. Removal failure
/// is logged rather than propagated so it can't mask the run's own error.
pub struct ScratchDir {
    pub path: PathBuf,
}

impl ScratchDir {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        fs::create_dir_all(path.as_ref())?;
        Ok(ScratchDir {
            path: path.as_ref().to_path_buf(),
        })
    }
}

impl Deref for ScratchDir {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_dir_all(&self.path) {
            warn!(
                "Error removing scratch directory at '{}': {}",
                self.path.display(),
                e
            );
        }
    }
}

/// Strip a trailing `.zip` from an archive name to get a version label.
/// Idempotent on names that already lack the suffix.
pub fn strip_archive_suffix(file_name: &str) -> &str {
    file_name.strip_suffix(".zip").unwrap_or(file_name)
}
