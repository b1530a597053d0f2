use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpdaterError {
    #[error("Required environment variable {0} is not set")]
    MissingCredential(String),
    #[error("Unexpected response from catalog API: {0}")]
    UpstreamResponse(String),
    #[error("No server pack found for project {project_id} and game version {game_version}")]
    NoServerPack {
        project_id: u32,
        game_version: String,
    },
    #[error("Error downloading file: {0}")]
    Download(String),
    #[error(transparent)]
    Archive(#[from] zip::result::ZipError),
    #[error("Error writing config file {path:?}: {source}")]
    ConfigWrite { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Error parsing JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ureq::Error> for UpdaterError {
    fn from(value: ureq::Error) -> Self {
        Self::Download(value.to_string())
    }
}
