use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A single file record from the catalog's file listing.
///
/// Only the fields the updater cares about are typed; everything else the API
/// sends lands in `_extra`. Fields that may be absent on older records are
/// defaulted so a partially shaped entry is filtered out rather than failing
/// the whole listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub file_name: String,
    ///Release timestamp as an RFC-3339 string, e.g. `2024-03-01T18:02:11.52Z`
    #[serde(default)]
    pub file_date: String,
    #[serde(default)]
    pub game_versions: Vec<String>,
    pub server_pack_file_id: Option<u64>,
    #[serde(flatten)]
    pub _extra: HashMap<String, Value>,
}

impl FileMetadata {
    /// Whether this file is a server pack usable for `game_version`
    pub fn is_server_pack_for(&self, game_version: &str) -> bool {
        self.server_pack_file_id.is_some()
            && self.game_versions.iter().any(|v| v == game_version)
    }
}

/// The full file record returned by the per-file detail endpoint.
///
/// The listing entries don't carry download links, so the resolver always
/// follows up with this record. `download_url` is nullable upstream.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FileDetail {
    #[serde(default)]
    pub file_name: String,
    pub download_url: Option<String>,
    #[serde(flatten)]
    pub _extra: HashMap<String, Value>,
}

/// The release chosen for this run. Built once by the resolver, then read by
/// the download and patch stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelease {
    pub download_url: String,
    ///Remote archive name with any trailing `.zip` removed
    pub version_label: String,
    pub file_name: String,
    pub display_name: String,
}

/// Everything a run needs to know, passed explicitly into [`crate::core::run`]
/// so tests can point it at fixtures.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_id: u32,
    pub game_version: String,
    ///Scratch directory for the downloaded archive and its contents
    pub work_dir: PathBuf,
    ///Name to save the downloaded archive under inside `work_dir`
    pub archive_name: String,
    pub launch_script: PathBuf,
    pub dockerfile: PathBuf,
    ///Jar names containing any of these substrings are never the server jar
    pub exclude_markers: Vec<String>,
}

impl Config {
    pub fn new(project_id: u32, game_version: impl Into<String>) -> Self {
        Self {
            project_id,
            game_version: game_version.into(),
            work_dir: PathBuf::from("./temp_server_files"),
            archive_name: "server-files.zip".into(),
            launch_script: PathBuf::from("launch.sh"),
            dockerfile: PathBuf::from("Dockerfile"),
            exclude_markers: vec!["installer".into(), "client".into()],
        }
    }

    pub fn with_work_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.work_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_launch_script(mut self, path: impl AsRef<Path>) -> Self {
        self.launch_script = path.as_ref().to_path_buf();
        self
    }

    pub fn with_dockerfile(mut self, path: impl AsRef<Path>) -> Self {
        self.dockerfile = path.as_ref().to_path_buf();
        self
    }
}

#[cfg(test)]
mod test {
    use super::FileMetadata;
    use std::collections::HashMap;

    fn entry(versions: &[&str], pack_id: Option<u64>) -> FileMetadata {
        FileMetadata {
            display_name: "Pack".into(),
            file_name: "Pack.zip".into(),
            file_date: "2024-01-01T00:00:00Z".into(),
            game_versions: versions.iter().map(|v| (*v).into()).collect(),
            server_pack_file_id: pack_id,
            _extra: HashMap::new(),
        }
    }

    #[test]
    fn server_pack_needs_matching_version() {
        assert!(entry(&["1.21", "Forge"], Some(10)).is_server_pack_for("1.21"));
        assert!(!entry(&["1.20"], Some(10)).is_server_pack_for("1.21"));
        assert!(!entry(&[], Some(10)).is_server_pack_for("1.21"));
    }

    #[test]
    fn server_pack_needs_pack_id() {
        assert!(!entry(&["1.21"], None).is_server_pack_for("1.21"));
    }
}
