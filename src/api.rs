use serde_json::Value;

use crate::{
    error::UpdaterError,
    model::{FileDetail, FileMetadata},
};

pub const DEFAULT_BASE_URL: &str = "https://api.curseforge.com";

/// The catalog API the resolver talks to. Kept behind a trait so the
/// resolution logic can run against a mock in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Catalog {
    /// Fetch every file record published for a project
    fn file_listing(&self, project_id: u32) -> Result<Vec<FileMetadata>, UpdaterError>;
    /// Fetch the full record for a single file, including its download URL
    fn file_detail(&self, project_id: u32, file_id: u64) -> Result<FileDetail, UpdaterError>;
}

/// CurseForge client. One agent for the whole run; the API is otherwise
/// stateless.
pub struct CurseClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl CurseClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            agent: ureq::agent(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn get(&self, url: &str) -> Result<String, UpdaterError> {
        let raw = self
            .agent
            .get(url)
            .set("accept", "application/json")
            .set("x-api-key", &self.api_key)
            .call()?
            .into_string()?;
        Ok(raw)
    }
}

impl Catalog for CurseClient {
    fn file_listing(&self, project_id: u32) -> Result<Vec<FileMetadata>, UpdaterError> {
        let raw = self.get(&format!("{}/v1/mods/{}/files", self.base_url, project_id))?;
        parse_file_listing(&raw)
    }

    fn file_detail(&self, project_id: u32, file_id: u64) -> Result<FileDetail, UpdaterError> {
        let raw = self.get(&format!(
            "{}/v1/mods/{}/files/{}",
            self.base_url, project_id, file_id
        ))?;
        parse_file_detail(&raw)
    }
}

/// The listing body is `{ "data": [ ...file records... ] }`. Anything else in
/// the `data` slot means the API changed shape under us.
pub(crate) fn parse_file_listing(raw: &str) -> Result<Vec<FileMetadata>, UpdaterError> {
    let body: Value = serde_json::from_str(raw)?;
    let Some(data) = body.get("data").and_then(Value::as_array) else {
        return Err(UpdaterError::UpstreamResponse(
            "file listing `data` field is missing or not an array".into(),
        ));
    };

    data.iter()
        .map(|entry| serde_json::from_value(entry.clone()).map_err(UpdaterError::from))
        .collect()
}

pub(crate) fn parse_file_detail(raw: &str) -> Result<FileDetail, UpdaterError> {
    let body: Value = serde_json::from_str(raw)?;
    let Some(data) = body.get("data") else {
        return Err(UpdaterError::UpstreamResponse(
            "file detail response has no `data` field".into(),
        ));
    };

    Ok(serde_json::from_value(data.clone())?)
}

#[cfg(test)]
mod test {
    use super::{parse_file_detail, parse_file_listing};
    use crate::error::UpdaterError;

    #[test]
    fn listing_parses_records() {
        let raw = r#"{
            "data": [
                {
                    "displayName": "Pack 1.2.3",
                    "fileName": "Pack-1.2.3.zip",
                    "fileDate": "2024-03-01T18:02:11.52Z",
                    "gameVersions": ["1.21", "Forge"],
                    "serverPackFileId": 5555,
                    "fileLength": 123456
                },
                {
                    "displayName": "Pack 1.2.2",
                    "fileName": "Pack-1.2.2.zip",
                    "fileDate": "2024-02-01T10:00:00Z",
                    "gameVersions": ["1.20"]
                }
            ]
        }"#;

        let files = parse_file_listing(raw).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].server_pack_file_id, Some(5555));
        assert!(files[0].is_server_pack_for("1.21"));
        assert_eq!(files[1].server_pack_file_id, None);
        assert!(files[0]._extra.contains_key("fileLength"));
    }

    #[test]
    fn listing_rejects_non_array_data() {
        let raw = r#"{ "data": { "unexpected": true } }"#;
        assert!(matches!(
            parse_file_listing(raw),
            Err(UpdaterError::UpstreamResponse(_))
        ));

        let raw = r#"{ "error": "nope" }"#;
        assert!(matches!(
            parse_file_listing(raw),
            Err(UpdaterError::UpstreamResponse(_))
        ));
    }

    #[test]
    fn detail_parses_download_url() {
        let raw = r#"{
            "data": {
                "fileName": "Pack-1.2.3-server.zip",
                "downloadUrl": "https://edge.example.com/files/Pack-1.2.3-server.zip"
            }
        }"#;

        let detail = parse_file_detail(raw).unwrap();
        assert_eq!(detail.file_name, "Pack-1.2.3-server.zip");
        assert_eq!(
            detail.download_url.as_deref(),
            Some("https://edge.example.com/files/Pack-1.2.3-server.zip")
        );
    }

    #[test]
    fn detail_tolerates_null_url() {
        let raw = r#"{ "data": { "fileName": "Pack.zip", "downloadUrl": null } }"#;
        let detail = parse_file_detail(raw).unwrap();
        assert!(detail.download_url.is_none());
    }
}
