pub mod manage;
pub mod patch;
pub mod resolve;
pub mod utils;

pub use manage::{download_file, extract, find_server_jar};
pub use patch::{patch_dockerfile, patch_launch_script};
pub use resolve::resolve_latest_server_release;
pub use utils::ScratchDir;

use tracing::{info, warn};

use crate::{api::Catalog, error::UpdaterError, model::Config};

/// Run the whole update once: resolve, download, extract, locate the server
/// jar, patch the local config files.
///
/// The scratch directory is owned by this function and removed on every exit
/// path. Any stage failure aborts the rest of the pipeline; a missing server
/// jar only skips the Dockerfile update.
pub fn run(catalog: &dyn Catalog, config: &Config) -> Result<(), UpdaterError> {
    let scratch = ScratchDir::create(&config.work_dir)?;

    let release = resolve_latest_server_release(catalog, config)?;
    info!(
        "Updating to {} ({})",
        release.display_name, release.version_label
    );

    let archive_path = scratch.join(&config.archive_name);
    download_file(&release.download_url, &archive_path)?;
    info!("Extracting {}", release.file_name);
    extract(&archive_path, &scratch.path)?;

    let server_jar = find_server_jar(&scratch.path, &config.exclude_markers);

    if !patch_launch_script(&config.launch_script, &release.version_label)? {
        warn!(
            "No SERVER_VERSION line in '{}', file left unchanged",
            config.launch_script.display()
        );
    }

    match server_jar {
        Some(jar) => {
            if !patch_dockerfile(&config.dockerfile, &jar)? && config.dockerfile.exists() {
                warn!(
                    "No COPY/ADD line in '{}', file left unchanged",
                    config.dockerfile.display()
                );
            }
        }
        None => warn!("No server jar located, skipping Dockerfile update"),
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::run;
    use crate::{
        api::MockCatalog,
        error::UpdaterError,
        model::{Config, FileMetadata},
    };
    use std::collections::HashMap;

    #[test]
    fn scratch_dir_is_removed_when_a_stage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let work_dir = dir.path().join("temp_server_files");

        let mut catalog = MockCatalog::new();
        catalog.expect_file_listing().returning(|_| {
            Err(UpdaterError::UpstreamResponse("listing broke".into()))
        });

        let config = Config::new(42, "1.21").with_work_dir(&work_dir);
        assert!(run(&catalog, &config).is_err());
        assert!(!work_dir.exists());
    }

    #[test]
    fn scratch_dir_is_removed_when_no_release_matches() {
        let dir = tempfile::tempdir().unwrap();
        let work_dir = dir.path().join("temp_server_files");

        let mut catalog = MockCatalog::new();
        catalog.expect_file_listing().returning(|_| {
            Ok(vec![FileMetadata {
                display_name: "Old".into(),
                file_name: "Old.zip".into(),
                file_date: "2023-01-01T00:00:00Z".into(),
                game_versions: vec!["1.19".into()],
                server_pack_file_id: Some(1),
                _extra: HashMap::new(),
            }])
        });

        let config = Config::new(42, "1.21").with_work_dir(&work_dir);
        let err = run(&catalog, &config).unwrap_err();
        assert!(matches!(err, UpdaterError::NoServerPack { .. }));
        assert!(!work_dir.exists());
    }
}
