use tracing::{debug, info};

use crate::{
    api::Catalog,
    core::utils::strip_archive_suffix,
    error::UpdaterError,
    model::{Config, FileMetadata, ResolvedRelease},
};

/// Find the newest server pack published for the configured project and game
/// version.
///
/// Listing entries don't carry download links, so the winner's
/// `serverPackFileId` is resolved through a second catalog lookup. Ties on
/// release date keep listing order (stable sort, first entry wins).
///
/// Release dates compare as RFC-3339 strings; entries that differ only in
/// fractional-second precision can reorder within that second (`...11Z` vs
/// `...11.52Z`).
pub fn resolve_latest_server_release(
    catalog: &dyn Catalog,
    config: &Config,
) -> Result<ResolvedRelease, UpdaterError> {
    info!("Fetching file listing for project {}", config.project_id);
    let files = catalog.file_listing(config.project_id)?;
    debug!("Listing contains {} files", files.len());

    let mut candidates: Vec<(&FileMetadata, u64)> = files
        .iter()
        .filter(|f| f.is_server_pack_for(&config.game_version))
        .filter_map(|f| f.server_pack_file_id.map(|id| (f, id)))
        .collect();
    candidates.sort_by(|(a, _), (b, _)| b.file_date.cmp(&a.file_date));

    let Some((latest, server_pack_id)) = candidates.first() else {
        return Err(UpdaterError::NoServerPack {
            project_id: config.project_id,
            game_version: config.game_version.clone(),
        });
    };
    info!(
        "Latest server pack is '{}' ({})",
        latest.display_name, latest.file_date
    );

    let detail = catalog.file_detail(config.project_id, *server_pack_id)?;
    let download_url = detail.download_url.ok_or_else(|| {
        UpdaterError::UpstreamResponse(format!(
            "file {server_pack_id} has no download URL"
        ))
    })?;

    Ok(ResolvedRelease {
        download_url,
        version_label: strip_archive_suffix(&detail.file_name).to_string(),
        file_name: detail.file_name,
        display_name: latest.display_name.clone(),
    })
}
