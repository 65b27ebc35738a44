//! Resolving a `-SNAPSHOT` coordinate to the timestamped build it is published under.

use keeper_core::coordinate::ArtifactCoordinate;
use keeper_util::errors::{KeeperError, KeeperResult};

use crate::client::RepositoryClient;
use crate::download::Transport;
use crate::metadata;

/// The build version (`2.1-20240615.143022-42`) of a snapshot coordinate.
///
/// Uses the first `snapshotVersion` entry of the version-level metadata.
pub async fn resolve_snapshot_version<T: Transport>(
    client: &RepositoryClient<T>,
    coordinate: &ArtifactCoordinate,
) -> KeeperResult<String> {
    let identifier = coordinate.identifier();
    let bytes = client.fetch_snapshot_metadata(coordinate).await?;

    let format_error = |message: String| KeeperError::MetadataFormat {
        identifier: identifier.clone(),
        message,
    };
    let xml = std::str::from_utf8(&bytes).map_err(|e| format_error(e.to_string()))?;
    let meta = metadata::parse_snapshot_metadata(xml).map_err(|e| format_error(e.to_string()))?;

    let build = meta
        .build_version()
        .ok_or_else(|| format_error("no versioning/snapshotVersions/snapshotVersion/value".into()))?;
    tracing::debug!("{identifier} resolves to build {build}");
    Ok(build.to_string())
}
