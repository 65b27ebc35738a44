//! Operation: resolve a snapshot coordinate to its latest timestamped build.

use keeper_core::config::KeeperConfig;
use keeper_core::coordinate::ArtifactCoordinate;
use keeper_maven::client::RepositoryClient;
use keeper_maven::repository::MavenRepository;
use keeper_maven::snapshot::resolve_snapshot_version;
use keeper_util::errors::KeeperError;

/// Print the build version a `-SNAPSHOT` coordinate currently resolves to.
pub async fn snapshot(config: &KeeperConfig, coordinate: &str) -> miette::Result<()> {
    let coordinate: ArtifactCoordinate = coordinate.parse()?;
    if !coordinate.is_snapshot() {
        return Err(KeeperError::Config {
            message: format!("{coordinate} is not a snapshot version"),
        }
        .into());
    }

    let client = RepositoryClient::http(MavenRepository::from_config(config)?)?;
    let build = resolve_snapshot_version(&client, &coordinate).await?;
    println!("{build}");
    Ok(())
}
