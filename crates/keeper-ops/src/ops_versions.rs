//! Operation: list the published versions of a module.

use keeper_core::config::KeeperConfig;
use keeper_core::coordinate::Target;
use keeper_maven::client::RepositoryClient;
use keeper_maven::metadata;
use keeper_maven::repository::MavenRepository;
use keeper_util::errors::KeeperError;

/// Print latest, release, and every listed version from `maven-metadata.xml`.
pub async fn versions(config: &KeeperConfig, module: &str) -> miette::Result<()> {
    let module: Target = module.parse()?;
    let client = RepositoryClient::http(MavenRepository::from_config(config)?)?;

    let bytes = client
        .fetch_metadata(&module.group, &module.artifact)
        .await?;
    let xml = String::from_utf8_lossy(&bytes);
    let meta = metadata::parse_metadata(&xml).map_err(|e| KeeperError::MetadataFormat {
        identifier: format!("{}:{}", module.group, module.artifact),
        message: e.to_string(),
    })?;

    println!("{}:{}", module.group, module.artifact);
    if let Some(latest) = &meta.latest {
        println!("  latest:  {latest}");
    }
    if let Some(release) = &meta.release {
        println!("  release: {release}");
    }
    if !meta.versions.is_empty() {
        println!("  versions:");
        for version in &meta.versions {
            println!("    {version}");
        }
    }
    Ok(())
}
