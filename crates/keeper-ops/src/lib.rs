pub mod ops_affected;
pub mod ops_cache;
pub mod ops_snapshot;
pub mod ops_versions;

use std::path::Path;

use keeper_core::config::KeeperConfig;
use keeper_util::errors::KeeperError;

/// Load `keeper.toml` from `explicit`, or discover it from the current directory.
///
/// Without a config file every setting takes its default; commands that need
/// the repository then fail with a configuration error.
pub fn load_config(explicit: Option<&Path>) -> miette::Result<KeeperConfig> {
    if let Some(path) = explicit {
        return Ok(KeeperConfig::load(path)?);
    }
    let cwd = std::env::current_dir().map_err(KeeperError::Io)?;
    match KeeperConfig::discover(&cwd)? {
        Some(config) => Ok(config),
        None => {
            tracing::debug!("No keeper.toml found above {}", cwd.display());
            Ok(KeeperConfig::default())
        }
    }
}
