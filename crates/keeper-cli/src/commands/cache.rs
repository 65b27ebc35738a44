//! Cache command implementation.

use keeper_core::config::KeeperConfig;
use keeper_ops::ops_cache;
use miette::Result;

use crate::cli::CacheAction;

pub fn exec(config: &KeeperConfig, action: CacheAction) -> Result<()> {
    match action {
        CacheAction::Stats => ops_cache::stats(config),
        CacheAction::Get { key } => ops_cache::get(config, &key),
        CacheAction::Remove { key } => ops_cache::remove(config, &key),
        CacheAction::Publishing { set } => ops_cache::publishing(config, set.as_deref()),
        CacheAction::Clean => ops_cache::clean(config),
    }
}
