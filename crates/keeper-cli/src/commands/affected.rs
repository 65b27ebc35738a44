//! Affected command implementation.

use keeper_core::config::KeeperConfig;
use keeper_core::substitution::SubstitutionKind;
use keeper_ops::ops_affected::{self, AffectedOptions};
use miette::Result;

pub async fn exec(
    config: &KeeperConfig,
    modules: Vec<String>,
    targets: Vec<String>,
    chain: bool,
    substitute: Option<SubstitutionKind>,
    json: bool,
) -> Result<()> {
    let opts = AffectedOptions {
        modules,
        targets,
        chain,
        substitute,
        json,
    };
    ops_affected::affected(config, &opts).await
}
