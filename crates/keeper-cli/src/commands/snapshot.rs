use keeper_core::config::KeeperConfig;
use miette::Result;

pub async fn exec(config: &KeeperConfig, coordinate: &str) -> Result<()> {
    keeper_ops::ops_snapshot::snapshot(config, coordinate).await
}
