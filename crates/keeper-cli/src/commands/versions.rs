use keeper_core::config::KeeperConfig;
use miette::Result;

pub async fn exec(config: &KeeperConfig, module: &str) -> Result<()> {
    keeper_ops::ops_versions::versions(config, module).await
}
