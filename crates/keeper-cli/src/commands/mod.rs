//! Command dispatch and handler modules.

mod affected;
mod cache;
mod snapshot;
mod versions;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    let config = keeper_ops::load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Affected {
            modules,
            targets,
            chain,
            substitute,
            json,
        } => affected::exec(&config, modules, targets, chain, substitute, json).await,
        Command::Snapshot { coordinate } => snapshot::exec(&config, &coordinate).await,
        Command::Versions { module } => versions::exec(&config, &module).await,
        Command::Cache { action } => cache::exec(&config, action),
    }
}
