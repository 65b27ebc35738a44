//! CLI argument definitions for repository-keeper.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use keeper_core::substitution::SubstitutionKind;

#[derive(Parser, Debug)]
#[command(
    name = "keeper",
    version,
    about = "Find the published modules affected by a library change",
    long_about = "repository-keeper walks the dependency graph published in a Maven \
                  repository to find which internal libraries transitively depend on a \
                  target library, so they can be rebuilt or substituted together."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to keeper.toml (default: search upwards from the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find modules that transitively depend on the target libraries
    Affected {
        /// Root modules as group:artifact:version
        #[arg(required = true, value_name = "MODULE")]
        modules: Vec<String>,
        /// Target library as group:artifact[:version] (repeatable)
        #[arg(short, long = "target", required = true, value_name = "TARGET")]
        targets: Vec<String>,
        /// Show the dependency chain to each target and the publish order
        #[arg(long)]
        chain: bool,
        /// Plan substitutions: source, snapshot or release
        #[arg(long = "as", value_name = "KIND")]
        substitute: Option<SubstitutionKind>,
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a -SNAPSHOT coordinate to its latest timestamped build
    Snapshot {
        /// Coordinate as group:artifact:version-SNAPSHOT
        coordinate: String,
    },

    /// List the published versions of a module
    Versions {
        /// Module as group:artifact
        module: String,
    },

    /// Manage the fingerprint cache and manifest store
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show cache locations, entry count, and size
    Stats,
    /// Print one cache entry
    Get {
        /// Key as group:artifact:version.kind
        key: String,
    },
    /// Remove one cache entry
    Remove {
        /// Key as group:artifact:version.kind
        key: String,
    },
    /// Show or set the last publishing project
    Publishing {
        /// Record this project path
        #[arg(long, value_name = "PATH")]
        set: Option<String>,
    },
    /// Delete the manifest store and fingerprint cache
    Clean,
}

pub fn parse() -> Cli {
    Cli::parse()
}
