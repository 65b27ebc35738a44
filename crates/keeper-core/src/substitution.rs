//! Turning affected identifiers into substitutions for a downstream build.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use keeper_util::errors::{KeeperError, KeeperResult};

use crate::coordinate::ArtifactCoordinate;

/// How an affected library is swapped in the consuming build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubstitutionKind {
    /// Replace the published library with its local source module.
    Source,
    /// Replace the release with the development snapshot of the same version.
    Snapshot,
    /// Replace a local source module with its published release.
    Release,
}

impl SubstitutionKind {
    pub const ALL: [SubstitutionKind; 3] = [Self::Source, Self::Snapshot, Self::Release];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Snapshot => "snapshot",
            Self::Release => "release",
        }
    }
}

impl fmt::Display for SubstitutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubstitutionKind {
    type Err = KeeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| KeeperError::Config {
                message: format!("invalid dependency type: {s} (expected source, snapshot or release)"),
            })
    }
}

/// Mapping between published `group:artifact` keys and local module paths.
#[derive(Debug, Clone, Default)]
pub struct ModuleMap {
    paths: BTreeMap<String, String>,
}

impl ModuleMap {
    pub fn new(paths: BTreeMap<String, String>) -> Self {
        Self { paths }
    }

    /// Local module path for an identifier (`g:a:v`) or module key (`g:a`).
    pub fn local_path(&self, identifier: &str) -> Option<&str> {
        self.paths.get(&module_key(identifier)).map(String::as_str)
    }

    /// `group:artifact` published from a local module path.
    pub fn module_key_for(&self, local_path: &str) -> Option<&str> {
        self.paths
            .iter()
            .find(|(_, path)| path.as_str() == local_path)
            .map(|(key, _)| key.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn module_key(identifier: &str) -> String {
    identifier.splitn(3, ':').take(2).collect::<Vec<_>>().join(":")
}

/// One replacement in the consuming build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub from: String,
    pub to: String,
}

/// Plan the substitutions of `kind` for every affected identifier.
pub fn plan<'a>(
    kind: SubstitutionKind,
    affected: impl IntoIterator<Item = &'a str>,
    modules: &ModuleMap,
) -> KeeperResult<Vec<Substitution>> {
    affected
        .into_iter()
        .map(|identifier| {
            let to = match kind {
                SubstitutionKind::Snapshot => snapshot_of(identifier)?,
                SubstitutionKind::Source => modules
                    .local_path(identifier)
                    .map(str::to_string)
                    .ok_or_else(|| KeeperError::Config {
                        message: format!("no local module mapped for {identifier}"),
                    })?,
                SubstitutionKind::Release => identifier.to_string(),
            };
            Ok(Substitution {
                from: identifier.to_string(),
                to,
            })
        })
        .collect()
}

fn snapshot_of(identifier: &str) -> KeeperResult<String> {
    let coordinate: ArtifactCoordinate = identifier.parse()?;
    if coordinate.is_snapshot() {
        Ok(coordinate.identifier())
    } else {
        Ok(format!("{coordinate}-SNAPSHOT"))
    }
}
