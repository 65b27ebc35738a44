//! The tracked dependency universe: which identifiers the resolver may descend into.

use globset::{Glob, GlobSet, GlobSetBuilder};

use keeper_util::errors::{KeeperError, KeeperResult};

/// Identifier patterns scoping a resolution to an internal library family.
///
/// A pattern with glob metacharacters (`*`, `?`, `[`, `{`) is matched as a
/// glob over the whole `group:artifact:version` identifier; a plain pattern
/// is a prefix (`com.acme:` tracks every `com.acme` artifact). An empty
/// universe tracks nothing.
#[derive(Debug, Clone)]
pub struct TrackedUniverse {
    patterns: Vec<String>,
    globs: GlobSet,
}

impl TrackedUniverse {
    pub fn from_patterns(patterns: &[String]) -> KeeperResult<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = if is_glob(pattern) {
                pattern.clone()
            } else {
                format!("{pattern}*")
            };
            let glob = Glob::new(&glob).map_err(|e| KeeperError::Config {
                message: format!("invalid tracked pattern '{pattern}': {e}"),
            })?;
            builder.add(glob);
        }
        let globs = builder.build().map_err(|e| KeeperError::Config {
            message: format!("invalid tracked patterns: {e}"),
        })?;
        Ok(Self {
            patterns: patterns.to_vec(),
            globs,
        })
    }

    pub fn is_tracked(&self, identifier: &str) -> bool {
        self.globs.is_match(identifier)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}
