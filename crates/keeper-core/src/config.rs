use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use keeper_util::errors::{KeeperError, KeeperResult};

use crate::env;
use crate::substitution::ModuleMap;
use crate::tracked::TrackedUniverse;

/// Name of the configuration file looked up from the working directory upwards.
pub const CONFIG_FILE: &str = "keeper.toml";

/// Credentials file read next to [`CONFIG_FILE`].
pub const ENV_FILE: &str = ".keeper.env";

/// Configuration loaded from `keeper.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeeperConfig {
    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub resolve: ResolveConfig,

    /// `group:artifact` -> local module path.
    #[serde(default)]
    pub modules: BTreeMap<String, String>,

    /// Directory relative cache paths are resolved against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Remote repository settings from `[repository]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Cache locations from `[cache]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory holding the fingerprint cache file.
    #[serde(default = "default_cache_dir")]
    pub dir: String,
    /// Root of the content-addressed manifest store. Defaults to `{dir}/files`.
    #[serde(default)]
    pub store: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
            store: None,
        }
    }
}

fn default_cache_dir() -> String {
    "~/.keeper/cache".to_string()
}

/// Resolution settings from `[resolve]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Glob patterns over `group:artifact:version` identifiers that make up
    /// the tracked library universe.
    #[serde(default)]
    pub tracked: Vec<String>,

    #[serde(default, rename = "on-parse-error")]
    pub on_parse_error: ParseFailurePolicy,
}

/// What a resolution does with a manifest it cannot parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseFailurePolicy {
    /// Log the failure and treat the coordinate as having no dependencies.
    #[default]
    #[serde(rename = "empty")]
    TreatAsEmpty,
    /// Abort the resolution with the parse error.
    #[serde(rename = "fail")]
    Propagate,
}

impl KeeperConfig {
    /// Parse configuration text. `${env:VAR}` references are interpolated
    /// from `env_overrides` and the process environment before parsing.
    pub fn parse_toml(
        content: &str,
        env_overrides: &BTreeMap<String, String>,
    ) -> KeeperResult<Self> {
        let content = env::interpolate(content, env_overrides);
        toml::from_str(&content).map_err(|e| KeeperError::Config {
            message: format!("Failed to parse {CONFIG_FILE}: {e}"),
        })
    }

    /// Load a configuration file, reading `.keeper.env` from the same directory.
    pub fn load(path: &Path) -> KeeperResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| KeeperError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        let base_dir = path.parent().map(Path::to_path_buf);
        let env_overrides = match &base_dir {
            Some(dir) => env::load_env_file(&dir.join(ENV_FILE))?,
            None => BTreeMap::new(),
        };
        let mut config = Self::parse_toml(&content, &env_overrides)?;
        config.base_dir = base_dir;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Find `keeper.toml` in `start` or an ancestor and load it.
    pub fn discover(start: &Path) -> KeeperResult<Option<Self>> {
        match keeper_util::fs::find_ancestor_with(start, CONFIG_FILE) {
            Some(dir) => Self::load(&dir.join(CONFIG_FILE)).map(Some),
            None => Ok(None),
        }
    }

    /// The configured repository base URL, without a trailing slash.
    pub fn repository_url(&self) -> KeeperResult<&str> {
        self.repository
            .url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .ok_or_else(|| KeeperError::Config {
                message: "missing [repository].url".to_string(),
            })
    }

    /// Directory of the fingerprint cache.
    pub fn cache_dir(&self) -> PathBuf {
        expand_path(&self.cache.dir, self.base_dir.as_deref())
    }

    /// Root of the content-addressed manifest store.
    pub fn store_dir(&self) -> PathBuf {
        match &self.cache.store {
            Some(store) => expand_path(store, self.base_dir.as_deref()),
            None => self.cache_dir().join("files"),
        }
    }

    pub fn tracked_universe(&self) -> KeeperResult<TrackedUniverse> {
        TrackedUniverse::from_patterns(&self.resolve.tracked)
    }

    pub fn module_map(&self) -> ModuleMap {
        ModuleMap::new(self.modules.clone())
    }
}

/// Expand `~/` to the home directory and resolve relative paths against `base`.
pub fn expand_path(raw: &str, base: Option<&Path>) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        return home_dir().join(rest);
    }
    let path = PathBuf::from(raw);
    match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path,
    }
}

fn home_dir() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
}
