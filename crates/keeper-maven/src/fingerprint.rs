//! Persistent fingerprint cache: `{identifier}.{fileKind}` -> checksum.
//!
//! Stored as flat `key=value` lines in `{cache_dir}/cache.properties`. The
//! file is read on first access and rewritten on every change, so entries
//! survive across runs. Release checksums are trusted as-is; callers always
//! refresh snapshot entries.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use keeper_core::coordinate::{ArtifactCoordinate, FileKind};
use keeper_util::errors::{KeeperError, KeeperResult};

/// File name of the cache inside the cache directory.
pub const CACHE_FILE: &str = "cache.properties";

/// Reserved key holding the last publishing project path.
pub const PUBLISHING_PROJECT_KEY: &str = "publishingProject";

/// Cache key for one file of a coordinate.
pub fn checksum_key(coordinate: &ArtifactCoordinate, kind: FileKind) -> String {
    format!("{}.{}", coordinate.identifier(), kind)
}

/// Handle on the on-disk fingerprint cache.
#[derive(Debug)]
pub struct FingerprintCache {
    dir: PathBuf,
    entries: Option<BTreeMap<String, String>>,
}

impl FingerprintCache {
    /// A handle on the cache in `dir`. Nothing is read or created until first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            entries: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CACHE_FILE)
    }

    fn load(&mut self) -> KeeperResult<&mut BTreeMap<String, String>> {
        if self.entries.is_none() {
            let path = self.path();
            keeper_util::fs::ensure_dir(&self.dir)
                .map_err(|e| KeeperError::cache_io(&self.dir, e))?;
            let entries = if path.is_file() {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| KeeperError::cache_io(&path, e))?;
                parse_entries(&content)
            } else {
                std::fs::write(&path, header()).map_err(|e| KeeperError::cache_io(&path, e))?;
                BTreeMap::new()
            };
            tracing::debug!("Loaded {} fingerprint(s) from {}", entries.len(), path.display());
            self.entries = Some(entries);
        }
        Ok(self.entries.get_or_insert_with(BTreeMap::new))
    }

    fn flush(&self) -> KeeperResult<()> {
        let path = self.path();
        let mut out = header();
        if let Some(entries) = &self.entries {
            for (key, value) in entries {
                out.push_str(&escape(key, true));
                out.push('=');
                out.push_str(&escape(value, false));
                out.push('\n');
            }
        }
        keeper_util::fs::write_file(&path, out.as_bytes()).map_err(|e| KeeperError::cache_io(&path, e))
    }

    pub fn get(&mut self, key: &str) -> KeeperResult<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    /// Store a value and write the cache file immediately.
    pub fn set(&mut self, key: &str, value: &str) -> KeeperResult<()> {
        self.load()?.insert(key.to_string(), value.to_string());
        self.flush()
    }

    /// Remove a key, returning its previous value.
    pub fn remove(&mut self, key: &str) -> KeeperResult<Option<String>> {
        let previous = self.load()?.remove(key);
        if previous.is_some() {
            self.flush()?;
        }
        Ok(previous)
    }

    /// All entries, sorted by key.
    pub fn entries(&mut self) -> KeeperResult<&BTreeMap<String, String>> {
        Ok(self.load()?)
    }

    pub fn get_checksum(
        &mut self,
        coordinate: &ArtifactCoordinate,
        kind: FileKind,
    ) -> KeeperResult<Option<String>> {
        self.get(&checksum_key(coordinate, kind))
    }

    pub fn set_checksum(
        &mut self,
        coordinate: &ArtifactCoordinate,
        kind: FileKind,
        checksum: &str,
    ) -> KeeperResult<()> {
        self.set(&checksum_key(coordinate, kind), checksum)
    }

    pub fn publishing_project(&mut self) -> KeeperResult<Option<String>> {
        self.get(PUBLISHING_PROJECT_KEY)
    }

    pub fn set_publishing_project(&mut self, path: &str) -> KeeperResult<()> {
        self.set(PUBLISHING_PROJECT_KEY, path)
    }
}

fn header() -> String {
    "# repository-keeper fingerprint cache\n".to_string()
}

/// Parse `key=value` lines. Backslash escapes (`\:`, `\=`, `\\`) are honoured
/// in keys and values; the first unescaped `=` separates them.
fn parse_entries(content: &str) -> BTreeMap<String, String> {
    let mut entries = BTreeMap::new();
    for line in content.lines() {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let mut key = String::new();
        let mut value = String::new();
        let mut in_value = false;
        let mut chars = line.chars();
        while let Some(c) = chars.next() {
            let target = if in_value { &mut value } else { &mut key };
            match c {
                '\\' => match chars.next() {
                    Some('t') => target.push('\t'),
                    Some('n') => target.push('\n'),
                    Some(other) => target.push(other),
                    None => {}
                },
                '=' if !in_value => in_value = true,
                other => target.push(other),
            }
        }
        if in_value {
            entries.insert(key.trim_end().to_string(), value.trim_start().to_string());
        }
    }
    entries
}

fn escape(raw: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '=' | ':' if is_key => {
                out.push('\\');
                out.push(c);
            }
            other => out.push(other),
        }
    }
    out
}
