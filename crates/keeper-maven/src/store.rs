//! Content-addressed manifest store.
//!
//! Files live at `{root}/{group}/{artifact}/{version}/{checksum}/{artifact}-{version}.{ext}`.
//! The group keeps its dots. A release file never changes under its
//! checksum directory, so a present file is reused without re-downloading.

use std::fs;
use std::path::{Path, PathBuf};

use keeper_core::coordinate::{ArtifactCoordinate, FileKind};
use keeper_util::errors::{KeeperError, KeeperResult};

#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `{root}/{group}/{artifact}/{version}`
    pub fn module_dir(&self, coordinate: &ArtifactCoordinate) -> PathBuf {
        self.root
            .join(&coordinate.group)
            .join(&coordinate.artifact)
            .join(&coordinate.version)
    }

    /// Create the module directory if missing.
    pub fn ensure_module_dir(&self, coordinate: &ArtifactCoordinate) -> KeeperResult<PathBuf> {
        let dir = self.module_dir(coordinate);
        keeper_util::fs::ensure_dir(&dir).map_err(|e| KeeperError::cache_io(&dir, e))?;
        Ok(dir)
    }

    pub fn file_path(
        &self,
        coordinate: &ArtifactCoordinate,
        checksum: &str,
        kind: FileKind,
    ) -> PathBuf {
        self.module_dir(coordinate).join(checksum).join(format!(
            "{}-{}.{}",
            coordinate.artifact,
            coordinate.version,
            kind.extension()
        ))
    }

    pub fn manifest_path(&self, coordinate: &ArtifactCoordinate, checksum: &str) -> PathBuf {
        self.file_path(coordinate, checksum, FileKind::Pom)
    }

    pub fn write(&self, path: &Path, data: &[u8]) -> KeeperResult<()> {
        keeper_util::fs::write_file(path, data).map_err(|e| KeeperError::cache_io(path, e))
    }

    pub fn read(&self, path: &Path) -> KeeperResult<Vec<u8>> {
        fs::read(path).map_err(|e| KeeperError::cache_io(path, e))
    }

    /// Bytes used by everything in the store.
    pub fn size(&self) -> u64 {
        keeper_util::fs::dir_size(&self.root)
    }

    /// Delete the whole store. Returns the bytes freed.
    pub fn clear(&self) -> KeeperResult<u64> {
        if !self.root.exists() {
            return Ok(0);
        }
        let size = self.size();
        fs::remove_dir_all(&self.root).map_err(|e| KeeperError::cache_io(&self.root, e))?;
        Ok(size)
    }
}
