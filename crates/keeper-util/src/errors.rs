use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all keeper operations.
#[derive(Debug, Error, Diagnostic)]
pub enum KeeperError {
    /// I/O operation failed outside of the caches.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A checksum, manifest, or metadata request failed.
    ///
    /// Always fatal for the resolution that issued it.
    #[error("Network error for {identifier}: {cause}")]
    #[diagnostic(help("Check the repository URL and credentials in keeper.toml"))]
    Network { identifier: String, cause: String },

    /// A manifest could not be parsed.
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Snapshot metadata was fetched but does not name a build.
    #[error("Malformed metadata for {identifier}: {message}")]
    MetadataFormat { identifier: String, message: String },

    /// The fingerprint cache or content store could not be created, read, or written.
    #[error("Cache I/O error at {}: {source}", path.display())]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid or missing configuration (e.g. keeper.toml).
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check your keeper.toml"))]
    Config { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

impl KeeperError {
    /// Wrap an I/O failure on a cache path.
    pub fn cache_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheIo {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for results carrying a [`KeeperError`].
pub type KeeperResult<T> = Result<T, KeeperError>;
