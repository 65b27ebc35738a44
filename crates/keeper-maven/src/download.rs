//! Single-attempt HTTP downloads from a Maven repository.
//!
//! A failed request is reported once and never retried; the resolver treats
//! any failure as fatal for the whole run.

use std::fmt;
use std::time::Duration;

use reqwest::Client;

use keeper_util::errors::{KeeperError, KeeperResult};

use crate::auth;
use crate::repository::MavenRepository;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Why a single GET did not produce a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The server answered with a non-success status.
    Status { status: u16, url: String },
    /// The request never completed (connect, TLS, timeout, body read).
    Transport { url: String, message: String },
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status { status, url } => write!(f, "HTTP {status} from {url}"),
            Self::Transport { url, message } => write!(f, "request to {url} failed: {message}"),
        }
    }
}

/// Fetches raw bytes for a URL.
///
/// The seam between the repository client and the network; tests drive the
/// client through an in-memory implementation.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchFailure>;
}

/// Build a shared reqwest client for repository downloads.
pub fn build_client() -> KeeperResult<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("repository-keeper/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| KeeperError::Generic {
            message: format!("Failed to create HTTP client: {e}"),
        })
}

/// [`Transport`] over HTTP(S) with the repository's credentials.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    repo: MavenRepository,
}

impl HttpTransport {
    pub fn new(repo: &MavenRepository) -> KeeperResult<Self> {
        tracing::debug!(
            "Using repository {} ({})",
            repo.url,
            if repo.has_auth() { "authenticated" } else { "anonymous" }
        );
        Ok(Self {
            client: build_client()?,
            repo: repo.clone(),
        })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchFailure> {
        let request = auth::apply_auth(self.client.get(url), &self.repo);
        let resp = request.send().await.map_err(|e| FetchFailure::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchFailure::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = resp.bytes().await.map_err(|e| FetchFailure::Transport {
            url: url.to_string(),
            message: format!("failed to read body: {e}"),
        })?;
        tracing::debug!("Fetched {} bytes from {url}", bytes.len());
        Ok(bytes.to_vec())
    }
}
