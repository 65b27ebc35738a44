//! Typed fetches against one Maven repository.

use keeper_core::coordinate::{ArtifactCoordinate, FileKind};
use keeper_util::errors::{KeeperError, KeeperResult};
use keeper_util::hash::extract_hash;

use crate::download::{FetchFailure, HttpTransport, Transport};
use crate::repository::{Layout, MavenRepository};

/// Fetches files, checksums, and metadata from a repository.
///
/// Every failure is a [`KeeperError::Network`] naming the identifier the
/// request was made for. Nothing is retried.
#[derive(Debug, Clone)]
pub struct RepositoryClient<T = HttpTransport> {
    repo: MavenRepository,
    transport: T,
}

impl RepositoryClient<HttpTransport> {
    /// A client that talks HTTP(S) to `repo`.
    pub fn http(repo: MavenRepository) -> KeeperResult<Self> {
        let transport = HttpTransport::new(&repo)?;
        Ok(Self::new(repo, transport))
    }
}

impl<T: Transport> RepositoryClient<T> {
    pub fn new(repo: MavenRepository, transport: T) -> Self {
        Self { repo, transport }
    }

    pub fn repository(&self) -> &MavenRepository {
        &self.repo
    }

    async fn get(&self, identifier: &str, url: &str) -> KeeperResult<Vec<u8>> {
        tracing::debug!("GET {url}");
        self.transport
            .get(url)
            .await
            .map_err(|failure: FetchFailure| KeeperError::Network {
                identifier: identifier.to_string(),
                cause: failure.to_string(),
            })
    }

    /// Download one file of `coordinate`.
    pub async fn fetch_file(
        &self,
        coordinate: &ArtifactCoordinate,
        layout: Layout<'_>,
        kind: FileKind,
        classifier: Option<&str>,
    ) -> KeeperResult<Vec<u8>> {
        let url = self.repo.file_url(coordinate, layout, kind, classifier);
        self.get(&coordinate.identifier(), &url).await
    }

    /// Download the `.sha1` sidecar of one file and return the hash it names.
    pub async fn fetch_checksum(
        &self,
        coordinate: &ArtifactCoordinate,
        layout: Layout<'_>,
        kind: FileKind,
        classifier: Option<&str>,
    ) -> KeeperResult<String> {
        let identifier = coordinate.identifier();
        let url = self.repo.checksum_url(coordinate, layout, kind, classifier);
        let body = self.get(&identifier, &url).await?;
        let hash = extract_hash(&String::from_utf8_lossy(&body));
        if hash.is_empty() {
            return Err(KeeperError::Network {
                identifier,
                cause: format!("empty checksum body from {url}"),
            });
        }
        Ok(hash)
    }

    pub async fn fetch_pom(
        &self,
        coordinate: &ArtifactCoordinate,
        layout: Layout<'_>,
    ) -> KeeperResult<Vec<u8>> {
        self.fetch_file(coordinate, layout, FileKind::Pom, None).await
    }

    pub async fn fetch_pom_checksum(
        &self,
        coordinate: &ArtifactCoordinate,
        layout: Layout<'_>,
    ) -> KeeperResult<String> {
        self.fetch_checksum(coordinate, layout, FileKind::Pom, None)
            .await
    }

    /// Artifact-level `maven-metadata.xml`.
    pub async fn fetch_metadata(&self, group: &str, artifact: &str) -> KeeperResult<Vec<u8>> {
        let url = self.repo.metadata_url(group, artifact);
        self.get(&format!("{group}:{artifact}"), &url).await
    }

    /// Version-level `maven-metadata.xml` of a snapshot coordinate.
    pub async fn fetch_snapshot_metadata(
        &self,
        coordinate: &ArtifactCoordinate,
    ) -> KeeperResult<Vec<u8>> {
        let url = self.repo.snapshot_metadata_url(
            &coordinate.group,
            &coordinate.artifact,
            coordinate.base_version(),
        );
        self.get(&coordinate.identifier(), &url).await
    }
}
