//! Maven repository abstraction: URL layout for release and snapshot files.

use keeper_core::config::KeeperConfig;
use keeper_core::coordinate::{ArtifactCoordinate, FileKind};
use keeper_util::errors::KeeperResult;

/// Extension of the checksum sidecar published next to every file.
pub const CHECKSUM_EXTENSION: &str = "sha1";

/// A configured Maven repository with optional credentials.
#[derive(Debug, Clone)]
pub struct MavenRepository {
    pub name: String,
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Where a coordinate's files live in the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout<'a> {
    /// `{group}/{artifact}/{version}/{artifact}-{version}.{ext}`
    Release,
    /// `{group}/{artifact}/{base}-SNAPSHOT/{artifact}-{build}.{ext}`, where
    /// `build` is the timestamped version from the snapshot metadata.
    Snapshot { build: &'a str },
}

impl MavenRepository {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.trim_end_matches('/').to_string(),
            username: None,
            password: None,
        }
    }

    /// The repository named in `[repository]` of `keeper.toml`.
    pub fn from_config(config: &KeeperConfig) -> KeeperResult<Self> {
        let mut repo = Self::new("default", config.repository_url()?);
        repo.username = config.repository.username.clone().filter(|s| !s.is_empty());
        repo.password = config.repository.password.clone().filter(|s| !s.is_empty());
        Ok(repo)
    }

    /// Group ids use `/` in repository paths:
    /// `com.acme.feature` becomes `com/acme/feature`.
    pub fn group_path(group: &str) -> String {
        group.replace('.', "/")
    }

    fn version_dir(coordinate: &ArtifactCoordinate, layout: Layout<'_>) -> String {
        match layout {
            Layout::Release => coordinate.version.clone(),
            Layout::Snapshot { .. } => format!("{}-SNAPSHOT", coordinate.base_version()),
        }
    }

    fn file_name(
        coordinate: &ArtifactCoordinate,
        layout: Layout<'_>,
        kind: FileKind,
        classifier: Option<&str>,
    ) -> String {
        let version = match layout {
            Layout::Release => coordinate.version.as_str(),
            Layout::Snapshot { build } => build,
        };
        let artifact = &coordinate.artifact;
        let ext = kind.extension();
        match classifier {
            Some(c) => format!("{artifact}-{version}-{c}.{ext}"),
            None => format!("{artifact}-{version}.{ext}"),
        }
    }

    /// Full URL to a file of `coordinate`.
    pub fn file_url(
        &self,
        coordinate: &ArtifactCoordinate,
        layout: Layout<'_>,
        kind: FileKind,
        classifier: Option<&str>,
    ) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.url,
            Self::group_path(&coordinate.group),
            coordinate.artifact,
            Self::version_dir(coordinate, layout),
            Self::file_name(coordinate, layout, kind, classifier)
        )
    }

    /// URL of the `.sha1` sidecar of a file.
    pub fn checksum_url(
        &self,
        coordinate: &ArtifactCoordinate,
        layout: Layout<'_>,
        kind: FileKind,
        classifier: Option<&str>,
    ) -> String {
        format!(
            "{}.{CHECKSUM_EXTENSION}",
            self.file_url(coordinate, layout, kind, classifier)
        )
    }

    /// URL to the artifact-level `maven-metadata.xml` (release listing).
    pub fn metadata_url(&self, group: &str, artifact: &str) -> String {
        format!(
            "{}/{}/{}/maven-metadata.xml",
            self.url,
            Self::group_path(group),
            artifact
        )
    }

    /// URL to the version-level `maven-metadata.xml` of a snapshot.
    pub fn snapshot_metadata_url(&self, group: &str, artifact: &str, base_version: &str) -> String {
        format!(
            "{}/{}/{}/{}-SNAPSHOT/maven-metadata.xml",
            self.url,
            Self::group_path(group),
            artifact,
            base_version
        )
    }

    /// Whether this repository has authentication configured.
    pub fn has_auth(&self) -> bool {
        self.username.is_some() || self.password.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> MavenRepository {
        MavenRepository::new("test", "https://repo.example.com/maven/")
    }

    #[test]
    fn group_path_replaces_dots() {
        assert_eq!(MavenRepository::group_path("com.acme.feature"), "com/acme/feature");
    }

    #[test]
    fn release_pom_url() {
        let c = ArtifactCoordinate::new("com.acme", "core", "2.0");
        assert_eq!(
            repo().file_url(&c, Layout::Release, FileKind::Pom, None),
            "https://repo.example.com/maven/com/acme/core/2.0/core-2.0.pom"
        );
    }

    #[test]
    fn release_checksum_url_with_classifier() {
        let c = ArtifactCoordinate::new("com.acme", "core", "2.0");
        assert_eq!(
            repo().checksum_url(&c, Layout::Release, FileKind::Jar, Some("sources")),
            "https://repo.example.com/maven/com/acme/core/2.0/core-2.0-sources.jar.sha1"
        );
    }

    #[test]
    fn snapshot_pom_url_uses_build_version() {
        let c = ArtifactCoordinate::new("com.acme", "core", "2.1-SNAPSHOT");
        let layout = Layout::Snapshot {
            build: "2.1-20240615.143022-42",
        };
        assert_eq!(
            repo().file_url(&c, layout, FileKind::Pom, None),
            "https://repo.example.com/maven/com/acme/core/2.1-SNAPSHOT/core-2.1-20240615.143022-42.pom"
        );
    }

    #[test]
    fn metadata_urls() {
        let r = repo();
        assert_eq!(
            r.metadata_url("com.acme", "core"),
            "https://repo.example.com/maven/com/acme/core/maven-metadata.xml"
        );
        assert_eq!(
            r.snapshot_metadata_url("com.acme", "core", "2.1"),
            "https://repo.example.com/maven/com/acme/core/2.1-SNAPSHOT/maven-metadata.xml"
        );
    }

    #[test]
    fn auth_detection() {
        let mut r = repo();
        assert!(!r.has_auth());
        r.password = Some("token".to_string());
        assert!(r.has_auth());
    }
}
