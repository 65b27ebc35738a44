#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use keeper_core::coordinate::{ArtifactCoordinate, FileKind};
use keeper_core::tracked::TrackedUniverse;
use keeper_maven::client::RepositoryClient;
use keeper_maven::download::{FetchFailure, Transport};
use keeper_maven::fingerprint::FingerprintCache;
use keeper_maven::repository::{Layout, MavenRepository};
use keeper_maven::store::ContentStore;
use keeper_resolver::context::ResolveContext;
use keeper_util::hash::sha1_bytes;

pub const BASE_URL: &str = "https://repo.test/maven";

/// In-memory repository that records every requested URL.
#[derive(Clone, Default)]
pub struct FakeRepo {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Default)]
struct Inner {
    files: HashMap<String, Vec<u8>>,
    requests: Vec<String>,
}

impl Transport for FakeRepo {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchFailure> {
        let mut inner = self.inner.borrow_mut();
        inner.requests.push(url.to_string());
        inner
            .files
            .get(url)
            .cloned()
            .ok_or_else(|| FetchFailure::Status {
                status: 404,
                url: url.to_string(),
            })
    }
}

pub fn repository() -> MavenRepository {
    MavenRepository::new("fake", BASE_URL)
}

pub fn coord(identifier: &str) -> ArtifactCoordinate {
    identifier.parse().unwrap()
}

pub fn pom_xml(module: &ArtifactCoordinate, dependencies: &[&str]) -> String {
    let deps: String = dependencies
        .iter()
        .map(|d| {
            let d = coord(d);
            format!(
                "    <dependency><groupId>{}</groupId><artifactId>{}</artifactId><version>{}</version></dependency>\n",
                d.group, d.artifact, d.version
            )
        })
        .collect();
    format!(
        "<project>\n  <groupId>{}</groupId>\n  <artifactId>{}</artifactId>\n  <version>{}</version>\n  <dependencies>\n{deps}  </dependencies>\n</project>\n",
        module.group, module.artifact, module.version
    )
}

impl FakeRepo {
    pub fn put(&self, url: String, body: impl Into<Vec<u8>>) {
        self.inner.borrow_mut().files.insert(url, body.into());
    }

    /// Publish a release POM and its `.sha1` sidecar.
    pub fn publish(&self, identifier: &str, dependencies: &[&str]) {
        let module = coord(identifier);
        self.publish_raw(identifier, pom_xml(&module, dependencies).into_bytes());
    }

    /// Publish arbitrary manifest bytes for a release coordinate.
    pub fn publish_raw(&self, identifier: &str, body: Vec<u8>) {
        let module = coord(identifier);
        let repo = repository();
        self.put(
            repo.checksum_url(&module, Layout::Release, FileKind::Pom, None),
            sha1_bytes(&body),
        );
        self.put(repo.file_url(&module, Layout::Release, FileKind::Pom, None), body);
    }

    /// Publish a snapshot build: version-level metadata, POM, and sidecar.
    pub fn publish_snapshot(&self, identifier: &str, build: &str, dependencies: &[&str]) {
        let module = coord(identifier);
        let repo = repository();
        let metadata = format!(
            "<metadata><version>{}</version><versioning><snapshotVersions>\
             <snapshotVersion><extension>pom</extension><value>{build}</value></snapshotVersion>\
             </snapshotVersions></versioning></metadata>",
            module.version
        );
        self.put(
            repo.snapshot_metadata_url(&module.group, &module.artifact, module.base_version()),
            metadata,
        );
        let body = pom_xml(&module, dependencies).into_bytes();
        let layout = Layout::Snapshot { build };
        self.put(
            repo.checksum_url(&module, layout, FileKind::Pom, None),
            sha1_bytes(&body),
        );
        self.put(repo.file_url(&module, layout, FileKind::Pom, None), body);
    }

    pub fn requests(&self) -> Vec<String> {
        self.inner.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.borrow().requests.len()
    }

    pub fn clear_requests(&self) {
        self.inner.borrow_mut().requests.clear();
    }
}

/// A context over `repo` caching under `cache_root`.
pub fn context(repo: &FakeRepo, cache_root: &Path, tracked: &[&str]) -> ResolveContext<FakeRepo> {
    let patterns: Vec<String> = tracked.iter().map(|p| p.to_string()).collect();
    ResolveContext::new(
        RepositoryClient::new(repository(), repo.clone()),
        FingerprintCache::new(cache_root),
        ContentStore::new(cache_root.join("files")),
        TrackedUniverse::from_patterns(&patterns).unwrap(),
    )
}
