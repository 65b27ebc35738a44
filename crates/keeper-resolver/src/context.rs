//! Everything one resolution run needs besides its accumulator and memo.

use keeper_core::config::{KeeperConfig, ParseFailurePolicy};
use keeper_core::coordinate::{ArtifactCoordinate, Target};
use keeper_core::tracked::TrackedUniverse;
use keeper_maven::client::RepositoryClient;
use keeper_maven::download::{HttpTransport, Transport};
use keeper_maven::fingerprint::FingerprintCache;
use keeper_maven::repository::MavenRepository;
use keeper_maven::store::ContentStore;
use keeper_util::errors::KeeperResult;

/// Decides which identifiers belong to the tracked library universe.
/// Untracked identifiers are never fetched.
pub trait UniverseFilter {
    fn is_tracked(&self, identifier: &str) -> bool;
}

impl UniverseFilter for TrackedUniverse {
    fn is_tracked(&self, identifier: &str) -> bool {
        TrackedUniverse::is_tracked(self, identifier)
    }
}

impl<F> UniverseFilter for F
where
    F: Fn(&str) -> bool,
{
    fn is_tracked(&self, identifier: &str) -> bool {
        self(identifier)
    }
}

/// Decides whether a coordinate belongs to the target family.
pub trait TargetMatcher {
    fn matches(&self, target: &Target, coordinate: &ArtifactCoordinate) -> bool;
}

/// Same group and artifact, any version.
#[derive(Debug, Clone, Copy, Default)]
pub struct SameModule;

impl TargetMatcher for SameModule {
    fn matches(&self, target: &Target, coordinate: &ArtifactCoordinate) -> bool {
        target.matches(coordinate)
    }
}

impl<F> TargetMatcher for F
where
    F: Fn(&Target, &ArtifactCoordinate) -> bool,
{
    fn matches(&self, target: &Target, coordinate: &ArtifactCoordinate) -> bool {
        self(target, coordinate)
    }
}

/// Repository client, caches, and predicates for a resolution.
pub struct ResolveContext<T = HttpTransport> {
    client: RepositoryClient<T>,
    cache: FingerprintCache,
    store: ContentStore,
    tracked: Box<dyn UniverseFilter>,
    matcher: Box<dyn TargetMatcher>,
    on_parse_error: ParseFailurePolicy,
}

impl ResolveContext<HttpTransport> {
    /// Context for the repository, caches, and tracked universe in `config`.
    pub fn from_config(config: &KeeperConfig) -> KeeperResult<Self> {
        let repo = MavenRepository::from_config(config)?;
        let ctx = Self::new(
            RepositoryClient::http(repo)?,
            FingerprintCache::new(config.cache_dir()),
            ContentStore::new(config.store_dir()),
            config.tracked_universe()?,
        );
        Ok(ctx.with_parse_policy(config.resolve.on_parse_error))
    }
}

impl<T: Transport> ResolveContext<T> {
    pub fn new(
        client: RepositoryClient<T>,
        cache: FingerprintCache,
        store: ContentStore,
        tracked: impl UniverseFilter + 'static,
    ) -> Self {
        Self {
            client,
            cache,
            store,
            tracked: Box::new(tracked),
            matcher: Box::new(SameModule),
            on_parse_error: ParseFailurePolicy::default(),
        }
    }

    /// Replace the default same-group-and-artifact target match.
    pub fn with_matcher(mut self, matcher: impl TargetMatcher + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    pub fn with_parse_policy(mut self, policy: ParseFailurePolicy) -> Self {
        self.on_parse_error = policy;
        self
    }

    pub fn client(&self) -> &RepositoryClient<T> {
        &self.client
    }

    pub fn cache_mut(&mut self) -> &mut FingerprintCache {
        &mut self.cache
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn parse_policy(&self) -> ParseFailurePolicy {
        self.on_parse_error
    }

    pub fn is_tracked(&self, identifier: &str) -> bool {
        self.tracked.is_tracked(identifier)
    }

    pub fn matches_target(&self, target: &Target, coordinate: &ArtifactCoordinate) -> bool {
        self.matcher.matches(target, coordinate)
    }
}
