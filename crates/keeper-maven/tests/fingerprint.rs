use keeper_core::coordinate::{ArtifactCoordinate, FileKind};
use keeper_maven::fingerprint::{FingerprintCache, CACHE_FILE};
use tempfile::TempDir;

#[test]
fn creates_directory_and_file_lazily() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("nested").join("cache");
    let mut cache = FingerprintCache::new(&dir);
    assert!(!dir.exists());

    assert_eq!(cache.get("missing").unwrap(), None);
    assert!(dir.join(CACHE_FILE).is_file());
}

#[test]
fn set_writes_through() {
    let tmp = TempDir::new().unwrap();
    let c = ArtifactCoordinate::new("acme", "core", "2.0");

    let mut cache = FingerprintCache::new(tmp.path());
    cache.set_checksum(&c, FileKind::Pom, "abc123").unwrap();

    let mut reopened = FingerprintCache::new(tmp.path());
    assert_eq!(
        reopened.get_checksum(&c, FileKind::Pom).unwrap().as_deref(),
        Some("abc123")
    );
    let content = std::fs::read_to_string(tmp.path().join(CACHE_FILE)).unwrap();
    assert!(content.contains("acme\\:core\\:2.0.pom=abc123"));
}

#[test]
fn reads_java_escaped_keys() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join(CACHE_FILE),
        "#Sat Jun 15 14:30:22 UTC 2024\nacme\\:core\\:2.0.pom=abc123\npublishingProject=/work/app\n",
    )
    .unwrap();

    let mut cache = FingerprintCache::new(tmp.path());
    let c = ArtifactCoordinate::new("acme", "core", "2.0");
    assert_eq!(
        cache.get_checksum(&c, FileKind::Pom).unwrap().as_deref(),
        Some("abc123")
    );
    assert_eq!(cache.publishing_project().unwrap().as_deref(), Some("/work/app"));
}

#[test]
fn remove_and_entries() {
    let tmp = TempDir::new().unwrap();
    let mut cache = FingerprintCache::new(tmp.path());
    cache.set("b.pom", "2").unwrap();
    cache.set("a.pom", "1").unwrap();
    cache.set_publishing_project("/work/app").unwrap();

    let keys: Vec<String> = cache.entries().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["a.pom", "b.pom", "publishingProject"]);

    assert_eq!(cache.remove("a.pom").unwrap().as_deref(), Some("1"));
    assert_eq!(cache.remove("a.pom").unwrap(), None);

    let mut reopened = FingerprintCache::new(tmp.path());
    assert_eq!(reopened.entries().unwrap().len(), 2);
}

#[test]
fn unwritable_cache_dir_is_cache_io_error() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let mut cache = FingerprintCache::new(blocker.join("cache"));
    let err = cache.get("x").unwrap_err();
    assert!(matches!(
        err,
        keeper_util::errors::KeeperError::CacheIo { .. }
    ));
}
