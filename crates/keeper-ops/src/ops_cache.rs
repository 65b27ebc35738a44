//! Operation: inspect and maintain the fingerprint cache and manifest store.

use keeper_core::config::KeeperConfig;
use keeper_maven::fingerprint::FingerprintCache;
use keeper_maven::store::ContentStore;
use keeper_util::errors::KeeperError;
use keeper_util::fs::format_size;
use keeper_util::progress;

/// Print cache statistics.
pub fn stats(config: &KeeperConfig) -> miette::Result<()> {
    let mut cache = FingerprintCache::new(config.cache_dir());
    let store = ContentStore::new(config.store_dir());

    let entries = cache.entries()?;
    let checksums = entries
        .keys()
        .filter(|k| k.as_str() != keeper_maven::fingerprint::PUBLISHING_PROJECT_KEY)
        .count();

    println!("Fingerprint cache: {}", cache.path().display());
    println!("  Entries: {checksums}");
    println!("Manifest store: {}", store.root().display());
    println!("  Size:    {}", format_size(store.size()));
    Ok(())
}

/// Print one cache entry.
pub fn get(config: &KeeperConfig, key: &str) -> miette::Result<()> {
    let mut cache = FingerprintCache::new(config.cache_dir());
    match cache.get(key)? {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => Err(KeeperError::Generic {
            message: format!("no cache entry for '{key}'"),
        }
        .into()),
    }
}

/// Remove one cache entry so the next resolution re-fetches it.
pub fn remove(config: &KeeperConfig, key: &str) -> miette::Result<()> {
    let mut cache = FingerprintCache::new(config.cache_dir());
    match cache.remove(key)? {
        Some(_) => progress::status("Removed", key),
        None => progress::status_warn("Missing", &format!("no cache entry for '{key}'")),
    }
    Ok(())
}

/// Show or set the last publishing project marker.
pub fn publishing(config: &KeeperConfig, set: Option<&str>) -> miette::Result<()> {
    let mut cache = FingerprintCache::new(config.cache_dir());
    match set {
        Some(path) => {
            cache.set_publishing_project(path)?;
            progress::status("Updated", &format!("publishing project is {path}"));
        }
        None => match cache.publishing_project()? {
            Some(path) => println!("{path}"),
            None => progress::status_warn("Missing", "no publishing project recorded"),
        },
    }
    Ok(())
}

/// Delete the manifest store and the fingerprint file.
pub fn clean(config: &KeeperConfig) -> miette::Result<()> {
    let store = ContentStore::new(config.store_dir());
    let freed = store.clear()?;
    if freed > 0 {
        progress::status("Cleared", &format!("manifest store ({} freed)", format_size(freed)));
    }

    let cache = FingerprintCache::new(config.cache_dir());
    let path = cache.path();
    if path.is_file() {
        let freed = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        std::fs::remove_file(&path).map_err(|e| KeeperError::cache_io(&path, e))?;
        progress::status("Cleared", &format!("fingerprint cache ({} freed)", format_size(freed)));
    }
    Ok(())
}
