use sha1::{Digest, Sha1};

/// Compute the SHA-1 hash of a byte slice, returning a lowercase hex string.
///
/// SHA-1 is what Maven repositories publish in `.sha1` sidecars, and what
/// keys the content-addressed manifest store.
pub fn sha1_bytes(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Extract the hex hash from a checksum sidecar body.
///
/// Sidecars may contain just the hash, or `hash  filename`.
pub fn extract_hash(content: &str) -> String {
    content.split_whitespace().next().unwrap_or("").to_string()
}
