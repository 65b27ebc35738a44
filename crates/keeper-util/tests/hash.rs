use keeper_util::hash::{extract_hash, sha1_bytes};

#[test]
fn test_sha1_bytes_empty() {
    assert_eq!(sha1_bytes(b""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
}

#[test]
fn test_sha1_bytes_hello() {
    assert_eq!(
        sha1_bytes(b"hello"),
        "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"
    );
}

#[test]
fn test_sha1_bytes_deterministic() {
    assert_eq!(sha1_bytes(b"keeper"), sha1_bytes(b"keeper"));
}

#[test]
fn test_extract_hash_simple() {
    assert_eq!(extract_hash("abc123\n"), "abc123");
}

#[test]
fn test_extract_hash_with_filename() {
    assert_eq!(extract_hash("abc123  my-lib-1.0.pom\n"), "abc123");
}

#[test]
fn test_extract_hash_blank() {
    assert_eq!(extract_hash("  \n"), "");
}
