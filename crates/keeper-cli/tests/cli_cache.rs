use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn keeper_cmd() -> Command {
    Command::cargo_bin("keeper").unwrap()
}

/// A project with `keeper.toml` keeping its cache in `./cache`.
fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("keeper.toml"),
        "[repository]\nurl = \"http://127.0.0.1:9/maven\"\n\n[cache]\ndir = \"cache\"\n",
    )
    .unwrap();
    tmp
}

#[test]
fn test_cache_get_reads_escaped_keys() {
    let tmp = project();
    fs::create_dir_all(tmp.path().join("cache")).unwrap();
    fs::write(
        tmp.path().join("cache/cache.properties"),
        "#written by an older build\nacme\\:core\\:2.0.pom=0123abcd\n",
    )
    .unwrap();

    keeper_cmd()
        .current_dir(tmp.path())
        .args(["cache", "get", "acme:core:2.0.pom"])
        .assert()
        .success()
        .stdout(predicate::str::diff("0123abcd\n"));
}

#[test]
fn test_cache_get_missing_key_fails() {
    let tmp = project();

    keeper_cmd()
        .current_dir(tmp.path())
        .args(["cache", "get", "acme:missing:1.0.pom"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no cache entry"));
}

#[test]
fn test_cache_publishing_round_trip() {
    let tmp = project();

    keeper_cmd()
        .current_dir(tmp.path())
        .args(["cache", "publishing", "--set", "/work/app"])
        .assert()
        .success();

    keeper_cmd()
        .current_dir(tmp.path())
        .args(["cache", "publishing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/work/app"));

    let content = fs::read_to_string(tmp.path().join("cache/cache.properties")).unwrap();
    assert!(content.contains("publishingProject=/work/app"));
}

#[test]
fn test_cache_remove_and_clean() {
    let tmp = project();
    fs::create_dir_all(tmp.path().join("cache/files/acme/core/2.0/abc")).unwrap();
    fs::write(tmp.path().join("cache/files/acme/core/2.0/abc/core-2.0.pom"), "<project/>").unwrap();
    fs::write(
        tmp.path().join("cache/cache.properties"),
        "acme:core:2.0.pom=abc\n",
    )
    .unwrap();

    keeper_cmd()
        .current_dir(tmp.path())
        .args(["cache", "remove", "acme:core:2.0.pom"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed"));

    keeper_cmd()
        .current_dir(tmp.path())
        .args(["cache", "clean"])
        .assert()
        .success();

    assert!(!tmp.path().join("cache/files").exists());
    assert!(!tmp.path().join("cache/cache.properties").exists());
}

#[test]
fn test_cache_stats_with_explicit_config() {
    let tmp = project();
    let elsewhere = TempDir::new().unwrap();

    keeper_cmd()
        .current_dir(elsewhere.path())
        .arg("--config")
        .arg(tmp.path().join("keeper.toml"))
        .args(["cache", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entries: 0"));
}
