use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn keeper_cmd() -> Command {
    Command::cargo_bin("keeper").unwrap()
}

#[test]
fn test_help_lists_commands() {
    keeper_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("affected"))
        .stdout(predicate::str::contains("snapshot"))
        .stdout(predicate::str::contains("cache"));
}

#[test]
fn test_affected_without_repository_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("keeper.toml"), "[resolve]\ntracked = [\"acme:\"]\n").unwrap();

    keeper_cmd()
        .current_dir(tmp.path())
        .args(["affected", "acme:app:1.0", "--target", "acme:core"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing [repository].url"));
}

#[test]
fn test_affected_untracked_module_needs_no_network() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("keeper.toml"),
        "[repository]\nurl = \"http://127.0.0.1:9/maven\"\n\n[cache]\ndir = \"cache\"\n\n[resolve]\ntracked = [\"other:\"]\n",
    )
    .unwrap();

    keeper_cmd()
        .current_dir(tmp.path())
        .args(["affected", "acme:app:1.0", "--target", "acme:core", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"affected\": []"));
}

#[test]
fn test_affected_rejects_unknown_substitution_kind() {
    keeper_cmd()
        .args(["affected", "acme:app:1.0", "--target", "acme:core", "--as", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid dependency type"));
}

#[test]
fn test_affected_requires_target() {
    keeper_cmd()
        .args(["affected", "acme:app:1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--target"));
}

#[test]
fn test_snapshot_rejects_release_coordinate() {
    let tmp = TempDir::new().unwrap();

    keeper_cmd()
        .current_dir(tmp.path())
        .args(["snapshot", "acme:core:2.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a snapshot version"));
}

#[test]
fn test_malformed_coordinate_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("keeper.toml"),
        "[repository]\nurl = \"http://127.0.0.1:9/maven\"\n",
    )
    .unwrap();

    keeper_cmd()
        .current_dir(tmp.path())
        .args(["affected", "acme-app", "--target", "acme:core"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("acme-app"));
}
