use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

const MANIFEST: &str = r#"{
    "quasar": {
        "owner": "quasar-analytics",
        "repo": "quasar",
        "tag": "v1.2.3",
        "prefix": "quasar-web",
        "plugin-string": "plugin"
    }
}"#;

fn relsync() -> Command {
    let mut cmd = Command::cargo_bin("relsync").unwrap();
    cmd.env("RELSYNC_NO_PROGRESS", "1");
    cmd
}

fn write_manifest(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("versions.json");
    std::fs::write(&path, MANIFEST).unwrap();
    path
}

#[test]
fn help_lists_commands() {
    relsync()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn missing_manifest_fails_with_suggestion() {
    let dir = tempfile::tempdir().unwrap();
    relsync()
        .args(["--config", dir.path().join("versions.json").to_str().unwrap(), "sync"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("manifest not found"))
        .stderr(predicate::str::contains("suggestion"));
}

#[test]
fn malformed_manifest_fails_with_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("versions.json");
    std::fs::write(&path, "{ not json").unwrap();

    relsync()
        .args(["--config", path.to_str().unwrap(), "sync"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse manifest"));
}

#[test]
fn unknown_target_fails_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path());

    relsync()
        .args(["--config", manifest.to_str().unwrap(), "sync", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("target 'nope' is not defined"));
}

#[test]
fn check_reports_missing_artifact_as_needing_update() {
    // No artifact installed: the probe resolves false without ever spawning
    // the launcher, so this path stays fully offline.
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path());
    let root = dir.path().join("quasar");

    relsync()
        .args([
            "--config",
            manifest.to_str().unwrap(),
            "--root",
            root.to_str().unwrap(),
            "check",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("needs an update to v1.2.3"));
}

#[test]
fn check_defaults_to_the_sole_target() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path());
    let root = dir.path().join("quasar");

    relsync()
        .args([
            "--config",
            manifest.to_str().unwrap(),
            "--root",
            root.to_str().unwrap(),
            "check",
            "quasar",
        ])
        .assert()
        .success();
}

#[test]
fn quiet_and_verbose_are_mutually_exclusive() {
    relsync().args(["--quiet", "--verbose", "check"]).assert().failure();
}
