use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use tempfile::tempdir;

fn write_config(dir: &Path) -> PathBuf {
    let config_path = dir.join("config.toml");
    let db_path = dir.join("state.db");
    fs::write(
        &config_path,
        format!("state_db_path = {:?}\n", db_path.display()),
    )
    .unwrap();
    config_path
}

#[test]
fn rules_set_list_remove_roundtrip() {
    let dir = tempdir().unwrap();
    let config_path = write_config(dir.path());

    let mut set_cmd = cargo_bin_cmd!("gh-radar");
    set_cmd
        .arg("rules")
        .arg("--config")
        .arg(&config_path)
        .arg("set")
        .arg("acme/api")
        .arg("--labeled")
        .arg("bug,good-first-issue")
        .arg("--comment-patterns")
        .arg("urgent")
        .assert()
        .success()
        .stdout(contains("saved rule for acme/api"));

    let mut list_cmd = cargo_bin_cmd!("gh-radar");
    list_cmd
        .arg("rules")
        .arg("--config")
        .arg(&config_path)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("acme/api"))
        .stdout(contains("bug, good-first-issue"))
        .stdout(contains("urgent"));

    let mut remove_cmd = cargo_bin_cmd!("gh-radar");
    remove_cmd
        .arg("rules")
        .arg("--config")
        .arg(&config_path)
        .arg("remove")
        .arg("acme/api")
        .assert()
        .success()
        .stdout(contains("removed rule for acme/api"));

    let mut empty_cmd = cargo_bin_cmd!("gh-radar");
    empty_cmd
        .arg("rules")
        .arg("--config")
        .arg(&config_path)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("no rules configured"));
}

#[test]
fn rules_set_rejects_invalid_repo_key() {
    let dir = tempdir().unwrap();
    let config_path = write_config(dir.path());

    let mut cmd = cargo_bin_cmd!("gh-radar");
    cmd.arg("rules")
        .arg("--config")
        .arg(&config_path)
        .arg("set")
        .arg("not-a-repo")
        .arg("--labeled")
        .arg("bug")
        .assert()
        .failure()
        .stderr(contains("expected owner/repo format"));
}

#[test]
fn inbox_list_reports_empty_inbox() {
    let dir = tempdir().unwrap();
    let config_path = write_config(dir.path());

    let mut cmd = cargo_bin_cmd!("gh-radar");
    cmd.arg("inbox")
        .arg("--config")
        .arg(&config_path)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("inbox empty"));
}

#[test]
fn once_without_token_reports_not_configured() {
    let dir = tempdir().unwrap();
    let config_path = write_config(dir.path());

    let mut cmd = cargo_bin_cmd!("gh-radar");
    cmd.env_remove("GH_RADAR_TOKEN")
        .env_remove("GITHUB_TOKEN")
        .arg("once")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(contains("not configured"));
}
