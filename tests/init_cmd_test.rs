use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use tempfile::tempdir;

#[test]
fn init_creates_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut cmd = cargo_bin_cmd!("gh-radar");
    cmd.arg("init").arg("--path").arg(&path).assert().success();

    let content = fs::read_to_string(path).unwrap();
    assert!(content.contains("[github]"));
    assert!(content.contains("[notifications]"));
    assert!(content.contains("[fetch]"));
}

#[test]
fn init_prevents_overwrite_without_force() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "interval_minutes = 5\n").unwrap();

    let mut fail_cmd = cargo_bin_cmd!("gh-radar");
    fail_cmd
        .arg("init")
        .arg("--path")
        .arg(&path)
        .assert()
        .failure()
        .stderr(contains("use --force to overwrite"));

    let mut ok_cmd = cargo_bin_cmd!("gh-radar");
    ok_cmd
        .arg("init")
        .arg("--path")
        .arg(&path)
        .arg("--force")
        .assert()
        .success();

    let content = fs::read_to_string(path).unwrap();
    assert!(content.contains("[github]"));
}

#[test]
fn init_reset_state_recreates_db() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let db_path = dir.path().join("state.db");
    fs::write(
        &config_path,
        format!("state_db_path = {:?}\n", db_path.display()),
    )
    .unwrap();
    fs::write(&db_path, b"not a database").unwrap();

    let mut cmd = cargo_bin_cmd!("gh-radar");
    cmd.arg("init")
        .arg("--reset-state")
        .arg("--path")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(contains("reset state db"));

    assert!(db_path.exists());
}
