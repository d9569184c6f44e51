//! `init` must never write through a symlinked settings file.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::symlink;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn lintrelay_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lintrelay"))
}

#[test]
fn test_init_force_replaces_symlink_without_touching_target() {
    let dir = tempdir().unwrap();
    let settings_path = dir.path().join(".lintrelay.jsonc");
    let target_path = dir.path().join("target_file");

    fs::write(&target_path, "Important Data").unwrap();
    symlink(&target_path, &settings_path).unwrap();

    lintrelay_cmd()
        .current_dir(dir.path())
        .arg("init")
        .arg("--force")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&target_path).unwrap(), "Important Data");

    let meta = fs::symlink_metadata(&settings_path).unwrap();
    assert!(meta.is_file());
    assert!(!meta.is_symlink());
    assert!(
        fs::read_to_string(&settings_path)
            .unwrap()
            .contains("\"sourceId\"")
    );
}

#[test]
fn test_init_without_force_rejects_existing_symlink() {
    let dir = tempdir().unwrap();
    let settings_path = dir.path().join(".lintrelay.jsonc");
    let target_path = dir.path().join("target_file");

    fs::write(&target_path, r#"{ "tool": "eslint_d" }"#).unwrap();
    symlink(&target_path, &settings_path).unwrap();

    lintrelay_cmd()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(
        fs::read_to_string(&target_path).unwrap(),
        r#"{ "tool": "eslint_d" }"#
    );
    assert!(fs::symlink_metadata(&settings_path).unwrap().is_symlink());
}

#[test]
fn test_init_rejects_dangling_symlink() {
    let dir = tempdir().unwrap();
    let settings_path = dir.path().join(".lintrelay.jsonc");
    let missing_target = dir.path().join("not_created_yet");

    symlink(&missing_target, &settings_path).unwrap();

    lintrelay_cmd()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .failure();

    assert!(!missing_target.exists());
}
