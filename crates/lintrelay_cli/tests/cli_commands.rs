//! Integration tests for CLI commands
//!
//! Tests for init and serve.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a command for the lintrelay CLI
fn lintrelay_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lintrelay"))
}

mod init_command {
    use super::*;

    #[test]
    fn creates_new_settings_file() {
        let temp_dir = TempDir::new().unwrap();

        lintrelay_cmd()
            .current_dir(temp_dir.path())
            .arg("init")
            .assert()
            .success()
            .stderr(predicate::str::contains("Created .lintrelay.jsonc"));

        let content = fs::read_to_string(temp_dir.path().join(".lintrelay.jsonc")).unwrap();
        assert!(content.contains("sourceId"));
        assert!(content.contains("emptyRecords"));
    }

    #[test]
    fn fails_when_settings_exist_without_force() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".lintrelay.jsonc"), "{}").unwrap();

        lintrelay_cmd()
            .current_dir(temp_dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn overwrites_settings_with_force() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(".lintrelay.jsonc");
        fs::write(&config_path, r#"{"tool": "custom"}"#).unwrap();

        lintrelay_cmd()
            .current_dir(temp_dir.path())
            .arg("init")
            .arg("--force")
            .assert()
            .success();

        let content = fs::read_to_string(config_path).unwrap();
        assert!(!content.contains("custom"));
        assert!(content.contains("\"tool\": \"eslint\""));
    }

    #[test]
    fn created_settings_are_picked_up() {
        let temp_dir = TempDir::new().unwrap();

        lintrelay_cmd()
            .current_dir(temp_dir.path())
            .arg("init")
            .assert()
            .success();

        lintrelay_cmd()
            .current_dir(temp_dir.path())
            .arg("normalize")
            .write_stdin("[]")
            .assert()
            .success()
            .stderr(predicate::str::contains("Using settings"));
    }
}

mod serve_command {
    use super::*;

    #[test]
    fn ends_on_closed_input() {
        lintrelay_cmd()
            .arg("serve")
            .write_stdin("")
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn ignores_malformed_and_unsupported_events() {
        let temp_dir = TempDir::new().unwrap();
        let readme = temp_dir.path().join("README.md");
        let input = format!(
            "garbage\n{}\n{}\n\n",
            serde_json::json!({ "event": "bufferEnter", "filePath": readme }),
            serde_json::json!({ "event": "command", "name": "eslint.fix" }),
        );

        lintrelay_cmd()
            .arg("serve")
            .write_stdin(input)
            .assert()
            .success()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Ignoring malformed event"))
            .stderr(predicate::str::contains("Nothing to fix"));
    }
}
