#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn relay(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("relay").unwrap();
    cmd.current_dir(dir.path())
        .env("RELAY_ROOT", dir.path())
        .env_remove("AI_GATEWAY_API_KEY");
    cmd
}

// ---------------------------------------------------------------------------
// relay init
// ---------------------------------------------------------------------------

#[test]
fn init_writes_default_config() {
    let dir = TempDir::new().unwrap();
    relay(&dir).arg("init").assert().success();

    let config = std::fs::read_to_string(dir.path().join(".relay/config.yaml")).unwrap();
    assert!(config.contains("google/gemini-2.5-flash"));
    assert!(config.contains("AI_GATEWAY_API_KEY"));
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    relay(&dir).arg("init").assert().success();
    relay(&dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    relay(&dir).args(["init", "--force"]).assert().success();
}

// ---------------------------------------------------------------------------
// relay history / pending
// ---------------------------------------------------------------------------

#[test]
fn history_of_unknown_session_is_empty() {
    let dir = TempDir::new().unwrap();
    relay(&dir)
        .args(["history", "s1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No messages for session 's1'"));
}

#[test]
fn history_json_is_an_empty_array() {
    let dir = TempDir::new().unwrap();
    relay(&dir)
        .args(["history", "s1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[]"));
}

#[test]
fn pending_json_is_an_empty_array() {
    let dir = TempDir::new().unwrap();
    relay(&dir)
        .args(["--json", "pending", "s1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[]"));
    assert!(dir.path().join(".relay/relay.db").exists());
}

// ---------------------------------------------------------------------------
// relay generate
// ---------------------------------------------------------------------------

#[test]
fn generate_without_api_key_fails() {
    let dir = TempDir::new().unwrap();
    relay(&dir)
        .args(["generate", "add a kill brick"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("AI_GATEWAY_API_KEY not configured"));
}

#[test]
fn generate_does_not_create_a_database() {
    let dir = TempDir::new().unwrap();
    relay(&dir)
        .args(["generate", "add a kill brick"])
        .assert()
        .failure();
    assert!(!dir.path().join(".relay").exists());
}

#[test]
fn generate_rejects_unreadable_context_file() {
    let dir = TempDir::new().unwrap();
    relay(&dir)
        .args(["generate", "x", "--context", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
