//! Integration tests for the tmuxup binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A command rooted in `dir` with `dir` as home and no inherited overrides.
fn tmuxup(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("tmuxup"));
    cmd.current_dir(dir)
        .env_remove("TMUXUP_CONFIG")
        .env_remove("TMUXUP_STATE_FILE")
        .env_remove("RUST_LOG")
        .env("TMUXUP_HOME", dir);
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("tmuxup"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Idempotent tmux setup"))
        .stdout(predicate::str::contains("uninstall"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("tmuxup"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_rejects_unknown_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    tmuxup(temp.path()).arg("reinstall").assert().failure();
    Ok(())
}

#[test]
fn uninstall_without_state_is_a_noop() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    tmuxup(temp.path())
        .arg("uninstall")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to uninstall"));
    assert_eq!(fs::read_dir(temp.path())?.count(), 0);
    Ok(())
}

#[test]
fn install_without_package_manager_fails_cleanly() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let empty_path = TempDir::new()?;

    tmuxup(temp.path())
        .env("PATH", empty_path.path())
        .arg("install")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No supported package manager"));

    assert!(!temp.path().join(".tmuxup-state").exists());
    assert!(!temp.path().join(".tmux.conf").exists());
    assert!(!temp.path().join("uninstall.sh").exists());
    Ok(())
}

#[test]
fn bare_invocation_means_install() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let empty_path = TempDir::new()?;

    tmuxup(temp.path())
        .env("PATH", empty_path.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No supported package manager"));
    Ok(())
}

#[test]
fn uninstall_reverses_config_only_state() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let empty_path = TempDir::new()?;
    fs::write(temp.path().join(".tmuxup-state"), ":config-written\n:config-written\n")?;
    fs::write(temp.path().join(".tmux.conf"), "set -g mouse on\n")?;
    fs::write(temp.path().join("uninstall.sh"), "#!/bin/sh\n")?;

    tmuxup(temp.path())
        .env("PATH", empty_path.path())
        .arg("uninstall")
        .assert()
        .success()
        .stdout(predicate::str::contains("configuration file written"));

    assert!(!temp.path().join(".tmux.conf").exists());
    assert!(!temp.path().join(".tmuxup-state").exists());
    assert!(!temp.path().join("uninstall.sh").exists());
    Ok(())
}

#[test]
fn uninstall_with_packages_needs_package_manager() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let empty_path = TempDir::new()?;
    fs::write(temp.path().join(".tmuxup-state"), ":config-written\ntmux\n")?;
    fs::write(temp.path().join(".tmux.conf"), "")?;

    tmuxup(temp.path())
        .env("PATH", empty_path.path())
        .arg("uninstall")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No supported package manager"));

    assert!(temp.path().join(".tmux.conf").exists());
    assert_eq!(
        fs::read_to_string(temp.path().join(".tmuxup-state"))?,
        ":config-written\ntmux\n"
    );
    Ok(())
}

#[test]
fn explicit_state_file_is_honored() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let state = temp.path().join("elsewhere").join("state");
    fs::create_dir_all(state.parent().unwrap())?;
    fs::write(&state, ":config-written\n")?;

    tmuxup(temp.path())
        .arg("--state-file")
        .arg(&state)
        .arg("uninstall")
        .assert()
        .success();

    assert!(!state.exists());
    Ok(())
}

#[test]
fn status_without_state() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    tmuxup(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing installed"));
    Ok(())
}

#[test]
fn status_lists_records() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(
        temp.path().join(".tmuxup-state"),
        "xclip\n:terminfo-created\n:plugin-manager-cloned\n",
    )?;

    tmuxup(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("package xclip"))
        .stdout(predicate::str::contains("terminfo entry compiled"))
        .stdout(predicate::str::contains("plugin manager cloned"));
    Ok(())
}

#[test]
fn status_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join(".tmuxup-state"), "git\n:config-written\n")?;

    let output = tmuxup(temp.path()).args(["status", "--json"]).output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value[0]["kind"], "package_installed");
    assert_eq!(value[0]["package"], "git");
    assert_eq!(value[1]["kind"], "config_written");
    Ok(())
}

#[test]
fn missing_explicit_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    tmuxup(temp.path())
        .args(["--config", "missing.yml", "status"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn invalid_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("bad.yml"), "packages: [':sneaky']\n")?;

    tmuxup(temp.path())
        .args(["--config", "bad.yml", "status"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid configuration"));
    Ok(())
}

#[test]
fn unknown_config_field_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("bad.yml"), "pakages: [tmux]\n")?;

    tmuxup(temp.path())
        .args(["--config", "bad.yml", "status"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn completions_for_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("tmuxup"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("tmuxup"));
    Ok(())
}
