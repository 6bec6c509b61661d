//! CLI integration tests

use std::process::Command;

fn clipman_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_clipman"))
}

#[test]
fn help_output() {
    let output = clipman_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("clipboard"));
    assert!(stdout.contains("get"));
    assert!(stdout.contains("set"));
    assert!(stdout.contains("engine"));
    assert!(stdout.contains("--timeout"));
    assert!(stdout.contains("--debug"));
}

#[test]
fn version_output() {
    let output = clipman_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("clipman"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_help() {
    let output = clipman_bin()
        .args(["config", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("init"));
    assert!(stdout.contains("set"));
    assert!(stdout.contains("get"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("path"));
}

#[test]
fn missing_subcommand_is_usage_error() {
    let output = clipman_bin().output().expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn invalid_timeout_is_usage_error() {
    let output = clipman_bin()
        .args(["--timeout", "forever", "get"])
        .env_remove("CLIPMAN_TIMEOUT")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid timeout"),
        "Expected error about invalid timeout, got: {}",
        stderr
    );
}
