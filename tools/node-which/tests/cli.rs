///
/// # CLI Tests for node-which
///
/// Runs the built binary to check exit codes and what lands on stdout and
/// stderr.
///

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn node_which(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_node-which"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir.canonicalize().expect("Failed to canonicalize"))
        .env_remove("RUST_LOG")
        .env_remove("NODE_PATH")
        .output()
        .expect("Failed to run node-which")
}

fn project() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path();
    fs::write(
        root.join("package.json"),
        r#"{ "name": "cli-app", "version": "3.0.0" }"#,
    )
    .unwrap();
    let dep = root.join("node_modules").join("x");
    fs::create_dir_all(&dep).unwrap();
    fs::write(dep.join("package.json"), r#"{ "name": "x", "version": "2.3.1" }"#).unwrap();
    fs::write(dep.join("index.js"), "module.exports = 1;").unwrap();
    temp_dir
}

#[test]
fn test_missing_argument_exits_one() {
    let temp_dir = project();

    let output = node_which(temp_dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("a dependency name is required"),
        "stderr was: {}",
        stderr
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn test_empty_argument_exits_one() {
    let temp_dir = project();

    let output = node_which(temp_dir.path(), &[""]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("a dependency name is required"));
}

#[test]
fn test_unresolved_exits_one_with_diagnostic() {
    let temp_dir = project();

    let output = node_which(temp_dir.path(), &["ghost"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Could not find ghost"));
    assert!(stdout.contains("node -e \"console.log(require.resolve('ghost'))\""));
}

#[test]
fn test_success_prints_redacted_summary() {
    let temp_dir = project();

    let output = node_which(temp_dir.path(), &["x"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Node resolves x"));
    assert!(stdout.contains("which is @ 2.3.1"));
    assert!(stdout.contains("from   cli-app @ 3.0.0"));
    assert!(stdout.contains("node_modules/x/index.js"));
    let home = temp_dir.path().canonicalize().unwrap();
    assert!(
        !stdout.contains(&*home.to_string_lossy()),
        "home directory should be redacted: {}",
        stdout
    );
}

#[test]
fn test_json_output_from_other_directory() {
    let temp_dir = project();
    let elsewhere = TempDir::new().unwrap();

    let from = temp_dir.path().to_string_lossy().to_string();
    let output = node_which(elsewhere.path(), &["x", "--json", "--from", &from]);

    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["dependency"], "x");
    assert_eq!(value["version"], "2.3.1");
    assert_eq!(value["strategy"], "main");
    assert_eq!(value["owner"]["name"], "cli-app");
}

#[test]
fn test_core_module_resolves_to_its_id() {
    let temp_dir = project();

    let output = node_which(temp_dir.path(), &["fs"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Node resolves fs"));
    assert!(stdout.contains("to   fs\n"));
    assert!(!stdout.contains("which is @"));
}
