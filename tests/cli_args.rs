//! Integration tests for the ghpeek binary
//!
//! Exercises argument validation and the menu loop against a temporary cache
//! directory, without touching the network.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Helper to run the CLI with given args and stdin, capturing output
fn run_cli(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ghpeek"))
        .args(args)
        .env_remove("GITHUB_TOKEN")
        .env_remove("GHPEEK_CACHE_DIR")
        .env_remove("GHPEEK_API_URL")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute ghpeek");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for ghpeek")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"], "");
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ghpeek"), "Help should mention ghpeek");
    assert!(stdout.contains("--cache-dir"), "Help should mention --cache-dir");
    assert!(stdout.contains("--token"), "Help should mention --token");
}

#[test]
fn test_invalid_api_url_prints_error_and_exits() {
    let output = run_cli(&["--api-url", "ftp://example.com"], "");
    assert!(!output.status.success(), "Expected invalid URL to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid API URL"), "Unexpected stderr: {}", stderr);
}

#[test]
fn test_zero_timeout_is_rejected() {
    let output = run_cli(&["--timeout-secs", "0"], "");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid timeout"), "Unexpected stderr: {}", stderr);
}

#[test]
fn test_exit_with_default_answer_purges_cache() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let cache_dir = temp_dir.path().to_str().unwrap();
    std::fs::write(temp_dir.path().join("users.json"), "{}").unwrap();

    let output = run_cli(&["--cache-dir", cache_dir], "5\n\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Cache purged"));
    assert!(!temp_dir.path().join("users.json").exists());
}

#[test]
fn test_search_reads_persisted_cache_offline() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let cache_dir = temp_dir.path().to_str().unwrap();
    std::fs::write(
        temp_dir.path().join("repos.json"),
        r#"{"octo": [{"name": "Spoon-Knife", "description": null, "stargazers_count": 12,
            "forks_count": 1, "language": null, "html_url": "https://github.com/octo/Spoon-Knife"}]}"#,
    )
    .unwrap();

    // Point the API at a closed port: nothing in this script may need it
    let output = run_cli(
        &["--cache-dir", cache_dir, "--api-url", "http://127.0.0.1:1"],
        "3\nspoon\n5\nn\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("octo/Spoon-Knife (12 stars)"), "Unexpected stdout: {}", stdout);
    assert!(temp_dir.path().join("repos.json").exists());
}
