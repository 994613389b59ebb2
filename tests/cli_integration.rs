//! Integration tests for the `mn` CLI.
//!
//! Each test starts a mock API server, writes a config pointing at it into
//! a temp directory, runs `mn` as a subprocess and checks its output.

mod common;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use wiremock::MockServer;

use common::*;

/// Get the path to the built `mn` binary.
fn mn_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_mn"))
}

/// Write a config that points at the mock server.
fn write_config(dir: &Path, server: &MockServer, token: &str) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(
        &path,
        format!(
            r#"api_token = "{}"
base_url = "{}"
timeout_secs = 5

[default_query]
type = "today"
"#,
            token,
            server.uri()
        ),
    )
    .unwrap();
    path
}

async fn run_mn(config: &Path, args: &[&str], stdin: Option<&str>) -> Output {
    let mut cmd = Command::new(mn_bin());
    cmd.arg("--config")
        .arg(config)
        .args(args)
        .env_remove("MARVIN_API_TOKEN")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().unwrap();
    if let Some(mut pipe) = child.stdin.take() {
        pipe.write_all(stdin.unwrap_or("").as_bytes()).await.unwrap();
    }
    child.wait_with_output().await.unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn checklist_prints_snapshot_lines() {
    let server = MockServer::start().await;
    mount_account(&server).await;
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path(), &server, TOKEN);

    let output = run_mn(&config, &["checklist"], None).await;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout_lines(&output), EXPECTED_CHECKLIST);
}

#[tokio::test]
async fn checklist_keep_empty_shows_empty_category() {
    let server = MockServer::start().await;
    mount_account(&server).await;
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path(), &server, TOKEN);

    let output = run_mn(&config, &["checklist", "--keep-empty"], None).await;
    assert!(output.status.success());
    assert!(stdout_lines(&output).contains(&"- [ ] 📁Garden".to_string()));
}

#[tokio::test]
async fn splice_appends_then_replaces_section() {
    let server = MockServer::start().await;
    mount_account(&server).await;
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path(), &server, TOKEN);

    let note = "# 2026-10-18\n\nMorning pages.\n";
    let first = run_mn(&config, &["splice"], Some(note)).await;
    assert!(first.status.success(), "{}", String::from_utf8_lossy(&first.stderr));
    let first_text = String::from_utf8(first.stdout).unwrap();

    let expected = format!(
        "# 2026-10-18\n\nMorning pages.\n\n___\nAmazing Marvin\n{}\n___\n",
        EXPECTED_CHECKLIST.join("\n")
    );
    assert_eq!(first_text, expected);

    let second = run_mn(&config, &["splice"], Some(&first_text)).await;
    assert_eq!(String::from_utf8(second.stdout).unwrap(), expected);
}

#[tokio::test]
async fn show_json_has_tree_and_labels() {
    let server = MockServer::start().await;
    mount_account(&server).await;
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path(), &server, TOKEN);

    let output = run_mn(&config, &["show", "--json", "--title", "Today"], None).await;
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["title"], "Today");
    assert_eq!(value["items"][0]["_id"], "unassigned");
    assert_eq!(value["items"][1]["children"][0]["type"], "project");
    assert_eq!(value["labels"]["l1"]["title"], "errand");
}

#[tokio::test]
async fn show_human_output() {
    let server = MockServer::start().await;
    mount_account(&server).await;
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path(), &server, TOKEN);

    // stdout is a pipe, so no color codes
    let output = run_mn(&config, &["show", "--show-note"], None).await;
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec![
            "📥 Inbox",
            "  [ ] Buy milk #errand",
            "📁 Work",
            "  🏳️ Launch",
            "    [ ] Draft notes <https://docs.example.com/n>",
            "        Keep it short",
            "      [x] Outline",
            "[ ] Call plumber",
        ]
    );
}

#[tokio::test]
async fn missing_token_is_an_error() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path(), &server, "");

    let output = run_mn(&config, &["checklist"], None).await;
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error: no API token"), "{stderr}");
}

#[tokio::test]
async fn server_rejection_is_reported() {
    let server = MockServer::start().await;
    mount_account(&server).await;
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path(), &server, "wrong");

    let output = run_mn(&config, &["checklist"], None).await;
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("server answered 404"));
}
