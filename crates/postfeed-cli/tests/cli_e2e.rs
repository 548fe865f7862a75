//! End-to-end CLI tests using `assert_cmd`
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::tests_outside_test_module,
        reason = "Test allows"
    )
)]

use assert_cmd::Command;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use postfeed_core::Post;
use predicates::prelude::*;
use std::fs;
use std::net::TcpListener as StdTcpListener;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::spawn_blocking;

/// Helper to get cargo binary or fail test
fn cargo_bin() -> Command {
    Command::cargo_bin("postfeed").unwrap_or_else(|err| panic!("Binary not found: {err}"))
}

/// Helper to create temp dir or fail test
fn temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|err| panic!("Failed to create temp dir: {err}"))
}

/// An endpoint on a port nothing is listening on.
fn refused_endpoint() -> String {
    let listener = StdTcpListener::bind("127.0.0.1:0").expect("reserve port");
    let port = listener.local_addr().expect("reserved address").port();
    format!("http://127.0.0.1:{port}/posts")
}

async fn serve(status: StatusCode, body: &'static str) -> String {
    let app = Router::new().route("/posts", get(move || async move { (status, body) }));
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    format!("http://{addr}/posts")
}

#[test]
fn test_cli_help() {
    cargo_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("fetch"));
}

#[test]
fn test_cli_invalid_command() {
    cargo_bin().arg("invalid-command-xyz").assert().failure();
}

#[test]
fn test_config_shows_defaults_without_file() {
    let home = temp_dir();

    cargo_bin()
        .env("HOME", home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://jsonplaceholder.typicode.com/posts",
        ));
}

#[test]
fn test_config_reads_explicit_file() {
    let temp = temp_dir();
    let config_path = temp.path().join("postfeed.toml");
    fs::write(
        &config_path,
        "[source]\nendpoint = \"http://127.0.0.1:9/posts\"\n",
    )
    .expect("write config");

    cargo_bin()
        .arg("--config")
        .arg(&config_path)
        .args(["config", "--full"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[source]"))
        .stdout(predicate::str::contains("http://127.0.0.1:9/posts"));
}

#[test]
fn test_missing_config_file_fails() {
    let temp = temp_dir();

    cargo_bin()
        .arg("--config")
        .arg(temp.path().join("absent.toml"))
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_fetch_rejects_invalid_endpoint() {
    let home = temp_dir();

    cargo_bin()
        .env("HOME", home.path())
        .args(["fetch", "--endpoint", "ftp://example.com/posts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_fetch_transport_failure_exits_nonzero() {
    let home = temp_dir();

    cargo_bin()
        .env("HOME", home.path())
        .args(["fetch", "--endpoint", refused_endpoint().as_str()])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Transport error"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_renders_posts_in_order() {
    let endpoint = serve(
        StatusCode::OK,
        r#"[{"userId":1,"id":2,"title":"first","body":"b2"},{"userId":1,"id":1,"title":"second","body":"b1"}]"#,
    )
    .await;
    let home = temp_dir();

    let output = spawn_blocking(move || {
        cargo_bin()
            .env("HOME", home.path())
            .args(["fetch", "--endpoint", endpoint.as_str()])
            .output()
            .expect("run postfeed")
    })
    .await
    .expect("blocking task");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let first = stdout.find("first").expect("first title rendered");
    let second = stdout.find("second").expect("second title rendered");
    assert!(first < second);
    assert!(stdout.contains("b2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_json_end_to_end() {
    let endpoint = serve(
        StatusCode::OK,
        r#"[{"userId":1,"id":1,"title":"t1","body":"b1"}]"#,
    )
    .await;
    let home = temp_dir();

    let output = spawn_blocking(move || {
        cargo_bin()
            .env("HOME", home.path())
            .args(["fetch", "--json", "--endpoint", endpoint.as_str()])
            .output()
            .expect("run postfeed")
    })
    .await
    .expect("blocking task");

    assert!(output.status.success());
    let posts = Post::decode_list(&output.stdout).expect("json output");
    assert_eq!(posts, vec![Post::new(1, 1, "t1", "b1")]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_bad_status_exits_nonzero() {
    let endpoint = serve(StatusCode::NOT_FOUND, "not here").await;
    let home = temp_dir();

    let output = spawn_blocking(move || {
        cargo_bin()
            .env("HOME", home.path())
            .args(["fetch", "--endpoint", endpoint.as_str()])
            .output()
            .expect("run postfeed")
    })
    .await
    .expect("blocking task");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("HTTP status 404"), "stderr: {stderr}");
}
