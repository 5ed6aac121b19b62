#![allow(clippy::unwrap_used)]
//! End-to-end translation tests against a mock Gemini endpoint.
//!
//! The binary runs with stderr piped, so the spinner is disabled and stderr
//! only carries status and error lines.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-test:generateContent";

#[allow(deprecated)]
fn gtr(server: &MockServer, config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gtr").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env("GTR_API_KEY", "test-key")
        .env_remove("GTR_MODEL")
        .args(["--endpoint", &server.uri(), "--model", "gemini-test"]);
    cmd
}

fn reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    }))
}

#[tokio::test(flavor = "multi_thread")]
async fn test_translates_stdin_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_string_contains("Translate the following text to Japanese"))
        .and(body_string_contains("Hello"))
        .respond_with(reply("  こんにちは\n"))
        .expect(1)
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    gtr(&server, &home)
        .write_stdin("Hello\n")
        .assert()
        .success()
        .stdout("こんにちは\n")
        .stderr(predicate::str::is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_target_code_is_expanded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_string_contains("Translate the following text to French"))
        .respond_with(reply("Bonjour"))
        .expect(1)
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    gtr(&server, &home)
        .args(["--target", "fr"])
        .write_stdin("Hello")
        .assert()
        .success()
        .stdout("Bonjour\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_translates_url_with_url_context() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({ "tools": [{ "url_context": {} }] })))
        .and(body_string_contains("URL: https://example.com/article"))
        .respond_with(reply("記事の翻訳"))
        .expect(1)
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    gtr(&server, &home)
        .arg("https://example.com/article")
        .assert()
        .success()
        .stdout("記事の翻訳\n")
        .stderr(predicate::str::contains("Translating https://example.com/article"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_service_error_prints_one_line_and_exits_1() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    let assert = gtr(&server, &home).write_stdin("Hello").assert();

    let output = assert.get_output();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1);

    assert
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Translation error: API request failed with status 429: Resource has been exhausted",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_html_error_page_is_reported_on_one_line() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(502).set_body_string("<html>\n<body>Bad Gateway</body>\n</html>\n"),
        )
        .expect(1)
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    let assert = gtr(&server, &home).write_stdin("Hello").assert();

    let output = assert.get_output();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1);

    assert
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Translation error: API request failed with status 502: <html> <body>Bad Gateway</body> </html>",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_schemeless_url_is_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({ "tools": [{ "url_context": {} }] })))
        .and(body_string_contains("URL: example.com/article"))
        .respond_with(reply("記事"))
        .expect(1)
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    gtr(&server, &home)
        .arg("example.com/article")
        .assert()
        .success()
        .stdout("記事\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_timeout_aborts_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(reply("too late").set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    gtr(&server, &home)
        .args(["--timeout", "1"])
        .write_stdin("Hello")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Translation error: no response within 1s"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_config_file_model_is_used() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-from-config:generateContent"))
        .respond_with(reply("ok"))
        .expect(1)
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join("gtr")).unwrap();
    std::fs::write(
        home.path().join("gtr/config.toml"),
        format!(
            "[gtr]\nmodel = \"gemini-from-config\"\nendpoint = \"{}\"\n",
            server.uri()
        ),
    )
    .unwrap();

    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("gtr").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path())
        .env("GTR_API_KEY", "test-key")
        .env_remove("GTR_MODEL")
        .write_stdin("Hello")
        .assert()
        .success()
        .stdout("ok\n");
}
