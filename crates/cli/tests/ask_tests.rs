// Integration tests for `slens ask` against a mock insight backend.
// Run with: cargo test -p sheetlens-cli --test ask_tests

use std::io::Write;
use std::process::Command;

use httpmock::prelude::*;

fn slens() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_slens"));
    // Clear env so a configured endpoint never leaks into tests
    cmd.env_remove("SHEETLENS_ENDPOINT");
    cmd
}

fn write_csv(content: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

fn sample_csv() -> tempfile::NamedTempFile {
    write_csv("Region,Total\nNorth,120\nSouth,80\n")
}

#[test]
fn bulleted_answer_renders_as_list() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/analyze");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"answer": "- North leads\n- South trails"}"#);
    });

    let f = sample_csv();
    let url = server.url("/analyze");
    let output = slens()
        .args([
            "ask",
            f.path().to_str().unwrap(),
            "Which region leads?",
            "--endpoint",
            url.as_str(),
        ])
        .output()
        .expect("slens ask");

    assert!(
        output.status.success(),
        "exit: {:?}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("- North leads"), "got: {}", stdout);
    assert!(stdout.contains("- South trails"), "got: {}", stdout);
    mock.assert();
}

#[test]
fn single_line_answer_renders_as_paragraph() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/analyze");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"answer": "North has the highest total."}"#);
    });

    let f = sample_csv();
    let url = server.url("/analyze");
    let output = slens()
        .args([
            "ask",
            f.path().to_str().unwrap(),
            "q",
            "--endpoint",
            url.as_str(),
        ])
        .output()
        .expect("slens ask");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "North has the highest total.");
}

#[test]
fn result_field_is_accepted_as_fallback() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/analyze");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"result": "via result field"}"#);
    });

    let f = sample_csv();
    let url = server.url("/analyze");
    let output = slens()
        .args([
            "ask",
            f.path().to_str().unwrap(),
            "q",
            "--endpoint",
            url.as_str(),
        ])
        .output()
        .expect("slens ask");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "via result field"
    );
}

#[test]
fn unrecognized_body_yields_no_response_text() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/analyze");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"status": "ok"}"#);
    });

    let f = sample_csv();
    let url = server.url("/analyze");
    let output = slens()
        .args([
            "ask",
            f.path().to_str().unwrap(),
            "q",
            "--endpoint",
            url.as_str(),
        ])
        .output()
        .expect("slens ask");

    // A recognizable-but-empty reply is a value, not an error
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "No response");
}

#[test]
fn empty_answer_yields_placeholder() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/analyze");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"answer": ""}"#);
    });

    let f = sample_csv();
    let url = server.url("/analyze");
    let output = slens()
        .args([
            "ask",
            f.path().to_str().unwrap(),
            "q",
            "--endpoint",
            url.as_str(),
        ])
        .output()
        .expect("slens ask");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "No insights returned."
    );
}

#[test]
fn empty_query_is_blocked_before_any_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/analyze");
        then.status(200).body(r#"{"answer": "never"}"#);
    });

    let f = sample_csv();
    let url = server.url("/analyze");
    let output = slens()
        .args([
            "ask",
            f.path().to_str().unwrap(),
            "   ",
            "--endpoint",
            url.as_str(),
        ])
        .output()
        .expect("slens ask (empty query)");

    assert_eq!(
        output.status.code(),
        Some(10),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    // Nothing reached the network
    mock.assert_hits(0);
}

#[test]
fn unreachable_backend_prints_fallback_and_exits_20() {
    let f = sample_csv();
    // Port 1 is essentially never listening
    let output = slens()
        .args([
            "ask",
            f.path().to_str().unwrap(),
            "q",
            "--endpoint",
            "http://127.0.0.1:1/analyze",
        ])
        .output()
        .expect("slens ask (backend down)");

    assert_eq!(
        output.status.code(),
        Some(20),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Cannot connect to backend."),
        "got: {}",
        stderr
    );
}

#[test]
fn server_error_status_exits_20() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/analyze");
        then.status(502).body("bad gateway");
    });

    let f = sample_csv();
    let url = server.url("/analyze");
    let output = slens()
        .args([
            "ask",
            f.path().to_str().unwrap(),
            "q",
            "--endpoint",
            url.as_str(),
        ])
        .output()
        .expect("slens ask (5xx)");

    assert_eq!(output.status.code(), Some(20));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cannot connect to backend."), "got: {}", stderr);
}

#[test]
fn missing_file_exits_with_parse_code() {
    let output = slens()
        .args(["ask", "/nonexistent/never.csv", "q"])
        .output()
        .expect("slens ask missing file");

    assert_eq!(
        output.status.code(),
        Some(4),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}
