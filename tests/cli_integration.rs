//! Purpose: Drive the `jsonvariant` binary end to end.
//! Exports: Integration tests only.
//! Role: Lock stdout formats, JSON stderr errors, and exit codes for each command.
//! Invariants: Commands that fail before reading stdin must not fail the harness.
use std::io::{ErrorKind, Write};
use std::process::{Command, Output, Stdio};

use serde_json::Value;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_jsonvariant");
    Command::new(exe)
}

fn run_with_stdin(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = cmd()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn");
    let write = child.stdin.take().expect("stdin").write_all(stdin);
    // The binary may exit on a usage error before it reads stdin.
    if let Err(err) = write {
        assert_eq!(err.kind(), ErrorKind::BrokenPipe, "write stdin: {err}");
    }
    child.wait_with_output().expect("output")
}

fn parse_json_line(output: &[u8]) -> Value {
    let text = String::from_utf8_lossy(output);
    let line = text.lines().next().expect("json line");
    serde_json::from_str(line).expect("valid json")
}

#[test]
fn locate_reads_tag_from_stdin() {
    let output = run_with_stdin(
        &["locate", "--tag", "hello", "--tag", "goodbye"],
        br#"{"n": 1, "type": "goodbye"}"#,
    );
    assert!(output.status.success());
    let value = parse_json_line(&output.stdout);
    assert_eq!(value["tag"], "goodbye");
    assert_eq!(value["type"], "goodbye");
}

#[test]
fn locate_reports_null_input() {
    let output = run_with_stdin(&["locate", "--tag", "hello"], b"null\n");
    assert!(output.status.success());
    let value = parse_json_line(&output.stdout);
    assert!(value["tag"].is_null());
    assert!(value["type"].is_null());
}

#[test]
fn locate_uses_schema_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let schema_path = temp.path().join("schema.json");
    std::fs::write(
        &schema_path,
        r#"{"tag_key":"kind","tags":["a","b"],"types":["Alpha","Beta"],"require_tag_first":true}"#,
    )
    .expect("write schema");
    let input_path = temp.path().join("input.json");
    std::fs::write(&input_path, r#"{"kind":"b","body":{"kind":"a"}}"#).expect("write input");

    let output = cmd()
        .args([
            "locate",
            "--schema",
            schema_path.to_str().unwrap(),
            input_path.to_str().unwrap(),
        ])
        .output()
        .expect("locate");
    assert!(output.status.success());
    let value = parse_json_line(&output.stdout);
    assert_eq!(value["tag"], "b");
    assert_eq!(value["type"], "Beta");

    std::fs::write(&input_path, r#"{"body":1,"kind":"a"}"#).expect("write input");
    let output = cmd()
        .args([
            "locate",
            "--schema",
            schema_path.to_str().unwrap(),
            input_path.to_str().unwrap(),
        ])
        .output()
        .expect("locate");
    assert_eq!(output.status.code().unwrap(), 4);
    let err = parse_json_line(&output.stderr);
    assert_eq!(err["error"]["kind"], "TagMissing");
    assert_eq!(
        err["error"]["message"],
        "missing tag property or not at start"
    );
}

#[test]
fn locate_domain_errors_exit_4() {
    let output = run_with_stdin(&["locate", "--tag", "hello"], br#"{"type":"nope"}"#);
    assert_eq!(output.status.code().unwrap(), 4);
    let err = parse_json_line(&output.stderr);
    assert_eq!(err["error"]["kind"], "TagValue");
    assert_eq!(err["error"]["message"], r#"unknown tag value "nope""#);
    assert_eq!(err["error"]["offset"], 8);
}

#[test]
fn locate_syntax_errors_exit_5() {
    let output = run_with_stdin(&["locate", "--tag", "hello"], b"bad");
    assert_eq!(output.status.code().unwrap(), 5);
    let err = parse_json_line(&output.stderr);
    assert_eq!(err["error"]["kind"], "Syntax");
    assert_eq!(
        err["error"]["message"],
        "invalid character 'b' looking for beginning of value"
    );
    assert_eq!(err["error"]["offset"], 0);

    let output = run_with_stdin(&["locate", "--tag", "hello"], b"");
    assert_eq!(output.status.code().unwrap(), 5);
    let err = parse_json_line(&output.stderr);
    assert_eq!(err["error"]["kind"], "Eof");
}

#[test]
fn insert_splices_tag_first() {
    let output = run_with_stdin(&["insert", "--value", "hello"], b"{\"target\":\"world\"}\n");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"{\"type\": \"hello\",\"target\":\"world\"}\n");

    let output = run_with_stdin(&["insert", "--key", "kind", "--value", "x"], b"  {  }  ");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"  {  \"kind\": \"x\"  }  ");
}

#[test]
fn insert_passes_null_through() {
    let output = run_with_stdin(&["insert", "--value", "hello"], b"null");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"null");
}

#[test]
fn insert_rejects_non_objects() {
    let output = run_with_stdin(&["insert", "--value", "hello"], b"[1, 2]");
    assert_eq!(output.status.code().unwrap(), 4);
    let err = parse_json_line(&output.stderr);
    assert_eq!(err["error"]["kind"], "InputType");
}

#[test]
fn usage_exit_code() {
    let output = cmd()
        .args(["locate", "--schema", "schema.json", "--tag", "a"])
        .output()
        .expect("locate");
    assert_eq!(output.status.code().unwrap(), 2);
    let err = parse_json_line(&output.stderr);
    assert_eq!(err["error"]["kind"], "Usage");

    let output = cmd().args(["insert"]).output().expect("insert");
    assert_eq!(output.status.code().unwrap(), 2);
}

#[test]
fn bad_schema_file_is_usage_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let schema_path = temp.path().join("schema.json");
    std::fs::write(&schema_path, r#"{"tag_key":"kind","tags":["a"]}"#).expect("write schema");

    let output = cmd()
        .args(["locate", "--schema", schema_path.to_str().unwrap()])
        .stdin(Stdio::null())
        .output()
        .expect("locate");
    assert_eq!(output.status.code().unwrap(), 2);
    let err = parse_json_line(&output.stderr);
    assert_eq!(err["error"]["kind"], "Usage");
    assert_eq!(err["error"]["message"], "schema has 1 tags but 0 types");
    assert!(err["error"]["hint"].is_string());

    std::fs::write(&schema_path, "{not json").expect("write schema");
    let output = cmd()
        .args(["locate", "--schema", schema_path.to_str().unwrap()])
        .stdin(Stdio::null())
        .output()
        .expect("locate");
    assert_eq!(output.status.code().unwrap(), 2);
    let err = parse_json_line(&output.stderr);
    assert!(err["error"]["causes"].is_array());
}

#[test]
fn early_exit_with_pending_stdin_still_reports() {
    let temp = tempfile::tempdir().expect("tempdir");
    let schema_path = temp.path().join("schema.json");
    std::fs::write(&schema_path, "{not json").expect("write schema");

    let input = format!(r#"{{"kind":"a","pad":"{}"}}"#, "x".repeat(1 << 20));
    for _ in 0..4 {
        let output = run_with_stdin(
            &["locate", "--schema", schema_path.to_str().unwrap()],
            input.as_bytes(),
        );
        assert_eq!(output.status.code().unwrap(), 2);
        let err = parse_json_line(&output.stderr);
        assert_eq!(err["error"]["kind"], "Usage");
    }
}

#[test]
fn missing_input_file_is_io_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let missing = temp.path().join("missing.json");
    let output = cmd()
        .args(["insert", "--value", "a", missing.to_str().unwrap()])
        .output()
        .expect("insert");
    assert_eq!(output.status.code().unwrap(), 3);
    let err = parse_json_line(&output.stderr);
    assert_eq!(err["error"]["kind"], "Io");
}

#[test]
fn completion_prints_script() {
    let output = cmd().args(["completion", "bash"]).output().expect("completion");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("jsonvariant"));
}
