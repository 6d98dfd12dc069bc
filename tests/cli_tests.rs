//! End-to-end tests for the `tsz` binary

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn tsz(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tsz"))
        .args(args)
        .output()
        .expect("failed to run tsz")
}

fn corpus(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/corpus")
        .join(name)
        .to_string_lossy()
        .to_string()
}

fn write_temp(name: &str, contents: &str) -> String {
    let path = std::env::temp_dir().join(format!("tsz_cli_{}_{}", std::process::id(), name));
    fs::write(&path, contents).expect("failed to write temp file");
    path.to_string_lossy().to_string()
}

#[test]
fn test_parse_prints_sexp() {
    let output = tsz(&["parse", &corpus("basics.tsz")]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("(program (comment) (variable_declaration"));
}

#[test]
fn test_parse_json_is_valid() {
    let output = tsz(&["parse", "--json", &corpus("functions.tsz")]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["type"], "program");
    assert!(value["children"].as_array().is_some_and(|c| !c.is_empty()));
}

#[test]
fn test_parse_long_chain() {
    let path = write_temp("chain.tsz", &format!("const x = {}1;\n", "1 + ".repeat(100_000)));

    let output = tsz(&["parse", &path]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("(program (variable_declaration"));

    let output = tsz(&["parse", "--json", &path]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("{\"type\":\"program\""));
    assert!(stdout.trim_end().ends_with("]}"));
    let _ = fs::remove_file(path);
}

#[test]
fn test_parse_reports_errors_with_location() {
    let path = write_temp("broken.tsz", "const x = ;\n");
    let output = tsz(&["parse", "--quiet", &path]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("syntax error"), "stderr: {}", stderr);
    assert!(stderr.contains(":1:"), "stderr: {}", stderr);
    let _ = fs::remove_file(path);
}

#[test]
fn test_check_multiple_files() {
    let output = tsz(&["check", &corpus("basics.tsz"), &corpus("control_flow.tsz")]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let broken = write_temp("check_broken.tsz", "a + b;\n");
    let output = tsz(&["check", &corpus("basics.tsz"), &broken]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("1 of 2 file(s) have syntax errors"));
    let _ = fs::remove_file(broken);
}

#[test]
fn test_missing_file_fails() {
    let output = tsz(&["parse", "no/such/file.tsz"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Cannot access file"));
}

#[test]
fn test_lex_and_highlight() {
    let path = write_temp("lex.tsz", "let n = 1;");
    let output = tsz(&["lex", &path]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("keyword 'let'"));
    assert!(stdout.contains("eof"));

    let output = tsz(&["highlight", &path]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().next().is_some_and(|l| l.starts_with("1:1\tkeyword")));
    let _ = fs::remove_file(path);
}

#[test]
fn test_highlight_positions_follow_span_start() {
    let path = write_temp("escape.tsz", r#"s = "a\tb";"#);
    let output = tsz(&["highlight", &path]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert!(lines.contains(&"1:5\tstring\t\"\\\"a\""), "stdout: {}", stdout);
    assert!(lines.contains(&"1:7\tstring.escape\t\"\\\\t\""), "stdout: {}", stdout);
    assert!(lines.contains(&"1:9\tstring\t\"b\\\"\""), "stdout: {}", stdout);
    let _ = fs::remove_file(path);
}

#[test]
fn test_node_types_and_language() {
    let output = tsz(&["node-types"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let kinds: Vec<_> = value
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|n| n["type"].as_str())
        .collect();
    assert!(kinds.contains(&"program"));
    assert!(kinds.contains(&"match_expression"));

    let output = tsz(&["language"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("name: tsz"));
}
