//! Layering guardrails between the workspace crates.
//!
//! `tsz_core` is pure vocabulary and must not depend on anything. `tsz_syntax` is the grammar and must not pull in
//! the CLI stack. These tests scan the member manifests and fail if a forbidden entry shows up in `[dependencies]`.

/// Dependency names listed in the `[dependencies]` table of `manifest`.
fn main_dependencies(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }
        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_has_no_dependencies() {
    let deps = main_dependencies(include_str!("../crates/tsz_core/Cargo.toml"));
    assert!(deps.is_empty(), "tsz_core must stay dependency-free, found {deps:?}");
}

#[test]
fn syntax_does_not_depend_on_cli_stack() {
    let deps = main_dependencies(include_str!("../crates/tsz_syntax/Cargo.toml"));
    assert!(deps.iter().any(|d| d == "tsz_core"));
    for forbidden in ["tsz", "clap", "tracing-subscriber"] {
        assert!(
            !deps.iter().any(|d| d == forbidden),
            "`{forbidden}` must not appear in tsz_syntax [dependencies]"
        );
    }
}
