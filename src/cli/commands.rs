//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;

use serde_json::{Value, json};
use tsz_core::lang::{keywords, operators, punctuation};
use tsz_syntax::diagnostics::format_error;
use tsz_syntax::highlight::highlight;
use tsz_syntax::lexer::{self, TokenKind};
use tsz_syntax::node_types::node_types_json;
use tsz_syntax::span::LineIndex;
use tsz_syntax::{LANGUAGE, Node, Parser, SyntaxError, Tree};

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected before they are read.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// How `parse` prints the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    Sexp,
    Json,
    None,
}

/// Read a source file, enforcing [`MAX_SOURCE_SIZE`].
pub fn read_source(file_path: &str) -> CliResult<String> {
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        tracing::warn!(file = file_path, size = metadata.len(), "rejecting oversized source file");
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

/// Parse `source` through the runtime API, the same way an embedding tool loads the grammar.
pub fn parse_source(source: &str) -> CliResult<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&LANGUAGE)
        .map_err(|e| CliError::failure(format!("Error loading TSZ grammar: {}", e)))?;
    parser
        .parse(source)
        .ok_or_else(|| CliError::failure("Error loading TSZ grammar"))
}

fn render_errors(file_path: &str, source: &str, errors: &[SyntaxError]) -> String {
    let mut msg = String::new();
    for err in errors {
        msg.push_str(&format_error(file_path, source, err));
    }
    msg.trim_end().to_string()
}

/// Parse a file and print its tree.
pub fn parse_file(file_path: &str, format: TreeFormat) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tree = parse_source(&source)?;

    match format {
        TreeFormat::Sexp => println!("{}", tree.to_sexp()),
        TreeFormat::Json => {
            println!("{}", tree_to_json(&tree));
        }
        TreeFormat::None => {}
    }

    if tree.errors().is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Err(CliError::failure(render_errors(file_path, &source, tree.errors())))
    }
}

/// Tokenize and display tokens.
pub fn lex_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let output = lexer::lex_all(&source);

    for tok in &output.tokens {
        println!("{:>5}..{:<5} {}", tok.span.start, tok.span.end, describe_token(tok, &source));
    }
    for comment in &output.comments {
        println!("{:>5}..{:<5} comment {:?}", comment.span.start, comment.span.end, comment.kind);
    }

    if output.errors.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Err(CliError::failure(render_errors(file_path, &source, &output.errors)))
    }
}

fn describe_token(tok: &lexer::Token, source: &str) -> String {
    match &tok.kind {
        TokenKind::Keyword(id) => format!("keyword '{}'", keywords::as_str(*id)),
        TokenKind::Operator(id) => format!("operator '{}'", operators::as_str(*id)),
        TokenKind::Punctuation(id) => format!("punctuation '{}'", punctuation::as_str(*id)),
        TokenKind::Ident(name) => format!("identifier {}", name),
        TokenKind::Number(raw) => format!("number {}", raw),
        TokenKind::String(parts) => format!("string ({} parts)", parts.len()),
        TokenKind::Regex { pattern, flags } => {
            let flags = flags.map(|f| &source[f.start..f.end]).unwrap_or("");
            format!("regex /{}/{}", &source[pattern.start..pattern.end], flags)
        }
        TokenKind::TemplateChars => format!("template_chars {:?}", &source[tok.span.start..tok.span.end]),
        TokenKind::EscapeSequence => format!("escape_sequence {}", &source[tok.span.start..tok.span.end]),
        TokenKind::Eof => "eof".to_string(),
    }
}

/// Check files for syntax errors, reporting each through miette.
pub fn check_files(file_paths: &[String]) -> CliResult<ExitCode> {
    let mut failed = 0usize;
    for file_path in file_paths {
        let source = read_source(file_path)?;
        let tree = parse_source(&source)?;
        if tree.errors().is_empty() {
            println!("✓ {}", file_path);
            continue;
        }
        failed += 1;
        for err in tree.errors() {
            let report: miette::Report = err.clone().into_report(file_path, &source);
            eprintln!("{:?}", report);
        }
    }

    if failed == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Err(CliError::failure(format!(
            "{} of {} file(s) have syntax errors",
            failed,
            file_paths.len()
        )))
    }
}

/// Print one line per highlight span: `row:col capture text`.
pub fn highlight_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tree = parse_source(&source)?;

    let index = LineIndex::new(&source);
    for span in highlight(&tree) {
        let start = index.point(span.span.start);
        println!(
            "{}:{}\t{}\t{:?}",
            start.row + 1,
            start.column + 1,
            span.capture.name(),
            &source[span.span.start..span.span.end]
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// Print `node-types.json`.
pub fn print_node_types() -> CliResult<ExitCode> {
    let json = node_types_json().map_err(|e| CliError::failure(format!("Error rendering node types: {}", e)))?;
    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}

/// Print grammar handle metadata.
pub fn print_language() -> CliResult<ExitCode> {
    let language = tsz_syntax::language();
    if !language.is_compatible() {
        return Err(CliError::failure("Error loading TSZ grammar"));
    }
    println!("name: {}", language.name());
    println!("version: {}", language.grammar_version());
    println!("abi: {}", language.abi_version());
    println!("node kinds: {}", language.node_kind_count());
    println!("fields: {}", language.field_count());
    Ok(ExitCode::SUCCESS)
}

/// Render a tree as compact JSON: one object per node with `type`, `named`, `start`, `end`, and when present
/// `field`, `missing` and `children`.
///
/// Flat chains such as `a + b + ...` nest without bound, so the text is written from an explicit stack instead of
/// building a `serde_json::Value` (whose serialization and drop both recurse).
pub fn tree_to_json(tree: &Tree) -> String {
    let mut out = String::new();
    let mut stack = vec![JsonStep::Open(tree.root_node(), true)];
    while let Some(step) = stack.pop() {
        match step {
            JsonStep::Close => out.push_str("]}"),
            JsonStep::Open(node, first) => {
                if !first {
                    out.push(',');
                }
                write_node_fields(&mut out, node);
                if node.child_count() == 0 {
                    out.push('}');
                    continue;
                }
                out.push_str(",\"children\":[");
                stack.push(JsonStep::Close);
                let children: Vec<_> = node.children().collect();
                for (index, child) in children.into_iter().enumerate().rev() {
                    stack.push(JsonStep::Open(child, index == 0));
                }
            }
        }
    }
    out
}

enum JsonStep<'tree> {
    /// A node to write; the flag is `true` for the first element of its array.
    Open(Node<'tree>, bool),
    Close,
}

/// Write `{"type":...,"named":...,"start":...,"end":...` and the optional scalar fields, leaving the object open.
fn write_node_fields(out: &mut String, node: Node<'_>) {
    let start = node.start_position();
    let end = node.end_position();
    out.push_str(&format!(
        "{{\"type\":{},\"named\":{},\"start\":{},\"end\":{}",
        Value::from(node.kind()),
        node.is_named(),
        json!({ "row": start.row, "column": start.column }),
        json!({ "row": end.row, "column": end.column }),
    ));
    if let Some(field) = node.field_name() {
        out.push_str(&format!(",\"field\":{}", Value::from(field)));
    }
    if node.is_missing() {
        out.push_str(",\"missing\":true");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_loads_grammar() {
        let tree = parse_source("let x = 1;").unwrap();
        assert!(tree.errors().is_empty());
        assert_eq!(tree.language(), LANGUAGE);
    }

    #[test]
    fn test_tree_to_json_shape() {
        let tree = parse_source("f();").unwrap();
        let value: Value = serde_json::from_str(&tree_to_json(&tree)).unwrap();
        assert_eq!(value["type"], "program");
        let stmt = &value["children"][0];
        assert_eq!(stmt["type"], "call_statement");
        assert_eq!(stmt["children"][1]["type"], ";");
        assert_eq!(stmt["children"][1]["named"], false);
    }

    #[test]
    fn test_tree_to_json_marks_missing() {
        let tree = parse_source("break").unwrap();
        let value: Value = serde_json::from_str(&tree_to_json(&tree)).unwrap();
        assert_eq!(value["children"][0]["type"], "break_statement");
        let semi = &value["children"][0]["children"][1];
        assert_eq!(semi["missing"], true);
    }

    #[test]
    fn test_tree_to_json_escapes_token_kinds() {
        let tree = parse_source("s = \"a\";").unwrap();
        let value: Value = serde_json::from_str(&tree_to_json(&tree)).unwrap();
        let string = &value["children"][0]["children"][2]["children"][0];
        assert_eq!(string["type"], "string");
        assert_eq!(string["children"][0]["type"], "\"");
    }

    #[test]
    fn test_tree_to_json_handles_long_chains() {
        let source = format!("const x = {}1;", "1 + ".repeat(100_000));
        let tree = parse_source(&source).unwrap();
        assert!(tree.errors().is_empty());
        let json = tree_to_json(&tree);
        assert!(json.starts_with("{\"type\":\"program\""));
        assert!(json.ends_with("]}"));
        assert_eq!(json.matches("\"type\":").count(), tree.root_node().descendant_count());
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source("definitely/not/here.tsz").unwrap_err();
        assert!(err.message.contains("Cannot access file"));
    }

    #[test]
    fn test_describe_keyword_token() {
        let tokens = lexer::lex("const").unwrap();
        assert_eq!(describe_token(&tokens[0], "const"), "keyword 'const'");
    }
}
