//! Corpus tests for the tsz grammar
//!
//! Every `.tsz` file under `tests/corpus/` must parse without errors, and a handful of small programs are pinned
//! as inline S-expression snapshots.
//!
//! Run with: `cargo test --test corpus_tests`
//! Review changes: `cargo insta review`

use std::fs;

use tsz::{Parser, Tree, parse};

fn parse_file(path: &std::path::Path) -> (String, Tree) {
    let source = fs::read_to_string(path).unwrap_or_else(|_| panic!("Failed to read corpus file: {}", path.display()));
    let mut parser = Parser::new();
    parser.set_language(&tsz::language()).expect("Error loading TSZ grammar");
    let tree = parser.parse(&source).expect("language is set");
    (source, tree)
}

#[test]
fn test_corpus_parses_cleanly() {
    insta::glob!("corpus/*.tsz", |path| {
        let (source, tree) = parse_file(path);
        assert!(
            tree.errors().is_empty(),
            "{} has syntax errors: {:#?}",
            path.display(),
            tree.errors()
        );
        assert_eq!(tree.root_node().end_byte(), source.len());
        assert!(!tree.root_node().has_error());
    });
}

#[test]
fn test_corpus_top_level_kinds() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/corpus/basics.tsz");
    let (_, tree) = parse_file(&path);
    let kinds: Vec<_> = tree.root_node().named_children().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        [
            "comment",
            "variable_declaration",
            "variable_declaration",
            "variable_declaration",
            "variable_declaration",
            "enum_declaration",
            "function_declaration",
            "call_statement",
        ]
    );
}

#[test]
fn test_declaration_snapshot() {
    insta::assert_snapshot!(
        parse("const x: number = 1 + 2;\nenum Color { Red, Green, }").to_sexp(),
        @"(program (variable_declaration kind: (const) name: (identifier) (type_annotation type: (primitive_type)) value: (binary_expression left: (primary_expression (number)) right: (primary_expression (number)))) (enum_declaration (identifier) (identifier) (identifier)))"
    );
}

#[test]
fn test_swap_snapshot() {
    insta::assert_snapshot!(
        parse("[a, b] = [b, a];").to_sexp(),
        @"(program (assignment_expression left: (array_pattern (pattern (identifier)) (pattern (identifier))) right: (primary_expression (array_literal (primary_expression (identifier)) (primary_expression (identifier))))))"
    );
}

#[test]
fn test_member_call_snapshot() {
    insta::assert_snapshot!(
        parse("// log it\na.b.c(d);").to_sexp(),
        @"(program (comment) (call_statement (call_expression function: (primary_expression (member_expression object: (primary_expression (member_expression object: (primary_expression (identifier)) property: (property_identifier))) property: (property_identifier))) arguments: (argument_list (primary_expression (identifier))))))"
    );
}

#[test]
fn test_recovery_snapshot() {
    insta::assert_snapshot!(
        parse("let = 5;\nbreak").to_sexp(),
        @r#"(program (ERROR (number)) (break_statement (MISSING ";")))"#
    );
}

fn json_node_count(value: &serde_json::Value) -> usize {
    1 + value["children"]
        .as_array()
        .map(|children| children.iter().map(json_node_count).sum())
        .unwrap_or(0)
}

proptest::proptest! {
    #[test]
    fn json_rendering_covers_every_node(source in "[a-z(){};=+ 0-9\"`]{0,60}") {
        let tree = parse(&source);
        let json = tsz::cli::commands::tree_to_json(&tree);
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        proptest::prop_assert_eq!(&value["type"], "program");
        proptest::prop_assert_eq!(json_node_count(&value), tree.root_node().descendant_count());
    }
}
