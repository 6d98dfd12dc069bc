//! Smoke tests for loading the tsz grammar into a parser.

use tsz_syntax::language::{ABI_VERSION, MIN_COMPATIBLE_ABI_VERSION};
use tsz_syntax::{LANGUAGE, Parser, language};

#[test]
fn can_load_grammar() {
    let mut parser = Parser::new();
    parser
        .set_language(&LANGUAGE)
        .expect("Error loading TSZ grammar");
}

#[test]
fn language_constructor_matches_static_handle() {
    let lang = language();
    assert_eq!(lang, LANGUAGE);
    assert_eq!(lang.name(), "tsz");
    assert!((MIN_COMPATIBLE_ABI_VERSION..=ABI_VERSION).contains(&lang.abi_version()));
    assert!(!lang.grammar_version().is_empty());
}

#[test]
fn loaded_parser_produces_trees() {
    let mut parser = Parser::new();
    parser.set_language(&language()).expect("Error loading TSZ grammar");
    let tree = parser.parse("print(\"hello\");").expect("language is set");
    assert!(!tree.has_error());
    assert_eq!(tree.language(), LANGUAGE);
    assert_eq!(tree.root_node().kind(), "program");
}

#[test]
fn symbol_tables_round_trip() {
    let lang = language();
    for id in 0..lang.node_kind_count() as u16 {
        let name = lang.node_kind_for_id(id).expect("every id has a name");
        let named = lang.node_kind_is_named(id);
        // Word operators share their spelling with a keyword, so compare names rather than ids.
        let found = lang.id_for_node_kind(name, named).expect("every name resolves");
        assert_eq!(lang.node_kind_for_id(found), Some(name));
        assert_eq!(lang.node_kind_is_named(found), named);
    }
    for id in 1..=lang.field_count() as u16 {
        let name = lang.field_name_for_id(id).expect("every field id has a name");
        assert_eq!(lang.field_id_for_name(name), Some(id));
    }
}
