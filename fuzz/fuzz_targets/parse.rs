#![no_main]

use libfuzzer_sys::fuzz_target;
use tsz_syntax::{ParseOptions, lexer, parse_with_options};

fuzz_target!(|data: &[u8]| {
    // Invalid UTF-8 never reaches the grammar
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = lexer::lex_all(s);

        let tree = parse_with_options(s, ParseOptions::default().with_max_depth(64));
        let root = tree.root_node();
        assert_eq!(root.end_byte(), s.len());
        if root.has_error() {
            assert!(!tree.errors().is_empty());
        }
    }
});
