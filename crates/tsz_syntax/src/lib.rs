//! The tsz grammar: language handle, lexer, parser, and concrete syntax trees.
//!
//! This crate plays the role of a tree-sitter grammar package. [`language()`] returns the grammar handle, a
//! [`Parser`] accepts it through [`Parser::set_language`], and parsing produces a [`Tree`] whose node kinds and
//! field names match the tsz tree-sitter grammar.
//!
//! ## Notes
//! - Parsing never fails: broken input yields `ERROR` and MISSING nodes plus a list of [`SyntaxError`]s.
//! - Vocabulary identity (keywords/operators/punctuation) comes from `tsz_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use tsz_syntax::Parser;
//!
//! let mut parser = Parser::new();
//! parser
//!     .set_language(&tsz_syntax::LANGUAGE)
//!     .expect("Error loading TSZ grammar");
//!
//! let tree = parser.parse("const x = 1;").unwrap();
//! assert_eq!(
//!     tree.to_sexp(),
//!     "(program (variable_declaration kind: (const) name: (identifier) value: (primary_expression (number))))"
//! );
//! ```
//!
//! ## See also
//! - [`node_types`] for the `node-types.json` metadata
//! - [`highlight`] for capture-based syntax highlighting

mod builder;
pub mod diagnostics;
pub mod highlight;
pub mod language;
pub mod lexer;
pub mod node_types;
pub mod options;
pub mod parser;
pub mod span;
pub mod token_helpers;
pub mod tree;

pub use diagnostics::{ErrorKind, SyntaxError};
pub use language::{LANGUAGE, Language, LanguageError, NodeKind, language};
pub use options::ParseOptions;
pub use parser::{Parser, parse, parse_strict, parse_with_options};
pub use span::{Point, Span};
pub use tree::{Node, Tree, TreeCursor};
