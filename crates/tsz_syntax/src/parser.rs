//! Parser for the tsz language
//!
//! Turns a token stream into a concrete syntax [`Tree`] shaped like the tsz tree-sitter grammar: same node kinds,
//! same field names, same hidden rules folded into their parents.
//!
//! ## Notes
//! - Parsing never fails. Broken statements become `ERROR` nodes and a missing `;` or `}` becomes a zero-width
//!   MISSING node; every problem is also reported in [`Tree::errors`].
//! - Ambiguities the grammar resolves with GLR are resolved here with bounded lookahead over the token stream
//!   (`{`/`[` followed by `=` after its matching close is a destructuring assignment; `(` whose matching `)` is
//!   followed by `:` starts an arrow function).
//!
//! ## Examples
//!
//! ```rust
//! use tsz_syntax::parser::{self, Parser};
//!
//! let tree = parser::parse("const x: number = 1 + 2;");
//! assert!(!tree.has_error());
//!
//! let mut parser = Parser::new();
//! parser.set_language(&tsz_syntax::language()).unwrap();
//! let tree = parser.parse("print(x);").unwrap();
//! assert_eq!(tree.root_node().child(0).unwrap().kind(), "call_statement");
//! ```

use crate::builder::{Child, TreeBuilder};
use crate::diagnostics::SyntaxError;
use crate::language::{
    ABI_VERSION, FieldId, LANGUAGE, Language, LanguageError, MIN_COMPATIBLE_ABI_VERSION, NodeKind, Symbol,
};
use crate::lexer::{self, Comment, CommentKind, StringPart, Token, TokenKind};
use crate::options::ParseOptions;
use crate::span::Span;
use crate::tree::{NodeId, Tree};
use tsz_core::lang::keywords::{self, KeywordId};
use tsz_core::lang::operators::{self, Associativity, OperatorId};
use tsz_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/stmts.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/expr.rs");
include!("parser/patterns.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
