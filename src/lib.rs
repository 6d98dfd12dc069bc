#![forbid(unsafe_code)]
//! tsz command-line tooling
//!
//! tsz is a strict subset of TypeScript/JavaScript with a few additions (`match`, `if`-expressions, comptime
//! identifiers, inclusive match ranges). The grammar lives in `tsz_syntax`; this crate wires it into the `tsz`
//! binary: parse, lex, check, highlight, and grammar metadata export.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a grammar bug (registry tables out of sync), use
//!   `.expect("... info missing")` with a clear explanation.

pub mod cli;

pub use tsz_syntax::{Language, ParseOptions, Parser, SyntaxError, Tree, language, parse};
