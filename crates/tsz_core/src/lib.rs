//! Canonical language vocabulary for tsz.
//!
//! tsz is a small language that transpiles to TypeScript/JavaScript. This crate holds the pieces of the language that
//! more than one tool needs to agree on: reserved words, operators with their binding power, and punctuation.
//!
//! ## Notes
//!
//! - This is a pure crate: **no IO**, no global state, and no syntax-tree types.
//! - The lexer and parser in `tsz_syntax` enforce syntax; the registries here only provide identity, spellings, and
//!   metadata (precedence, categories, provenance).

pub mod lang;
