//! tsz language vocabulary registries.
//!
//! Callers work with **stable IDs** (`KeywordId`, `OperatorId`, `PunctuationId`) and look up spellings/metadata
//! via const registry tables instead of comparing strings all over the lexer and parser.
//!
//! ## Examples
//! ```rust
//! use tsz_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("match"), Some(KeywordId::Match));
//! assert_eq!(keywords::as_str(KeywordId::Match), "match");
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod registry;
