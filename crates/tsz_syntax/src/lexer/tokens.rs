//! Token types for the tsz lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for symbol operators
//! - `Punctuation(PunctuationId)` for punctuation tokens
//!
//! ## Notes
//! - Contextual words (`number`, `string`, ...) lex as `Ident`; the parser promotes them in type position.
//! - Literal tokens keep spans rather than decoded values: the tree exposes source text, not runtime values.

use crate::span::Span;
use tsz_core::lang::keywords::{self, KeywordId};
use tsz_core::lang::operators::OperatorId;
use tsz_core::lang::punctuation::PunctuationId;

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Ident(String),
    /// Raw numeric spelling (`0x1F`, `1_000`, `2n`, `.5e3`).
    Number(String),
    /// Quoted string; the token span includes both quotes.
    String(Vec<StringPart>),
    /// `/pattern/flags`.
    Regex { pattern: Span, flags: Option<Span> },

    // ========== Template literals ==========
    /// Literal text between template delimiters.
    TemplateChars,
    /// Escape sequence inside a template.
    EscapeSequence,

    // ========== Special ==========
    Eof,
}

/// Piece of a quoted string between its quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringPart {
    Fragment(Span),
    Escape(Span),
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
    /// `<!-- ...` anywhere, or `--> ...` at the start of a line.
    Html,
}

/// A comment, kept out of the token stream and attached to the tree afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comment {
    pub kind: CommentKind,
    pub span: Span,
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::reserved_from_str(name)
}
