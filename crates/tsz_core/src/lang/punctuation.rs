//! Punctuation vocabulary.
//!
//! The canonical set of non-operator tokens used by the lexer/parser: delimiters, separators, access markers, and
//! the few structural markers tsz adds (`..` for match ranges, `@` for comptime identifiers).
//!
//! ## Examples
//! ```rust
//! use tsz_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("?."), Some(PunctuationId::QuestionDot));
//! assert_eq!(punctuation::as_str(PunctuationId::FatArrow), "=>");
//! ```

use super::registry::{Origin, Stability};

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets, braces, and template delimiters.
    Delimiter,
    /// Separators like `,`, `;` and `:`.
    Separator,
    /// Access markers like `.` and `?.`.
    Access,
    /// Misc markers like `=>`, `...`, `#`, `@`.
    Marker,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Separators
    Comma,
    Semicolon,
    Colon,

    // Access
    Dot,
    QuestionDot,

    // Markers
    Question,
    FatArrow,
    Ellipsis,
    DotDot,
    Hash,
    At,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Backtick,
    DollarBrace,
    DoubleQuote,
    SingleQuote,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
    pub origin: Origin,
    pub stability: Stability,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator, Origin::JavaScript),
    info(PunctuationId::Semicolon, ";", PunctuationCategory::Separator, Origin::JavaScript),
    info(PunctuationId::Colon, ":", PunctuationCategory::Separator, Origin::JavaScript),
    info(PunctuationId::Dot, ".", PunctuationCategory::Access, Origin::JavaScript),
    info(PunctuationId::QuestionDot, "?.", PunctuationCategory::Access, Origin::JavaScript),
    info(PunctuationId::Question, "?", PunctuationCategory::Marker, Origin::TypeScript),
    info(PunctuationId::FatArrow, "=>", PunctuationCategory::Marker, Origin::JavaScript),
    info(PunctuationId::Ellipsis, "...", PunctuationCategory::Marker, Origin::JavaScript),
    info(PunctuationId::DotDot, "..", PunctuationCategory::Marker, Origin::Tsz),
    info(PunctuationId::Hash, "#", PunctuationCategory::Marker, Origin::JavaScript),
    info(PunctuationId::At, "@", PunctuationCategory::Marker, Origin::Tsz),
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter, Origin::JavaScript),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter, Origin::JavaScript),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter, Origin::JavaScript),
    info(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter, Origin::JavaScript),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter, Origin::JavaScript),
    info(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter, Origin::JavaScript),
    info(PunctuationId::Backtick, "`", PunctuationCategory::Delimiter, Origin::JavaScript),
    info(PunctuationId::DollarBrace, "${", PunctuationCategory::Delimiter, Origin::JavaScript),
    info(PunctuationId::DoubleQuote, "\"", PunctuationCategory::Delimiter, Origin::JavaScript),
    info(PunctuationId::SingleQuote, "'", PunctuationCategory::Delimiter, Origin::JavaScript),
];

/// Return the canonical spelling for a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("punctuation info missing")
}

/// Resolve a punctuation spelling to its identifier.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

const fn info(
    id: PunctuationId,
    canonical: &'static str,
    category: PunctuationCategory,
    origin: Origin,
) -> PunctuationInfo {
    PunctuationInfo {
        id,
        canonical,
        category,
        origin,
        stability: Stability::Stable,
    }
}
