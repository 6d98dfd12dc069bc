//! Define the keyword vocabulary for the tsz language.
//!
//! This module is the single source of truth for words with special meaning: a stable identifier ([`KeywordId`])
//! plus a const metadata table ([`KEYWORDS`]).
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Only *reserved* keywords are turned into keyword tokens by the lexer (see [`reserved_from_str`]). The builtin
//!   type names (`string`, `number`, ...) are *contextual*: they stay identifiers and are recognized by the parser
//!   in type position only, so `const string = "s";` remains legal.
//!
//! ## Examples
//! ```rust
//! use tsz_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::reserved_from_str("if"), Some(KeywordId::If));
//! assert_eq!(keywords::reserved_from_str("string"), None);
//! assert_eq!(keywords::from_str("string"), Some(KeywordId::String));
//! ```

use super::registry::{Example, Origin, SinceVersion, Stability};

/// Stable identifier for every keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Control flow / statements
    If,
    Else,
    Match,
    Case,
    Return,
    Break,

    // Declarations
    Function,
    Const,
    Let,
    Enum,

    // Literals
    True,
    False,
    Undefined,

    // Word operators
    Typeof,
    Void,
    Instanceof,
    In,

    // Builtin type names (contextual)
    Boolean,
    Number,
    String,
    Unknown,
    Never,
    Symbol,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ControlFlow,
    Declaration,
    Literal,
    Operator,
    Type,
}

/// Usage context hints (not enforced here; the parser owns context).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordUsage {
    Statement,
    Expression,
    Type,
    Operator,
}

/// Metadata for a keyword.
///
/// ## Notes
/// - `reserved` keywords can never be used as identifiers.
/// - `examples` are intended for generated documentation; keep them small.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub usage: &'static [KeywordUsage],
    pub reserved: bool,
    pub origin: Origin,
    pub since_version: Option<SinceVersion>,
    pub stability: Stability,
    pub examples: &'static [Example],
}

/// Registry of all keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Control flow / statements
    info(
        KeywordId::If,
        "if",
        KeywordCategory::ControlFlow,
        &[KeywordUsage::Statement, KeywordUsage::Expression],
        true,
        Origin::JavaScript,
    )
    .with_examples(&[
        Example {
            code: "if (ready) { start(); } else { wait(); }",
            note: Some("Statement form: branches must be blocks."),
        },
        Example {
            code: "const label = if (n === 1) \"one\" else \"many\";",
            note: Some("Expression form replaces `cond ? a : b`."),
        },
    ]),
    info(
        KeywordId::Else,
        "else",
        KeywordCategory::ControlFlow,
        &[KeywordUsage::Statement, KeywordUsage::Expression],
        true,
        Origin::JavaScript,
    ),
    info(
        KeywordId::Match,
        "match",
        KeywordCategory::ControlFlow,
        &[KeywordUsage::Statement, KeywordUsage::Expression],
        true,
        Origin::Tsz,
    )
    .with_examples(&[Example {
        code: "match (code) { case 200..299: \"ok\"; else: \"error\"; }",
        note: Some("Ranges are inclusive on both ends."),
    }]),
    info(
        KeywordId::Case,
        "case",
        KeywordCategory::ControlFlow,
        &[KeywordUsage::Statement],
        true,
        Origin::JavaScript,
    ),
    info(
        KeywordId::Return,
        "return",
        KeywordCategory::ControlFlow,
        &[KeywordUsage::Statement],
        true,
        Origin::JavaScript,
    ),
    info(
        KeywordId::Break,
        "break",
        KeywordCategory::ControlFlow,
        &[KeywordUsage::Statement],
        true,
        Origin::JavaScript,
    ),
    // Declarations
    info(
        KeywordId::Function,
        "function",
        KeywordCategory::Declaration,
        &[KeywordUsage::Statement, KeywordUsage::Expression],
        true,
        Origin::JavaScript,
    ),
    info(
        KeywordId::Const,
        "const",
        KeywordCategory::Declaration,
        &[KeywordUsage::Statement],
        true,
        Origin::JavaScript,
    ),
    info(
        KeywordId::Let,
        "let",
        KeywordCategory::Declaration,
        &[KeywordUsage::Statement],
        true,
        Origin::JavaScript,
    ),
    info(
        KeywordId::Enum,
        "enum",
        KeywordCategory::Declaration,
        &[KeywordUsage::Statement],
        true,
        Origin::TypeScript,
    ),
    // Literals
    info(
        KeywordId::True,
        "true",
        KeywordCategory::Literal,
        &[KeywordUsage::Expression, KeywordUsage::Type],
        true,
        Origin::JavaScript,
    ),
    info(
        KeywordId::False,
        "false",
        KeywordCategory::Literal,
        &[KeywordUsage::Expression, KeywordUsage::Type],
        true,
        Origin::JavaScript,
    ),
    info(
        KeywordId::Undefined,
        "undefined",
        KeywordCategory::Literal,
        &[KeywordUsage::Expression, KeywordUsage::Type],
        true,
        Origin::JavaScript,
    ),
    // Word operators
    info(
        KeywordId::Typeof,
        "typeof",
        KeywordCategory::Operator,
        &[KeywordUsage::Operator],
        true,
        Origin::JavaScript,
    ),
    info(
        KeywordId::Void,
        "void",
        KeywordCategory::Operator,
        &[KeywordUsage::Operator, KeywordUsage::Type],
        true,
        Origin::JavaScript,
    ),
    info(
        KeywordId::Instanceof,
        "instanceof",
        KeywordCategory::Operator,
        &[KeywordUsage::Operator],
        true,
        Origin::JavaScript,
    ),
    info(
        KeywordId::In,
        "in",
        KeywordCategory::Operator,
        &[KeywordUsage::Operator],
        true,
        Origin::JavaScript,
    ),
    // Builtin type names
    info(
        KeywordId::Boolean,
        "boolean",
        KeywordCategory::Type,
        &[KeywordUsage::Type],
        false,
        Origin::TypeScript,
    ),
    info(
        KeywordId::Number,
        "number",
        KeywordCategory::Type,
        &[KeywordUsage::Type],
        false,
        Origin::TypeScript,
    ),
    info(
        KeywordId::String,
        "string",
        KeywordCategory::Type,
        &[KeywordUsage::Type],
        false,
        Origin::TypeScript,
    ),
    info(
        KeywordId::Unknown,
        "unknown",
        KeywordCategory::Type,
        &[KeywordUsage::Type],
        false,
        Origin::TypeScript,
    ),
    info(
        KeywordId::Never,
        "never",
        KeywordCategory::Type,
        &[KeywordUsage::Type],
        false,
        Origin::TypeScript,
    ),
    info(
        KeywordId::Symbol,
        "symbol",
        KeywordCategory::Type,
        &[KeywordUsage::Type],
        false,
        Origin::TypeScript,
    ),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Usage hints.
pub fn usage(id: KeywordId) -> &'static [KeywordUsage] {
    info_for(id).usage
}

/// Return `true` if the keyword can never be used as an identifier.
pub fn is_reserved(id: KeywordId) -> bool {
    info_for(id).reserved
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling, including contextual keywords.
///
/// ## Notes
/// - Matching is **case-sensitive**.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

/// Lookup by spelling, restricted to reserved keywords.
///
/// This is what the lexer uses: contextual keywords come back as `None` and stay identifiers.
pub fn reserved_from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS
        .iter()
        .find(|k| k.reserved && k.canonical == s)
        .map(|k| k.id)
}

/// Spellings accepted as a `primitive_type` in type position.
///
/// ## Notes
/// - `undefined`, `true` and `false` are primitive types too, but they produce their own named nodes.
pub const PRIMITIVE_TYPE_KEYWORDS: &[KeywordId] = &[
    KeywordId::Boolean,
    KeywordId::Number,
    KeywordId::String,
    KeywordId::Void,
    KeywordId::Unknown,
    KeywordId::Never,
    KeywordId::Symbol,
];

// --- helpers -----------------------------------------------------------------

const fn info(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    usage: &'static [KeywordUsage],
    reserved: bool,
    origin: Origin,
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        usage,
        reserved,
        origin,
        since_version: Some("0.1.0"),
        stability: Stability::Stable,
        examples: &[],
    }
}

impl KeywordInfo {
    const fn with_examples(mut self, examples: &'static [Example]) -> Self {
        self.examples = examples;
        self
    }
}
