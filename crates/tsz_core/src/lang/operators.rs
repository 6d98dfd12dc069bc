//! Operator vocabulary.
//!
//! Symbol operators like `+` and word operators like `instanceof`, together with the binding power the parser uses
//! for them.
//!
//! ## Notes
//! - `precedence` is a relative ordering where higher binds tighter. Binary operators use `1..=13`; prefix operators
//!   sit above every binary operator; assignment operators use `0`.
//! - tsz deliberately has no loose equality: `==` and `!=` are *not* in this registry. See
//!   [`strict_replacement`].
//!
//! ## Examples
//! ```rust
//! use tsz_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("**"), Some(OperatorId::StarStar));
//! assert!(operators::info_for(OperatorId::Star).precedence > operators::info_for(OperatorId::Plus).precedence);
//! ```

use super::registry::{Example, Origin, Stability};

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// Define where an operator appears relative to its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    /// Binary operator only (`*`).
    Infix,
    /// Unary operator only (`!`).
    Prefix,
    /// Binary or unary depending on position (`-`, `+`).
    InfixOrPrefix,
    /// `=` and compound assignments.
    Assignment,
    /// `++` / `--`.
    Update,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar,

    // Bitwise / shifts
    Amp,
    Pipe,
    Caret,
    Tilde,
    Shl,
    Shr,
    UShr,

    // Logical
    AmpAmp,
    PipePipe,
    QuestionQuestion,
    Bang,

    // Comparison
    EqEqEq,
    NotEqEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Word operators
    Instanceof,
    In,
    Typeof,
    Void,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    CaretEq,
    AmpEq,
    PipeEq,
    ShrEq,
    UShrEq,
    ShlEq,
    StarStarEq,
    AmpAmpEq,
    PipePipeEq,
    QuestionQuestionEq,

    // Update
    PlusPlus,
    MinusMinus,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
    pub is_keyword_spelling: bool,
    pub origin: Origin,
    pub stability: Stability,
    pub examples: &'static [Example],
}

/// Binding power of prefix operators (`!x`, `-x`, `typeof x`): tighter than any binary operator.
pub const PREFIX_PRECEDENCE: u8 = 14;

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::StarStar, "**", 13, Associativity::Right, Fixity::Infix),
    op(OperatorId::Star, "*", 12, Associativity::Left, Fixity::Infix),
    op(OperatorId::Slash, "/", 12, Associativity::Left, Fixity::Infix),
    op(OperatorId::Percent, "%", 12, Associativity::Left, Fixity::Infix),
    op(OperatorId::Plus, "+", 11, Associativity::Left, Fixity::InfixOrPrefix),
    op(OperatorId::Minus, "-", 11, Associativity::Left, Fixity::InfixOrPrefix),
    // Shifts
    op(OperatorId::Shl, "<<", 10, Associativity::Left, Fixity::Infix),
    op(OperatorId::Shr, ">>", 10, Associativity::Left, Fixity::Infix),
    op(OperatorId::UShr, ">>>", 10, Associativity::Left, Fixity::Infix),
    // Relational
    op(OperatorId::Lt, "<", 8, Associativity::Left, Fixity::Infix),
    op(OperatorId::LtEq, "<=", 8, Associativity::Left, Fixity::Infix),
    op(OperatorId::Gt, ">", 8, Associativity::Left, Fixity::Infix),
    op(OperatorId::GtEq, ">=", 8, Associativity::Left, Fixity::Infix),
    word(OperatorId::Instanceof, "instanceof", 8, Fixity::Infix),
    word(OperatorId::In, "in", 8, Fixity::Infix),
    // Equality (strict only)
    op(OperatorId::EqEqEq, "===", 7, Associativity::Left, Fixity::Infix),
    op(OperatorId::NotEqEq, "!==", 7, Associativity::Left, Fixity::Infix),
    // Bitwise
    op(OperatorId::Amp, "&", 6, Associativity::Left, Fixity::Infix),
    op(OperatorId::Caret, "^", 5, Associativity::Left, Fixity::Infix),
    op(OperatorId::Pipe, "|", 4, Associativity::Left, Fixity::Infix),
    // Logical
    op(OperatorId::AmpAmp, "&&", 3, Associativity::Left, Fixity::Infix),
    op(OperatorId::PipePipe, "||", 2, Associativity::Left, Fixity::Infix),
    op(OperatorId::QuestionQuestion, "??", 1, Associativity::Left, Fixity::Infix),
    // Prefix
    op(OperatorId::Bang, "!", PREFIX_PRECEDENCE, Associativity::Right, Fixity::Prefix),
    op(OperatorId::Tilde, "~", PREFIX_PRECEDENCE, Associativity::Right, Fixity::Prefix),
    word(OperatorId::Typeof, "typeof", PREFIX_PRECEDENCE, Fixity::Prefix),
    word(OperatorId::Void, "void", PREFIX_PRECEDENCE, Fixity::Prefix),
    // Assignment
    assign(OperatorId::Eq, "="),
    assign(OperatorId::PlusEq, "+="),
    assign(OperatorId::MinusEq, "-="),
    assign(OperatorId::StarEq, "*="),
    assign(OperatorId::SlashEq, "/="),
    assign(OperatorId::PercentEq, "%="),
    assign(OperatorId::CaretEq, "^="),
    assign(OperatorId::AmpEq, "&="),
    assign(OperatorId::PipeEq, "|="),
    assign(OperatorId::ShrEq, ">>="),
    assign(OperatorId::UShrEq, ">>>="),
    assign(OperatorId::ShlEq, "<<="),
    assign(OperatorId::StarStarEq, "**="),
    assign(OperatorId::AmpAmpEq, "&&="),
    assign(OperatorId::PipePipeEq, "||="),
    assign(OperatorId::QuestionQuestionEq, "??="),
    // Update
    op(OperatorId::PlusPlus, "++", PREFIX_PRECEDENCE, Associativity::Left, Fixity::Update),
    op(OperatorId::MinusMinus, "--", PREFIX_PRECEDENCE, Associativity::Left, Fixity::Update),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Canonical spelling.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Resolve an operator spelling to its identifier.
///
/// ## Notes
/// - Matching is **case-sensitive**.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

/// Return `(precedence, associativity)` if `id` can be used as a binary operator.
pub fn binary_binding(id: OperatorId) -> Option<(u8, Associativity)> {
    let info = info_for(id);
    match info.fixity {
        Fixity::Infix | Fixity::InfixOrPrefix => Some((info.precedence, info.associativity)),
        _ => None,
    }
}

/// Return `true` if `id` can be used as a prefix (unary) operator.
pub fn is_prefix(id: OperatorId) -> bool {
    matches!(info_for(id).fixity, Fixity::Prefix | Fixity::InfixOrPrefix)
}

/// Return `true` for `=` and every compound assignment.
pub fn is_assignment(id: OperatorId) -> bool {
    info_for(id).fixity == Fixity::Assignment
}

/// Return `true` for compound assignments (`+=`, `??=`, ...) but not plain `=`.
pub fn is_augmented_assignment(id: OperatorId) -> bool {
    is_assignment(id) && id != OperatorId::Eq
}

/// Map a loose-equality spelling that tsz rejects to the strict operator that replaces it.
///
/// ## Examples
/// ```rust
/// use tsz_core::lang::operators::{self, OperatorId};
///
/// assert_eq!(operators::strict_replacement("=="), Some(OperatorId::EqEqEq));
/// assert_eq!(operators::strict_replacement("==="), None);
/// ```
pub fn strict_replacement(spelling: &str) -> Option<OperatorId> {
    match spelling {
        "==" => Some(OperatorId::EqEqEq),
        "!=" => Some(OperatorId::NotEqEq),
        _ => None,
    }
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spelling: &'static str,
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity,
        fixity,
        is_keyword_spelling: false,
        origin: Origin::JavaScript,
        stability: Stability::Stable,
        examples: &[],
    }
}

const fn word(id: OperatorId, spelling: &'static str, precedence: u8, fixity: Fixity) -> OperatorInfo {
    OperatorInfo {
        is_keyword_spelling: true,
        ..op(id, spelling, precedence, Associativity::Left, fixity)
    }
}

const fn assign(id: OperatorId, spelling: &'static str) -> OperatorInfo {
    op(id, spelling, 0, Associativity::Right, Fixity::Assignment)
}
