//! Shareable metadata for `tsz_core::lang` registries.
//!
//! The small, dependency-free metadata types reused by every registry (keywords, operators, punctuation).
//!
//! ## Notes
//! - These types are `Copy` so registries can live in `const` tables.
//! - Metadata is meant for tooling/docs/diagnostics; enforcement of syntax rules lives in `tsz_syntax`.

/// Where a piece of vocabulary comes from.
///
/// tsz borrows most of its surface from JavaScript and TypeScript, and adds a few constructs of its own. Tooling
/// uses this to explain differences to users coming from TS ("`==` is not a tsz operator").
///
/// ## Examples
/// ```rust
/// use tsz_core::lang::registry::Origin;
///
/// assert_eq!(Origin::Tsz.label(), "tsz");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    JavaScript,
    TypeScript,
    Tsz,
}

impl Origin {
    /// Human-readable name of the origin.
    pub const fn label(self) -> &'static str {
        match self {
            Origin::JavaScript => "JavaScript",
            Origin::TypeScript => "TypeScript",
            Origin::Tsz => "tsz",
        }
    }
}

/// Identify the grammar version a vocabulary item is available since (for example `"0.1.0"`).
pub type SinceVersion = &'static str;

/// Describe the lifecycle status of a language vocabulary item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Draft,
    Deprecated,
}

/// A small example snippet for documentation.
#[derive(Debug, Clone, Copy)]
pub struct Example {
    pub code: &'static str,
    pub note: Option<&'static str>,
}
