//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites and to make it easy
//! to work with ID-based tokens.

use crate::lexer::{Token, TokenKind};
use tsz_core::lang::keywords::KeywordId;
use tsz_core::lang::operators::OperatorId;
use tsz_core::lang::punctuation::PunctuationId;

impl TokenKind {
    /// Return the keyword id, if this is a keyword token.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self {
            TokenKind::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return the operator id, if this is an operator token.
    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            TokenKind::Operator(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return the punctuation id, if this is a punctuation token.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        match self {
            TokenKind::Punctuation(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return `true` if a `/` after this token is division rather than the start of a regex.
    pub fn ends_operand(&self) -> bool {
        match self {
            TokenKind::Ident(_) | TokenKind::Number(_) | TokenKind::String(_) | TokenKind::Regex { .. } => true,
            TokenKind::Keyword(k) => matches!(k, KeywordId::True | KeywordId::False | KeywordId::Undefined),
            TokenKind::Punctuation(p) => matches!(
                p,
                PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace | PunctuationId::Backtick
            ),
            _ => false,
        }
    }

    /// Short human-readable description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Keyword(k) => format!("'{}'", tsz_core::lang::keywords::as_str(*k)),
            TokenKind::Operator(o) => format!("'{}'", tsz_core::lang::operators::as_str(*o)),
            TokenKind::Punctuation(p) => format!("'{}'", tsz_core::lang::punctuation::as_str(*p)),
            TokenKind::Ident(name) => format!("identifier '{}'", name),
            TokenKind::Number(raw) => format!("number '{}'", raw),
            TokenKind::String(_) => "string".to_string(),
            TokenKind::Regex { .. } => "regex".to_string(),
            TokenKind::TemplateChars | TokenKind::EscapeSequence => "template text".to_string(),
            TokenKind::Eof => "end of file".to_string(),
        }
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.keyword_id()`.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        self.kind.keyword_id()
    }

    /// Convenience wrapper for `self.kind.operator_id()`.
    pub fn operator_id(&self) -> Option<OperatorId> {
        self.kind.operator_id()
    }

    /// Convenience wrapper for `self.kind.punctuation_id()`.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        self.kind.punctuation_id()
    }
}
