//! Diagnostics and error reporting for tsz.
//!
//! [`SyntaxError`] is the single error type produced by the lexer and parser. It implements
//! [`miette::Diagnostic`] so tools can render it with source context, and [`format_error`] offers a plain-text
//! rendering that needs no terminal support.

use std::fmt;

use miette::{Diagnostic, LabeledSpan, NamedSource, Report};

use crate::span::{LineIndex, Span};

/// A lexing or parsing error with location information.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
    pub kind: ErrorKind,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl SyntaxError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Lexical, message, span)
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Syntax, message, span)
    }

    pub fn missing(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Missing, message, span)
    }

    pub fn limit(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Limit, message, span)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    /// Attach source text so the error renders with context through `miette`.
    pub fn into_report(self, file_name: &str, source: &str) -> Report {
        Report::new(self).with_source_code(NamedSource::new(file_name, source.to_string()))
    }
}

impl Diagnostic for SyntaxError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if self.hints.is_empty() {
            None
        } else {
            Some(Box::new(self.hints.join("\n")))
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new(Some(self.message.clone()), self.span.start, self.span.len());
        Some(Box::new(std::iter::once(label)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed token (bad escape, unterminated string, unexpected character).
    Lexical,
    /// Tokens that do not fit the grammar.
    Syntax,
    /// A required token was absent and has been inserted as a MISSING node.
    Missing,
    /// Input exceeded a configured parser limit.
    Limit,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Lexical => "tsz::lexical",
            ErrorKind::Syntax => "tsz::syntax",
            ErrorKind::Missing => "tsz::missing",
            ErrorKind::Limit => "tsz::limit",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Missing => write!(f, "missing token"),
            ErrorKind::Limit => write!(f, "limit exceeded"),
        }
    }
}

/// Render an error with its source line and a caret underline.
///
/// ```text
/// syntax error: Expected expression, found ';'
///   --> main.tsz:1:11
///    |
///  1 | const x = ;
///    |           ^
/// ```
pub fn format_error(file_name: &str, source: &str, error: &SyntaxError) -> String {
    let index = LineIndex::new(source);
    let offset = error.span.start.min(source.len());
    let point = index.point(offset);
    let line_start = offset - point.column;
    let line_end = source[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(source.len());
    let line_text = &source[line_start..line_end];

    let line_num = point.row + 1;
    let col_num = point.column + 1;
    let width = line_num.to_string().len();

    let underline_len = error
        .span
        .end
        .min(line_end)
        .saturating_sub(offset)
        .max(1);

    let mut out = String::new();
    out.push_str(&format!("{}: {}\n", error.kind, error.message));
    out.push_str(&format!("{:>width$}--> {}:{}:{}\n", "", file_name, line_num, col_num, width = width + 1));
    out.push_str(&format!("{:>width$} |\n", "", width = width + 1));
    out.push_str(&format!(" {:>width$} | {}\n", line_num, line_text, width = width));
    out.push_str(&format!(
        "{:>width$} | {}{}\n",
        "",
        " ".repeat(point.column),
        "^".repeat(underline_len),
        width = width + 1
    ));
    for note in &error.notes {
        out.push_str(&format!("{:>width$} = note: {}\n", "", note, width = width + 1));
    }
    for hint in &error.hints {
        out.push_str(&format!("{:>width$} = hint: {}\n", "", hint, width = width + 1));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_points_at_column() {
        let source = "let a = 1;\nconst x = ;\n";
        let err = SyntaxError::syntax("Expected expression", Span::new(21, 22));
        let rendered = format_error("main.tsz", source, &err);
        assert!(rendered.starts_with("syntax error: Expected expression\n"));
        assert!(rendered.contains("main.tsz:2:11"));
        assert!(rendered.contains(" 2 | const x = ;"));
        assert!(rendered.contains("   |           ^\n"));
    }

    #[test]
    fn test_hints_feed_miette_help() {
        let err = SyntaxError::lexical("'==' is not supported", Span::new(0, 2)).with_hint("use '===' instead");
        let help = err.help().map(|h| h.to_string());
        assert_eq!(help.as_deref(), Some("use '===' instead"));
        assert_eq!(err.code().map(|c| c.to_string()).as_deref(), Some("tsz::lexical"));
    }

    #[test]
    fn test_display_includes_kind() {
        let err = SyntaxError::missing("Expected ';'", Span::empty(4));
        assert_eq!(err.to_string(), "missing token: Expected ';'");
    }
}
