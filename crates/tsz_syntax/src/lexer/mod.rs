//! Lexer for the tsz language
//!
//! Handles tokenization including:
//! - Keywords, identifiers, and the contextual type words
//! - Numbers (decimal, hex, octal, binary, bigint, separators)
//! - Strings, template literals (with `${}` substitutions), and regex literals
//! - Line, block, and HTML-style comments
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, StringPart, Comment)
//! - `strings` - String, template, escape, and regex scanning
//! - `numbers` - Numeric literal scanning
//! - `comments` - Comment scanning
//!
//! ## Notes
//! - Regex and division share `/`. A `/` after a token that ends an operand (identifier, literal, `)`, `]`, `}`,
//!   closing backtick) is division; anywhere else it starts a regex.
//! - `==` and `!=` are reported and lexed as `===` / `!==` so parsing can continue.

mod comments;
mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Comment, CommentKind, StringPart, Token, TokenKind, keyword_id};

use crate::diagnostics::SyntaxError;
use crate::span::Span;
use tsz_core::lang::operators::{self, OperatorId};
use tsz_core::lang::punctuation::PunctuationId;

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
// Template literals nest through substitutions, so the lexer keeps a mode stack:
//
// [Code] --'`'--> [Template] --'${'--> [Substitution depth=0] --'{'--> depth+1
//                     ^                        |
//                     +---- '}' at depth 0 ----+
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Template,
    Substitution { depth: usize },
}

/// Everything the lexer produced, including what went wrong.
#[derive(Debug, Clone, Default)]
pub struct LexOutput {
    /// Significant tokens, always terminated by `Eof`.
    pub tokens: Vec<Token>,
    pub comments: Vec<Comment>,
    pub errors: Vec<SyntaxError>,
}

/// Lexer for tsz source code.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    modes: Vec<Mode>,
    /// Only whitespace and comments seen since the last line terminator.
    at_line_start: bool,
    tokens: Vec<Token>,
    comments: Vec<Comment>,
    errors: Vec<SyntaxError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            modes: Vec::new(),
            at_line_start: true,
            tokens: Vec::new(),
            comments: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source, recovering from malformed tokens.
    ///
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> LexOutput {
        while !self.is_at_end() {
            if self.modes.last() == Some(&Mode::Template) {
                self.scan_template_part();
            } else {
                self.scan_token();
            }
        }

        if self.modes.contains(&Mode::Template) {
            self.errors.push(SyntaxError::lexical(
                "Unterminated template literal",
                Span::empty(self.current_pos),
            ));
        }

        self.tokens
            .push(Token::new(TokenKind::Eof, Span::empty(self.current_pos)));

        LexOutput {
            tokens: self.tokens,
            comments: self.comments,
            errors: self.errors,
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next();
        iter.next()
    }

    fn rest_starts_with(&self, prefix: &str) -> bool {
        self.source[self.current_pos..].starts_with(prefix)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_str(&mut self, expected: &str) -> bool {
        if self.rest_starts_with(expected) {
            for _ in expected.chars() {
                self.advance();
            }
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let Some(c) = self.peek() else {
            return;
        };

        if is_whitespace(c) {
            self.advance();
            if is_line_terminator(c) {
                self.at_line_start = true;
            }
            return;
        }

        let start = self.current_pos;
        self.advance();

        match c {
            // Comments, regex, division
            '/' => {
                if self.peek() == Some('/') {
                    self.scan_line_comment(start, CommentKind::Line);
                } else if self.peek() == Some('*') {
                    self.scan_block_comment(start);
                } else if self.regex_allowed() {
                    self.scan_regex(start);
                } else {
                    self.operator(start, OperatorId::Slash, &[("=", OperatorId::SlashEq)]);
                }
            }
            '<' => {
                if self.rest_starts_with("!--") {
                    self.scan_line_comment(start, CommentKind::Html);
                } else {
                    self.operator(
                        start,
                        OperatorId::Lt,
                        &[("<=", OperatorId::ShlEq), ("<", OperatorId::Shl), ("=", OperatorId::LtEq)],
                    );
                }
            }
            '-' => {
                if self.at_line_start && self.rest_starts_with("->") {
                    self.scan_line_comment(start, CommentKind::Html);
                } else {
                    self.operator(
                        start,
                        OperatorId::Minus,
                        &[("-", OperatorId::MinusMinus), ("=", OperatorId::MinusEq)],
                    );
                }
            }

            // Operators
            '+' => self.operator(
                start,
                OperatorId::Plus,
                &[("+", OperatorId::PlusPlus), ("=", OperatorId::PlusEq)],
            ),
            '*' => self.operator(
                start,
                OperatorId::Star,
                &[("*=", OperatorId::StarStarEq), ("*", OperatorId::StarStar), ("=", OperatorId::StarEq)],
            ),
            '%' => self.operator(start, OperatorId::Percent, &[("=", OperatorId::PercentEq)]),
            '^' => self.operator(start, OperatorId::Caret, &[("=", OperatorId::CaretEq)]),
            '~' => self.add_op(OperatorId::Tilde, start),
            '&' => self.operator(
                start,
                OperatorId::Amp,
                &[("&=", OperatorId::AmpAmpEq), ("&", OperatorId::AmpAmp), ("=", OperatorId::AmpEq)],
            ),
            '|' => self.operator(
                start,
                OperatorId::Pipe,
                &[("|=", OperatorId::PipePipeEq), ("|", OperatorId::PipePipe), ("=", OperatorId::PipeEq)],
            ),
            '>' => self.operator(
                start,
                OperatorId::Gt,
                &[
                    (">>=", OperatorId::UShrEq),
                    (">>", OperatorId::UShr),
                    (">=", OperatorId::ShrEq),
                    (">", OperatorId::Shr),
                    ("=", OperatorId::GtEq),
                ],
            ),
            '=' => {
                if self.match_str("==") {
                    self.add_op(OperatorId::EqEqEq, start);
                } else if self.match_char('=') {
                    self.loose_equality(start, "==");
                } else if self.match_char('>') {
                    self.add_punct(PunctuationId::FatArrow, start);
                } else {
                    self.add_op(OperatorId::Eq, start);
                }
            }
            '!' => {
                if self.match_str("==") {
                    self.add_op(OperatorId::NotEqEq, start);
                } else if self.match_char('=') {
                    self.loose_equality(start, "!=");
                } else {
                    self.add_op(OperatorId::Bang, start);
                }
            }
            '?' => {
                if self.match_str("?=") {
                    self.add_op(OperatorId::QuestionQuestionEq, start);
                } else if self.match_char('?') {
                    self.add_op(OperatorId::QuestionQuestion, start);
                } else if self.peek() == Some('.') && !self.peek_next().is_some_and(|n| n.is_ascii_digit()) {
                    self.advance();
                    self.add_punct(PunctuationId::QuestionDot, start);
                } else {
                    self.add_punct(PunctuationId::Question, start);
                }
            }

            // Punctuation
            '.' => {
                if self.peek().is_some_and(|n| n.is_ascii_digit()) {
                    self.scan_number(start, c);
                } else if self.match_char('.') {
                    if self.match_char('.') {
                        self.add_punct(PunctuationId::Ellipsis, start);
                    } else {
                        self.add_punct(PunctuationId::DotDot, start);
                    }
                } else {
                    self.add_punct(PunctuationId::Dot, start);
                }
            }
            ',' => self.add_punct(PunctuationId::Comma, start),
            ';' => self.add_punct(PunctuationId::Semicolon, start),
            ':' => self.add_punct(PunctuationId::Colon, start),
            '#' => self.add_punct(PunctuationId::Hash, start),
            '@' => self.add_punct(PunctuationId::At, start),
            '(' => self.add_punct(PunctuationId::LParen, start),
            ')' => self.add_punct(PunctuationId::RParen, start),
            '[' => self.add_punct(PunctuationId::LBracket, start),
            ']' => self.add_punct(PunctuationId::RBracket, start),
            '{' => {
                if let Some(Mode::Substitution { depth }) = self.modes.last_mut() {
                    *depth += 1;
                }
                self.add_punct(PunctuationId::LBrace, start);
            }
            '}' => {
                match self.modes.last_mut() {
                    Some(Mode::Substitution { depth: 0 }) => {
                        self.modes.pop();
                    }
                    Some(Mode::Substitution { depth }) => *depth -= 1,
                    _ => {}
                }
                self.add_punct(PunctuationId::RBrace, start);
            }
            '`' => {
                self.modes.push(Mode::Template);
                self.add_punct(PunctuationId::Backtick, start);
            }

            // Literals
            '"' | '\'' => self.scan_string(start, c),
            '0'..='9' => self.scan_number(start, c),
            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => {
                self.errors.push(SyntaxError::lexical(
                    format!("Unexpected character '{}'", c),
                    Span::new(start, self.current_pos),
                ));
            }
        }
    }

    // ========================================================================
    // Operator helpers
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.at_line_start = false;
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn add_op(&mut self, id: OperatorId, start: usize) {
        self.add_token(TokenKind::Operator(id), start);
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::Punctuation(id), start);
    }

    /// Try compound continuations in order (longest first), fall back to `simple`.
    fn operator(&mut self, start: usize, simple: OperatorId, compounds: &[(&str, OperatorId)]) {
        for (rest, id) in compounds {
            if self.match_str(rest) {
                self.add_op(*id, start);
                return;
            }
        }
        self.add_op(simple, start);
    }

    fn loose_equality(&mut self, start: usize, spelling: &str) {
        let Some(strict) = operators::strict_replacement(spelling) else {
            return;
        };
        let strict_spelling = operators::as_str(strict);
        self.errors.push(
            SyntaxError::lexical(
                format!("'{}' is not supported, use '{}'", spelling, strict_spelling),
                Span::new(start, self.current_pos),
            )
            .with_hint(format!("tsz only has strict equality; replace '{}' with '{}'", spelling, strict_spelling)),
        );
        self.add_op(strict, start);
    }

    fn regex_allowed(&self) -> bool {
        !self.tokens.last().is_some_and(|t| t.kind.ends_operand())
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }
        let text = &self.source[start..self.current_pos];
        match keyword_id(text) {
            Some(id) => self.add_token(TokenKind::Keyword(id), start),
            None => self.add_token(TokenKind::Ident(text.to_string()), start),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

pub(crate) fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Unicode whitespace plus the zero-width characters tsz also skips.
fn is_whitespace(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{FEFF}' | '\u{2060}' | '\u{200B}')
}

/// Tokenize tsz source, recovering from errors.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex_all(source: &str) -> LexOutput {
    Lexer::new(source).tokenize()
}

/// Tokenize tsz source, failing on the first malformed input.
///
/// ## Errors
/// Returns every lexical error when any token is malformed.
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<SyntaxError>> {
    let output = lex_all(source);
    if output.errors.is_empty() {
        Ok(output.tokens)
    } else {
        Err(output.errors)
    }
}
