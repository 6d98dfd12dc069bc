//! String, template, escape-sequence, and regex scanning.

use super::{Lexer, Mode, StringPart, TokenKind, is_line_terminator};
use crate::diagnostics::SyntaxError;
use crate::span::Span;
use tsz_core::lang::punctuation::PunctuationId;

impl<'a> Lexer<'a> {
    /// Scan a quoted string; the opening quote is already consumed.
    pub(super) fn scan_string(&mut self, start: usize, quote: char) {
        let mut parts = Vec::new();
        loop {
            match self.peek() {
                None => {
                    self.unterminated_string(start);
                    break;
                }
                Some(c) if c == '\n' || c == '\r' => {
                    self.unterminated_string(start);
                    break;
                }
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    let escape_start = self.current_pos;
                    self.advance();
                    self.scan_escape_body(escape_start);
                    parts.push(StringPart::Escape(Span::new(escape_start, self.current_pos)));
                }
                Some(_) => {
                    let fragment_start = self.current_pos;
                    while let Some(c) = self.peek() {
                        if c == quote || c == '\\' || c == '\n' || c == '\r' {
                            break;
                        }
                        self.advance();
                    }
                    parts.push(StringPart::Fragment(Span::new(fragment_start, self.current_pos)));
                }
            }
        }
        self.add_token(TokenKind::String(parts), start);
    }

    fn unterminated_string(&mut self, start: usize) {
        self.errors.push(SyntaxError::lexical(
            "Unterminated string literal",
            Span::new(start, self.current_pos),
        ));
    }

    /// Scan one piece of template text: the closing backtick, a `${`, an escape, or a run of characters.
    pub(super) fn scan_template_part(&mut self) {
        let start = self.current_pos;
        match self.peek() {
            Some('`') => {
                self.advance();
                self.modes.pop();
                self.add_punct(PunctuationId::Backtick, start);
            }
            Some('$') if self.peek_next() == Some('{') => {
                self.advance();
                self.advance();
                self.modes.push(Mode::Substitution { depth: 0 });
                self.add_punct(PunctuationId::DollarBrace, start);
            }
            Some('\\') => {
                self.advance();
                self.scan_escape_body(start);
                self.add_token(TokenKind::EscapeSequence, start);
            }
            Some(_) => {
                while let Some(c) = self.peek() {
                    if c == '`' || c == '\\' || (c == '$' && self.peek_next() == Some('{')) {
                        break;
                    }
                    self.advance();
                }
                self.add_token(TokenKind::TemplateChars, start);
            }
            None => {}
        }
    }

    /// Consume the body of an escape sequence; the backslash is already consumed.
    ///
    /// Accepts `\n`-style single characters, up to three octal digits, `\xHH`, `\uHHHH`, `\u{H...}`, and line
    /// continuations. A malformed `\x` or `\u` is reported but still consumed.
    fn scan_escape_body(&mut self, start: usize) {
        match self.peek() {
            None => {
                self.invalid_escape(start);
            }
            Some(c) if ('0'..='7').contains(&c) => {
                for _ in 0..3 {
                    if self.peek().is_some_and(|d| ('0'..='7').contains(&d)) {
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
            Some('x') => {
                self.advance();
                if !self.scan_hex_digits(2) {
                    self.invalid_escape(start);
                }
            }
            Some('u') => {
                self.advance();
                let valid = if self.match_char('{') {
                    let mut any = false;
                    while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                        self.advance();
                        any = true;
                    }
                    self.match_char('}') && any
                } else {
                    self.scan_hex_digits(4)
                };
                if !valid {
                    self.invalid_escape(start);
                }
            }
            Some('\r') => {
                self.advance();
                self.match_char('\n');
            }
            Some(_) => {
                self.advance();
            }
        }
    }

    fn scan_hex_digits(&mut self, count: usize) -> bool {
        for _ in 0..count {
            if self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
            } else {
                return false;
            }
        }
        true
    }

    fn invalid_escape(&mut self, start: usize) {
        self.errors.push(SyntaxError::lexical(
            "Invalid escape sequence",
            Span::new(start, self.current_pos),
        ));
    }

    /// Scan `/pattern/flags`; the opening `/` is already consumed.
    pub(super) fn scan_regex(&mut self, start: usize) {
        let pattern_start = self.current_pos;
        let mut in_class = false;
        let pattern_end = loop {
            match self.peek() {
                None => break None,
                Some(c) if is_line_terminator(c) => break None,
                Some('\\') => {
                    self.advance();
                    if self.peek().is_some_and(|c| !is_line_terminator(c)) {
                        self.advance();
                    }
                }
                Some('[') => {
                    in_class = true;
                    self.advance();
                }
                Some(']') => {
                    in_class = false;
                    self.advance();
                }
                Some('/') if !in_class => {
                    let end = self.current_pos;
                    self.advance();
                    break Some(end);
                }
                Some(_) => {
                    self.advance();
                }
            }
        };

        let Some(pattern_end) = pattern_end else {
            self.errors.push(SyntaxError::lexical(
                "Unterminated regular expression",
                Span::new(start, self.current_pos),
            ));
            let pattern = Span::new(pattern_start, self.current_pos);
            self.add_token(TokenKind::Regex { pattern, flags: None }, start);
            return;
        };

        let flags_start = self.current_pos;
        while self.peek().is_some_and(|c| c.is_ascii_lowercase()) {
            self.advance();
        }
        let flags = (self.current_pos > flags_start).then(|| Span::new(flags_start, self.current_pos));
        let pattern = Span::new(pattern_start, pattern_end);
        self.add_token(TokenKind::Regex { pattern, flags }, start);
    }
}
