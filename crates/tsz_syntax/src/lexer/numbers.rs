//! Numeric literal scanning.
//!
//! Accepted forms mirror JavaScript: decimal with optional fraction and exponent, `0x`/`0o`/`0b` integers, a
//! trailing `n` for bigints, and single `_` separators between digits.

use super::{Lexer, TokenKind};
use crate::diagnostics::SyntaxError;
use crate::span::Span;

impl<'a> Lexer<'a> {
    /// Scan a number whose first character (`first`, a digit or `.`) is already consumed.
    pub(super) fn scan_number(&mut self, start: usize, first: char) {
        if first == '0' {
            let radix = match self.peek() {
                Some('x' | 'X') => Some(16),
                Some('o' | 'O') => Some(8),
                Some('b' | 'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.advance();
                if !self.scan_digits(radix, true) {
                    self.errors.push(SyntaxError::lexical(
                        format!("Expected base-{} digits after prefix", radix),
                        Span::new(start, self.current_pos),
                    ));
                }
                self.match_char('n');
                self.finish_number(start);
                return;
            }
        }

        let mut is_integer = true;
        if first == '.' {
            is_integer = false;
            self.scan_digits(10, true);
        } else {
            self.scan_digits(10, false);
            // `1..3` is a range, not `1.` followed by `.3`.
            if self.peek() == Some('.') && self.peek_next() != Some('.') {
                is_integer = false;
                self.advance();
                self.scan_digits(10, true);
            }
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let exponent_follows = match self.peek_next() {
                Some(c) if c.is_ascii_digit() => true,
                Some('+' | '-') => self.source[self.current_pos + 2..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_digit()),
                _ => false,
            };
            if exponent_follows {
                is_integer = false;
                self.advance();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.advance();
                }
                self.scan_digits(10, true);
            }
        }

        if is_integer {
            self.match_char('n');
        }
        self.finish_number(start);
    }

    /// Consume digits of `radix` with single `_` separators. Return `true` if any digit was consumed.
    ///
    /// `leading` is `true` when no digit has been consumed yet, so a leading `_` is not allowed.
    fn scan_digits(&mut self, radix: u32, leading: bool) -> bool {
        let mut any = !leading;
        while let Some(c) = self.peek() {
            if c.is_digit(radix) {
                any = true;
                self.advance();
            } else if c == '_' && any && self.peek_next().is_some_and(|n| n.is_digit(radix)) {
                self.advance();
            } else {
                break;
            }
        }
        any
    }

    fn finish_number(&mut self, start: usize) {
        let raw = self.source[start..self.current_pos].to_string();
        self.add_token(TokenKind::Number(raw), start);
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{TokenKind, lex};

    fn numbers(source: &str) -> Vec<String> {
        lex(source)
            .unwrap()
            .into_iter()
            .filter_map(|t| match t.kind {
                TokenKind::Number(raw) => Some(raw),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(
            numbers("0 42 1_000 3.14 1. .5 1e10 2.5E-3 0xFF 0b1010 0o777 10n 0x1Fn"),
            ["0", "42", "1_000", "3.14", "1.", ".5", "1e10", "2.5E-3", "0xFF", "0b1010", "0o777", "10n", "0x1Fn"]
        );
    }

    #[test]
    fn test_range_is_not_a_fraction() {
        let kinds: Vec<_> = lex("1..3").unwrap().into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds.len(), 4);
        assert_eq!(kinds[0], TokenKind::Number("1".to_string()));
        assert_eq!(kinds[2], TokenKind::Number("3".to_string()));
    }

    #[test]
    fn test_exponent_needs_digits() {
        // `1e` is the number `1` followed by identifier `e`.
        let kinds: Vec<_> = lex("1e").unwrap().into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds[0], TokenKind::Number("1".to_string()));
        assert_eq!(kinds[1], TokenKind::Ident("e".to_string()));
    }

    #[test]
    fn test_missing_radix_digits() {
        assert!(lex("0x").is_err());
    }
}
