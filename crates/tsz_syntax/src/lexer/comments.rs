//! Comment scanning.

use super::{Comment, CommentKind, Lexer, is_line_terminator};
use crate::diagnostics::SyntaxError;
use crate::span::Span;

impl<'a> Lexer<'a> {
    /// Consume up to (not including) the next line terminator.
    pub(super) fn scan_line_comment(&mut self, start: usize, kind: CommentKind) {
        while let Some(c) = self.peek() {
            if is_line_terminator(c) {
                break;
            }
            self.advance();
        }
        self.comments.push(Comment {
            kind,
            span: Span::new(start, self.current_pos),
        });
    }

    /// Consume a `/* ... */` comment; the opening `/` is already consumed.
    pub(super) fn scan_block_comment(&mut self, start: usize) {
        self.advance(); // '*'
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    break;
                }
                Some(c) => {
                    if is_line_terminator(c) {
                        self.at_line_start = true;
                    }
                }
                None => {
                    self.errors.push(SyntaxError::lexical(
                        "Unterminated block comment",
                        Span::new(start, self.current_pos),
                    ));
                    break;
                }
            }
        }
        self.comments.push(Comment {
            kind: CommentKind::Block,
            span: Span::new(start, self.current_pos),
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{CommentKind, lex_all};

    #[test]
    fn test_unterminated_block_comment() {
        let out = lex_all("a /* never closed");
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.comments[0].kind, CommentKind::Block);
        assert_eq!(out.comments[0].span.end, 17);
    }

    #[test]
    fn test_multiline_block_comment_allows_html_close() {
        let out = lex_all("/* a\n*/ --> trailing");
        assert_eq!(out.comments.len(), 2);
        assert_eq!(out.comments[1].kind, CommentKind::Html);
        assert_eq!(out.tokens.len(), 1);
    }
}
