/// Statement-level error recovery.
///
/// A statement that fails to parse is rolled back and its tokens are re-emitted as leaves of an `ERROR` node.
/// Parsing resumes after the next `;` at brace depth zero, or before a `}` or a statement keyword.
impl<'a> SyntaxParser<'a> {
    /// Parse one statement; on failure, record the error and return an `ERROR` node covering what was skipped.
    fn statement_or_recover(&mut self) -> Option<NodeId> {
        let start = self.pos;
        let mark = self.builder.len();
        match self.statement() {
            Ok(statement) => Some(statement),
            Err(error) => {
                tracing::debug!(error = %error, offset = error.span.start, "recovering from syntax error");
                self.errors.push(error);
                self.builder.truncate(mark);
                self.synchronize(start);
                self.error_node(start, self.pos)
            }
        }
    }

    /// Skip tokens until a statement boundary. Always makes progress when the failed statement consumed nothing.
    ///
    /// `;` and `}` end a statement at brace depth zero even when `(` or `[` is still open. Full bracket depth only
    /// guards keywords that are also expressions.
    fn synchronize(&mut self, start: usize) {
        let mut braces = 0usize;
        let mut brackets = 0usize;
        for token in &self.tokens[start..self.pos] {
            braces = step_depth(braces, brace_delta(&token.kind));
            brackets = step_depth(brackets, bracket_delta(&token.kind));
        }

        while !self.is_at_end() {
            let stuck = self.pos == start;
            let kind = &self.peek().kind;
            if !stuck && starts_statement(kind, brackets) {
                return;
            }
            if !stuck && braces == 0 && kind.is_punctuation(PunctuationId::RBrace) {
                return;
            }

            let token = self.advance();
            brackets = step_depth(brackets, bracket_delta(&token.kind));
            match brace_delta(&token.kind) {
                Some(delta) => braces = step_depth(braces, Some(delta)),
                None if braces == 0 && token.kind.is_punctuation(PunctuationId::Semicolon) => return,
                None => {}
            }
        }
    }

    /// Wrap `tokens[start..end]` in an `ERROR` node.
    fn error_node(&mut self, start: usize, end: usize) -> Option<NodeId> {
        if start >= end {
            return None;
        }
        let tokens = self.tokens;
        let children = tokens[start..end]
            .iter()
            .map(|token| Child::from(self.builder.leaf(token_symbol(&token.kind), token.span)))
            .collect();
        Some(self.builder.node(NodeKind::Error, children))
    }
}

/// Keywords that begin a new statement. `function`, `if`, and `match` also appear inside expressions, so they only
/// count outside brackets.
fn starts_statement(kind: &TokenKind, depth: usize) -> bool {
    match kind {
        TokenKind::Keyword(KeywordId::Let | KeywordId::Const | KeywordId::Return | KeywordId::Break | KeywordId::Enum) => {
            true
        }
        TokenKind::Keyword(KeywordId::Function | KeywordId::If | KeywordId::Match) => depth == 0,
        _ => false,
    }
}

/// `Some(true)` for `{`/`${`, `Some(false)` for `}`.
fn brace_delta(kind: &TokenKind) -> Option<bool> {
    match kind {
        TokenKind::Punctuation(PunctuationId::LBrace | PunctuationId::DollarBrace) => Some(true),
        TokenKind::Punctuation(PunctuationId::RBrace) => Some(false),
        _ => None,
    }
}

fn step_depth(depth: usize, delta: Option<bool>) -> usize {
    match delta {
        Some(true) => depth + 1,
        Some(false) => depth.saturating_sub(1),
        None => depth,
    }
}
