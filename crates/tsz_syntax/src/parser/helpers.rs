/// Token-stream helpers and leaf construction.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Turning tokens into leaf nodes (`bump`, `bump_as`, `expect_or_missing`)
/// - Depth accounting (`nested`) and bracket lookahead (`matching_close`)
impl<'a> SyntaxParser<'a> {
    // ========================================================================
    // Token access
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &'a Token {
        &self.tokens[self.pos]
    }

    /// Return the token `offset` positions ahead, clamped to `Eof`.
    fn peek_at(&self, offset: usize) -> &'a Token {
        let index = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &'a Token {
        let token = &self.tokens[self.pos];
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn check_ident(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Ident(_))
    }

    /// End offset of the last consumed token.
    fn prev_end(&self) -> usize {
        match self.pos.checked_sub(1) {
            Some(prev) => self.tokens[prev].span.end,
            None => 0,
        }
    }

    // ========================================================================
    // Leaves
    // ========================================================================

    /// Consume the current token as a leaf with its natural symbol.
    fn bump(&mut self) -> NodeId {
        let token = self.advance();
        self.builder.leaf(token_symbol(&token.kind), token.span)
    }

    /// Consume the current token as a leaf of the named kind `kind` (an alias in grammar terms).
    fn bump_as(&mut self, kind: NodeKind) -> NodeId {
        let token = self.advance();
        self.builder.leaf(Symbol::Named(kind), token.span)
    }

    fn expect_punct(&mut self, id: PunctuationId, what: &str) -> PResult<NodeId> {
        if self.check_punct(id) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(what))
        }
    }

    fn expect_keyword(&mut self, id: KeywordId, what: &str) -> PResult<NodeId> {
        if self.check_keyword(id) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(what))
        }
    }

    fn expect_op(&mut self, id: OperatorId, what: &str) -> PResult<NodeId> {
        if self.check_op(id) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(what))
        }
    }

    /// Consume an identifier as a leaf of kind `kind`.
    fn expect_ident_as(&mut self, kind: NodeKind, what: &str) -> PResult<NodeId> {
        if self.check_ident() {
            Ok(self.bump_as(kind))
        } else {
            Err(self.unexpected(what))
        }
    }

    /// Consume `id` if present; otherwise report it and insert a zero-width MISSING leaf.
    fn expect_or_missing(&mut self, id: PunctuationId) -> NodeId {
        if self.check_punct(id) {
            return self.bump();
        }
        let at = self.prev_end();
        let spelling = tsz_core::lang::punctuation::as_str(id);
        tracing::debug!(token = spelling, offset = at, "inserting missing token");
        self.errors.push(
            SyntaxError::missing(format!("Expected '{}'", spelling), Span::empty(at))
                .with_note(format!("found {}", self.peek().kind.describe())),
        );
        self.builder.missing(Symbol::Punctuation(id), at)
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        let token = self.peek();
        SyntaxError::syntax(
            format!("Expected {}, found {}", expected, token.kind.describe()),
            token.span,
        )
    }

    // ========================================================================
    // Depth and lookahead
    // ========================================================================

    /// Run `f` one nesting level deeper, failing once `max_depth` is reached.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.options.max_depth {
            return Err(SyntaxError::limit(
                format!("Nesting too deep (maximum depth is {})", self.options.max_depth),
                self.peek().span,
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Index of the bracket closing the one at `open`, if the brackets in between balance.
    fn matching_close(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (index, token) in self.tokens.iter().enumerate().skip(open) {
            match bracket_delta(&token.kind) {
                Some(true) => depth += 1,
                Some(false) => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(index);
                    }
                }
                None => {
                    if matches!(token.kind, TokenKind::Eof) {
                        return None;
                    }
                }
            }
        }
        None
    }

    /// Return `true` if the bracket at `open` is closed and immediately followed by `follower`.
    fn close_followed_by(&self, open: usize, follower: impl Fn(&TokenKind) -> bool) -> bool {
        self.matching_close(open)
            .and_then(|close| self.tokens.get(close + 1))
            .is_some_and(|token| follower(&token.kind))
    }
}

/// `Some(true)` for an opening bracket, `Some(false)` for a closing one.
fn bracket_delta(kind: &TokenKind) -> Option<bool> {
    match kind {
        TokenKind::Punctuation(
            PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace | PunctuationId::DollarBrace,
        ) => Some(true),
        TokenKind::Punctuation(PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace) => {
            Some(false)
        }
        _ => None,
    }
}

/// Leaf symbol for a raw token.
fn token_symbol(kind: &TokenKind) -> Symbol {
    match kind {
        TokenKind::Keyword(id) => Symbol::Keyword(*id),
        TokenKind::Operator(id) => Symbol::Operator(*id),
        TokenKind::Punctuation(id) => Symbol::Punctuation(*id),
        TokenKind::Ident(_) => Symbol::Named(NodeKind::Identifier),
        TokenKind::Number(_) => Symbol::Named(NodeKind::Number),
        TokenKind::String(_) => Symbol::Named(NodeKind::String),
        TokenKind::Regex { .. } => Symbol::Named(NodeKind::Regex),
        TokenKind::TemplateChars => Symbol::Named(NodeKind::StringFragment),
        TokenKind::EscapeSequence => Symbol::Named(NodeKind::EscapeSequence),
        TokenKind::Eof => Symbol::Named(NodeKind::Error),
    }
}
