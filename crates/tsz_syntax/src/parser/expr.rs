/// Expression parsing.
///
/// Binary operators use precedence climbing over the `tsz_core` operator registry. Everything below binary level
/// is hand-written:
///
/// ```text
/// expression  := unary (binop unary)*
/// unary       := if_ternary | prefix-op unary | '#' ident 'in' ... | postfix assignment?
/// postfix     := primary ('(' args ')' | '?.' '(' args ')' | ('.' | '?.') property)*
/// primary     := identifier | literal | '(' ... ')' | arrow | function | match | '@' ident | ...
/// ```
///
/// ## Notes
/// - Every `primary_expression` is materialized as a wrapper node, as in the grammar. A member access wraps its
///   result again so it can be the object of the next access; calls are *not* primary, so `f().x` is rejected.
/// - Assignments are recognized after a postfix expression. `=` consumes its own `;`.
impl<'a> SyntaxParser<'a> {
    fn expression(&mut self) -> PResult<NodeId> {
        self.nested(|p| p.binary(0))
    }

    // ========================================================================
    // Binary / unary
    // ========================================================================

    fn binary(&mut self, min_prec: u8) -> PResult<NodeId> {
        let mut left = self.unary()?;
        loop {
            if matches!(
                self.builder.kind(left),
                Some(NodeKind::AssignmentExpression | NodeKind::AugmentedAssignmentExpression)
            ) {
                return Ok(left);
            }
            let Some((prec, assoc)) = self.binary_operator() else {
                break;
            };
            if prec < min_prec {
                break;
            }
            let op = self.bump();
            let next_min = match assoc {
                Associativity::Left => prec + 1,
                Associativity::Right => prec,
            };
            let right = self.nested(|p| p.binary(next_min))?;
            left = self.builder.node(
                NodeKind::BinaryExpression,
                vec![
                    Child::field(left, FieldId::Left),
                    Child::field(op, FieldId::Operator),
                    Child::field(right, FieldId::Right),
                ],
            );
        }
        Ok(left)
    }

    /// Binding of the current token when used as a binary operator.
    fn binary_operator(&self) -> Option<(u8, Associativity)> {
        match &self.peek().kind {
            TokenKind::Operator(id) => operators::binary_binding(*id),
            TokenKind::Keyword(KeywordId::Instanceof) => operators::binary_binding(OperatorId::Instanceof),
            TokenKind::Keyword(KeywordId::In) => operators::binary_binding(OperatorId::In),
            _ => None,
        }
    }

    fn unary(&mut self) -> PResult<NodeId> {
        match &self.peek().kind {
            TokenKind::Keyword(KeywordId::If) => self.if_ternary_expression(),
            TokenKind::Keyword(KeywordId::Typeof | KeywordId::Void) => self.unary_expression(),
            TokenKind::Operator(OperatorId::PlusPlus | OperatorId::MinusMinus) => Err(SyntaxError::syntax(
                "Update expressions are not supported",
                self.peek().span,
            )
            .with_hint("use '+= 1' or '-= 1' instead")),
            TokenKind::Operator(id) if operators::is_prefix(*id) => self.unary_expression(),
            TokenKind::Punctuation(PunctuationId::Hash) => self.private_in_expression(),
            _ => {
                let expr = self.postfix()?;
                self.assignment_or(expr)
            }
        }
    }

    fn unary_expression(&mut self) -> PResult<NodeId> {
        let op = self.bump();
        let argument = self.nested(Self::unary)?;
        Ok(self.builder.node(
            NodeKind::UnaryExpression,
            vec![Child::field(op, FieldId::Operator), Child::field(argument, FieldId::Argument)],
        ))
    }

    /// `#field in object`: the only place a private name may stand alone.
    fn private_in_expression(&mut self) -> PResult<NodeId> {
        let left = self.private_property_identifier()?;
        let Some((prec, _)) = operators::binary_binding(OperatorId::In) else {
            return Err(self.unexpected("'in'"));
        };
        let op = self.expect_keyword(KeywordId::In, "'in' after a private name")?;
        let right = self.nested(|p| p.binary(prec + 1))?;
        Ok(self.builder.node(
            NodeKind::BinaryExpression,
            vec![
                Child::field(left, FieldId::Left),
                Child::field(op, FieldId::Operator),
                Child::field(right, FieldId::Right),
            ],
        ))
    }

    /// `if (cond) a else b` in expression position.
    fn if_ternary_expression(&mut self) -> PResult<NodeId> {
        let keyword = self.bump();
        let condition = self.parenthesized_expression()?;
        let consequence = self.expression()?;
        let else_kw = self.expect_keyword(KeywordId::Else, "'else'")?;
        let alternative = self.expression()?;
        Ok(self.builder.node(
            NodeKind::IfTernaryExpression,
            vec![
                keyword.into(),
                Child::field(condition, FieldId::Condition),
                Child::field(consequence, FieldId::Consequence),
                else_kw.into(),
                Child::field(alternative, FieldId::Alternative),
            ],
        ))
    }

    // ========================================================================
    // Assignment
    // ========================================================================

    fn assignment_or(&mut self, expr: NodeId) -> PResult<NodeId> {
        match &self.peek().kind {
            TokenKind::Operator(OperatorId::Eq) => {
                let left = self.assignment_target(expr, &[NodeKind::Identifier, NodeKind::MemberExpression])?;
                self.assignment_rest(left)
            }
            TokenKind::Operator(id) if operators::is_augmented_assignment(*id) => {
                let left = self.assignment_target(
                    expr,
                    &[
                        NodeKind::Identifier,
                        NodeKind::MemberExpression,
                        NodeKind::ParenthesizedExpression,
                    ],
                )?;
                let op = self.bump();
                let right = self.expression()?;
                Ok(self.builder.node(
                    NodeKind::AugmentedAssignmentExpression,
                    vec![
                        Child::field(left, FieldId::Left),
                        Child::field(op, FieldId::Operator),
                        Child::field(right, FieldId::Right),
                    ],
                ))
            }
            _ => Ok(expr),
        }
    }

    /// Unwrap `primary_expression(x)` to `x` when `x` is one of `allowed`.
    fn assignment_target(&self, expr: NodeId, allowed: &[NodeKind]) -> PResult<NodeId> {
        if self.builder.kind(expr) == Some(NodeKind::PrimaryExpression) {
            if let [inner] = self.builder.children(expr) {
                if self.builder.kind(*inner).is_some_and(|k| allowed.contains(&k)) {
                    return Ok(*inner);
                }
            }
        }
        Err(SyntaxError::syntax("Invalid assignment target", self.builder.span(expr))
            .with_note("only identifiers and member expressions can be assigned to"))
    }

    // ========================================================================
    // Postfix: calls and member access
    // ========================================================================

    fn postfix(&mut self) -> PResult<NodeId> {
        let mut expr = self.primary()?;
        loop {
            match &self.peek().kind {
                TokenKind::Punctuation(PunctuationId::LParen) => {
                    let args = self.argument_list()?;
                    expr = self.builder.node(
                        NodeKind::CallExpression,
                        vec![Child::field(expr, FieldId::Function), Child::field(args, FieldId::Arguments)],
                    );
                }
                TokenKind::Punctuation(PunctuationId::QuestionDot)
                    if self.peek_at(1).kind.is_punctuation(PunctuationId::LParen) =>
                {
                    self.require_primary(expr)?;
                    let chain = self.bump_as(NodeKind::OptionalChain);
                    let args = self.argument_list()?;
                    expr = self.builder.node(
                        NodeKind::CallExpression,
                        vec![
                            Child::field(expr, FieldId::Function),
                            Child::field(chain, FieldId::OptionalChain),
                            Child::field(args, FieldId::Arguments),
                        ],
                    );
                }
                TokenKind::Punctuation(PunctuationId::Dot | PunctuationId::QuestionDot) => {
                    self.require_primary(expr)?;
                    let member = self.member_expression(expr)?;
                    expr = self.builder.node(NodeKind::PrimaryExpression, vec![member.into()]);
                }
                _ => return Ok(expr),
            }
        }
    }

    fn require_primary(&self, expr: NodeId) -> PResult<()> {
        if self.builder.kind(expr) == Some(NodeKind::PrimaryExpression) {
            return Ok(());
        }
        Err(
            SyntaxError::syntax("Cannot access a member of a call result directly", self.peek().span)
                .with_hint("wrap the call in parentheses: (f()).x"),
        )
    }

    /// `object ('.' | '?.') property`
    fn member_expression(&mut self, object: NodeId) -> PResult<NodeId> {
        let mut children = vec![Child::field(object, FieldId::Object)];
        if self.check_punct(PunctuationId::QuestionDot) {
            children.push(Child::field(self.bump_as(NodeKind::OptionalChain), FieldId::OptionalChain));
        } else {
            children.push(self.bump().into());
        }
        let property = if self.check_punct(PunctuationId::Hash) {
            self.private_property_identifier()?
        } else {
            self.expect_ident_as(NodeKind::PropertyIdentifier, "property name")?
        };
        children.push(Child::field(property, FieldId::Property));
        Ok(self.builder.node(NodeKind::MemberExpression, children))
    }

    /// `'(' (expression | '...' expression)?,* ')'`
    fn argument_list(&mut self) -> PResult<NodeId> {
        let open = self.expect_punct(PunctuationId::LParen, "'('")?;
        let mut children = vec![Child::from(open)];
        while !self.check_punct(PunctuationId::RParen) {
            if self.check_punct(PunctuationId::Comma) {
                children.push(self.bump().into());
                continue;
            }
            let argument = if self.check_punct(PunctuationId::Ellipsis) {
                let dots = self.bump();
                let value = self.expression()?;
                self.builder
                    .node(NodeKind::SpreadArgument, vec![dots.into(), value.into()])
            } else {
                self.expression()?
            };
            children.push(argument.into());
            if self.check_punct(PunctuationId::Comma) {
                children.push(self.bump().into());
            } else {
                break;
            }
        }
        children.push(self.expect_punct(PunctuationId::RParen, "')'")?.into());
        Ok(self.builder.node(NodeKind::ArgumentList, children))
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn primary(&mut self) -> PResult<NodeId> {
        let inner = self.primary_inner()?;
        Ok(self
            .builder
            .node(NodeKind::PrimaryExpression, vec![inner.into()]))
    }

    fn primary_inner(&mut self) -> PResult<NodeId> {
        match &self.peek().kind {
            TokenKind::Ident(_) | TokenKind::Number(_) => Ok(self.bump()),
            TokenKind::String(parts) => Ok(self.string_literal(parts)),
            TokenKind::Regex { pattern, flags } => Ok(self.regex_literal(*pattern, *flags)),
            TokenKind::Keyword(id @ (KeywordId::True | KeywordId::False | KeywordId::Undefined)) => {
                Ok(self.bump_as(literal_kind(*id)))
            }
            TokenKind::Keyword(KeywordId::Function) => {
                if self.peek_at(1).kind.is_punctuation(PunctuationId::LParen) {
                    self.anonymous_function_expression()
                } else {
                    Err(self
                        .unexpected("expression")
                        .with_hint("named functions are declarations and cannot be used as values"))
                }
            }
            TokenKind::Keyword(KeywordId::Match) => self.match_expression(),
            TokenKind::Punctuation(PunctuationId::At) => self.comptime_identifier(),
            TokenKind::Punctuation(PunctuationId::Backtick) => self.template_string(),
            TokenKind::Punctuation(PunctuationId::LParen) => {
                if self.close_followed_by(self.pos, |k| k.is_punctuation(PunctuationId::Colon)) {
                    self.arrow_function_expression()
                } else {
                    self.parenthesized_expression()
                }
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => self.array_literal(),
            TokenKind::Punctuation(PunctuationId::LBrace) => self.object_literal(),
            _ => Err(self.unexpected("expression")),
        }
    }

    /// `'(' expression ')'`
    fn parenthesized_expression(&mut self) -> PResult<NodeId> {
        let open = self.expect_punct(PunctuationId::LParen, "'('")?;
        let inner = self.expression()?;
        let close = self.expect_punct(PunctuationId::RParen, "')'")?;
        Ok(self.builder.node(
            NodeKind::ParenthesizedExpression,
            vec![open.into(), inner.into(), close.into()],
        ))
    }

    fn comptime_identifier(&mut self) -> PResult<NodeId> {
        let at = self.bump();
        let name = self.expect_ident_as(NodeKind::Identifier, "identifier after '@'")?;
        Ok(self
            .builder
            .node(NodeKind::ComptimeIdentifier, vec![at.into(), name.into()]))
    }

    fn private_property_identifier(&mut self) -> PResult<NodeId> {
        let hash = self.expect_punct(PunctuationId::Hash, "'#'")?;
        let name = self.expect_ident_as(NodeKind::Identifier, "identifier after '#'")?;
        Ok(self
            .builder
            .node(NodeKind::PrivatePropertyIdentifier, vec![hash.into(), name.into()]))
    }

    /// `(params): type => body`
    fn arrow_function_expression(&mut self) -> PResult<NodeId> {
        let params = self.argument_list_declaration()?;
        let return_type = self.return_type_annotation()?;
        let arrow = self.expect_punct(PunctuationId::FatArrow, "'=>'")?;
        let body = self.block_or_expression()?;
        Ok(self.builder.node(
            NodeKind::ArrowFunctionExpression,
            vec![
                params.into(),
                Child::field(return_type, FieldId::ReturnType),
                arrow.into(),
                Child::field(body, FieldId::Body),
            ],
        ))
    }

    /// `function (params): type { ... }`
    fn anonymous_function_expression(&mut self) -> PResult<NodeId> {
        let keyword = self.bump();
        let params = self.argument_list_declaration()?;
        let return_type = self.return_type_annotation()?;
        let body = self.block_statement()?;
        Ok(self.builder.node(
            NodeKind::AnonymousFunctionExpression,
            vec![
                keyword.into(),
                params.into(),
                Child::field(return_type, FieldId::ReturnType),
                Child::field(body, FieldId::Body),
            ],
        ))
    }

    /// Arrow bodies and match consequences: a block unless the brace opens an object literal.
    fn block_or_expression(&mut self) -> PResult<NodeId> {
        if self.check_punct(PunctuationId::LBrace) && !self.looks_like_object_literal() {
            self.block_statement()
        } else {
            self.expression()
        }
    }

    /// `{ a: ...`, `{ a, ...`, or `{ a }`.
    fn looks_like_object_literal(&self) -> bool {
        matches!(self.peek_at(1).kind, TokenKind::Ident(_))
            && matches!(
                self.peek_at(2).kind,
                TokenKind::Punctuation(PunctuationId::Colon | PunctuationId::Comma | PunctuationId::RBrace)
            )
    }

    // ========================================================================
    // Literals
    // ========================================================================

    /// Expand a string token into quote, fragment, and escape leaves.
    fn string_literal(&mut self, parts: &[StringPart]) -> NodeId {
        let token = self.advance();
        let span = token.span;
        let quote = if self.source[span.start..].starts_with('\'') {
            PunctuationId::SingleQuote
        } else {
            PunctuationId::DoubleQuote
        };
        let quote_char = tsz_core::lang::punctuation::as_str(quote);
        let mut children = vec![Child::from(
            self.builder
                .leaf(Symbol::Punctuation(quote), Span::new(span.start, span.start + 1)),
        )];
        for part in parts {
            let leaf = match *part {
                StringPart::Fragment(s) => self.builder.leaf(Symbol::Named(NodeKind::StringFragment), s),
                StringPart::Escape(s) => self.builder.leaf(Symbol::Named(NodeKind::EscapeSequence), s),
            };
            children.push(leaf.into());
        }
        let content_end = parts.last().map_or(span.start + 1, |part| match *part {
            StringPart::Fragment(s) | StringPart::Escape(s) => s.end,
        });
        let closed = span.end > content_end && self.source[..span.end].ends_with(quote_char);
        let close = if closed {
            self.builder
                .leaf(Symbol::Punctuation(quote), Span::new(span.end - 1, span.end))
        } else {
            self.builder.missing(Symbol::Punctuation(quote), span.end)
        };
        children.push(close.into());
        self.builder.node(NodeKind::String, children)
    }

    fn regex_literal(&mut self, pattern: Span, flags: Option<Span>) -> NodeId {
        let token = self.advance();
        let slash = Symbol::Operator(OperatorId::Slash);
        let open = self
            .builder
            .leaf(slash, Span::new(token.span.start, token.span.start + 1));
        let pattern_leaf = self.builder.leaf(Symbol::Named(NodeKind::RegexPattern), pattern);
        let mut children = vec![Child::from(open), Child::field(pattern_leaf, FieldId::Pattern)];
        let closed = token.span.end > pattern.end;
        let close = if closed {
            self.builder.leaf(slash, Span::new(pattern.end, pattern.end + 1))
        } else {
            self.builder.missing(slash, pattern.end)
        };
        children.push(close.into());
        if let Some(flags) = flags {
            let leaf = self.builder.leaf(Symbol::Named(NodeKind::RegexFlags), flags);
            children.push(Child::field(leaf, FieldId::Flags));
        }
        self.builder.node(NodeKind::Regex, children)
    }

    fn template_string(&mut self) -> PResult<NodeId> {
        let open = self.bump();
        let mut children = vec![Child::from(open)];
        loop {
            match &self.peek().kind {
                TokenKind::TemplateChars | TokenKind::EscapeSequence => children.push(self.bump().into()),
                TokenKind::Punctuation(PunctuationId::DollarBrace) => {
                    let dollar = self.bump();
                    let value = self.expression()?;
                    let close = self.expect_punct(PunctuationId::RBrace, "'}'")?;
                    let substitution = self.builder.node(
                        NodeKind::TemplateSubstitution,
                        vec![dollar.into(), value.into(), close.into()],
                    );
                    children.push(substitution.into());
                }
                TokenKind::Punctuation(PunctuationId::Backtick) => {
                    children.push(self.bump().into());
                    break;
                }
                _ => return Err(self.unexpected("'`'")),
            }
        }
        Ok(self.builder.node(NodeKind::TemplateString, children))
    }

    /// `'[' expression (',' expression)* ']'`
    fn array_literal(&mut self) -> PResult<NodeId> {
        let open = self.bump();
        let mut children = vec![Child::from(open), self.expression()?.into()];
        while self.check_punct(PunctuationId::Comma) {
            children.push(self.bump().into());
            children.push(self.expression()?.into());
        }
        children.push(self.expect_punct(PunctuationId::RBracket, "']'")?.into());
        Ok(self.builder.node(NodeKind::ArrayLiteral, children))
    }

    /// `'{' member (',' member)* ','? '}'`
    fn object_literal(&mut self) -> PResult<NodeId> {
        let open = self.bump();
        let mut children = vec![Child::from(open)];
        loop {
            if !self.check_ident() {
                return Err(self.unexpected("property name"));
            }
            if self.peek_at(1).kind.is_punctuation(PunctuationId::Colon) {
                let key = self.bump_as(NodeKind::Identifier);
                let colon = self.bump();
                let value = self.expression()?;
                children.push(Child::field(key, FieldId::Key));
                children.push(colon.into());
                children.push(Child::field(value, FieldId::Value));
            } else {
                let member = self.bump_as(NodeKind::ShorthandPropertyIdentifier);
                children.push(Child::field(member, FieldId::Member));
            }
            if !self.check_punct(PunctuationId::Comma) {
                break;
            }
            children.push(self.bump().into());
            if self.check_punct(PunctuationId::RBrace) {
                break;
            }
        }
        children.push(self.expect_punct(PunctuationId::RBrace, "'}'")?.into());
        Ok(self.builder.node(NodeKind::ObjectLiteral, children))
    }

    // ========================================================================
    // Match
    // ========================================================================

    /// `match (value) { case ...: ...; else: ...; }`
    fn match_expression(&mut self) -> PResult<NodeId> {
        let keyword = self.bump();
        let value = self.parenthesized_expression()?;
        let open = self.expect_punct(PunctuationId::LBrace, "'{'")?;
        let mut children = vec![
            Child::from(keyword),
            Child::field(value, FieldId::Value),
            Child::field(open, FieldId::Body),
        ];
        while self.check_keyword(KeywordId::Case) {
            let case = self.match_case()?;
            children.push(Child::field(case, FieldId::Body));
        }
        if self.check_keyword(KeywordId::Else) {
            let fallback = self.match_else()?;
            children.push(Child::field(fallback, FieldId::Body));
        }
        let close = self.expect_punct(PunctuationId::RBrace, "'}'")?;
        children.push(Child::field(close, FieldId::Body));
        Ok(self.builder.node(NodeKind::MatchExpression, children))
    }

    fn match_case(&mut self) -> PResult<NodeId> {
        let keyword = self.bump();
        let mut children = vec![Child::from(keyword)];
        self.match_condition(&mut children)?;
        while self.check_punct(PunctuationId::Comma) {
            children.push(Child::field(self.bump(), FieldId::Condition));
            self.match_condition(&mut children)?;
        }
        children.push(self.expect_punct(PunctuationId::Colon, "':'")?.into());
        let consequence = self.block_or_expression()?;
        children.push(Child::field(consequence, FieldId::Consequence));
        children.push(self.expect_or_missing(PunctuationId::Semicolon).into());
        Ok(self.builder.node(NodeKind::MatchCase, children))
    }

    fn match_else(&mut self) -> PResult<NodeId> {
        let keyword = self.bump();
        let colon = self.expect_punct(PunctuationId::Colon, "':'")?;
        let consequence = self.block_or_expression()?;
        let semi = self.expect_or_missing(PunctuationId::Semicolon);
        Ok(self.builder.node(
            NodeKind::MatchElse,
            vec![
                keyword.into(),
                colon.into(),
                Child::field(consequence, FieldId::Consequence),
                semi.into(),
            ],
        ))
    }

    /// One condition of a `case`: a (signed) number or range, a string, a literal keyword, or a dotted path.
    fn match_condition(&mut self, children: &mut Vec<Child>) -> PResult<()> {
        match &self.peek().kind {
            TokenKind::Number(_) | TokenKind::Operator(OperatorId::Minus | OperatorId::Plus) => {
                let start = self.signed_number()?;
                if self.check_punct(PunctuationId::DotDot) {
                    let dots = self.bump();
                    let end = self.signed_number()?;
                    let range = self.builder.node(
                        NodeKind::MatchRange,
                        vec![Child::field(start, FieldId::Start), dots.into(), Child::field(end, FieldId::End)],
                    );
                    children.push(Child::field(range, FieldId::Condition));
                } else {
                    children.push(Child::field(start, FieldId::Condition));
                }
            }
            TokenKind::String(parts) => {
                let string = self.string_literal(parts);
                children.push(Child::field(string, FieldId::Condition));
            }
            TokenKind::Keyword(id @ (KeywordId::True | KeywordId::False | KeywordId::Undefined)) => {
                let leaf = self.bump_as(literal_kind(*id));
                children.push(Child::field(leaf, FieldId::Condition));
            }
            TokenKind::Ident(_) => {
                children.push(Child::field(self.bump(), FieldId::Condition));
                while self.check_punct(PunctuationId::Dot) && matches!(self.peek_at(1).kind, TokenKind::Ident(_)) {
                    children.push(Child::field(self.bump(), FieldId::Condition));
                    children.push(Child::field(self.bump(), FieldId::Condition));
                }
            }
            _ => return Err(self.unexpected("match condition")),
        }
        Ok(())
    }

    /// A decimal integer leaf, absorbing a directly adjacent leading sign (`-1`, `+2`).
    fn signed_number(&mut self) -> PResult<NodeId> {
        let sign = self.peek();
        let signed = matches!(sign.kind, TokenKind::Operator(OperatorId::Minus | OperatorId::Plus));
        let number = if signed { self.peek_at(1) } else { sign };
        let TokenKind::Number(raw) = &number.kind else {
            return Err(self.unexpected("number"));
        };
        if signed && sign.span.end != number.span.start {
            return Err(self.unexpected("number"));
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SyntaxError::syntax("Expected integer", number.span)
                .with_note("match conditions only accept decimal integers"));
        }

        if !signed {
            return Ok(self.bump());
        }
        self.advance();
        self.advance();
        let span = sign.span.merge(number.span);
        Ok(self.builder.leaf(Symbol::Named(NodeKind::Number), span))
    }
}
