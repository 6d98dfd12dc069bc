/// Statement parsing.
///
/// This chunk parses block-level statements (blocks, `if`, `return`, `break`, call statements, assignments) and
/// dispatches declarations to `decl.rs`.
impl<'a> SyntaxParser<'a> {
    fn statement(&mut self) -> PResult<NodeId> {
        self.nested(Self::statement_inner)
    }

    fn statement_inner(&mut self) -> PResult<NodeId> {
        match &self.peek().kind {
            TokenKind::Keyword(KeywordId::Function) if matches!(self.peek_at(1).kind, TokenKind::Ident(_)) => {
                self.function_declaration()
            }
            TokenKind::Keyword(KeywordId::Const | KeywordId::Let) => self.variable_declaration(),
            TokenKind::Keyword(KeywordId::Match) => self.match_expression(),
            TokenKind::Keyword(KeywordId::Enum) => self.enum_declaration(),
            TokenKind::Keyword(KeywordId::If) => self.if_statement(),
            TokenKind::Keyword(KeywordId::Return) => self.return_statement(),
            TokenKind::Keyword(KeywordId::Break) => self.break_statement(),
            TokenKind::Punctuation(PunctuationId::LBrace | PunctuationId::LBracket)
                if self.close_followed_by(self.pos, |k| k.is_operator(OperatorId::Eq)) =>
            {
                self.destructuring_assignment()
            }
            TokenKind::Punctuation(PunctuationId::LBrace) => self.block_statement(),
            _ => self.expression_statement(),
        }
    }

    /// `'{' statement* '}'`, recovering per statement.
    fn block_statement(&mut self) -> PResult<NodeId> {
        let open = self.expect_punct(PunctuationId::LBrace, "'{'")?;
        let mut children = vec![Child::from(open)];
        while !self.is_at_end() && !self.check_punct(PunctuationId::RBrace) {
            if let Some(statement) = self.statement_or_recover() {
                children.push(statement.into());
            }
        }
        children.push(self.expect_or_missing(PunctuationId::RBrace).into());
        Ok(self.builder.node(NodeKind::BlockStatement, children))
    }

    fn if_statement(&mut self) -> PResult<NodeId> {
        let keyword = self.bump();
        let condition = self.parenthesized_expression()?;
        let consequence = self.block_statement()?;
        let mut children = vec![
            Child::from(keyword),
            Child::field(condition, FieldId::Condition),
            Child::field(consequence, FieldId::Consequence),
        ];
        if self.check_keyword(KeywordId::Else) {
            children.push(self.bump().into());
            let alternative = if self.check_keyword(KeywordId::If) {
                self.nested(Self::if_statement)?
            } else {
                self.block_statement()?
            };
            children.push(Child::field(alternative, FieldId::Alternative));
        }
        Ok(self.builder.node(NodeKind::IfStatement, children))
    }

    fn return_statement(&mut self) -> PResult<NodeId> {
        let keyword = self.bump();
        let value = self.expression()?;
        let semi = self.expect_or_missing(PunctuationId::Semicolon);
        Ok(self
            .builder
            .node(NodeKind::ReturnStatement, vec![keyword.into(), value.into(), semi.into()]))
    }

    fn break_statement(&mut self) -> PResult<NodeId> {
        let keyword = self.bump();
        let semi = self.expect_or_missing(PunctuationId::Semicolon);
        Ok(self
            .builder
            .node(NodeKind::BreakStatement, vec![keyword.into(), semi.into()]))
    }

    /// A statement that starts with an expression: a call statement or an assignment.
    fn expression_statement(&mut self) -> PResult<NodeId> {
        let start = self.peek().span;
        let expr = self.expression()?;
        match self.builder.kind(expr) {
            // Assignments consume their own `;`.
            Some(NodeKind::AssignmentExpression) => Ok(expr),
            Some(NodeKind::CallExpression) => {
                let semi = self.expect_or_missing(PunctuationId::Semicolon);
                Ok(self
                    .builder
                    .node(NodeKind::CallStatement, vec![expr.into(), semi.into()]))
            }
            _ => {
                let span = start.merge(self.builder.span(expr));
                Err(SyntaxError::syntax("Expected a statement", span).with_hint(
                    "only calls, assignments, and declarations can stand alone as statements",
                ))
            }
        }
    }

    /// `{ a, b: c } = value;` or `[a, b] = value;`
    fn destructuring_assignment(&mut self) -> PResult<NodeId> {
        let left = self.destructuring_pattern()?;
        self.assignment_rest(left)
    }

    /// Finish `left '=' right ';'` once `left` is parsed and the current token is `=`.
    fn assignment_rest(&mut self, left: NodeId) -> PResult<NodeId> {
        let eq = self.expect_op(OperatorId::Eq, "'='")?;
        let right = self.expression()?;
        let semi = self.expect_or_missing(PunctuationId::Semicolon);
        Ok(self.builder.node(
            NodeKind::AssignmentExpression,
            vec![
                Child::field(left, FieldId::Left),
                eq.into(),
                Child::field(right, FieldId::Right),
                semi.into(),
            ],
        ))
    }
}
