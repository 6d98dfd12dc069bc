/// Destructuring patterns on the left of `=`.
///
/// ## Notes
/// - Object patterns accept `key: pattern`, `...rest`, and shorthand names; array patterns accept holes (`[, a]`).
/// - Either kind of element may carry a default (`a = 1`), producing an `assignment_pattern`.
impl<'a> SyntaxParser<'a> {
    fn destructuring_pattern(&mut self) -> PResult<NodeId> {
        if self.check_punct(PunctuationId::LBrace) {
            self.object_pattern()
        } else {
            self.array_pattern()
        }
    }

    fn object_pattern(&mut self) -> PResult<NodeId> {
        let open = self.expect_punct(PunctuationId::LBrace, "'{'")?;
        let mut children = vec![Child::from(open)];
        while !self.check_punct(PunctuationId::RBrace) {
            if self.check_punct(PunctuationId::Comma) {
                children.push(self.bump().into());
                continue;
            }
            children.push(self.object_pattern_member()?.into());
            if self.check_punct(PunctuationId::Comma) {
                children.push(self.bump().into());
            } else {
                break;
            }
        }
        children.push(self.expect_punct(PunctuationId::RBrace, "'}'")?.into());
        Ok(self.builder.node(NodeKind::ObjectPattern, children))
    }

    fn object_pattern_member(&mut self) -> PResult<NodeId> {
        match &self.peek().kind {
            TokenKind::Punctuation(PunctuationId::Ellipsis) => self.rest_pattern(),
            TokenKind::Punctuation(PunctuationId::Hash) => {
                if self.peek_at(2).kind.is_punctuation(PunctuationId::Colon) {
                    let key = self.private_property_identifier()?;
                    self.pair_pattern(key)
                } else {
                    let name = self.private_property_identifier()?;
                    Ok(self
                        .builder
                        .node(NodeKind::ShorthandPropertyIdentifierPattern, vec![name.into()]))
                }
            }
            TokenKind::Ident(_) => {
                if self.peek_at(1).kind.is_punctuation(PunctuationId::Colon) {
                    let key = self.bump_as(NodeKind::Identifier);
                    self.pair_pattern(key)
                } else {
                    Ok(self.bump_as(NodeKind::ShorthandPropertyIdentifierPattern))
                }
            }
            _ => Err(self.unexpected("property pattern")),
        }
    }

    /// `key ':' value` once `key` is parsed.
    fn pair_pattern(&mut self, key: NodeId) -> PResult<NodeId> {
        let colon = self.expect_punct(PunctuationId::Colon, "':'")?;
        let value = self.pattern_with_default()?;
        Ok(self.builder.node(
            NodeKind::PairPattern,
            vec![
                Child::field(key, FieldId::Key),
                colon.into(),
                Child::field(value, FieldId::Value),
            ],
        ))
    }

    fn array_pattern(&mut self) -> PResult<NodeId> {
        let open = self.expect_punct(PunctuationId::LBracket, "'['")?;
        let mut children = vec![Child::from(open)];
        while !self.check_punct(PunctuationId::RBracket) {
            if self.check_punct(PunctuationId::Comma) {
                children.push(self.bump().into());
                continue;
            }
            children.push(self.pattern_with_default()?.into());
            if self.check_punct(PunctuationId::Comma) {
                children.push(self.bump().into());
            } else {
                break;
            }
        }
        children.push(self.expect_punct(PunctuationId::RBracket, "']'")?.into());
        Ok(self.builder.node(NodeKind::ArrayPattern, children))
    }

    /// A pattern, optionally followed by `= default`.
    fn pattern_with_default(&mut self) -> PResult<NodeId> {
        let pattern = self.pattern()?;
        if !self.check_op(OperatorId::Eq) {
            return Ok(pattern);
        }
        let eq = self.bump();
        let right = self.expression()?;
        Ok(self.builder.node(
            NodeKind::AssignmentPattern,
            vec![
                Child::field(pattern, FieldId::Left),
                eq.into(),
                Child::field(right, FieldId::Right),
            ],
        ))
    }

    fn pattern(&mut self) -> PResult<NodeId> {
        self.nested(|p| {
            let inner = if p.check_punct(PunctuationId::Ellipsis) {
                p.rest_pattern()?
            } else {
                p.lhs_expression()?
            };
            Ok(p.builder.node(NodeKind::Pattern, vec![inner.into()]))
        })
    }

    /// `'...' lhs`
    fn rest_pattern(&mut self) -> PResult<NodeId> {
        let dots = self.bump();
        let target = self.lhs_expression()?;
        Ok(self
            .builder
            .node(NodeKind::RestPattern, vec![dots.into(), target.into()]))
    }

    /// An identifier, a member expression, or a nested destructuring pattern.
    fn lhs_expression(&mut self) -> PResult<NodeId> {
        match &self.peek().kind {
            TokenKind::Punctuation(PunctuationId::LBrace) => self.nested(Self::object_pattern),
            TokenKind::Punctuation(PunctuationId::LBracket) => self.nested(Self::array_pattern),
            _ => {
                let expr = self.postfix()?;
                self.assignment_target(expr, &[NodeKind::Identifier, NodeKind::MemberExpression])
            }
        }
    }
}
