/// Type parsing.
///
/// ## Notes
/// - Precedence, loosest first: union (`A | B`, left-assoc, optional leading `|`), then postfix `T[]` / `T?`,
///   then atoms (type identifiers, primitive types, tuples).
/// - Primitive type names other than `void`/`undefined`/`true`/`false` are contextual: they lex as identifiers and
///   are promoted here.
impl<'a> SyntaxParser<'a> {
    /// `':' type`
    fn type_annotation(&mut self) -> PResult<NodeId> {
        let colon = self.expect_punct(PunctuationId::Colon, "':'")?;
        let ty = self.type_()?;
        Ok(self.builder.node(
            NodeKind::TypeAnnotation,
            vec![colon.into(), Child::field(ty, FieldId::Type)],
        ))
    }

    fn type_(&mut self) -> PResult<NodeId> {
        self.nested(Self::union_type)
    }

    fn union_type(&mut self) -> PResult<NodeId> {
        let mut left = if self.check_op(OperatorId::Pipe) {
            let pipe = self.bump();
            let right = self.postfix_type()?;
            self.builder
                .node(NodeKind::UnionType, vec![pipe.into(), right.into()])
        } else {
            self.postfix_type()?
        };
        while self.check_op(OperatorId::Pipe) {
            let pipe = self.bump();
            let right = self.postfix_type()?;
            left = self
                .builder
                .node(NodeKind::UnionType, vec![left.into(), pipe.into(), right.into()]);
        }
        Ok(left)
    }

    fn postfix_type(&mut self) -> PResult<NodeId> {
        let mut ty = self.type_atom()?;
        loop {
            if self.check_punct(PunctuationId::LBracket) && self.peek_at(1).kind.is_punctuation(PunctuationId::RBracket)
            {
                let open = self.bump();
                let close = self.bump();
                ty = self
                    .builder
                    .node(NodeKind::ArrayType, vec![ty.into(), open.into(), close.into()]);
            } else if self.check_punct(PunctuationId::Question) {
                let question = self.bump();
                ty = self
                    .builder
                    .node(NodeKind::OrUndefinedType, vec![ty.into(), question.into()]);
            } else {
                return Ok(ty);
            }
        }
    }

    fn type_atom(&mut self) -> PResult<NodeId> {
        match &self.peek().kind {
            TokenKind::Ident(name) => match keywords::from_str(name) {
                Some(id) if keywords::PRIMITIVE_TYPE_KEYWORDS.contains(&id) => {
                    let token = self.advance();
                    let leaf = self.builder.leaf(Symbol::Keyword(id), token.span);
                    Ok(self.builder.node(NodeKind::PrimitiveType, vec![leaf.into()]))
                }
                _ => Ok(self.bump_as(NodeKind::TypeIdentifier)),
            },
            TokenKind::Keyword(KeywordId::Void) => {
                let leaf = self.bump();
                Ok(self.builder.node(NodeKind::PrimitiveType, vec![leaf.into()]))
            }
            TokenKind::Keyword(id @ (KeywordId::Undefined | KeywordId::True | KeywordId::False)) => {
                let leaf = self.bump_as(literal_kind(*id));
                Ok(self.builder.node(NodeKind::PrimitiveType, vec![leaf.into()]))
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => self.tuple_type(),
            _ => Err(self.unexpected("type")),
        }
    }

    /// `'[' (type (',' type)*)? ','? ']'`
    fn tuple_type(&mut self) -> PResult<NodeId> {
        let open = self.bump();
        let mut children = vec![Child::from(open)];
        while !self.check_punct(PunctuationId::RBracket) {
            children.push(self.type_()?.into());
            if self.check_punct(PunctuationId::Comma) {
                children.push(self.bump().into());
            } else {
                break;
            }
        }
        children.push(self.expect_punct(PunctuationId::RBracket, "']'")?.into());
        Ok(self.builder.node(NodeKind::TupleType, children))
    }
}

/// Named kind for the literal keywords `true`, `false`, `undefined`.
fn literal_kind(id: KeywordId) -> NodeKind {
    match id {
        KeywordId::True => NodeKind::True,
        KeywordId::False => NodeKind::False,
        _ => NodeKind::Undefined,
    }
}
