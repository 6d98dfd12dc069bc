/// Declaration parsing: variables, functions, enums, and parameter lists.
impl<'a> SyntaxParser<'a> {
    /// `const|let name (: type)? (= value)? ;`
    fn variable_declaration(&mut self) -> PResult<NodeId> {
        let kind = if self.check_keyword(KeywordId::Const) {
            self.bump_as(NodeKind::Const)
        } else {
            self.bump_as(NodeKind::Let)
        };
        let name = self.expect_ident_as(NodeKind::Identifier, "variable name")?;
        let mut children = vec![Child::field(kind, FieldId::Kind), Child::field(name, FieldId::Name)];

        if self.check_punct(PunctuationId::Colon) {
            children.push(self.type_annotation()?.into());
        }
        if self.check_op(OperatorId::Eq) {
            children.push(self.bump().into());
            let value = self.expression()?;
            children.push(Child::field(value, FieldId::Value));
        }
        children.push(self.expect_or_missing(PunctuationId::Semicolon).into());
        Ok(self.builder.node(NodeKind::VariableDeclaration, children))
    }

    /// `function name(args): type { ... }`
    fn function_declaration(&mut self) -> PResult<NodeId> {
        let keyword = self.bump();
        let name = self.expect_ident_as(NodeKind::Identifier, "function name")?;
        let params = self.argument_list_declaration()?;
        let return_type = self.return_type_annotation()?;
        let body = self.block_statement()?;
        Ok(self.builder.node(
            NodeKind::FunctionDeclaration,
            vec![
                keyword.into(),
                name.into(),
                params.into(),
                Child::field(return_type, FieldId::ReturnType),
                Child::field(body, FieldId::Body),
            ],
        ))
    }

    /// `enum Name { A, B, C, }`
    fn enum_declaration(&mut self) -> PResult<NodeId> {
        let keyword = self.bump();
        let name = self.expect_ident_as(NodeKind::Identifier, "enum name")?;
        let open = self.expect_punct(PunctuationId::LBrace, "'{'")?;
        let mut children = vec![Child::from(keyword), name.into(), open.into()];

        children.push(self.expect_ident_as(NodeKind::Identifier, "enum member")?.into());
        while self.check_punct(PunctuationId::Comma) {
            children.push(self.bump().into());
            if self.check_punct(PunctuationId::RBrace) {
                break;
            }
            children.push(self.expect_ident_as(NodeKind::Identifier, "enum member")?.into());
        }
        children.push(self.expect_punct(PunctuationId::RBrace, "'}'")?.into());
        Ok(self.builder.node(NodeKind::EnumDeclaration, children))
    }

    /// `'(' (argument_declaration?),* ')'`; empty slots between commas are allowed.
    fn argument_list_declaration(&mut self) -> PResult<NodeId> {
        let open = self.expect_punct(PunctuationId::LParen, "'('")?;
        let mut children = vec![Child::from(open)];
        while !self.check_punct(PunctuationId::RParen) {
            if self.check_punct(PunctuationId::Comma) {
                children.push(self.bump().into());
                continue;
            }
            children.push(self.argument_declaration()?.into());
            if self.check_punct(PunctuationId::Comma) {
                children.push(self.bump().into());
            } else {
                break;
            }
        }
        children.push(self.expect_punct(PunctuationId::RParen, "')'")?.into());
        Ok(self.builder.node(NodeKind::ArgumentListDeclaration, children))
    }

    /// `...? name: type`
    fn argument_declaration(&mut self) -> PResult<NodeId> {
        let mut children = Vec::new();
        if self.check_punct(PunctuationId::Ellipsis) {
            children.push(Child::field(self.bump(), FieldId::Spread));
        }
        let name = self.expect_ident_as(NodeKind::Identifier, "parameter name")?;
        children.push(Child::field(name, FieldId::Name));
        if !self.check_punct(PunctuationId::Colon) {
            return Err(self
                .unexpected("':'")
                .with_hint("every parameter needs a type annotation"));
        }
        let annotation = self.type_annotation()?;
        children.push(Child::field(annotation, FieldId::Type));
        Ok(self.builder.node(NodeKind::ArgumentDeclaration, children))
    }

    /// Return types are mandatory on functions and arrows.
    fn return_type_annotation(&mut self) -> PResult<NodeId> {
        if self.check_punct(PunctuationId::Colon) {
            self.type_annotation()
        } else {
            Err(self.unexpected("':'").with_hint("functions must declare a return type"))
        }
    }
}
