#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorKind;
    use crate::tree::Node;

    fn sexp(source: &str) -> String {
        let tree = parse(source);
        assert!(tree.errors().is_empty(), "unexpected errors for {source:?}: {:?}", tree.errors());
        tree.to_sexp()
    }

    fn first_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
        if node.kind() == kind {
            return Some(node);
        }
        node.children().find_map(|child| first_of_kind(child, kind))
    }

    // ---- declarations ----

    #[test]
    fn test_variable_declaration() {
        assert_eq!(
            sexp("const x: number = 1 + 2;"),
            "(program (variable_declaration kind: (const) name: (identifier) \
             (type_annotation type: (primitive_type)) \
             value: (binary_expression left: (primary_expression (number)) right: (primary_expression (number)))))"
        );
    }

    #[test]
    fn test_union_and_tuple_types() {
        assert_eq!(
            sexp("let t: [string, number[]] | undefined;"),
            "(program (variable_declaration kind: (let) name: (identifier) (type_annotation type: \
             (union_type (tuple_type (primitive_type) (array_type (primitive_type))) (primitive_type (undefined))))))"
        );
    }

    #[test]
    fn test_user_types_and_optional() {
        let tree = parse("let p: Point?;");
        let ty = first_of_kind(tree.root_node(), "or_undefined_type").unwrap();
        assert_eq!(ty.named_child(0).unwrap().kind(), "type_identifier");
        assert_eq!(ty.text(), "Point?");
    }

    #[test]
    fn test_enum_declaration_allows_trailing_comma() {
        assert_eq!(
            sexp("enum Color { Red, Green, }"),
            "(program (enum_declaration (identifier) (identifier) (identifier)))"
        );
    }

    #[test]
    fn test_function_declaration() {
        let tree = parse("function add(a: number, ...rest: number[]): number { return a; }");
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
        let func = tree.root_node().child(0).unwrap();
        assert_eq!(func.kind(), "function_declaration");
        assert_eq!(func.child_by_field_name("return_type").unwrap().kind(), "type_annotation");

        let params = func.named_child(1).unwrap();
        assert_eq!(params.kind(), "argument_list_declaration");
        assert_eq!(params.named_child_count(), 2);
        let rest = params.named_child(1).unwrap();
        assert_eq!(rest.child_by_field_name("spread").unwrap().kind(), "...");
        assert_eq!(rest.child_by_field_name("name").unwrap().text(), "rest");

        let body = func.child_by_field_name("body").unwrap();
        assert_eq!(body.named_child(0).unwrap().kind(), "return_statement");
    }

    #[test]
    fn test_parameter_requires_type() {
        let tree = parse("function f(a): void {}");
        assert!(tree.has_error());
        assert!(tree.errors()[0].hints[0].contains("type annotation"));
    }

    // ---- expressions ----

    #[test]
    fn test_binary_precedence() {
        assert_eq!(
            sexp("x = 1 + 2 * 3;"),
            "(program (assignment_expression left: (identifier) right: (binary_expression \
             left: (primary_expression (number)) \
             right: (binary_expression left: (primary_expression (number)) right: (primary_expression (number))))))"
        );
    }

    #[test]
    fn test_exponent_is_right_associative() {
        let tree = parse("x = a ** b ** c;");
        let right = tree.root_node().child(0).unwrap().child_by_field_name("right").unwrap();
        assert_eq!(right.child_by_field_name("left").unwrap().text(), "a");
        assert_eq!(right.child_by_field_name("right").unwrap().kind(), "binary_expression");
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let tree = parse("x = a - b - c;");
        let right = tree.root_node().child(0).unwrap().child_by_field_name("right").unwrap();
        assert_eq!(right.child_by_field_name("left").unwrap().text(), "a - b");
        assert_eq!(right.child_by_field_name("operator").unwrap().kind(), "-");
    }

    #[test]
    fn test_word_operators() {
        let tree = parse("x = a instanceof B && k in o;");
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
        let right = tree.root_node().child(0).unwrap().child_by_field_name("right").unwrap();
        assert_eq!(right.child_by_field_name("operator").unwrap().kind(), "&&");
        let left = right.child_by_field_name("left").unwrap();
        assert_eq!(left.child_by_field_name("operator").unwrap().kind(), "instanceof");
    }

    #[test]
    fn test_unary_binds_tighter_than_binary() {
        let tree = parse("x = !a || typeof b;");
        let right = tree.root_node().child(0).unwrap().child_by_field_name("right").unwrap();
        assert_eq!(right.kind(), "binary_expression");
        let left = right.child_by_field_name("left").unwrap();
        assert_eq!(left.kind(), "unary_expression");
        assert_eq!(left.child_by_field_name("operator").unwrap().kind(), "!");
        let typeof_ = right.child_by_field_name("right").unwrap();
        assert_eq!(typeof_.child_by_field_name("operator").unwrap().kind(), "typeof");
    }

    #[test]
    fn test_member_call_chain() {
        assert_eq!(
            sexp("a.b.c(d);"),
            "(program (call_statement (call_expression function: (primary_expression (member_expression \
             object: (primary_expression (member_expression object: (primary_expression (identifier)) \
             property: (property_identifier))) property: (property_identifier))) \
             arguments: (argument_list (primary_expression (identifier))))))"
        );
    }

    #[test]
    fn test_optional_chaining() {
        assert_eq!(
            sexp("a?.b?.(c);"),
            "(program (call_statement (call_expression function: (primary_expression (member_expression \
             object: (primary_expression (identifier)) optional_chain: (optional_chain) \
             property: (property_identifier))) optional_chain: (optional_chain) \
             arguments: (argument_list (primary_expression (identifier))))))"
        );
    }

    #[test]
    fn test_member_of_call_result_is_rejected() {
        let tree = parse("f().x;");
        assert_eq!(tree.to_sexp(), "(program (ERROR (identifier) (identifier)))");
        assert!(tree.errors()[0].message.contains("call result"));

        let tree = parse("(f()).x();");
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
    }

    #[test]
    fn test_spread_argument_and_empty_slots() {
        let tree = parse("f(a, , ...b);");
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
        let args = first_of_kind(tree.root_node(), "argument_list").unwrap();
        assert_eq!(args.named_child_count(), 2);
        assert_eq!(args.named_child(1).unwrap().kind(), "spread_argument");
    }

    #[test]
    fn test_arrow_function() {
        assert_eq!(
            sexp("const f = (a: number): number => a * 2;"),
            "(program (variable_declaration kind: (const) name: (identifier) value: (primary_expression \
             (arrow_function_expression (argument_list_declaration (argument_declaration name: (identifier) \
             type: (type_annotation type: (primitive_type)))) return_type: (type_annotation type: (primitive_type)) \
             body: (binary_expression left: (primary_expression (identifier)) right: (primary_expression (number)))))))"
        );
    }

    #[test]
    fn test_arrow_body_block_or_object() {
        let tree = parse("g((): void => { h(); });");
        let arrow = first_of_kind(tree.root_node(), "arrow_function_expression").unwrap();
        assert_eq!(arrow.child_by_field_name("body").unwrap().kind(), "block_statement");

        let tree = parse("g((): Point => { x: 1, y });");
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
        let arrow = first_of_kind(tree.root_node(), "arrow_function_expression").unwrap();
        let body = arrow.child_by_field_name("body").unwrap();
        assert_eq!(body.named_child(0).unwrap().kind(), "object_literal");
    }

    #[test]
    fn test_anonymous_function() {
        let tree = parse("run(function (): void { stop(); });");
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
        assert!(first_of_kind(tree.root_node(), "anonymous_function_expression").is_some());
    }

    #[test]
    fn test_if_ternary_expression() {
        let tree = parse("x = if (a) b else c + 1;");
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
        let ternary = tree.root_node().child(0).unwrap().child_by_field_name("right").unwrap();
        assert_eq!(ternary.kind(), "if_ternary_expression");
        assert_eq!(ternary.child_by_field_name("alternative").unwrap().text(), "c + 1");
    }

    #[test]
    fn test_object_literal() {
        assert_eq!(
            sexp("x = { a: 1, b, };"),
            "(program (assignment_expression left: (identifier) right: (primary_expression (object_literal \
             key: (identifier) value: (primary_expression (number)) member: (shorthand_property_identifier)))))"
        );
    }

    #[test]
    fn test_augmented_assignment_in_expression() {
        let tree = parse("f(x += 1);");
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
        let aug = first_of_kind(tree.root_node(), "augmented_assignment_expression").unwrap();
        assert_eq!(aug.child_by_field_name("left").unwrap().kind(), "identifier");
        assert_eq!(aug.child_by_field_name("operator").unwrap().kind(), "+=");
    }

    #[test]
    fn test_private_name_in() {
        let tree = parse("x = #secret in obj;");
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
        let binary = tree.root_node().child(0).unwrap().child_by_field_name("right").unwrap();
        assert_eq!(binary.child_by_field_name("left").unwrap().kind(), "private_property_identifier");
    }

    #[test]
    fn test_comptime_identifier() {
        let tree = parse("@assert(x);");
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
        assert_eq!(first_of_kind(tree.root_node(), "comptime_identifier").unwrap().text(), "@assert");
    }

    #[test]
    fn test_update_expressions_are_rejected() {
        let tree = parse("++x;");
        assert!(tree.errors()[0].message.contains("Update expressions"));
    }

    // ---- literals ----

    #[test]
    fn test_string_parts() {
        let tree = parse(r#"s = "a\nb";"#);
        let string = first_of_kind(tree.root_node(), "string").unwrap();
        let kinds: Vec<_> = string.named_children().map(|n| n.kind()).collect();
        assert_eq!(kinds, ["string_fragment", "escape_sequence", "string_fragment"]);
        assert_eq!(string.child(0).unwrap().kind(), "\"");
    }

    #[test]
    fn test_template_string() {
        let tree = parse("print(`a${b}c`);");
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
        let template = first_of_kind(tree.root_node(), "template_string").unwrap();
        let kinds: Vec<_> = template.named_children().map(|n| n.kind()).collect();
        assert_eq!(kinds, ["string_fragment", "template_substitution", "string_fragment"]);
    }

    #[test]
    fn test_regex_literal() {
        let tree = parse("r = /ab+c/gi;");
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
        let regex = first_of_kind(tree.root_node(), "regex").unwrap();
        assert_eq!(regex.child_by_field_name("pattern").unwrap().text(), "ab+c");
        assert_eq!(regex.child_by_field_name("flags").unwrap().text(), "gi");
    }

    // ---- match ----

    #[test]
    fn test_match_expression() {
        let source = "match (x) {\n  case 1, 2: a();\n  case -5..5: b();\n  else: c();\n}";
        assert_eq!(
            sexp(source),
            "(program (match_expression value: (parenthesized_expression (primary_expression (identifier))) \
             body: (match_case condition: (number) condition: (number) consequence: (call_expression \
             function: (primary_expression (identifier)) arguments: (argument_list))) \
             body: (match_case condition: (match_range start: (number) end: (number)) consequence: (call_expression \
             function: (primary_expression (identifier)) arguments: (argument_list))) \
             body: (match_else consequence: (call_expression function: (primary_expression (identifier)) \
             arguments: (argument_list)))))"
        );
        let tree = parse(source);
        let range = first_of_kind(tree.root_node(), "match_range").unwrap();
        assert_eq!(range.child_by_field_name("start").unwrap().text(), "-5");
    }

    #[test]
    fn test_match_dotted_condition_and_block() {
        let tree = parse("match (c) { case Color.Red: { paint(); }; }");
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
        let case = first_of_kind(tree.root_node(), "match_case").unwrap();
        let conditions: Vec<_> = case.children_by_field_name("condition").map(|n| n.text()).collect();
        assert_eq!(conditions, ["Color", ".", "Red"]);
        assert_eq!(case.child_by_field_name("consequence").unwrap().kind(), "block_statement");
    }

    #[test]
    fn test_match_conditions_require_integers() {
        for source in [
            "match (x) { case 0x1F: a(); }",
            "match (x) { case 1.5..2: a(); }",
            "match (x) { case -3n: a(); }",
        ] {
            let tree = parse(source);
            assert!(
                tree.errors().iter().any(|e| e.message == "Expected integer"),
                "{source:?}: {:?}",
                tree.errors()
            );
        }
        assert!(parse("match (x) { case +1..10: a(); }").errors().is_empty());
    }

    // ---- statements ----

    #[test]
    fn test_if_else_chain() {
        let tree = parse("if (a) { b(); } else if (c) { } else { d(); }");
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
        let stmt = tree.root_node().child(0).unwrap();
        assert_eq!(stmt.kind(), "if_statement");
        let alt = stmt.child_by_field_name("alternative").unwrap();
        assert_eq!(alt.kind(), "if_statement");
        assert_eq!(alt.child_by_field_name("alternative").unwrap().kind(), "block_statement");
    }

    #[test]
    fn test_array_destructuring() {
        assert_eq!(
            sexp("[a, b] = [b, a];"),
            "(program (assignment_expression left: (array_pattern (pattern (identifier)) (pattern (identifier))) \
             right: (primary_expression (array_literal (primary_expression (identifier)) \
             (primary_expression (identifier))))))"
        );
    }

    #[test]
    fn test_object_destructuring() {
        assert_eq!(
            sexp("{ a, b: c = 1, ...rest } = obj;"),
            "(program (assignment_expression left: (object_pattern (shorthand_property_identifier_pattern) \
             (pair_pattern key: (identifier) value: (assignment_pattern left: (pattern (identifier)) \
             right: (primary_expression (number)))) (rest_pattern (identifier))) \
             right: (primary_expression (identifier))))"
        );
    }

    #[test]
    fn test_block_statement_is_not_destructuring() {
        assert_eq!(sexp("{ a(); }"), "(program (block_statement (call_statement (call_expression function: (primary_expression (identifier)) arguments: (argument_list)))))");
    }

    #[test]
    fn test_comments_are_extras() {
        assert_eq!(sexp("// hi\nbreak; /* x */"), "(program (comment) (break_statement) (comment))");
        let tree = parse("<!-- old\nbreak;");
        assert!(tree.root_node().child(0).unwrap().is_extra());
        assert_eq!(tree.root_node().child(0).unwrap().kind(), "html_comment");
    }

    // ---- recovery ----

    #[test]
    fn test_missing_semicolon() {
        let tree = parse("break");
        assert_eq!(tree.to_sexp(), "(program (break_statement (MISSING \";\")))");
        assert_eq!(tree.errors()[0].kind, ErrorKind::Missing);
        let missing = tree.root_node().child(0).unwrap().child(1).unwrap();
        assert!(missing.is_missing());
        assert_eq!(missing.start_byte(), missing.end_byte());
    }

    #[test]
    fn test_missing_semicolon_between_declarations() {
        let tree = parse("let a = 1\nlet b = 2;");
        assert_eq!(tree.root_node().named_child_count(), 2);
        assert_eq!(tree.errors().len(), 1);
        assert_eq!(tree.errors()[0].span.start, 9);
    }

    #[test]
    fn test_expression_is_not_a_statement() {
        let tree = parse("a + b;");
        assert_eq!(tree.to_sexp(), "(program (ERROR (identifier) (identifier)))");
        assert_eq!(tree.errors()[0].message, "Expected a statement");
    }

    #[test]
    fn test_recovery_resumes_at_next_statement() {
        let tree = parse("let = 5;\nbreak;");
        assert_eq!(tree.to_sexp(), "(program (ERROR (number)) (break_statement))");
        assert!(tree.root_node().has_error());
        assert!(!tree.root_node().child(1).unwrap().has_error());
    }

    #[test]
    fn test_recovery_inside_block_keeps_block() {
        let tree = parse("function f(): void { let = ; g(); }");
        let body = first_of_kind(tree.root_node(), "block_statement").unwrap();
        let kinds: Vec<_> = body.named_children().map(|n| n.kind()).collect();
        assert_eq!(kinds, ["ERROR", "call_statement"]);
    }

    #[test]
    fn test_stray_close_brace() {
        let tree = parse("} break;");
        assert_eq!(tree.to_sexp(), "(program (ERROR) (break_statement))");
    }

    #[test]
    fn test_recovery_inside_unclosed_parens() {
        let tree = parse("f(a;\ng(b);\nh(c);");
        let kinds: Vec<_> = tree.root_node().named_children().map(|n| n.kind()).collect();
        assert_eq!(kinds, ["ERROR", "call_statement", "call_statement"]);
        assert_eq!(tree.errors().len(), 1);

        let tree = parse("x = [1, (2;\nbreak;");
        let kinds: Vec<_> = tree.root_node().named_children().map(|n| n.kind()).collect();
        assert_eq!(kinds, ["ERROR", "break_statement"]);
    }

    #[test]
    fn test_nesting_limit() {
        let depth = 100;
        let source = format!("x = {}1{};", "(".repeat(depth), ")".repeat(depth));
        let tree = parse_with_options(&source, ParseOptions::default().with_max_depth(32));
        assert!(tree.errors().iter().any(|e| e.kind == ErrorKind::Limit));

        let tree = parse_with_options(&source, ParseOptions::default().with_max_depth(256));
        assert!(tree.errors().is_empty(), "{:?}", tree.errors());
    }

    #[test]
    fn test_long_flat_chains_render() {
        let source = format!("const x = {}1;", "1 + ".repeat(100_000));
        let tree = parse(&source);
        assert!(tree.errors().is_empty());
        let sexp = tree.to_sexp();
        assert!(sexp.starts_with("(program (variable_declaration kind: (const) name: (identifier) value: (binary_expression"));
        assert_eq!(sexp.matches("(number)").count(), 100_001);

        let source = format!("x = a{};", ".b".repeat(100_000));
        let tree = parse(&source);
        assert!(tree.errors().is_empty());
        assert_eq!(tree.to_sexp().matches("(property_identifier)").count(), 100_000);
    }

    #[test]
    fn test_source_length_limit() {
        let tree = parse_with_options("break;", ParseOptions::default().with_max_source_len(3));
        assert_eq!(tree.errors()[0].kind, ErrorKind::Limit);
        assert_eq!(tree.root_node().child_count(), 0);
        assert_eq!(tree.root_node().end_byte(), 6);
    }

    // ---- API ----

    #[test]
    fn test_parser_requires_language() {
        let mut parser = Parser::new();
        assert!(parser.parse("break;").is_none());
        parser.set_language(&LANGUAGE).unwrap();
        assert_eq!(parser.language(), Some(LANGUAGE));
        assert!(parser.parse("break;").is_some());
    }

    #[test]
    fn test_parser_rejects_incompatible_language() {
        let mut parser = Parser::new();
        let err = parser.set_language(&LANGUAGE.with_abi_version(99)).unwrap_err();
        assert_eq!(
            err,
            LanguageError::Version {
                version: 99,
                min: MIN_COMPATIBLE_ABI_VERSION,
                max: ABI_VERSION
            }
        );
        assert!(parser.language().is_none());
    }

    #[test]
    fn test_parse_strict() {
        assert!(parse_strict("break;").is_ok());
        let errors = parse_strict("break").unwrap_err();
        assert_eq!(errors.len(), 1);
    }
}
