/// Parser core types and entrypoint.
///
/// This chunk defines the internal [`SyntaxParser`] state and its top-level `parse_program()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.
type PResult<T> = Result<T, SyntaxError>;

/// Parser state.
///
/// ## Notes
/// - Nodes are appended to `builder` as soon as their children are complete. A statement that fails is rolled
///   back with [`TreeBuilder::truncate`] and replaced by an `ERROR` node over its tokens.
/// - `depth` counts nested statements, expressions, types, and patterns against `options.max_depth`.
struct SyntaxParser<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
    builder: TreeBuilder,
    errors: Vec<SyntaxError>,
    depth: usize,
    options: ParseOptions,
}

impl<'a> SyntaxParser<'a> {
    fn new(source: &'a str, tokens: &'a [Token], options: ParseOptions) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            builder: TreeBuilder::new(),
            errors: Vec::new(),
            depth: 0,
            options,
        }
    }

    /// Parse every statement, then attach comments and assemble the [`Tree`].
    fn parse_program(mut self, comments: &[Comment], lex_errors: Vec<SyntaxError>, language: Language) -> Tree {
        let mut children = Vec::new();
        while !self.is_at_end() {
            if let Some(statement) = self.statement_or_recover() {
                children.push(Child::from(statement));
            }
        }

        let root = self
            .builder
            .node_with_span(NodeKind::Program, Span::new(0, self.source.len()), children);
        let extras = comments
            .iter()
            .map(|comment| {
                let kind = match comment.kind {
                    CommentKind::Html => NodeKind::HtmlComment,
                    CommentKind::Line | CommentKind::Block => NodeKind::Comment,
                };
                self.builder.extra(Symbol::Named(kind), comment.span)
            })
            .collect();

        let mut errors = lex_errors;
        errors.extend(self.errors);
        errors.sort_by_key(|e| e.span.start);

        self.builder
            .finish(root, extras, self.source.to_string(), errors, language)
    }
}
