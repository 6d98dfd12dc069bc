/// Public parsing API.
///
/// [`Parser`] mirrors the runtime-constructor contract of tree-sitter bindings: a parser has no language until
/// [`Parser::set_language`] succeeds, and [`Parser::parse`] returns `None` until then. The free functions
/// [`parse`], [`parse_with_options`], and [`parse_strict`] use the tsz grammar directly.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    language: Option<Language>,
    options: ParseOptions,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a grammar into this parser.
    ///
    /// ## Errors
    /// Returns [`LanguageError::Version`] when the handle's ABI version is outside the supported range.
    pub fn set_language(&mut self, language: &Language) -> Result<(), LanguageError> {
        if !language.is_compatible() {
            return Err(LanguageError::Version {
                version: language.abi_version(),
                min: MIN_COMPATIBLE_ABI_VERSION,
                max: ABI_VERSION,
            });
        }
        self.language = Some(*language);
        Ok(())
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn set_options(&mut self, options: ParseOptions) {
        self.options = options;
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parse `source`, or return `None` when no language has been set.
    pub fn parse(&mut self, source: impl AsRef<str>) -> Option<Tree> {
        let language = self.language?;
        Some(parse_source(source.as_ref(), self.options, language))
    }
}

/// Parse tsz source with default options. Always returns a tree; check [`Tree::errors`].
pub fn parse(source: &str) -> Tree {
    parse_source(source, ParseOptions::default(), LANGUAGE)
}

pub fn parse_with_options(source: &str, options: ParseOptions) -> Tree {
    parse_source(source, options, LANGUAGE)
}

/// Parse tsz source, failing if any error was reported.
///
/// ## Errors
/// Returns every lexical and syntax error, sorted by position.
pub fn parse_strict(source: &str) -> Result<Tree, Vec<SyntaxError>> {
    let tree = parse(source);
    if tree.errors().is_empty() {
        Ok(tree)
    } else {
        Err(tree.errors().to_vec())
    }
}

#[tracing::instrument(skip_all, fields(source_len = source.len()))]
fn parse_source(source: &str, options: ParseOptions, language: Language) -> Tree {
    if let Some(limit) = options.max_source_len.filter(|&limit| source.len() > limit) {
        tracing::debug!(limit, "source exceeds size limit");
        let error = SyntaxError::limit(
            format!("Source is {} bytes; the limit is {} bytes", source.len(), limit),
            Span::empty(0),
        );
        let mut builder = TreeBuilder::new();
        let root = builder.node_with_span(NodeKind::Program, Span::new(0, source.len()), Vec::new());
        return builder.finish(root, Vec::new(), source.to_string(), vec![error], language);
    }

    let lexed = lexer::lex_all(source);
    let tree = SyntaxParser::new(source, &lexed.tokens, options).parse_program(&lexed.comments, lexed.errors, language);
    tracing::debug!(nodes = tree.node_count(), errors = tree.errors().len(), "parsed");
    tree
}
