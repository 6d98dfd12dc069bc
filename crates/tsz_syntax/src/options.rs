//! Parser configuration.

/// Default nesting limit for statements, expressions, types, and patterns.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Limits applied while parsing.
///
/// ## Notes
/// - Exceeding `max_depth` produces a [`crate::diagnostics::ErrorKind::Limit`] error and an `ERROR` node; the rest
///   of the file still parses.
/// - Sources longer than `max_source_len` are not tokenized at all; the tree is an empty `program` carrying one
///   limit error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub max_depth: usize,
    pub max_source_len: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_source_len: None,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_source_len(mut self, max_source_len: usize) -> Self {
        self.max_source_len = Some(max_source_len);
        self
    }
}
