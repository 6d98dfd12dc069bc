//! Syntax highlighting over a parsed [`Tree`].
//!
//! Every visible leaf is classified into a [`Capture`] using its symbol and, for identifiers, the node it sits in.
//! Adjacent leaves with the same capture are merged, so a string literal comes back as one span.
//!
//! ## Examples
//! ```rust
//! use tsz_syntax::highlight::{Capture, highlight};
//!
//! let tree = tsz_syntax::parse("let n = 1;");
//! let captures: Vec<_> = highlight(&tree).into_iter().map(|h| h.capture).collect();
//! assert_eq!(
//!     captures,
//!     [Capture::Keyword, Capture::Variable, Capture::Operator, Capture::Number, Capture::PunctuationDelimiter]
//! );
//! ```

use tsz_core::lang::punctuation::{self, PunctuationCategory, PunctuationId};

use crate::language::{NodeKind, Symbol};
use crate::span::Span;
use crate::tree::{Node, Tree};

/// Highlight classes, named after the usual tree-sitter capture names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capture {
    Keyword,
    Operator,
    PunctuationBracket,
    PunctuationDelimiter,
    String,
    StringEscape,
    StringSpecial,
    Number,
    ConstantBuiltin,
    Comment,
    Function,
    FunctionBuiltin,
    Type,
    TypeBuiltin,
    Variable,
    VariableParameter,
    Property,
    Embedded,
}

impl Capture {
    pub fn name(self) -> &'static str {
        match self {
            Capture::Keyword => "keyword",
            Capture::Operator => "operator",
            Capture::PunctuationBracket => "punctuation.bracket",
            Capture::PunctuationDelimiter => "punctuation.delimiter",
            Capture::String => "string",
            Capture::StringEscape => "string.escape",
            Capture::StringSpecial => "string.special",
            Capture::Number => "number",
            Capture::ConstantBuiltin => "constant.builtin",
            Capture::Comment => "comment",
            Capture::Function => "function",
            Capture::FunctionBuiltin => "function.builtin",
            Capture::Type => "type",
            Capture::TypeBuiltin => "type.builtin",
            Capture::Variable => "variable",
            Capture::VariableParameter => "variable.parameter",
            Capture::Property => "property",
            Capture::Embedded => "embedded",
        }
    }
}

/// A classified byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub span: Span,
    pub capture: Capture,
}

/// Classify the leaves of `tree`. Spans are sorted and never overlap.
pub fn highlight(tree: &Tree) -> Vec<HighlightSpan> {
    let mut out: Vec<HighlightSpan> = Vec::new();
    let mut stack = vec![tree.root_node()];
    while let Some(node) = stack.pop() {
        if node.child_count() > 0 {
            let mut children: Vec<_> = node.children().collect();
            children.reverse();
            stack.extend(children);
            continue;
        }
        if node.is_missing() || node.span().is_empty() {
            continue;
        }
        let Some(capture) = classify(node) else {
            continue;
        };
        let span = node.span();
        match out.last_mut() {
            Some(last) if last.capture == capture && last.span.end == span.start => last.span = last.span.merge(span),
            _ => out.push(HighlightSpan { span, capture }),
        }
    }
    out
}

fn parent_kind(node: Node<'_>) -> Option<NodeKind> {
    node.parent().and_then(Node::node_kind)
}

fn classify(leaf: Node<'_>) -> Option<Capture> {
    let parent = parent_kind(leaf);
    if parent == Some(NodeKind::PrimitiveType) {
        return Some(Capture::TypeBuiltin);
    }
    match leaf.symbol() {
        Symbol::Keyword(_) => Some(Capture::Keyword),
        Symbol::Operator(_) if parent == Some(NodeKind::Regex) => Some(Capture::StringSpecial),
        Symbol::Operator(_) => Some(Capture::Operator),
        Symbol::Punctuation(id) => Some(classify_punctuation(id, parent)),
        Symbol::Named(kind) => classify_named(leaf, kind, parent),
    }
}

fn classify_punctuation(id: PunctuationId, parent: Option<NodeKind>) -> Capture {
    match id {
        PunctuationId::DollarBrace => Capture::Embedded,
        PunctuationId::RBrace if parent == Some(NodeKind::TemplateSubstitution) => Capture::Embedded,
        PunctuationId::DoubleQuote | PunctuationId::SingleQuote | PunctuationId::Backtick => Capture::String,
        PunctuationId::At => Capture::FunctionBuiltin,
        PunctuationId::Hash => Capture::Property,
        PunctuationId::FatArrow | PunctuationId::Question | PunctuationId::DotDot | PunctuationId::Ellipsis => {
            Capture::Operator
        }
        _ => match punctuation::category(id) {
            PunctuationCategory::Delimiter => Capture::PunctuationBracket,
            _ => Capture::PunctuationDelimiter,
        },
    }
}

fn classify_named(leaf: Node<'_>, kind: NodeKind, parent: Option<NodeKind>) -> Option<Capture> {
    let capture = match kind {
        NodeKind::Comment | NodeKind::HtmlComment => Capture::Comment,
        NodeKind::Number => Capture::Number,
        NodeKind::StringFragment => Capture::String,
        NodeKind::EscapeSequence => Capture::StringEscape,
        NodeKind::RegexPattern | NodeKind::RegexFlags => Capture::StringSpecial,
        NodeKind::True | NodeKind::False | NodeKind::Undefined => Capture::ConstantBuiltin,
        NodeKind::Const | NodeKind::Let => Capture::Keyword,
        NodeKind::TypeIdentifier => Capture::Type,
        NodeKind::OptionalChain => Capture::PunctuationDelimiter,
        NodeKind::ShorthandPropertyIdentifier => Capture::Property,
        NodeKind::ShorthandPropertyIdentifierPattern => Capture::Variable,
        NodeKind::PropertyIdentifier => {
            if is_callee(leaf.parent()) {
                Capture::Function
            } else {
                Capture::Property
            }
        }
        NodeKind::Identifier => classify_identifier(leaf, parent),
        _ => return None,
    };
    Some(capture)
}

fn classify_identifier(leaf: Node<'_>, parent: Option<NodeKind>) -> Capture {
    let field = leaf.field_name();
    match parent {
        Some(NodeKind::ComptimeIdentifier) => Capture::FunctionBuiltin,
        Some(NodeKind::PrivatePropertyIdentifier) => Capture::Property,
        Some(NodeKind::FunctionDeclaration) => Capture::Function,
        Some(NodeKind::ArgumentDeclaration) => Capture::VariableParameter,
        Some(NodeKind::EnumDeclaration) => {
            // The first identifier names the enum; the rest are members.
            let is_name = leaf.prev_named_sibling().is_none();
            if is_name { Capture::Type } else { Capture::Property }
        }
        Some(NodeKind::ObjectLiteral | NodeKind::PairPattern) if field == Some("key") => Capture::Property,
        Some(NodeKind::PrimaryExpression) if is_callee(leaf.parent()) => Capture::Function,
        _ => Capture::Variable,
    }
}

/// `node` is a member expression or primary expression used as the `function` of a call.
fn is_callee(node: Option<Node<'_>>) -> bool {
    let mut current = node;
    while let Some(node) = current {
        match node.node_kind() {
            Some(NodeKind::MemberExpression) => current = node.parent(),
            Some(NodeKind::PrimaryExpression) => {
                return node.field_name() == Some("function")
                    && node.parent().and_then(Node::node_kind) == Some(NodeKind::CallExpression);
            }
            _ => return false,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn captures(source: &str) -> Vec<(&str, &'static str)> {
        let tree = parse(source);
        highlight(&tree)
            .into_iter()
            .map(|h| (&source[h.span.start..h.span.end], h.capture.name()))
            .collect()
    }

    #[test]
    fn test_function_declaration_captures() {
        assert_eq!(
            captures("function add(a: number): number { return a; }"),
            [
                ("function", "keyword"),
                ("add", "function"),
                ("(", "punctuation.bracket"),
                ("a", "variable.parameter"),
                (":", "punctuation.delimiter"),
                ("number", "type.builtin"),
                (")", "punctuation.bracket"),
                (":", "punctuation.delimiter"),
                ("number", "type.builtin"),
                ("{", "punctuation.bracket"),
                ("return", "keyword"),
                ("a", "variable"),
                (";", "punctuation.delimiter"),
                ("}", "punctuation.bracket"),
            ]
        );
    }

    #[test]
    fn test_calls_and_members() {
        assert_eq!(
            captures("console.log(x.y, @debug);"),
            [
                ("console", "variable"),
                (".", "punctuation.delimiter"),
                ("log", "function"),
                ("(", "punctuation.bracket"),
                ("x", "variable"),
                (".", "punctuation.delimiter"),
                ("y", "property"),
                (",", "punctuation.delimiter"),
                ("@debug", "function.builtin"),
                (")", "punctuation.bracket"),
                (";", "punctuation.delimiter"),
            ]
        );
    }

    #[test]
    fn test_strings_are_merged_and_escapes_split() {
        assert_eq!(
            captures(r#"s = "a\tb";"#),
            [
                ("s", "variable"),
                ("=", "operator"),
                ("\"a", "string"),
                ("\\t", "string.escape"),
                ("b\"", "string"),
                (";", "punctuation.delimiter"),
            ]
        );
    }

    #[test]
    fn test_template_substitution_is_embedded() {
        let caps = captures("f(`x${y}`);");
        assert!(caps.contains(&("${", "embedded")));
        assert!(caps.contains(&("}", "embedded")));
        assert!(caps.contains(&("`x", "string")));
    }

    #[test]
    fn test_spans_are_sorted_and_disjoint() {
        let tree = parse("// c\nlet r = /a+/g; enum E { A, B }");
        let spans = highlight(&tree);
        assert!(spans.windows(2).all(|w| w[0].span.end <= w[1].span.start));
        assert_eq!(spans[0].capture, Capture::Comment);
        assert!(spans.iter().any(|h| h.capture == Capture::StringSpecial));
    }
}
