//! Grammar metadata in the shape of tree-sitter's `node-types.json`.
//!
//! Each entry describes one node type: whether it is named, the node types each field may hold, the node types of
//! its unlabeled named children, and, for supertypes, the concrete kinds they group.
//!
//! ## Examples
//! ```rust
//! use tsz_syntax::node_types;
//!
//! let types = node_types::node_types();
//! let binary = types.iter().find(|t| t.kind == "binary_expression").unwrap();
//! assert!(binary.fields.contains_key("operator"));
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use tsz_core::lang::keywords::{self, KEYWORDS};
use tsz_core::lang::operators::{self, OPERATORS, OperatorId};
use tsz_core::lang::punctuation::{PUNCTUATION, PunctuationId};

use crate::language::{NODE_KINDS, NodeKind, Symbol};

/// Reference to a node type by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct NodeTypeRef {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub named: bool,
}

impl From<Symbol> for NodeTypeRef {
    fn from(symbol: Symbol) -> Self {
        Self {
            kind: symbol.name(),
            named: symbol.is_named(),
        }
    }
}

/// What a field (or the unlabeled children) of a node may contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildInfo {
    pub multiple: bool,
    pub required: bool,
    pub types: Vec<NodeTypeRef>,
}

/// One entry of `node-types.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeTypeInfo {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub named: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<&'static str, ChildInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<ChildInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subtypes: Vec<NodeTypeRef>,
}

/// Allowed contents of a field or child slot.
#[derive(Clone, Copy)]
enum Types {
    Symbols(&'static [Symbol]),
    /// Every operator token accepted by the predicate.
    Operators(fn(OperatorId) -> bool),
}

#[derive(Clone, Copy)]
struct Slot {
    kind: NodeKind,
    /// `None` for unlabeled named children.
    field: Option<&'static str>,
    multiple: bool,
    required: bool,
    types: Types,
}

const fn n(kind: NodeKind) -> Symbol {
    Symbol::Named(kind)
}

const fn one(kind: NodeKind, field: &'static str, types: &'static [Symbol]) -> Slot {
    Slot {
        kind,
        field: Some(field),
        multiple: false,
        required: true,
        types: Types::Symbols(types),
    }
}

const fn opt(kind: NodeKind, field: &'static str, types: &'static [Symbol]) -> Slot {
    Slot {
        required: false,
        ..one(kind, field, types)
    }
}

const fn many(kind: NodeKind, field: &'static str, required: bool, types: &'static [Symbol]) -> Slot {
    Slot {
        multiple: true,
        required,
        ..one(kind, field, types)
    }
}

const fn children(kind: NodeKind, multiple: bool, required: bool, types: &'static [Symbol]) -> Slot {
    Slot {
        kind,
        field: None,
        multiple,
        required,
        types: Types::Symbols(types),
    }
}

const fn operators_field(kind: NodeKind, predicate: fn(OperatorId) -> bool) -> Slot {
    Slot {
        kind,
        field: Some("operator"),
        multiple: false,
        required: true,
        types: Types::Operators(predicate),
    }
}

const EXPRESSION: &[Symbol] = &[n(NodeKind::Expression)];
const STATEMENTS: &[Symbol] = &[n(NodeKind::Statement)];
const TYPE: &[Symbol] = &[n(NodeKind::Type)];
const BLOCK: &[Symbol] = &[n(NodeKind::BlockStatement)];
const BLOCK_OR_EXPRESSION: &[Symbol] = &[n(NodeKind::BlockStatement), n(NodeKind::Expression)];
const TYPE_ANNOTATION: &[Symbol] = &[n(NodeKind::TypeAnnotation)];
const IDENTIFIER: &[Symbol] = &[n(NodeKind::Identifier)];
const NUMBER: &[Symbol] = &[n(NodeKind::Number)];
const PARENTHESIZED: &[Symbol] = &[n(NodeKind::ParenthesizedExpression)];
const PARAMS: &[Symbol] = &[n(NodeKind::ArgumentListDeclaration)];
const OPTIONAL_CHAIN: &[Symbol] = &[n(NodeKind::OptionalChain)];
const LHS: &[Symbol] = &[
    n(NodeKind::ArrayPattern),
    n(NodeKind::Identifier),
    n(NodeKind::MemberExpression),
    n(NodeKind::ObjectPattern),
];

#[rustfmt::skip]
const SLOTS: &[Slot] = &[
    children(NodeKind::Program, true, false, STATEMENTS),
    children(NodeKind::BlockStatement, true, false, STATEMENTS),
    children(NodeKind::CallStatement, false, true, &[n(NodeKind::CallExpression)]),
    children(NodeKind::ReturnStatement, false, true, EXPRESSION),
    one(NodeKind::IfStatement, "condition", PARENTHESIZED),
    one(NodeKind::IfStatement, "consequence", BLOCK),
    opt(NodeKind::IfStatement, "alternative", &[n(NodeKind::BlockStatement), n(NodeKind::IfStatement)]),
    one(NodeKind::VariableDeclaration, "kind", &[n(NodeKind::Const), n(NodeKind::Let)]),
    one(NodeKind::VariableDeclaration, "name", IDENTIFIER),
    opt(NodeKind::VariableDeclaration, "value", EXPRESSION),
    children(NodeKind::VariableDeclaration, false, false, TYPE_ANNOTATION),
    children(NodeKind::EnumDeclaration, true, true, IDENTIFIER),
    one(NodeKind::FunctionDeclaration, "body", BLOCK),
    one(NodeKind::FunctionDeclaration, "return_type", TYPE_ANNOTATION),
    children(NodeKind::FunctionDeclaration, true, true, &[n(NodeKind::ArgumentListDeclaration), n(NodeKind::Identifier)]),
    children(NodeKind::ArgumentListDeclaration, true, false, &[n(NodeKind::ArgumentDeclaration)]),
    one(NodeKind::ArgumentDeclaration, "name", IDENTIFIER),
    opt(NodeKind::ArgumentDeclaration, "spread", &[Symbol::Punctuation(PunctuationId::Ellipsis)]),
    one(NodeKind::ArgumentDeclaration, "type", TYPE_ANNOTATION),
    // Types
    one(NodeKind::TypeAnnotation, "type", TYPE),
    children(NodeKind::PrimitiveType, false, false, &[n(NodeKind::False), n(NodeKind::True), n(NodeKind::Undefined)]),
    children(NodeKind::OrUndefinedType, false, true, TYPE),
    children(NodeKind::ArrayType, false, true, TYPE),
    children(NodeKind::TupleType, true, false, TYPE),
    children(NodeKind::UnionType, true, true, TYPE),
    // Expressions
    children(NodeKind::PrimaryExpression, false, true, &[
        n(NodeKind::AnonymousFunctionExpression), n(NodeKind::ArrayLiteral), n(NodeKind::ArrowFunctionExpression),
        n(NodeKind::ComptimeIdentifier), n(NodeKind::False), n(NodeKind::Identifier), n(NodeKind::MatchExpression),
        n(NodeKind::MemberExpression), n(NodeKind::Number), n(NodeKind::ObjectLiteral),
        n(NodeKind::ParenthesizedExpression), n(NodeKind::Regex), n(NodeKind::String), n(NodeKind::TemplateString),
        n(NodeKind::True), n(NodeKind::Undefined),
    ]),
    children(NodeKind::ParenthesizedExpression, false, true, EXPRESSION),
    one(NodeKind::IfTernaryExpression, "condition", PARENTHESIZED),
    one(NodeKind::IfTernaryExpression, "consequence", EXPRESSION),
    one(NodeKind::IfTernaryExpression, "alternative", EXPRESSION),
    one(NodeKind::MatchExpression, "value", PARENTHESIZED),
    many(NodeKind::MatchExpression, "body", true, &[
        Symbol::Punctuation(PunctuationId::LBrace), Symbol::Punctuation(PunctuationId::RBrace),
        n(NodeKind::MatchCase), n(NodeKind::MatchElse),
    ]),
    many(NodeKind::MatchCase, "condition", true, &[
        Symbol::Punctuation(PunctuationId::Comma), Symbol::Punctuation(PunctuationId::Dot),
        n(NodeKind::False), n(NodeKind::Identifier), n(NodeKind::MatchRange), n(NodeKind::Number),
        n(NodeKind::String), n(NodeKind::True), n(NodeKind::Undefined),
    ]),
    one(NodeKind::MatchCase, "consequence", BLOCK_OR_EXPRESSION),
    one(NodeKind::MatchElse, "consequence", BLOCK_OR_EXPRESSION),
    one(NodeKind::MatchRange, "start", NUMBER),
    one(NodeKind::MatchRange, "end", NUMBER),
    children(NodeKind::ArgumentList, true, false, &[n(NodeKind::Expression), n(NodeKind::SpreadArgument)]),
    children(NodeKind::SpreadArgument, false, true, EXPRESSION),
    one(NodeKind::AnonymousFunctionExpression, "body", BLOCK),
    one(NodeKind::AnonymousFunctionExpression, "return_type", TYPE_ANNOTATION),
    children(NodeKind::AnonymousFunctionExpression, false, true, PARAMS),
    one(NodeKind::ArrowFunctionExpression, "body", BLOCK_OR_EXPRESSION),
    one(NodeKind::ArrowFunctionExpression, "return_type", TYPE_ANNOTATION),
    children(NodeKind::ArrowFunctionExpression, false, true, PARAMS),
    children(NodeKind::ArrayLiteral, true, true, EXPRESSION),
    many(NodeKind::ObjectLiteral, "key", false, IDENTIFIER),
    many(NodeKind::ObjectLiteral, "value", false, EXPRESSION),
    many(NodeKind::ObjectLiteral, "member", false, &[n(NodeKind::ShorthandPropertyIdentifier)]),
    one(NodeKind::AssignmentExpression, "left", LHS),
    one(NodeKind::AssignmentExpression, "right", EXPRESSION),
    one(NodeKind::AugmentedAssignmentExpression, "left", &[
        n(NodeKind::Identifier), n(NodeKind::MemberExpression), n(NodeKind::ParenthesizedExpression),
    ]),
    operators_field(NodeKind::AugmentedAssignmentExpression, operators::is_augmented_assignment),
    one(NodeKind::AugmentedAssignmentExpression, "right", EXPRESSION),
    one(NodeKind::MemberExpression, "object", &[n(NodeKind::PrimaryExpression)]),
    opt(NodeKind::MemberExpression, "optional_chain", OPTIONAL_CHAIN),
    one(NodeKind::MemberExpression, "property", &[n(NodeKind::PrivatePropertyIdentifier), n(NodeKind::PropertyIdentifier)]),
    one(NodeKind::CallExpression, "function", &[n(NodeKind::Expression), n(NodeKind::PrimaryExpression)]),
    opt(NodeKind::CallExpression, "optional_chain", OPTIONAL_CHAIN),
    one(NodeKind::CallExpression, "arguments", &[n(NodeKind::ArgumentList)]),
    one(NodeKind::BinaryExpression, "left", &[n(NodeKind::Expression), n(NodeKind::PrivatePropertyIdentifier)]),
    operators_field(NodeKind::BinaryExpression, is_binary),
    one(NodeKind::BinaryExpression, "right", EXPRESSION),
    operators_field(NodeKind::UnaryExpression, operators::is_prefix),
    one(NodeKind::UnaryExpression, "argument", EXPRESSION),
    // Patterns
    children(NodeKind::Pattern, false, true, &[
        n(NodeKind::ArrayPattern), n(NodeKind::Identifier), n(NodeKind::MemberExpression),
        n(NodeKind::ObjectPattern), n(NodeKind::RestPattern),
    ]),
    children(NodeKind::RestPattern, false, true, LHS),
    one(NodeKind::AssignmentPattern, "left", &[n(NodeKind::Pattern)]),
    one(NodeKind::AssignmentPattern, "right", EXPRESSION),
    one(NodeKind::PairPattern, "key", &[n(NodeKind::Identifier), n(NodeKind::PrivatePropertyIdentifier)]),
    one(NodeKind::PairPattern, "value", &[n(NodeKind::AssignmentPattern), n(NodeKind::Pattern)]),
    children(NodeKind::ObjectPattern, true, false, &[
        n(NodeKind::PairPattern), n(NodeKind::RestPattern), n(NodeKind::ShorthandPropertyIdentifierPattern),
    ]),
    children(NodeKind::ArrayPattern, true, false, &[n(NodeKind::AssignmentPattern), n(NodeKind::Pattern)]),
    children(NodeKind::ShorthandPropertyIdentifierPattern, false, false, &[n(NodeKind::PrivatePropertyIdentifier)]),
    // Literals
    children(NodeKind::String, true, false, &[n(NodeKind::EscapeSequence), n(NodeKind::StringFragment)]),
    children(NodeKind::TemplateString, true, false, &[
        n(NodeKind::EscapeSequence), n(NodeKind::StringFragment), n(NodeKind::TemplateSubstitution),
    ]),
    children(NodeKind::TemplateSubstitution, false, true, EXPRESSION),
    one(NodeKind::Regex, "pattern", &[n(NodeKind::RegexPattern)]),
    opt(NodeKind::Regex, "flags", &[n(NodeKind::RegexFlags)]),
    children(NodeKind::ComptimeIdentifier, false, true, IDENTIFIER),
    children(NodeKind::PrivatePropertyIdentifier, false, true, IDENTIFIER),
];

fn is_binary(id: OperatorId) -> bool {
    operators::binary_binding(id).is_some()
}

fn resolve(types: Types) -> Vec<NodeTypeRef> {
    let mut refs: Vec<NodeTypeRef> = match types {
        Types::Symbols(symbols) => symbols.iter().copied().map(NodeTypeRef::from).collect(),
        Types::Operators(predicate) => OPERATORS
            .iter()
            .filter(|info| predicate(info.id))
            .map(|info| match keywords::from_str(info.spelling).filter(|_| info.is_keyword_spelling) {
                Some(keyword) => NodeTypeRef::from(Symbol::Keyword(keyword)),
                None => NodeTypeRef::from(Symbol::Operator(info.id)),
            })
            .collect(),
    };
    refs.sort();
    refs.dedup();
    refs
}

/// Describe every node type of the grammar: named kinds first, then anonymous tokens.
pub fn node_types() -> Vec<NodeTypeInfo> {
    let mut out = Vec::new();
    for info in NODE_KINDS {
        if (!info.visible && !info.supertype) || info.kind == NodeKind::Error {
            continue;
        }
        let mut entry = NodeTypeInfo {
            kind: info.name,
            named: true,
            fields: BTreeMap::new(),
            children: None,
            subtypes: info
                .kind
                .subtypes()
                .iter()
                .map(|&kind| NodeTypeRef::from(Symbol::Named(kind)))
                .collect(),
        };
        entry.subtypes.sort();
        for slot in SLOTS.iter().filter(|slot| slot.kind == info.kind) {
            let child = ChildInfo {
                multiple: slot.multiple,
                required: slot.required,
                types: resolve(slot.types),
            };
            match slot.field {
                Some(field) => {
                    entry.fields.insert(field, child);
                }
                None => entry.children = Some(child),
            }
        }
        out.push(entry);
    }

    let anonymous = KEYWORDS
        .iter()
        .map(|k| Symbol::Keyword(k.id))
        .chain(OPERATORS.iter().filter(|o| !o.is_keyword_spelling).map(|o| Symbol::Operator(o.id)))
        .chain(PUNCTUATION.iter().map(|p| Symbol::Punctuation(p.id)));
    for symbol in anonymous {
        out.push(NodeTypeInfo {
            kind: symbol.name(),
            named: false,
            fields: BTreeMap::new(),
            children: None,
            subtypes: Vec::new(),
        });
    }
    out
}

/// [`node_types`] rendered as pretty-printed JSON.
///
/// ## Errors
/// Only fails if `serde_json` cannot serialize the in-memory tables, which would be a bug.
pub fn node_types_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&node_types())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: &str) -> NodeTypeInfo {
        node_types()
            .into_iter()
            .find(|t| t.kind == kind && t.named)
            .unwrap_or_else(|| panic!("missing {kind}"))
    }

    #[test]
    fn test_every_slot_targets_a_visible_kind() {
        for slot in SLOTS {
            assert!(slot.kind.info().visible, "{:?} is hidden", slot.kind);
        }
    }

    #[test]
    fn test_supertypes_list_subtypes() {
        let expression = entry("expression");
        assert!(expression.subtypes.iter().any(|t| t.kind == "binary_expression"));
        assert!(expression.fields.is_empty());
    }

    #[test]
    fn test_word_operators_are_keyword_tokens() {
        let binary = entry("binary_expression");
        let operators = &binary.fields["operator"].types;
        assert!(operators.iter().any(|t| t.kind == "instanceof" && !t.named));
        assert!(operators.iter().any(|t| t.kind == "**"));
        assert!(!operators.iter().any(|t| t.kind == "!"));

        let unary = entry("unary_expression");
        let operators: Vec<_> = unary.fields["operator"].types.iter().map(|t| t.kind).collect();
        assert_eq!(operators, ["!", "+", "-", "typeof", "void", "~"]);
    }

    #[test]
    fn test_match_range_json() {
        let json = serde_json::to_string_pretty(&entry("match_range")).unwrap();
        insta::assert_snapshot!(json, @r#"
        {
          "type": "match_range",
          "named": true,
          "fields": {
            "end": {
              "multiple": false,
              "required": true,
              "types": [
                {
                  "type": "number",
                  "named": true
                }
              ]
            },
            "start": {
              "multiple": false,
              "required": true,
              "types": [
                {
                  "type": "number",
                  "named": true
                }
              ]
            }
          }
        }
        "#);
    }

    #[test]
    fn test_json_lists_anonymous_tokens() {
        let json = node_types_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entries = value.as_array().unwrap();
        assert!(entries.iter().any(|e| e["type"] == "=>" && e["named"] == false));
        assert!(entries.iter().any(|e| e["type"] == "program" && e["named"] == true));
    }
}
