//! The tsz language handle: node kinds, symbols, fields, and ABI metadata.
//!
//! Symbol ids are dense `u16`s. Named node kinds come first (in [`NODE_KINDS`] order), followed by the anonymous
//! tokens drawn from the `tsz_core` keyword, operator, and punctuation registries. Field ids start at `1`, leaving
//! `0` free to mean "no field".
//!
//! ## Examples
//! ```rust
//! use tsz_syntax::language::{self, NodeKind};
//!
//! let lang = language::language();
//! assert_eq!(lang.name(), "tsz");
//! let id = lang.id_for_node_kind("binary_expression", true).unwrap();
//! assert_eq!(lang.node_kind_for_id(id), Some("binary_expression"));
//! assert!(lang.node_kind_is_named(NodeKind::Identifier as u16));
//! ```

use tsz_core::lang::keywords::{self, KeywordId};
use tsz_core::lang::operators::{self, OperatorId};
use tsz_core::lang::punctuation::{self, PunctuationId};

/// Tree ABI version this runtime produces.
pub const ABI_VERSION: usize = 14;

/// Oldest ABI version a [`crate::parser::Parser`] will accept.
pub const MIN_COMPATIBLE_ABI_VERSION: usize = 13;

/// Every named node kind, visible or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Program,
    Identifier,
    PrivatePropertyIdentifier,
    ComptimeIdentifier,
    PropertyIdentifier,
    ShorthandPropertyIdentifier,
    ShorthandPropertyIdentifierPattern,
    True,
    False,
    Undefined,
    Number,
    String,
    StringFragment,
    EscapeSequence,
    TemplateString,
    TemplateSubstitution,
    Regex,
    RegexPattern,
    RegexFlags,
    Comment,
    HtmlComment,
    // Types
    TypeAnnotation,
    TypeIdentifier,
    PrimitiveType,
    OrUndefinedType,
    ArrayType,
    TupleType,
    UnionType,
    // Statements
    BlockStatement,
    BreakStatement,
    ReturnStatement,
    IfStatement,
    CallStatement,
    VariableDeclaration,
    Const,
    Let,
    EnumDeclaration,
    FunctionDeclaration,
    ArgumentListDeclaration,
    ArgumentDeclaration,
    // Expressions
    PrimaryExpression,
    ParenthesizedExpression,
    IfTernaryExpression,
    MatchExpression,
    MatchCase,
    MatchRange,
    MatchElse,
    ArgumentList,
    SpreadArgument,
    AnonymousFunctionExpression,
    ArrowFunctionExpression,
    ArrayLiteral,
    ObjectLiteral,
    AssignmentExpression,
    AugmentedAssignmentExpression,
    OptionalChain,
    MemberExpression,
    CallExpression,
    BinaryExpression,
    UnaryExpression,
    // Patterns
    Pattern,
    RestPattern,
    AssignmentPattern,
    PairPattern,
    ObjectPattern,
    ArrayPattern,
    // Recovery
    Error,
    // Supertypes (never materialized in trees)
    Statement,
    Expression,
    Type,
}

/// Static metadata for a named node kind.
#[derive(Debug, Clone, Copy)]
pub struct NodeKindInfo {
    pub kind: NodeKind,
    pub name: &'static str,
    /// Appears in parse trees.
    pub visible: bool,
    /// Abstract grouping of other kinds (`statement`, `expression`, `type`).
    pub supertype: bool,
    /// May appear anywhere between tokens (comments).
    pub extra: bool,
}

/// Named node kinds in symbol-id order. `NODE_KINDS[k as usize].kind == k` for every [`NodeKind`].
pub const NODE_KINDS: &[NodeKindInfo] = &[
    node(NodeKind::Program, "program"),
    node(NodeKind::Identifier, "identifier"),
    node(NodeKind::PrivatePropertyIdentifier, "private_property_identifier"),
    node(NodeKind::ComptimeIdentifier, "comptime_identifier"),
    node(NodeKind::PropertyIdentifier, "property_identifier"),
    node(NodeKind::ShorthandPropertyIdentifier, "shorthand_property_identifier"),
    node(NodeKind::ShorthandPropertyIdentifierPattern, "shorthand_property_identifier_pattern"),
    node(NodeKind::True, "true"),
    node(NodeKind::False, "false"),
    node(NodeKind::Undefined, "undefined"),
    node(NodeKind::Number, "number"),
    node(NodeKind::String, "string"),
    node(NodeKind::StringFragment, "string_fragment"),
    node(NodeKind::EscapeSequence, "escape_sequence"),
    node(NodeKind::TemplateString, "template_string"),
    node(NodeKind::TemplateSubstitution, "template_substitution"),
    node(NodeKind::Regex, "regex"),
    node(NodeKind::RegexPattern, "regex_pattern"),
    node(NodeKind::RegexFlags, "regex_flags"),
    extra(NodeKind::Comment, "comment"),
    extra(NodeKind::HtmlComment, "html_comment"),
    node(NodeKind::TypeAnnotation, "type_annotation"),
    node(NodeKind::TypeIdentifier, "type_identifier"),
    node(NodeKind::PrimitiveType, "primitive_type"),
    node(NodeKind::OrUndefinedType, "or_undefined_type"),
    node(NodeKind::ArrayType, "array_type"),
    node(NodeKind::TupleType, "tuple_type"),
    node(NodeKind::UnionType, "union_type"),
    node(NodeKind::BlockStatement, "block_statement"),
    node(NodeKind::BreakStatement, "break_statement"),
    node(NodeKind::ReturnStatement, "return_statement"),
    node(NodeKind::IfStatement, "if_statement"),
    node(NodeKind::CallStatement, "call_statement"),
    node(NodeKind::VariableDeclaration, "variable_declaration"),
    node(NodeKind::Const, "const"),
    node(NodeKind::Let, "let"),
    node(NodeKind::EnumDeclaration, "enum_declaration"),
    node(NodeKind::FunctionDeclaration, "function_declaration"),
    node(NodeKind::ArgumentListDeclaration, "argument_list_declaration"),
    node(NodeKind::ArgumentDeclaration, "argument_declaration"),
    node(NodeKind::PrimaryExpression, "primary_expression"),
    node(NodeKind::ParenthesizedExpression, "parenthesized_expression"),
    node(NodeKind::IfTernaryExpression, "if_ternary_expression"),
    node(NodeKind::MatchExpression, "match_expression"),
    node(NodeKind::MatchCase, "match_case"),
    node(NodeKind::MatchRange, "match_range"),
    node(NodeKind::MatchElse, "match_else"),
    node(NodeKind::ArgumentList, "argument_list"),
    node(NodeKind::SpreadArgument, "spread_argument"),
    node(NodeKind::AnonymousFunctionExpression, "anonymous_function_expression"),
    node(NodeKind::ArrowFunctionExpression, "arrow_function_expression"),
    node(NodeKind::ArrayLiteral, "array_literal"),
    node(NodeKind::ObjectLiteral, "object_literal"),
    node(NodeKind::AssignmentExpression, "assignment_expression"),
    node(NodeKind::AugmentedAssignmentExpression, "augmented_assignment_expression"),
    node(NodeKind::OptionalChain, "optional_chain"),
    node(NodeKind::MemberExpression, "member_expression"),
    node(NodeKind::CallExpression, "call_expression"),
    node(NodeKind::BinaryExpression, "binary_expression"),
    node(NodeKind::UnaryExpression, "unary_expression"),
    node(NodeKind::Pattern, "pattern"),
    node(NodeKind::RestPattern, "rest_pattern"),
    node(NodeKind::AssignmentPattern, "assignment_pattern"),
    node(NodeKind::PairPattern, "pair_pattern"),
    node(NodeKind::ObjectPattern, "object_pattern"),
    node(NodeKind::ArrayPattern, "array_pattern"),
    node(NodeKind::Error, "ERROR"),
    supertype(NodeKind::Statement, "statement"),
    supertype(NodeKind::Expression, "expression"),
    supertype(NodeKind::Type, "type"),
];

const fn node(kind: NodeKind, name: &'static str) -> NodeKindInfo {
    NodeKindInfo {
        kind,
        name,
        visible: true,
        supertype: false,
        extra: false,
    }
}

const fn extra(kind: NodeKind, name: &'static str) -> NodeKindInfo {
    NodeKindInfo {
        extra: true,
        ..node(kind, name)
    }
}

const fn supertype(kind: NodeKind, name: &'static str) -> NodeKindInfo {
    NodeKindInfo {
        visible: false,
        supertype: true,
        ..node(kind, name)
    }
}

impl NodeKind {
    pub fn info(self) -> &'static NodeKindInfo {
        &NODE_KINDS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Concrete kinds grouped under a supertype; empty for every other kind.
    pub fn subtypes(self) -> &'static [NodeKind] {
        match self {
            NodeKind::Statement => &[
                NodeKind::BlockStatement,
                NodeKind::BreakStatement,
                NodeKind::CallStatement,
                NodeKind::EnumDeclaration,
                NodeKind::FunctionDeclaration,
                NodeKind::IfStatement,
                NodeKind::MatchExpression,
                NodeKind::ReturnStatement,
                NodeKind::VariableDeclaration,
                NodeKind::AssignmentExpression,
            ],
            NodeKind::Expression => &[
                NodeKind::AnonymousFunctionExpression,
                NodeKind::ArrowFunctionExpression,
                NodeKind::AssignmentExpression,
                NodeKind::AugmentedAssignmentExpression,
                NodeKind::BinaryExpression,
                NodeKind::CallExpression,
                NodeKind::IfTernaryExpression,
                NodeKind::PrimaryExpression,
                NodeKind::UnaryExpression,
            ],
            NodeKind::Type => &[
                NodeKind::ArrayType,
                NodeKind::OrUndefinedType,
                NodeKind::PrimitiveType,
                NodeKind::TupleType,
                NodeKind::TypeIdentifier,
                NodeKind::UnionType,
            ],
            _ => &[],
        }
    }
}

/// A grammar symbol: either a named node kind or an anonymous token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Named(NodeKind),
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),
}

impl Symbol {
    pub fn name(self) -> &'static str {
        match self {
            Symbol::Named(kind) => kind.name(),
            Symbol::Keyword(id) => keywords::as_str(id),
            Symbol::Operator(id) => operators::as_str(id),
            Symbol::Punctuation(id) => punctuation::as_str(id),
        }
    }

    pub fn is_named(self) -> bool {
        matches!(self, Symbol::Named(_))
    }

    pub fn node_kind(self) -> Option<NodeKind> {
        match self {
            Symbol::Named(kind) => Some(kind),
            _ => None,
        }
    }
}

impl From<NodeKind> for Symbol {
    fn from(kind: NodeKind) -> Self {
        Symbol::Named(kind)
    }
}

/// Field names, sorted alphabetically; ids are `position + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    Alternative,
    Argument,
    Arguments,
    Body,
    Condition,
    Consequence,
    End,
    Flags,
    Function,
    Key,
    Kind,
    Left,
    Member,
    Name,
    Object,
    Operator,
    OptionalChain,
    Pattern,
    Property,
    ReturnType,
    Right,
    Spread,
    Start,
    Type,
    Value,
}

pub const FIELDS: &[(FieldId, &str)] = &[
    (FieldId::Alternative, "alternative"),
    (FieldId::Argument, "argument"),
    (FieldId::Arguments, "arguments"),
    (FieldId::Body, "body"),
    (FieldId::Condition, "condition"),
    (FieldId::Consequence, "consequence"),
    (FieldId::End, "end"),
    (FieldId::Flags, "flags"),
    (FieldId::Function, "function"),
    (FieldId::Key, "key"),
    (FieldId::Kind, "kind"),
    (FieldId::Left, "left"),
    (FieldId::Member, "member"),
    (FieldId::Name, "name"),
    (FieldId::Object, "object"),
    (FieldId::Operator, "operator"),
    (FieldId::OptionalChain, "optional_chain"),
    (FieldId::Pattern, "pattern"),
    (FieldId::Property, "property"),
    (FieldId::ReturnType, "return_type"),
    (FieldId::Right, "right"),
    (FieldId::Spread, "spread"),
    (FieldId::Start, "start"),
    (FieldId::Type, "type"),
    (FieldId::Value, "value"),
];

impl FieldId {
    pub fn name(self) -> &'static str {
        FIELDS[self as usize].1
    }

    /// Numeric id (`1..=FIELDS.len()`).
    pub fn id(self) -> u16 {
        self as u16 + 1
    }
}

/// Raised by [`crate::parser::Parser::set_language`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LanguageError {
    #[error("Incompatible language version {version}. Expected minimum {min}, maximum {max}")]
    Version { version: usize, min: usize, max: usize },
}

/// Handle to a grammar. Cheap to copy; the tsz handle is [`LANGUAGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    name: &'static str,
    abi_version: usize,
}

/// The tsz grammar.
pub static LANGUAGE: Language = Language {
    name: "tsz",
    abi_version: ABI_VERSION,
};

/// Return the tsz grammar handle.
pub fn language() -> Language {
    LANGUAGE
}

const NAMED_COUNT: usize = NODE_KINDS.len();

impl Language {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn abi_version(&self) -> usize {
        self.abi_version
    }

    /// Version of the crate that defines the grammar.
    pub fn grammar_version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Return `true` if this handle can be loaded by the current runtime.
    pub fn is_compatible(&self) -> bool {
        (MIN_COMPATIBLE_ABI_VERSION..=ABI_VERSION).contains(&self.abi_version)
    }

    pub fn node_kind_count(&self) -> usize {
        NAMED_COUNT + keywords::KEYWORDS.len() + operators::OPERATORS.len() + punctuation::PUNCTUATION.len()
    }

    pub fn field_count(&self) -> usize {
        FIELDS.len()
    }

    pub fn symbol_id(&self, symbol: Symbol) -> u16 {
        let index = match symbol {
            Symbol::Named(kind) => kind as usize,
            Symbol::Keyword(id) => NAMED_COUNT + position(keywords::KEYWORDS.iter().map(|k| k.id), id),
            Symbol::Operator(id) => {
                NAMED_COUNT + keywords::KEYWORDS.len() + position(operators::OPERATORS.iter().map(|o| o.id), id)
            }
            Symbol::Punctuation(id) => {
                NAMED_COUNT
                    + keywords::KEYWORDS.len()
                    + operators::OPERATORS.len()
                    + position(punctuation::PUNCTUATION.iter().map(|p| p.id), id)
            }
        };
        index as u16
    }

    pub fn symbol_for_id(&self, id: u16) -> Option<Symbol> {
        let mut index = id as usize;
        if let Some(info) = NODE_KINDS.get(index) {
            return Some(Symbol::Named(info.kind));
        }
        index -= NAMED_COUNT;
        if let Some(info) = keywords::KEYWORDS.get(index) {
            return Some(Symbol::Keyword(info.id));
        }
        index -= keywords::KEYWORDS.len();
        if let Some(info) = operators::OPERATORS.get(index) {
            return Some(Symbol::Operator(info.id));
        }
        index -= operators::OPERATORS.len();
        punctuation::PUNCTUATION
            .get(index)
            .map(|info| Symbol::Punctuation(info.id))
    }

    pub fn node_kind_for_id(&self, id: u16) -> Option<&'static str> {
        self.symbol_for_id(id).map(Symbol::name)
    }

    /// Look up a symbol id by name. Anonymous spellings shared by a keyword and a word operator resolve to the
    /// keyword, which is what the lexer produces.
    pub fn id_for_node_kind(&self, kind: &str, named: bool) -> Option<u16> {
        (0..self.node_kind_count() as u16).find(|&id| {
            self.symbol_for_id(id)
                .is_some_and(|s| s.is_named() == named && s.name() == kind)
        })
    }

    pub fn node_kind_is_named(&self, id: u16) -> bool {
        self.symbol_for_id(id).is_some_and(Symbol::is_named)
    }

    pub fn node_kind_is_visible(&self, id: u16) -> bool {
        match self.symbol_for_id(id) {
            Some(Symbol::Named(kind)) => kind.info().visible,
            Some(_) => true,
            None => false,
        }
    }

    pub fn node_kind_is_supertype(&self, id: u16) -> bool {
        matches!(self.symbol_for_id(id), Some(Symbol::Named(kind)) if kind.info().supertype)
    }

    pub fn supertypes(&self) -> Vec<u16> {
        NODE_KINDS
            .iter()
            .filter(|info| info.supertype)
            .map(|info| info.kind as u16)
            .collect()
    }

    /// Concrete symbol ids grouped under `supertype`.
    pub fn subtypes(&self, supertype: u16) -> Vec<u16> {
        match self.symbol_for_id(supertype) {
            Some(Symbol::Named(kind)) => kind.subtypes().iter().map(|k| *k as u16).collect(),
            _ => Vec::new(),
        }
    }

    pub fn field_name_for_id(&self, id: u16) -> Option<&'static str> {
        let index = (id as usize).checked_sub(1)?;
        FIELDS.get(index).map(|(_, name)| *name)
    }

    pub fn field_id_for_name(&self, name: &str) -> Option<u16> {
        FIELDS.iter().find(|(_, n)| *n == name).map(|(f, _)| f.id())
    }

    #[cfg(test)]
    pub(crate) fn with_abi_version(self, abi_version: usize) -> Language {
        Language { abi_version, ..self }
    }
}

fn position<T: PartialEq>(mut ids: impl Iterator<Item = T>, id: T) -> usize {
    ids.position(|candidate| candidate == id)
        .expect("registry entry missing")
}
