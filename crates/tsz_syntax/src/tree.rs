//! Concrete syntax trees.
//!
//! A [`Tree`] owns its source text and a flat preorder arena of nodes. [`Node`] is a cheap `Copy` handle into that
//! arena, and [`TreeCursor`] walks it without allocation per step. The API follows the tree-sitter runtime so
//! tooling written against tree-sitter reads naturally here.
//!
//! ## Notes
//! - Every node covers a byte range of the source. Parents cover their children; siblings are in source order.
//! - Comments are *extras*: they attach to the deepest node that encloses them.
//! - Error recovery leaves `ERROR` nodes and zero-width *missing* nodes in the tree; [`Node::has_error`] is `true`
//!   for any node containing one.

use std::fmt;
use std::ops::Range;

use crate::diagnostics::SyntaxError;
use crate::language::{FieldId, Language, NodeKind, Symbol};
use crate::span::{Point, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) symbol: Symbol,
    pub(crate) span: Span,
    pub(crate) field: Option<FieldId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) missing: bool,
    pub(crate) extra: bool,
    pub(crate) has_error: bool,
    pub(crate) start_point: Point,
    pub(crate) end_point: Point,
}

impl NodeData {
    pub(crate) fn new(symbol: Symbol, span: Span) -> Self {
        Self {
            symbol,
            span,
            field: None,
            parent: None,
            children: Vec::new(),
            missing: false,
            extra: false,
            has_error: false,
            start_point: Point::default(),
            end_point: Point::default(),
        }
    }
}

/// A parsed tsz source file.
#[derive(Clone)]
pub struct Tree {
    source: String,
    nodes: Vec<NodeData>,
    errors: Vec<SyntaxError>,
    language: Language,
}

impl Tree {
    pub(crate) fn from_parts(source: String, nodes: Vec<NodeData>, errors: Vec<SyntaxError>, language: Language) -> Self {
        Self {
            source,
            nodes,
            errors,
            language,
        }
    }

    pub fn root_node(&self) -> Node<'_> {
        Node {
            tree: self,
            id: NodeId(0),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Diagnostics collected while lexing and parsing, in source order.
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Return `true` if lexing or parsing reported anything.
    ///
    /// This is broader than `root_node().has_error()`: a few lexical problems (such as `==` being rewritten to
    /// `===`) are reported without leaving an `ERROR` node behind.
    pub fn has_error(&self) -> bool {
        !self.errors.is_empty() || self.root_node().has_error()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn walk(&self) -> TreeCursor<'_> {
        self.root_node().walk()
    }

    /// S-expression of the whole tree, as printed by `tree-sitter parse`.
    pub fn to_sexp(&self) -> String {
        self.root_node().to_sexp()
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{Tree {:?}}}", self.root_node())
    }
}

/// A handle to one node of a [`Tree`].
#[derive(Clone, Copy)]
pub struct Node<'tree> {
    tree: &'tree Tree,
    id: NodeId,
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{Node {} {} - {}}}",
            self.kind(),
            self.start_position(),
            self.end_position()
        )
    }
}

impl<'tree> Node<'tree> {
    fn data(self) -> &'tree NodeData {
        self.tree.data(self.id)
    }

    fn at(self, id: NodeId) -> Node<'tree> {
        Node { tree: self.tree, id }
    }

    /// Stable within one tree; preorder index of the node.
    pub fn id(self) -> usize {
        self.id.index()
    }

    pub fn kind(self) -> &'static str {
        self.data().symbol.name()
    }

    pub fn kind_id(self) -> u16 {
        self.tree.language.symbol_id(self.data().symbol)
    }

    pub fn symbol(self) -> Symbol {
        self.data().symbol
    }

    /// Named kind, or `None` for anonymous tokens.
    pub fn node_kind(self) -> Option<NodeKind> {
        self.data().symbol.node_kind()
    }

    pub fn is_named(self) -> bool {
        self.data().symbol.is_named()
    }

    pub fn is_missing(self) -> bool {
        self.data().missing
    }

    pub fn is_extra(self) -> bool {
        self.data().extra
    }

    pub fn is_error(self) -> bool {
        self.node_kind() == Some(NodeKind::Error)
    }

    pub fn has_error(self) -> bool {
        self.data().has_error
    }

    pub fn span(self) -> Span {
        self.data().span
    }

    pub fn start_byte(self) -> usize {
        self.data().span.start
    }

    pub fn end_byte(self) -> usize {
        self.data().span.end
    }

    pub fn byte_range(self) -> Range<usize> {
        self.start_byte()..self.end_byte()
    }

    pub fn start_position(self) -> Point {
        self.data().start_point
    }

    pub fn end_position(self) -> Point {
        self.data().end_point
    }

    /// Source text covered by this node.
    pub fn text(self) -> &'tree str {
        &self.tree.source[self.byte_range()]
    }

    /// Slice `source` by this node's byte range, for callers holding their own copy of the input.
    pub fn utf8_text<'a>(self, source: &'a [u8]) -> Result<&'a str, std::str::Utf8Error> {
        std::str::from_utf8(&source[self.byte_range()])
    }

    pub fn parent(self) -> Option<Node<'tree>> {
        self.data().parent.map(|id| self.at(id))
    }

    /// Number of nodes in this subtree, including the node itself.
    pub fn descendant_count(self) -> usize {
        let mut count = 0;
        let mut stack = vec![self.id];
        while let Some(id) = stack.pop() {
            count += 1;
            stack.extend(self.tree.data(id).children.iter().copied());
        }
        count
    }

    pub fn child_count(self) -> usize {
        self.data().children.len()
    }

    pub fn child(self, index: usize) -> Option<Node<'tree>> {
        self.data().children.get(index).map(|&id| self.at(id))
    }

    pub fn children(self) -> impl Iterator<Item = Node<'tree>> {
        self.data().children.iter().map(move |&id| self.at(id))
    }

    pub fn named_children(self) -> impl Iterator<Item = Node<'tree>> {
        self.children().filter(|n| n.is_named())
    }

    pub fn named_child_count(self) -> usize {
        self.named_children().count()
    }

    pub fn named_child(self, index: usize) -> Option<Node<'tree>> {
        self.named_children().nth(index)
    }

    pub fn child_by_field_name(self, name: &str) -> Option<Node<'tree>> {
        self.children_by_field_name(name).next()
    }

    pub fn children_by_field_name(self, name: &str) -> impl Iterator<Item = Node<'tree>> + use<'tree> {
        let field = self.tree.language.field_id_for_name(name);
        self.children()
            .filter(move |n| field.is_some() && n.data().field.map(FieldId::id) == field)
    }

    pub fn child_by_field(self, field: FieldId) -> Option<Node<'tree>> {
        self.children().find(|n| n.data().field == Some(field))
    }

    /// Field the node fills in its parent.
    pub fn field_name(self) -> Option<&'static str> {
        self.data().field.map(FieldId::name)
    }

    pub fn field_name_for_child(self, index: usize) -> Option<&'static str> {
        self.child(index).and_then(Node::field_name)
    }

    fn index_in_parent(self) -> Option<(Node<'tree>, usize)> {
        let parent = self.parent()?;
        let index = parent.data().children.iter().position(|&id| id == self.id)?;
        Some((parent, index))
    }

    pub fn next_sibling(self) -> Option<Node<'tree>> {
        let (parent, index) = self.index_in_parent()?;
        parent.child(index + 1)
    }

    pub fn prev_sibling(self) -> Option<Node<'tree>> {
        let (parent, index) = self.index_in_parent()?;
        parent.child(index.checked_sub(1)?)
    }

    pub fn next_named_sibling(self) -> Option<Node<'tree>> {
        let (parent, index) = self.index_in_parent()?;
        parent.children().skip(index + 1).find(|n| n.is_named())
    }

    pub fn prev_named_sibling(self) -> Option<Node<'tree>> {
        let (parent, index) = self.index_in_parent()?;
        parent.children().take(index).filter(|n| n.is_named()).last()
    }

    /// Smallest node spanning `start..end`.
    pub fn descendant_for_byte_range(self, start: usize, end: usize) -> Option<Node<'tree>> {
        self.descendant_matching(start, end, |_| true)
    }

    /// Smallest named node spanning `start..end`.
    pub fn named_descendant_for_byte_range(self, start: usize, end: usize) -> Option<Node<'tree>> {
        self.descendant_matching(start, end, Node::is_named)
    }

    fn descendant_matching(
        self,
        start: usize,
        end: usize,
        accept: impl Fn(Node<'tree>) -> bool,
    ) -> Option<Node<'tree>> {
        let wanted = Span::new(start, end);
        if !self.span().contains(wanted) {
            return None;
        }
        let mut best = self;
        let mut current = self;
        'descend: loop {
            for child in current.children() {
                if child.span().contains(wanted) && !child.is_missing() {
                    current = child;
                    if accept(child) {
                        best = child;
                    }
                    continue 'descend;
                }
            }
            return Some(best);
        }
    }

    pub fn walk(self) -> TreeCursor<'tree> {
        TreeCursor {
            tree: self.tree,
            stack: vec![(self.id, 0)],
        }
    }

    /// S-expression listing named nodes and missing tokens, with field labels.
    ///
    /// ```rust
    /// let tree = tsz_syntax::parse("break;");
    /// assert_eq!(tree.to_sexp(), "(program (break_statement))");
    /// ```
    pub fn to_sexp(self) -> String {
        // Flat chains (`a + b + ...`, `a.b.c...`) nest without bound, so the walk keeps its own stack.
        let mut out = String::new();
        let mut stack = vec![SexpStep::Open(self, None)];
        while let Some(step) = stack.pop() {
            let (node, label) = match step {
                SexpStep::Close => {
                    out.push(')');
                    continue;
                }
                SexpStep::Open(node, label) => (node, label),
            };
            if let Some(label) = label {
                out.push(' ');
                if let Some(field) = label {
                    out.push_str(field);
                    out.push_str(": ");
                }
            }
            if node.is_missing() {
                if node.is_named() {
                    out.push_str(&format!("(MISSING {})", node.kind()));
                } else {
                    out.push_str(&format!("(MISSING \"{}\")", node.kind()));
                }
                continue;
            }
            out.push('(');
            out.push_str(node.kind());
            stack.push(SexpStep::Close);
            let visible: Vec<_> = node.children().filter(|c| c.is_named() || c.is_missing()).collect();
            for child in visible.into_iter().rev() {
                stack.push(SexpStep::Open(child, Some(child.field_name())));
            }
        }
        out
    }
}

/// Pending work for [`Node::to_sexp`]. `Open` carries the child's field label; the root has none.
enum SexpStep<'tree> {
    Open(Node<'tree>, Option<Option<&'static str>>),
    Close,
}

/// Stateful walker over a [`Tree`].
///
/// ## Examples
/// ```rust
/// let tree = tsz_syntax::parse("let a = 1;");
/// let mut cursor = tree.walk();
/// assert!(cursor.goto_first_child());
/// assert_eq!(cursor.node().kind(), "variable_declaration");
/// assert!(cursor.goto_first_child());
/// assert_eq!(cursor.field_name(), Some("kind"));
/// assert!(cursor.goto_parent());
/// ```
#[derive(Clone)]
pub struct TreeCursor<'tree> {
    tree: &'tree Tree,
    /// `(node, index in parent)` from the starting node down to the current node.
    stack: Vec<(NodeId, usize)>,
}

impl<'tree> TreeCursor<'tree> {
    fn current(&self) -> (NodeId, usize) {
        self.stack[self.stack.len() - 1]
    }

    pub fn node(&self) -> Node<'tree> {
        Node {
            tree: self.tree,
            id: self.current().0,
        }
    }

    pub fn field_name(&self) -> Option<&'static str> {
        if self.stack.len() < 2 {
            return None;
        }
        self.node().field_name()
    }

    /// Depth relative to where the cursor started.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    pub fn goto_first_child(&mut self) -> bool {
        let tree = self.tree;
        match tree.data(self.current().0).children.first() {
            Some(&child) => {
                self.stack.push((child, 0));
                true
            }
            None => false,
        }
    }

    pub fn goto_next_sibling(&mut self) -> bool {
        if self.stack.len() < 2 {
            return false;
        }
        let (_, index) = self.current();
        let parent = self.stack[self.stack.len() - 2].0;
        let tree = self.tree;
        match tree.data(parent).children.get(index + 1) {
            Some(&sibling) => {
                let last = self.stack.len() - 1;
                self.stack[last] = (sibling, index + 1);
                true
            }
            None => false,
        }
    }

    pub fn goto_parent(&mut self) -> bool {
        if self.stack.len() < 2 {
            return false;
        }
        self.stack.pop();
        true
    }

    /// Move to the first child that ends after `offset`; return its index.
    pub fn goto_first_child_for_byte(&mut self, offset: usize) -> Option<usize> {
        let tree = self.tree;
        let children = &tree.data(self.current().0).children;
        let index = children.iter().position(|&c| tree.data(c).span.end > offset)?;
        self.stack.push((children[index], index));
        Some(index)
    }

    pub fn reset(&mut self, node: Node<'tree>) {
        self.tree = node.tree;
        self.stack.clear();
        self.stack.push((node.id, 0));
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;

    #[test]
    fn test_node_navigation() {
        let tree = crate::parse("let a = 1;\nbreak;");
        let root = tree.root_node();
        assert_eq!(root.kind(), "program");
        assert_eq!(root.child_count(), 2);

        let decl = root.child(0).unwrap();
        assert_eq!(decl.kind(), "variable_declaration");
        assert_eq!(decl.child_by_field_name("name").unwrap().text(), "a");
        assert_eq!(decl.child_by_field_name("kind").unwrap().kind(), "let");
        assert_eq!(decl.next_sibling().unwrap().kind(), "break_statement");
        assert_eq!(decl.next_sibling().unwrap().prev_sibling(), Some(decl));
        assert_eq!(decl.parent(), Some(root));

        let brk = root.child(1).unwrap();
        assert_eq!(brk.start_position().row, 1);
        assert_eq!(brk.start_position().column, 0);
        assert_eq!(brk.end_position().column, 6);
    }

    #[test]
    fn test_descendant_for_byte_range() {
        let tree = parse("const answer = 42;");
        let root = tree.root_node();
        let node = root.named_descendant_for_byte_range(15, 17).unwrap();
        assert_eq!(node.kind(), "number");
        let node = root.descendant_for_byte_range(6, 8).unwrap();
        assert_eq!(node.kind(), "identifier");
        assert!(root.descendant_for_byte_range(0, 100).is_none());
    }

    #[test]
    fn test_cursor_walks_every_node() {
        let tree = parse("f(a, b);");
        let mut cursor = tree.walk();
        let mut visited = 0;
        'walk: loop {
            visited += 1;
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    continue 'walk;
                }
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }
        assert_eq!(visited, tree.node_count());
    }

    #[test]
    fn test_named_children_skip_tokens() {
        let tree = parse("f(a, b);");
        let call = tree.root_node().child(0).unwrap().child(0).unwrap();
        assert_eq!(call.kind(), "call_expression");
        let args = call.child_by_field_name("arguments").unwrap();
        assert_eq!(args.child_count(), 5);
        assert_eq!(args.named_child_count(), 2);
        assert_eq!(args.named_child(1).unwrap().text(), "b");
    }
}
