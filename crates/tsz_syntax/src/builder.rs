//! Arena builder used by the parser to assemble a [`Tree`].
//!
//! Nodes are appended bottom-up while parsing. [`TreeBuilder::finish`] attaches comments, drops nodes that were
//! abandoned by error recovery, renumbers the rest in preorder, and computes parents, points, and error flags.

use crate::diagnostics::SyntaxError;
use crate::language::{FieldId, Language, NodeKind, Symbol};
use crate::span::{LineIndex, Span};
use crate::tree::{NodeData, NodeId, Tree};

/// A child reference plus the field it fills in its parent.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Child {
    pub(crate) id: NodeId,
    pub(crate) field: Option<FieldId>,
}

impl Child {
    pub(crate) fn field(id: NodeId, field: FieldId) -> Self {
        Self { id, field: Some(field) }
    }
}

impl From<NodeId> for Child {
    fn from(id: NodeId) -> Self {
        Self { id, field: None }
    }
}

#[derive(Debug, Default)]
pub(crate) struct TreeBuilder {
    nodes: Vec<NodeData>,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Mark for [`TreeBuilder::truncate`].
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Drop every node created after `mark`. Only valid when none of them is referenced by an older node.
    pub(crate) fn truncate(&mut self, mark: usize) {
        self.nodes.truncate(mark);
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(data);
        id
    }

    pub(crate) fn leaf(&mut self, symbol: Symbol, span: Span) -> NodeId {
        self.push(NodeData::new(symbol, span))
    }

    /// Zero-width node standing in for a required token that was not found.
    pub(crate) fn missing(&mut self, symbol: Symbol, offset: usize) -> NodeId {
        let mut data = NodeData::new(symbol, Span::empty(offset));
        data.missing = true;
        self.push(data)
    }

    pub(crate) fn extra(&mut self, symbol: Symbol, span: Span) -> NodeId {
        let mut data = NodeData::new(symbol, span);
        data.extra = true;
        self.push(data)
    }

    /// Create an interior node spanning its children. `children` must not be empty.
    pub(crate) fn node(&mut self, kind: NodeKind, children: Vec<Child>) -> NodeId {
        let span = children
            .iter()
            .map(|c| self.nodes[c.id.index()].span)
            .reduce(Span::merge)
            .unwrap_or_default();
        self.node_with_span(kind, span, children)
    }

    pub(crate) fn node_with_span(&mut self, kind: NodeKind, span: Span, children: Vec<Child>) -> NodeId {
        let mut ids = Vec::with_capacity(children.len());
        for child in children {
            self.nodes[child.id.index()].field = child.field;
            ids.push(child.id);
        }
        let mut data = NodeData::new(Symbol::Named(kind), span);
        data.children = ids;
        self.push(data)
    }

    pub(crate) fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    pub(crate) fn symbol(&self, id: NodeId) -> Symbol {
        self.nodes[id.index()].symbol
    }

    pub(crate) fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.symbol(id).node_kind()
    }

    pub(crate) fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Insert an extra into the deepest node that encloses it, keeping children in source order.
    fn attach_extra(&mut self, root: NodeId, extra: NodeId) {
        let span = self.nodes[extra.index()].span;
        let mut current = root;
        loop {
            let next = self.nodes[current.index()].children.iter().copied().find(|&c| {
                let child = &self.nodes[c.index()];
                !child.children.is_empty() && child.span.contains(span) && child.span != span
            });
            match next {
                Some(child) => current = child,
                None => break,
            }
        }
        let children = &self.nodes[current.index()].children;
        let at = children
            .iter()
            .position(|&c| self.nodes[c.index()].span.start >= span.end && !self.nodes[c.index()].missing)
            .unwrap_or(children.len());
        self.nodes[current.index()].children.insert(at, extra);
    }

    pub(crate) fn finish(
        mut self,
        root: NodeId,
        extras: Vec<NodeId>,
        source: String,
        errors: Vec<SyntaxError>,
        language: Language,
    ) -> Tree {
        for extra in extras {
            self.attach_extra(root, extra);
        }

        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.index()].children.iter().rev().copied());
        }

        let mut remap = vec![u32::MAX; self.nodes.len()];
        for (new, old) in order.iter().enumerate() {
            remap[old.index()] = new as u32;
        }

        let lines = LineIndex::new(&source);
        let mut nodes: Vec<NodeData> = order
            .iter()
            .map(|old| {
                let old = &self.nodes[old.index()];
                NodeData {
                    children: old.children.iter().map(|c| NodeId(remap[c.index()])).collect(),
                    parent: None,
                    has_error: old.missing || old.symbol == Symbol::Named(NodeKind::Error),
                    start_point: lines.point(old.span.start),
                    end_point: lines.point(old.span.end),
                    ..old.clone()
                }
            })
            .collect();

        for i in 0..nodes.len() {
            for j in 0..nodes[i].children.len() {
                let child = nodes[i].children[j];
                nodes[child.index()].parent = Some(NodeId(i as u32));
            }
        }
        // Preorder puts children after parents, so a reverse sweep sees every child first.
        for i in (0..nodes.len()).rev() {
            if nodes[i].has_error {
                if let Some(parent) = nodes[i].parent {
                    nodes[parent.index()].has_error = true;
                }
            }
        }

        Tree::from_parts(source, nodes, errors, language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LANGUAGE;
    use tsz_core::lang::punctuation::PunctuationId;

    #[test]
    fn test_finish_drops_orphans_and_attaches_comments() {
        let source = "a /* c */ ;";
        let mut b = TreeBuilder::new();
        let _orphan = b.leaf(Symbol::Named(NodeKind::Number), Span::new(0, 1));
        let ident = b.leaf(Symbol::Named(NodeKind::Identifier), Span::new(0, 1));
        let semi = b.leaf(Symbol::Punctuation(PunctuationId::Semicolon), Span::new(10, 11));
        let comment = b.extra(Symbol::Named(NodeKind::Comment), Span::new(2, 9));
        let root = b.node_with_span(
            NodeKind::Program,
            Span::new(0, source.len()),
            vec![ident.into(), semi.into()],
        );
        let tree = b.finish(root, vec![comment], source.to_string(), Vec::new(), LANGUAGE);

        assert_eq!(tree.node_count(), 4);
        let kinds: Vec<_> = tree.root_node().children().map(|n| n.kind()).collect();
        assert_eq!(kinds, ["identifier", "comment", ";"]);
        assert!(tree.root_node().child(1).unwrap().is_extra());
    }

    #[test]
    fn test_missing_marks_ancestors() {
        let mut b = TreeBuilder::new();
        let ident = b.leaf(Symbol::Named(NodeKind::Identifier), Span::new(0, 1));
        let semi = b.missing(Symbol::Punctuation(PunctuationId::Semicolon), 1);
        let inner = b.node(NodeKind::BreakStatement, vec![ident.into(), semi.into()]);
        let root = b.node_with_span(NodeKind::Program, Span::new(0, 1), vec![inner.into()]);
        let tree = b.finish(root, Vec::new(), "x".to_string(), Vec::new(), LANGUAGE);

        assert!(tree.root_node().has_error());
        let stmt = tree.root_node().child(0).unwrap();
        assert!(stmt.has_error());
        assert!(stmt.child(1).unwrap().is_missing());
        assert!(!stmt.child(0).unwrap().has_error());
    }
}
