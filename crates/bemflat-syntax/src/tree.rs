//! Arena-based stylesheet tree.
//!
//! The tree stores every node in one vector and uses [`NodeId`] indices for
//! parent/child relationships, which keeps destructive rewrites (detaching,
//! re-parenting, cloning subtrees) free of borrow checker issues.
//!
//! Nodes that are removed stay allocated in the arena, detached. A detached
//! node can be inspected, cloned or re-attached later.

use crate::tokenizer::Span;

/// A type-safe index into the stylesheet tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// An at-rule such as `@block Button { ... }` or `@import "a.css";`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    /// The at-keyword name, without the `@`.
    pub name: String,
    /// Everything between the name and the block (or `;`), trimmed.
    pub params: String,
    /// Whether the at-rule has a `{ ... }` block.
    pub has_body: bool,
}

/// A qualified rule (`selector { ... }`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Raw selector text, trimmed.
    pub selector: String,
}

/// A declaration (`prop: value`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// The property name.
    pub prop: String,
    /// Raw value text, trimmed, including any `!important`.
    pub value: String,
}

/// A `/* ... */` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment text without delimiters and surrounding whitespace.
    pub text: String,
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The stylesheet root.
    Root,
    /// An at-rule.
    AtRule(AtRule),
    /// A qualified rule.
    Rule(Rule),
    /// A declaration.
    Declaration(Declaration),
    /// A comment.
    Comment(Comment),
}

/// Formatting metadata captured by the parser and replayed by the printer.
///
/// Which fields are meaningful depends on the node kind:
///
/// | field        | meaning                                                     |
/// |--------------|-------------------------------------------------------------|
/// | `before`     | whitespace preceding the node                               |
/// | `after`      | whitespace between the last child and `}` (containers)      |
/// | `between`    | selector/params to `{`; `:` and spacing for declarations    |
/// | `after_name` | whitespace between an at-rule's name and its params         |
/// | `semicolon`  | whether the last child of a container ends with `;`         |
/// | `left`       | whitespace after `/*` in a comment                          |
/// | `right`      | whitespace before `*/` in a comment                         |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Raws {
    /// Whitespace preceding the node.
    pub before: String,
    /// Whitespace before the closing `}` of a container, or trailing
    /// whitespace of the root.
    pub after: String,
    /// Text between a selector/params/property and what follows it.
    pub between: String,
    /// Whitespace between an at-rule name and its params.
    pub after_name: String,
    /// Whether the last child declaration ends with a semicolon.
    pub semicolon: bool,
    /// Whitespace after a comment's opening `/*`.
    pub left: String,
    /// Whitespace before a comment's closing `*/`.
    pub right: String,
}

/// A node in the stylesheet tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// What this node is.
    pub kind: NodeKind,
    /// Formatting metadata.
    pub raws: Raws,
    /// Where the node came from in the parsed source, if it was parsed.
    pub source: Option<Span>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// The parent of this node, `None` for the root and detached nodes.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children of this node, in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena-based stylesheet tree with O(1) node access.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// All nodes ever allocated, indexed by `NodeId`.
    /// The root is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl Stylesheet {
    /// Create an empty stylesheet containing only the root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Root,
                raws: Raws::default(),
                source: None,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Get the root node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of allocated nodes, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is allocated on construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new detached node and return its ID.
    pub fn alloc(&mut self, kind: NodeKind, raws: Raws) -> NodeId {
        self.alloc_with_source(kind, raws, None)
    }

    /// Allocate a new detached node that remembers its source range.
    pub fn alloc_with_source(&mut self, kind: NodeKind, raws: Raws, source: Option<Span>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            raws,
            source,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Get the kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.get(id).map(|n| &n.kind)
    }

    /// Get the raws of a node.
    #[must_use]
    pub fn raws(&self, id: NodeId) -> Option<&Raws> {
        self.get(id).map(|n| &n.raws)
    }

    /// Get the raws of a node mutably.
    pub fn raws_mut(&mut self, id: NodeId) -> Option<&mut Raws> {
        self.get_mut(id).map(|n| &mut n.raws)
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Position of a node among its parent's children.
    #[must_use]
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_of(id)?;
        self.children(parent).get(index + 1).copied()
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_of(id)?;
        index
            .checked_sub(1)
            .and_then(|i| self.children(parent).get(i).copied())
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// All descendants of a node in document (pre-)order, excluding the node.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Inserts `child` into `parent` at `index` (clamped to the child count).
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Inserts `node` immediately after `anchor`. Does nothing if `anchor`
    /// is detached.
    pub fn insert_after(&mut self, anchor: NodeId, node: NodeId) {
        let (Some(parent), Some(index)) = (self.parent(anchor), self.index_of(anchor)) else {
            return;
        };
        self.insert_child(parent, index + 1, node);
    }

    /// Inserts `node` immediately before `anchor`. Does nothing if `anchor`
    /// is detached.
    pub fn insert_before(&mut self, anchor: NodeId, node: NodeId) {
        let (Some(parent), Some(index)) = (self.parent(anchor), self.index_of(anchor)) else {
            return;
        };
        self.insert_child(parent, index, node);
    }

    /// Detaches a node (and its subtree) from its parent.
    pub fn remove(&mut self, id: NodeId) {
        self.detach(id);
    }

    /// Puts `replacement` where `old` was and detaches `old`.
    pub fn replace_with(&mut self, old: NodeId, replacement: NodeId) {
        if self.parent(old).is_none() {
            return;
        }
        self.insert_before(old, replacement);
        self.detach(old);
    }

    /// Moves every child of `from` to the end of `to`, preserving order.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        let children = std::mem::take(&mut self.nodes[from.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
            self.append_child(to, child);
        }
    }

    /// Deep-copies a subtree. The copy is detached and keeps the source
    /// ranges of the original nodes.
    pub fn clone_subtree(&mut self, id: NodeId) -> NodeId {
        let node = &self.nodes[id.0];
        let (kind, raws, source) = (node.kind.clone(), node.raws.clone(), node.source);
        let children = node.children.clone();

        let copy = self.alloc_with_source(kind, raws, source);
        for child in children {
            let child_copy = self.clone_subtree(child);
            self.append_child(copy, child_copy);
        }
        copy
    }

    /// Get at-rule data if this node is an at-rule.
    #[must_use]
    pub fn as_at_rule(&self, id: NodeId) -> Option<&AtRule> {
        match self.kind(id)? {
            NodeKind::AtRule(data) => Some(data),
            _ => None,
        }
    }

    /// Get rule data if this node is a qualified rule.
    #[must_use]
    pub fn as_rule(&self, id: NodeId) -> Option<&Rule> {
        match self.kind(id)? {
            NodeKind::Rule(data) => Some(data),
            _ => None,
        }
    }

    /// Get declaration data if this node is a declaration.
    #[must_use]
    pub fn as_declaration(&self, id: NodeId) -> Option<&Declaration> {
        match self.kind(id)? {
            NodeKind::Declaration(data) => Some(data),
            _ => None,
        }
    }

    /// Get mutable declaration data if this node is a declaration.
    pub fn as_declaration_mut(&mut self, id: NodeId) -> Option<&mut Declaration> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Declaration(data) => Some(data),
            _ => None,
        }
    }

    /// Get comment data if this node is a comment.
    #[must_use]
    pub fn as_comment(&self, id: NodeId) -> Option<&Comment> {
        match self.kind(id)? {
            NodeKind::Comment(data) => Some(data),
            _ => None,
        }
    }

    /// Get mutable comment data if this node is a comment.
    pub fn as_comment_mut(&mut self, id: NodeId) -> Option<&mut Comment> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Comment(data) => Some(data),
            _ => None,
        }
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a Stylesheet,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
