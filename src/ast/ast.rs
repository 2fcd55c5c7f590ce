use crate::lexer::tokens::Token;

use super::node::{NodeId, NodeKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    /// The originating token, absent for purely structural nodes.
    pub token: Option<Token>,
    pub parent: Option<NodeId>,
    /// Set once an expression is complete. Frozen nodes are never rotated.
    pub frozen: bool,
}

/// Arena owning every node of one parse.
///
/// Nodes are added bottom-up; `add` points each child's `parent` at the new
/// node, and every rewiring method below updates both directions at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ast {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Ast {
    pub fn new() -> Self {
        Ast::default()
    }

    pub fn add(&mut self, kind: NodeKind, token: Option<Token>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        for child in kind.children() {
            self.nodes[child.0 as usize].parent = Some(id);
        }

        self.nodes.push(Node {
            kind,
            token,
            parent: None,
            frozen: false,
        });
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.get(id).kind
    }

    pub fn token(&self, id: NodeId) -> Option<&Token> {
        self.get(id).token.as_ref()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id).kind.children()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, root: NodeId) {
        self.nodes[root.0 as usize].parent = None;
        self.root = Some(root);
    }

    pub fn is_frozen(&self, id: NodeId) -> bool {
        self.get(id).frozen
    }

    pub fn freeze(&mut self, id: NodeId) {
        self.nodes[id.0 as usize].frozen = true;
    }

    pub fn unfreeze(&mut self, id: NodeId) {
        self.nodes[id.0 as usize].frozen = false;
    }

    /// Left operand of a binary or ternary operator.
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        match self.kind(id) {
            NodeKind::BinaryOp { left, .. } | NodeKind::TernaryOp { left, .. } => Some(*left),
            _ => None,
        }
    }

    /// Right operand of a binary or ternary operator.
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        match self.kind(id) {
            NodeKind::BinaryOp { right, .. } | NodeKind::TernaryOp { right, .. } => Some(*right),
            _ => None,
        }
    }

    pub fn set_left(&mut self, id: NodeId, child: NodeId) {
        if let NodeKind::BinaryOp { left, .. } | NodeKind::TernaryOp { left, .. } =
            &mut self.nodes[id.0 as usize].kind
        {
            *left = child;
            self.nodes[child.0 as usize].parent = Some(id);
        }
    }

    pub fn set_right(&mut self, id: NodeId, child: NodeId) {
        if let NodeKind::BinaryOp { right, .. } | NodeKind::TernaryOp { right, .. } =
            &mut self.nodes[id.0 as usize].kind
        {
            *right = child;
            self.nodes[child.0 as usize].parent = Some(id);
        }
    }

    /// Moves `new` into the slot of `parent` that holds `old`.
    pub fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) -> bool {
        let replaced = self.nodes[parent.0 as usize].kind.replace_child(old, new);
        if replaced {
            self.nodes[new.0 as usize].parent = Some(parent);
        }
        replaced
    }

    pub fn detach(&mut self, id: NodeId) {
        self.nodes[id.0 as usize].parent = None;
    }

    /// Puts `new` wherever `old` currently hangs: its parent's slot, the
    /// root, or nowhere for a detached node.
    pub fn reattach(&mut self, old: NodeId, new: NodeId) {
        match self.parent(old) {
            Some(parent) => {
                self.replace_child(parent, old, new);
            }
            None if self.root == Some(old) => self.set_root(new),
            None => self.detach(new),
        }
    }

    /// True when every child's parent points back at its holder.
    pub fn is_consistent(&self) -> bool {
        (0..self.nodes.len()).all(|index| {
            let id = NodeId(index as u32);
            self.children(id)
                .into_iter()
                .all(|child| self.parent(child) == Some(id))
        })
    }
}
