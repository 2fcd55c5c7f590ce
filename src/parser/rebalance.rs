//! Precedence rebalancing of expression weaves.
//!
//! The expression parser chains every binary operator leftward as it scans,
//! so `a + b * c` first comes out as `MULTIPLY(ADD(a, b), c)`. `rebalance`
//! rewrites such a chain in place into its precedence-correct shape by
//! rotating operator nodes, never by re-parsing.
//!
//! The weave's left spine is unwound into a list and its operators are
//! re-inserted innermost first. The right spine of the tree built so far is
//! kept on an explicit stack, ordered from the root down, and its ranks
//! strictly tighten going down. Inserting `op`:
//!
//! - pops every spine operator that binds as tight as `op` or tighter
//!   (including equal rank, which yields left associativity);
//! - takes whatever hung in the vacated slot as its left operand;
//! - hangs itself in that slot and is pushed onto the spine.
//!
//! Each operator is pushed and popped at most once, so the pass is linear in
//! the number of operators and never recurses.
//!
//! Frozen nodes (completed sub-expressions such as parenthesised groups and
//! ternary branches) and non-operator terms are leaves. Every step goes
//! through the arena's rewiring methods, so parent links stay consistent.

use tracing::debug;

use crate::ast::{
    ast::Ast,
    node::{NodeId, NodeKind},
};

fn rank(ast: &Ast, id: NodeId) -> Option<u8> {
    match ast.kind(id) {
        NodeKind::BinaryOp { .. } | NodeKind::TernaryOp { .. } => {
            ast.token(id).and_then(|token| token.kind.precedence())
        }
        _ => None,
    }
}

/// An operator that may still be rotated.
fn is_open(ast: &Ast, id: NodeId) -> bool {
    !ast.is_frozen(id) && rank(ast, id).is_some()
}

/// Rebalances the weave rooted at `root` and returns the new root, which
/// takes over `root`'s former place in the tree.
pub fn rebalance(ast: &mut Ast, root: NodeId) -> NodeId {
    let parent = ast.parent(root);
    let was_root = ast.root() == Some(root);

    let new_root = rotate(ast, root);
    if new_root != root {
        match parent {
            Some(parent) => {
                ast.replace_child(parent, root, new_root);
            }
            None if was_root => ast.set_root(new_root),
            None => ast.detach(new_root),
        }
    }

    new_root
}

fn rotate(ast: &mut Ast, root: NodeId) -> NodeId {
    let Some(root_rank) = rank(ast, root) else {
        return root;
    };

    // Outermost first.
    let mut chain = vec![(root, root_rank)];
    let mut base = root;
    while let Some(left) = ast.left(base) {
        match rank(ast, left) {
            Some(left_rank) if is_open(ast, left) => {
                chain.push((left, left_rank));
                base = left;
            }
            _ => {
                base = left;
                break;
            }
        }
    }

    let mut top = base;
    let mut spine: Vec<(NodeId, u8)> = vec![];

    for &(op, op_rank) in chain.iter().rev() {
        while spine.last().is_some_and(|&(_, held)| held <= op_rank) {
            spine.pop();
        }

        match spine.last() {
            Some(&(holder, _)) => {
                if let Some(operand) = ast.right(holder) {
                    debug!(
                        outer = %describe(ast, holder),
                        inner = %describe(ast, op),
                        "rotating operator below looser left operand"
                    );
                    ast.set_left(op, operand);
                    ast.set_right(holder, op);
                }
            }
            None => {
                ast.set_left(op, top);
                top = op;
            }
        }

        spine.push((op, op_rank));
    }

    top
}

fn describe(ast: &Ast, id: NodeId) -> String {
    ast.token(id)
        .map_or_else(|| String::from(ast.kind(id).tag()), |token| token.to_string())
}
