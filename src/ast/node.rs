//! Syntax node variants.
//!
//! Children are referenced by [`NodeId`] into the owning [`Ast`](super::ast::Ast);
//! the arena keeps every child's `parent` field pointing back at the node
//! whose slot holds it.

use serde::Serialize;

use crate::lexer::tokens::Token;

use super::types::TypeExpr;

/// Stable index of a node inside its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixity {
    Prefix,
    Postfix,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Block {
        statements: Vec<NodeId>,
    },
    Assignment {
        var: NodeId,
        value: NodeId,
        cast: bool,
    },
    Declare {
        modifiers: Vec<Token>,
        var: NodeId,
        types: Vec<TypeExpr>,
    },
    NoOp,
    Pass,
    Continue,
    Break,
    Return {
        value: NodeId,
    },
    Defer {
        value: NodeId,
    },

    Var,
    IntLiteral,
    RealLiteral,
    StringLiteral,
    BooleanLiteral,
    NullLiteral,

    UnaryOp {
        operand: NodeId,
        fixity: Fixity,
    },
    BinaryOp {
        left: NodeId,
        right: NodeId,
    },
    TernaryOp {
        left: NodeId,
        center: NodeId,
        right: NodeId,
    },
    Index {
        target: NodeId,
        index: NodeId,
    },
    Slice {
        target: NodeId,
        start: NodeId,
        stop: NodeId,
        step: Option<NodeId>,
    },
    Get {
        target: NodeId,
        property: NodeId,
        opt_chain: bool,
    },
    Call {
        target: NodeId,
        args: Vec<NodeId>,
    },

    Func {
        params: Vec<NodeId>,
        body: NodeId,
    },
    Class {
        supers: Vec<NodeId>,
        interfaces: Vec<NodeId>,
        body: NodeId,
    },
    Struct {
        supers: Vec<NodeId>,
        interfaces: Vec<NodeId>,
        body: NodeId,
    },
    Interface {
        supers: Vec<NodeId>,
        body: NodeId,
    },
    Enum {
        supers: Vec<NodeId>,
        interfaces: Vec<NodeId>,
        instances: Vec<NodeId>,
        body: NodeId,
    },

    If {
        branches: Vec<NodeId>,
        otherwise: Option<NodeId>,
    },
    IfBlock {
        condition: NodeId,
        body: NodeId,
    },
    Loop {
        init: Vec<NodeId>,
        conditions: Vec<NodeId>,
        steps: Vec<NodeId>,
        body: NodeId,
        otherwise: Option<NodeId>,
    },
    Switch {
        subject: NodeId,
        cases: Vec<NodeId>,
        otherwise: Option<NodeId>,
    },
    /// `value` is `None` for the `default` arm.
    Case {
        value: Option<NodeId>,
        body: NodeId,
    },
    Try {
        body: NodeId,
        catches: Vec<NodeId>,
        otherwise: Option<NodeId>,
    },
    Catch {
        declaration: NodeId,
        body: NodeId,
    },

    ArrayList {
        items: Vec<NodeId>,
    },
    LinkedList {
        items: Vec<NodeId>,
    },
    Set {
        items: Vec<NodeId>,
    },
    ObjectMap {
        entries: Vec<(NodeId, NodeId)>,
    },
    ValueMap {
        entries: Vec<(NodeId, NodeId)>,
    },
    UndirectedGraph {
        nodes: Vec<NodeId>,
        edges: Vec<NodeId>,
    },
    DirectedGraph {
        nodes: Vec<NodeId>,
        edges: Vec<NodeId>,
    },
    Edge {
        left: NodeId,
        right: NodeId,
    },
    DirectedEdge {
        left: NodeId,
        right: NodeId,
        double_edge: bool,
    },
    ArrayListRange {
        start: NodeId,
        stop: NodeId,
        step: Option<NodeId>,
    },
    LinkedListRange {
        start: NodeId,
        stop: NodeId,
        step: Option<NodeId>,
    },
}

impl NodeKind {
    /// Discriminator used in the external form.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Block { .. } => "Block",
            NodeKind::Assignment { .. } => "Assignment",
            NodeKind::Declare { .. } => "Declare",
            NodeKind::NoOp => "NoOp",
            NodeKind::Pass => "Pass",
            NodeKind::Continue => "Continue",
            NodeKind::Break => "Break",
            NodeKind::Return { .. } => "Return",
            NodeKind::Defer { .. } => "Defer",
            NodeKind::Var => "Var",
            NodeKind::IntLiteral => "IntLiteral",
            NodeKind::RealLiteral => "RealLiteral",
            NodeKind::StringLiteral => "StringLiteral",
            NodeKind::BooleanLiteral => "BooleanLiteral",
            NodeKind::NullLiteral => "NullLiteral",
            NodeKind::UnaryOp { .. } => "UnaryOp",
            NodeKind::BinaryOp { .. } => "BinaryOp",
            NodeKind::TernaryOp { .. } => "TernaryOp",
            NodeKind::Index { .. } => "Index",
            NodeKind::Slice { .. } => "Slice",
            NodeKind::Get { .. } => "Get",
            NodeKind::Call { .. } => "Call",
            NodeKind::Func { .. } => "Func",
            NodeKind::Class { .. } => "Class",
            NodeKind::Struct { .. } => "Struct",
            NodeKind::Interface { .. } => "Interface",
            NodeKind::Enum { .. } => "Enum",
            NodeKind::If { .. } => "If",
            NodeKind::IfBlock { .. } => "IfBlock",
            NodeKind::Loop { .. } => "Loop",
            NodeKind::Switch { .. } => "Switch",
            NodeKind::Case { .. } => "Case",
            NodeKind::Try { .. } => "Try",
            NodeKind::Catch { .. } => "Catch",
            NodeKind::ArrayList { .. } => "ArrayList",
            NodeKind::LinkedList { .. } => "LinkedList",
            NodeKind::Set { .. } => "Set",
            NodeKind::ObjectMap { .. } => "ObjectMap",
            NodeKind::ValueMap { .. } => "ValueMap",
            NodeKind::UndirectedGraph { .. } => "UndirectedGraph",
            NodeKind::DirectedGraph { .. } => "DirectedGraph",
            NodeKind::Edge { .. } => "Edge",
            NodeKind::DirectedEdge { .. } => "DirectedEdge",
            NodeKind::ArrayListRange { .. } => "ArrayListRange",
            NodeKind::LinkedListRange { .. } => "LinkedListRange",
        }
    }

    /// Child ids in field order.
    pub fn children(&self) -> Vec<NodeId> {
        let mut children = vec![];
        match self {
            NodeKind::NoOp
            | NodeKind::Pass
            | NodeKind::Continue
            | NodeKind::Break
            | NodeKind::Var
            | NodeKind::IntLiteral
            | NodeKind::RealLiteral
            | NodeKind::StringLiteral
            | NodeKind::BooleanLiteral
            | NodeKind::NullLiteral => {}
            NodeKind::Block { statements } => children.extend(statements),
            NodeKind::Assignment { var, value, .. } => children.extend([*var, *value]),
            NodeKind::Declare { var, .. } => children.push(*var),
            NodeKind::Return { value } | NodeKind::Defer { value } => children.push(*value),
            NodeKind::UnaryOp { operand, .. } => children.push(*operand),
            NodeKind::BinaryOp { left, right }
            | NodeKind::Edge { left, right }
            | NodeKind::DirectedEdge { left, right, .. } => children.extend([*left, *right]),
            NodeKind::TernaryOp {
                left,
                center,
                right,
            } => children.extend([*left, *center, *right]),
            NodeKind::Index { target, index } => children.extend([*target, *index]),
            NodeKind::Slice {
                target,
                start,
                stop,
                step,
            } => {
                children.extend([*target, *start, *stop]);
                children.extend(step);
            }
            NodeKind::Get {
                target, property, ..
            } => children.extend([*target, *property]),
            NodeKind::Call { target, args } => {
                children.push(*target);
                children.extend(args);
            }
            NodeKind::Func { params, body } => {
                children.extend(params);
                children.push(*body);
            }
            NodeKind::Class {
                supers,
                interfaces,
                body,
            }
            | NodeKind::Struct {
                supers,
                interfaces,
                body,
            } => {
                children.extend(supers);
                children.extend(interfaces);
                children.push(*body);
            }
            NodeKind::Interface { supers, body } => {
                children.extend(supers);
                children.push(*body);
            }
            NodeKind::Enum {
                supers,
                interfaces,
                instances,
                body,
            } => {
                children.extend(supers);
                children.extend(interfaces);
                children.extend(instances);
                children.push(*body);
            }
            NodeKind::If {
                branches,
                otherwise,
            } => {
                children.extend(branches);
                children.extend(otherwise);
            }
            NodeKind::IfBlock { condition, body } => children.extend([*condition, *body]),
            NodeKind::Loop {
                init,
                conditions,
                steps,
                body,
                otherwise,
            } => {
                children.extend(init);
                children.extend(conditions);
                children.extend(steps);
                children.push(*body);
                children.extend(otherwise);
            }
            NodeKind::Switch {
                subject,
                cases,
                otherwise,
            } => {
                children.push(*subject);
                children.extend(cases);
                children.extend(otherwise);
            }
            NodeKind::Case { value, body } => {
                children.extend(value);
                children.push(*body);
            }
            NodeKind::Try {
                body,
                catches,
                otherwise,
            } => {
                children.push(*body);
                children.extend(catches);
                children.extend(otherwise);
            }
            NodeKind::Catch { declaration, body } => children.extend([*declaration, *body]),
            NodeKind::ArrayList { items }
            | NodeKind::LinkedList { items }
            | NodeKind::Set { items } => children.extend(items),
            NodeKind::ObjectMap { entries } | NodeKind::ValueMap { entries } => {
                for (key, value) in entries {
                    children.extend([*key, *value]);
                }
            }
            NodeKind::UndirectedGraph { nodes, edges }
            | NodeKind::DirectedGraph { nodes, edges } => {
                children.extend(nodes);
                children.extend(edges);
            }
            NodeKind::ArrayListRange { start, stop, step }
            | NodeKind::LinkedListRange { start, stop, step } => {
                children.extend([*start, *stop]);
                children.extend(step);
            }
        }
        children
    }

    /// Replaces every slot holding `old` with `new`. Returns whether any
    /// slot matched.
    pub fn replace_child(&mut self, old: NodeId, new: NodeId) -> bool {
        let mut replaced = false;
        let mut swap = |slot: &mut NodeId| {
            if *slot == old {
                *slot = new;
                replaced = true;
            }
        };

        match self {
            NodeKind::NoOp
            | NodeKind::Pass
            | NodeKind::Continue
            | NodeKind::Break
            | NodeKind::Var
            | NodeKind::IntLiteral
            | NodeKind::RealLiteral
            | NodeKind::StringLiteral
            | NodeKind::BooleanLiteral
            | NodeKind::NullLiteral => {}
            NodeKind::Block { statements } => statements.iter_mut().for_each(swap),
            NodeKind::Assignment { var, value, .. } => {
                swap(var);
                swap(value);
            }
            NodeKind::Declare { var, .. } => swap(var),
            NodeKind::Return { value } | NodeKind::Defer { value } => swap(value),
            NodeKind::UnaryOp { operand, .. } => swap(operand),
            NodeKind::BinaryOp { left, right }
            | NodeKind::Edge { left, right }
            | NodeKind::DirectedEdge { left, right, .. } => {
                swap(left);
                swap(right);
            }
            NodeKind::TernaryOp {
                left,
                center,
                right,
            } => {
                swap(left);
                swap(center);
                swap(right);
            }
            NodeKind::Index { target, index } => {
                swap(target);
                swap(index);
            }
            NodeKind::Slice {
                target,
                start,
                stop,
                step,
            } => {
                swap(target);
                swap(start);
                swap(stop);
                step.iter_mut().for_each(swap);
            }
            NodeKind::Get {
                target, property, ..
            } => {
                swap(target);
                swap(property);
            }
            NodeKind::Call { target, args } => {
                swap(target);
                args.iter_mut().for_each(swap);
            }
            NodeKind::Func { params, body } => {
                params.iter_mut().for_each(&mut swap);
                swap(body);
            }
            NodeKind::Class {
                supers,
                interfaces,
                body,
            }
            | NodeKind::Struct {
                supers,
                interfaces,
                body,
            } => {
                supers.iter_mut().for_each(&mut swap);
                interfaces.iter_mut().for_each(&mut swap);
                swap(body);
            }
            NodeKind::Interface { supers, body } => {
                supers.iter_mut().for_each(&mut swap);
                swap(body);
            }
            NodeKind::Enum {
                supers,
                interfaces,
                instances,
                body,
            } => {
                supers.iter_mut().for_each(&mut swap);
                interfaces.iter_mut().for_each(&mut swap);
                instances.iter_mut().for_each(&mut swap);
                swap(body);
            }
            NodeKind::If {
                branches,
                otherwise,
            } => {
                branches.iter_mut().for_each(&mut swap);
                otherwise.iter_mut().for_each(swap);
            }
            NodeKind::IfBlock { condition, body } => {
                swap(condition);
                swap(body);
            }
            NodeKind::Loop {
                init,
                conditions,
                steps,
                body,
                otherwise,
            } => {
                init.iter_mut().for_each(&mut swap);
                conditions.iter_mut().for_each(&mut swap);
                steps.iter_mut().for_each(&mut swap);
                swap(body);
                otherwise.iter_mut().for_each(swap);
            }
            NodeKind::Switch {
                subject,
                cases,
                otherwise,
            } => {
                swap(subject);
                cases.iter_mut().for_each(&mut swap);
                otherwise.iter_mut().for_each(swap);
            }
            NodeKind::Case { value, body } => {
                value.iter_mut().for_each(&mut swap);
                swap(body);
            }
            NodeKind::Try {
                body,
                catches,
                otherwise,
            } => {
                swap(body);
                catches.iter_mut().for_each(&mut swap);
                otherwise.iter_mut().for_each(swap);
            }
            NodeKind::Catch { declaration, body } => {
                swap(declaration);
                swap(body);
            }
            NodeKind::ArrayList { items }
            | NodeKind::LinkedList { items }
            | NodeKind::Set { items } => items.iter_mut().for_each(swap),
            NodeKind::ObjectMap { entries } | NodeKind::ValueMap { entries } => {
                for (key, value) in entries.iter_mut() {
                    swap(key);
                    swap(value);
                }
            }
            NodeKind::UndirectedGraph { nodes, edges }
            | NodeKind::DirectedGraph { nodes, edges } => {
                nodes.iter_mut().for_each(&mut swap);
                edges.iter_mut().for_each(swap);
            }
            NodeKind::ArrayListRange { start, stop, step }
            | NodeKind::LinkedListRange { start, stop, step } => {
                swap(start);
                swap(stop);
                step.iter_mut().for_each(swap);
            }
        }

        replaced
    }
}
