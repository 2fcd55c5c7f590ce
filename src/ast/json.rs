//! External form of the tree: one JSON record per node, holding its `type`
//! tag, its `token` in textual form (or `null`) and its named children in
//! declaration order.

use serde_json::{json, Map, Value};

use super::{
    ast::Ast,
    node::{Fixity, NodeId, NodeKind},
    types::TypeExpr,
};

impl Ast {
    /// The whole tree from its root, or `null` before a root is set.
    pub fn to_json(&self) -> Value {
        match self.root() {
            Some(root) => self.node_to_json(root),
            None => Value::Null,
        }
    }

    /// The subtree under `id`.
    ///
    /// Recurses once per nesting level, so a chain of many thousands of
    /// equal-rank operators needs a correspondingly deep stack.
    pub fn node_to_json(&self, id: NodeId) -> Value {
        let node = self.get(id);
        let mut record = Map::new();
        record.insert(String::from("type"), json!(node.kind.tag()));
        record.insert(
            String::from("token"),
            node.token
                .as_ref()
                .map_or(Value::Null, |token| json!(token.to_string())),
        );

        let one = |id: &NodeId| self.node_to_json(*id);
        let many = |ids: &[NodeId]| Value::Array(ids.iter().map(one).collect());
        let maybe = |id: &Option<NodeId>| id.as_ref().map_or(Value::Null, one);

        let fields: Vec<(&str, Value)> = match &node.kind {
            NodeKind::NoOp
            | NodeKind::Pass
            | NodeKind::Continue
            | NodeKind::Break
            | NodeKind::Var
            | NodeKind::IntLiteral
            | NodeKind::RealLiteral
            | NodeKind::StringLiteral
            | NodeKind::BooleanLiteral
            | NodeKind::NullLiteral => vec![],
            NodeKind::Block { statements } => vec![("statements", many(statements))],
            NodeKind::Assignment { var, value, cast } => vec![
                ("var", one(var)),
                ("value", one(value)),
                ("cast", json!(cast)),
            ],
            NodeKind::Declare {
                modifiers,
                var,
                types,
            } => vec![
                (
                    "modifiers",
                    Value::Array(modifiers.iter().map(|m| json!(m.to_string())).collect()),
                ),
                ("var", one(var)),
                ("types", type_list(types)),
            ],
            NodeKind::Return { value } | NodeKind::Defer { value } => {
                vec![("expression", one(value))]
            }
            NodeKind::UnaryOp { operand, fixity } => vec![
                ("operand", one(operand)),
                (
                    "meta",
                    json!(match fixity {
                        Fixity::Prefix => "PREFIX",
                        Fixity::Postfix => "POSTFIX",
                    }),
                ),
            ],
            NodeKind::BinaryOp { left, right } => {
                vec![("left", one(left)), ("right", one(right))]
            }
            NodeKind::TernaryOp {
                left,
                center,
                right,
            } => vec![
                ("left", one(left)),
                ("center", one(center)),
                ("right", one(right)),
            ],
            NodeKind::Index { target, index } => {
                vec![("target", one(target)), ("index", one(index))]
            }
            NodeKind::Slice {
                target,
                start,
                stop,
                step,
            } => vec![
                ("target", one(target)),
                ("start", one(start)),
                ("stop", one(stop)),
                ("step", maybe(step)),
            ],
            NodeKind::Get {
                target,
                property,
                opt_chain,
            } => vec![
                ("target", one(target)),
                ("property", one(property)),
                ("optChain", json!(opt_chain)),
            ],
            NodeKind::Call { target, args } => {
                vec![("target", one(target)), ("args", many(args))]
            }
            NodeKind::Func { params, body } => {
                vec![("params", many(params)), ("body", one(body))]
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
            } => vec![
                ("supers", many(supers)),
                ("interfaces", many(interfaces)),
                ("body", one(body)),
            ],
            NodeKind::Interface { supers, body } => {
                vec![("supers", many(supers)), ("body", one(body))]
            }
            NodeKind::Enum {
                supers,
                interfaces,
                instances,
                body,
            } => vec![
                ("supers", many(supers)),
                ("interfaces", many(interfaces)),
                ("instances", many(instances)),
                ("body", one(body)),
            ],
            NodeKind::If {
                branches,
                otherwise,
            } => vec![("blocks", many(branches)), ("elseBlock", maybe(otherwise))],
            NodeKind::IfBlock { condition, body } => {
                vec![("condition", one(condition)), ("body", one(body))]
            }
            NodeKind::Loop {
                init,
                conditions,
                steps,
                body,
                otherwise,
            } => vec![
                ("init", many(init)),
                ("conditions", many(conditions)),
                ("steps", many(steps)),
                ("body", one(body)),
                ("elseBlock", maybe(otherwise)),
            ],
            NodeKind::Switch {
                subject,
                cases,
                otherwise,
            } => vec![
                ("subject", one(subject)),
                ("cases", many(cases)),
                ("elseBlock", maybe(otherwise)),
            ],
            NodeKind::Case { value, body } => {
                vec![("value", maybe(value)), ("body", one(body))]
            }
            NodeKind::Try {
                body,
                catches,
                otherwise,
            } => vec![
                ("body", one(body)),
                ("catches", many(catches)),
                ("elseBlock", maybe(otherwise)),
            ],
            NodeKind::Catch { declaration, body } => {
                vec![("declaration", one(declaration)), ("body", one(body))]
            }
            NodeKind::ArrayList { items }
            | NodeKind::LinkedList { items }
            | NodeKind::Set { items } => vec![("items", many(items))],
            NodeKind::ObjectMap { entries } | NodeKind::ValueMap { entries } => vec![(
                "entries",
                Value::Array(
                    entries
                        .iter()
                        .map(|(key, value)| json!({ "key": one(key), "value": one(value) }))
                        .collect(),
                ),
            )],
            NodeKind::UndirectedGraph { nodes, edges }
            | NodeKind::DirectedGraph { nodes, edges } => {
                vec![("nodes", many(nodes)), ("edges", many(edges))]
            }
            NodeKind::Edge { left, right } => vec![("left", one(left)), ("right", one(right))],
            NodeKind::DirectedEdge {
                left,
                right,
                double_edge,
            } => vec![
                ("left", one(left)),
                ("right", one(right)),
                ("doubleEdge", json!(double_edge)),
            ],
            NodeKind::ArrayListRange { start, stop, step }
            | NodeKind::LinkedListRange { start, stop, step } => vec![
                ("start", one(start)),
                ("stop", one(stop)),
                ("step", maybe(step)),
            ],
        };

        for (name, value) in fields {
            record.insert(String::from(name), value);
        }
        Value::Object(record)
    }
}

fn type_list(types: &[TypeExpr]) -> Value {
    Value::Array(types.iter().map(type_to_json).collect())
}

fn type_to_json(type_expr: &TypeExpr) -> Value {
    match type_expr.container {
        Some(container) => json!({
            "type": "ContainerType",
            "token": type_expr.token.to_string(),
            "pointer": type_expr.is_pointer,
            "container": container.name(),
            "types": type_list(&type_expr.types),
        }),
        None => json!({
            "type": "Type",
            "token": type_expr.token.to_string(),
            "pointer": type_expr.is_pointer,
        }),
    }
}
