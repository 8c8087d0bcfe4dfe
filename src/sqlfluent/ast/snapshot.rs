//! Snapshot building for AST nodes
//!
//! A snapshot is a normalized, owned copy of the tree: node type, label, a few attributes and
//! children. Serializers (tree visualization, JSON) consume snapshots instead of walking the
//! AST themselves.

use serde::Serialize;
use std::collections::BTreeMap;

use super::elements::NodeRef;
use super::traits::AstNode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AstSnapshot {
    /// The type of node (e.g., "Program", "SelectClause")
    pub node_type: String,

    /// The primary label of the node
    pub label: String,

    /// Additional attributes specific to the node type
    pub attributes: BTreeMap<String, String>,

    /// Child nodes in the tree
    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    pub fn new(node_type: String, label: String) -> Self {
        Self {
            node_type,
            label,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<AstSnapshot>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Create a snapshot of a node and all its descendants
pub fn snapshot_node(node: NodeRef<'_>) -> AstSnapshot {
    let base = AstSnapshot::new(node.node_type().to_string(), node.display_label())
        .with_attribute("range", node.range().to_string());

    let base = match node {
        NodeRef::Program(program) => base.with_attribute("lines", program.lines.len().to_string()),
        NodeRef::SelectStatement(statement) => {
            base.with_attribute("has_where", statement.where_clause.is_some().to_string())
        }
        NodeRef::SelectClause(clause) => {
            base.with_attribute("columns", clause.columns.len().to_string())
        }
        NodeRef::FromClause(clause) => base.with_attribute("table", clause.table.as_str()),
        NodeRef::WhereClause(_) => base,
        NodeRef::Expression(expression) => base
            .with_attribute("lhs", expression.lhs.as_str())
            .with_attribute("operator", expression.operator.as_str())
            .with_attribute("rhs", expression.rhs.as_str()),
    };

    let children = node.children().into_iter().map(snapshot_node).collect();
    base.with_children(children)
}
