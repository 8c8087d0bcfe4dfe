//! Node reference
//!
//! `NodeRef` is the tagged union over every AST node kind. It borrows, so any node of a tree
//! can be handed around uniformly without cloning. Stages that treat nodes generically
//! (code generation, snapshots, range checks) match on it exhaustively.

use super::super::range::Range;
use super::super::traits::AstNode;
use super::clause::{FromClause, SelectClause, WhereClause};
use super::expression::Expression;
use super::program::Program;
use super::statement::SelectStatement;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Program(&'a Program),
    SelectStatement(&'a SelectStatement),
    SelectClause(&'a SelectClause),
    FromClause(&'a FromClause),
    WhereClause(&'a WhereClause),
    Expression(&'a Expression),
}

impl<'a> NodeRef<'a> {
    /// Direct children in source order
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        match *self {
            NodeRef::Program(program) => program.lines.iter().map(NodeRef::SelectStatement).collect(),
            NodeRef::SelectStatement(statement) => {
                let mut children = vec![
                    NodeRef::SelectClause(&statement.select_clause),
                    NodeRef::FromClause(&statement.from_clause),
                ];
                if let Some(clause) = &statement.where_clause {
                    children.push(NodeRef::WhereClause(clause));
                }
                children
            }
            NodeRef::WhereClause(clause) => vec![NodeRef::Expression(&clause.condition)],
            NodeRef::SelectClause(_) | NodeRef::FromClause(_) | NodeRef::Expression(_) => {
                Vec::new()
            }
        }
    }

    /// This node and every node below it, depth first
    pub fn descendants(&self) -> Vec<NodeRef<'a>> {
        let mut nodes = vec![*self];
        for child in self.children() {
            nodes.extend(child.descendants());
        }
        nodes
    }
}

impl AstNode for NodeRef<'_> {
    fn node_type(&self) -> &'static str {
        match self {
            NodeRef::Program(n) => n.node_type(),
            NodeRef::SelectStatement(n) => n.node_type(),
            NodeRef::SelectClause(n) => n.node_type(),
            NodeRef::FromClause(n) => n.node_type(),
            NodeRef::WhereClause(n) => n.node_type(),
            NodeRef::Expression(n) => n.node_type(),
        }
    }

    fn display_label(&self) -> String {
        match self {
            NodeRef::Program(n) => n.display_label(),
            NodeRef::SelectStatement(n) => n.display_label(),
            NodeRef::SelectClause(n) => n.display_label(),
            NodeRef::FromClause(n) => n.display_label(),
            NodeRef::WhereClause(n) => n.display_label(),
            NodeRef::Expression(n) => n.display_label(),
        }
    }

    fn range(&self) -> &Range {
        match self {
            NodeRef::Program(n) => n.range(),
            NodeRef::SelectStatement(n) => n.range(),
            NodeRef::SelectClause(n) => n.range(),
            NodeRef::FromClause(n) => n.range(),
            NodeRef::WhereClause(n) => n.range(),
            NodeRef::Expression(n) => n.range(),
        }
    }
}

impl<'a> From<&'a Program> for NodeRef<'a> {
    fn from(program: &'a Program) -> Self {
        NodeRef::Program(program)
    }
}

impl<'a> From<&'a SelectStatement> for NodeRef<'a> {
    fn from(statement: &'a SelectStatement) -> Self {
        NodeRef::SelectStatement(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> Program {
        Program::new(vec![
            SelectStatement::new(
                SelectClause::new(vec!["a".into(), "b".into()]),
                FromClause::new("t"),
                None,
            ),
            SelectStatement::new(
                SelectClause::new(vec!["c".into()]),
                FromClause::new("u"),
                Some(WhereClause::new(Expression::new("c", ">", "1"))),
            ),
        ])
    }

    #[test]
    fn test_children_follow_source_order() {
        let program = program();
        let root = NodeRef::from(&program);
        let types: Vec<&str> = root.children()[1]
            .children()
            .iter()
            .map(|child| child.node_type())
            .collect();
        assert_eq!(types, vec!["SelectClause", "FromClause", "WhereClause"]);
    }

    #[test]
    fn test_descendants() {
        let program = program();
        let types: Vec<&str> = NodeRef::from(&program)
            .descendants()
            .iter()
            .map(|node| node.node_type())
            .collect();
        assert_eq!(
            types,
            vec![
                "Program",
                "SelectStatement",
                "SelectClause",
                "FromClause",
                "SelectStatement",
                "SelectClause",
                "FromClause",
                "WhereClause",
                "Expression",
            ]
        );
    }

    #[test]
    fn test_labels() {
        let program = program();
        let root = NodeRef::from(&program);
        assert_eq!(root.display_label(), "2 statement(s)");
        assert_eq!(root.children()[0].display_label(), "a, b from t");
        assert_eq!(root.children()[1].display_label(), "c from u where c > 1");
    }
}
