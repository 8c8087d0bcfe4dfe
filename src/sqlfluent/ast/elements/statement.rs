//! Select statement node

use super::super::range::{Position, Range};
use super::super::traits::AstNode;
use super::clause::{FromClause, SelectClause, WhereClause};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectStatement {
    pub select_clause: SelectClause,
    pub from_clause: FromClause,
    pub where_clause: Option<WhereClause>,
    pub location: Range,
}

impl SelectStatement {
    fn default_location() -> Range {
        Range::new(0..0, Position::new(0, 0), Position::new(0, 0))
    }

    pub fn new(
        select_clause: SelectClause,
        from_clause: FromClause,
        where_clause: Option<WhereClause>,
    ) -> Self {
        Self {
            select_clause,
            from_clause,
            where_clause,
            location: Self::default_location(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }

    /// The where condition, if any, rendered as `lhs op rhs`
    pub fn conditions(&self) -> Vec<String> {
        self.where_clause
            .iter()
            .map(|clause| clause.condition.condition())
            .collect()
    }
}

impl AstNode for SelectStatement {
    fn node_type(&self) -> &'static str {
        "SelectStatement"
    }

    fn display_label(&self) -> String {
        match &self.where_clause {
            Some(clause) => format!(
                "{} from {} where {}",
                self.select_clause.display_label(),
                self.from_clause.table,
                clause.condition.condition()
            ),
            None => format!(
                "{} from {}",
                self.select_clause.display_label(),
                self.from_clause.table
            ),
        }
    }

    fn range(&self) -> &Range {
        &self.location
    }
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SelectStatement({})", self.display_label())
    }
}
