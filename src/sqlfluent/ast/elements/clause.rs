//! Clause Nodes
//!
//!     A select statement is made of up to three clauses, always in this order:
//!
//!         SELECT <identifier> (, <identifier>)*
//!         FROM <identifier>
//!         WHERE <expression>                      (optional)
//!
//!     Clause nodes keep only what the clause says. Keywords and commas are gone, but the
//!     clause location still spans them.

use super::super::range::{Position, Range};
use super::super::traits::AstNode;
use super::expression::Expression;
use serde::Serialize;
use std::fmt;

fn default_location() -> Range {
    Range::new(0..0, Position::new(0, 0), Position::new(0, 0))
}

/// Projected columns, in source order. Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectClause {
    pub columns: Vec<String>,
    pub location: Range,
}

impl SelectClause {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            location: default_location(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }
}

impl AstNode for SelectClause {
    fn node_type(&self) -> &'static str {
        "SelectClause"
    }

    fn display_label(&self) -> String {
        self.columns.join(", ")
    }

    fn range(&self) -> &Range {
        &self.location
    }
}

impl fmt::Display for SelectClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SelectClause({} columns)", self.columns.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FromClause {
    pub table: String,
    pub location: Range,
}

impl FromClause {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            location: default_location(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }
}

impl AstNode for FromClause {
    fn node_type(&self) -> &'static str {
        "FromClause"
    }

    fn display_label(&self) -> String {
        self.table.clone()
    }

    fn range(&self) -> &Range {
        &self.location
    }
}

impl fmt::Display for FromClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FromClause('{}')", self.table)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhereClause {
    pub condition: Expression,
    pub location: Range,
}

impl WhereClause {
    pub fn new(condition: Expression) -> Self {
        Self {
            condition,
            location: default_location(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }
}

impl AstNode for WhereClause {
    fn node_type(&self) -> &'static str {
        "WhereClause"
    }

    fn display_label(&self) -> String {
        self.condition.condition()
    }

    fn range(&self) -> &Range {
        &self.location
    }
}

impl fmt::Display for WhereClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WhereClause('{}')", self.condition.condition())
    }
}
