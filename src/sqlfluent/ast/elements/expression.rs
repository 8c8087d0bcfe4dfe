//! Expression Node
//!
//!     The single binary comparison a where clause can hold. Both operands are kept as their
//!     literal source text, integers included; the operator is `>` or `<`.
//!
//! Syntax
//!
//!     <expression> = <operand> <whitespace>? <operator> <whitespace>? <operand>
//!     <operand>    = <integer> | <identifier>
//!
//!     Examples:
//!         age > 18
//!         i < 0
//!         3 < limit

use super::super::range::{Position, Range};
use super::super::traits::AstNode;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expression {
    pub lhs: String,
    pub operator: String,
    pub rhs: String,
    pub location: Range,
}

impl Expression {
    fn default_location() -> Range {
        Range::new(0..0, Position::new(0, 0), Position::new(0, 0))
    }

    pub fn new(
        lhs: impl Into<String>,
        operator: impl Into<String>,
        rhs: impl Into<String>,
    ) -> Self {
        Self {
            lhs: lhs.into(),
            operator: operator.into(),
            rhs: rhs.into(),
            location: Self::default_location(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }

    /// The condition as one string, operands and operator separated by single spaces
    pub fn condition(&self) -> String {
        format!("{} {} {}", self.lhs, self.operator, self.rhs)
    }
}

impl AstNode for Expression {
    fn node_type(&self) -> &'static str {
        "Expression"
    }

    fn display_label(&self) -> String {
        self.condition()
    }

    fn range(&self) -> &Range {
        &self.location
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expression('{}')", self.condition())
    }
}
