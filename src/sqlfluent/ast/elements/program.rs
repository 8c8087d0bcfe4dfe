//! Program Node
//!
//!     The root of every tree: the select statements of a source file in line order. Blank
//!     lines leave no trace in the tree but are still covered by the program location.

use super::super::range::{Position, Range};
use super::super::traits::AstNode;
use super::statement::SelectStatement;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    pub lines: Vec<SelectStatement>,
    pub location: Range,
}

impl Program {
    fn default_location() -> Range {
        Range::new(0..0, Position::new(0, 0), Position::new(0, 0))
    }

    pub fn new(lines: Vec<SelectStatement>) -> Self {
        Self {
            lines,
            location: Self::default_location(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl AstNode for Program {
    fn node_type(&self) -> &'static str {
        "Program"
    }

    fn display_label(&self) -> String {
        format!("{} statement(s)", self.lines.len())
    }

    fn range(&self) -> &Range {
        &self.location
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Program({} statements)", self.lines.len())
    }
}
