//! Lowering diagnostics
//!
//! A CST coming out of the grammar engine always has the shape lowering expects. These errors
//! only surface for trees assembled some other way, and are reported instead of panicking.

use serde::Serialize;
use thiserror::Error;

use crate::sqlfluent::ast::range::Position;
use crate::sqlfluent::parsing::{Role, Rule};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum LoweringError {
    #[error("{rule} node at {position} is missing its {role:?} child")]
    MissingChild {
        rule: Rule,
        role: Role,
        position: Position,
    },
    #[error("expected a {expected} node at {position}, found {found}")]
    UnexpectedRule {
        expected: Rule,
        found: Rule,
        position: Position,
    },
    #[error("{rule} node holds no tokens")]
    EmptyNode { rule: Rule },
}

impl LoweringError {
    pub fn position(&self) -> Option<Position> {
        match self {
            LoweringError::MissingChild { position, .. }
            | LoweringError::UnexpectedRule { position, .. } => Some(*position),
            LoweringError::EmptyNode { .. } => None,
        }
    }
}
