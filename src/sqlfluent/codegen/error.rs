//! Generation diagnostics
//!
//! Every AST the lowerer builds from parsed text renders cleanly. These errors cover trees put
//! together by hand with content the templates cannot embed verbatim.

use serde::Serialize;
use thiserror::Error;

use crate::sqlfluent::ast::range::Position;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum GenerationError {
    #[error("select clause at {position} has no columns")]
    EmptyColumnList { position: Position },
    #[error("{text:?} at {position} cannot be embedded in a string literal")]
    UnsafeLiteral { text: String, position: Position },
    #[error("unsupported operator {operator:?} at {position}, expected '<' or '>'")]
    UnsupportedOperator { operator: String, position: Position },
}

impl GenerationError {
    pub fn position(&self) -> Position {
        match self {
            GenerationError::EmptyColumnList { position }
            | GenerationError::UnsafeLiteral { position, .. }
            | GenerationError::UnsupportedOperator { position, .. } => *position,
        }
    }
}
