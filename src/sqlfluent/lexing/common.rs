//! Common lexer module
//!
//! Shared output and error types for the tokenizer.

use serde::Serialize;
use thiserror::Error;

use crate::sqlfluent::ast::range::Position;
use crate::sqlfluent::token::Token;

/// Output from the tokenizer
///
/// Lexing errors are fatal: when `errors` is non-empty `tokens` is always empty, no partial
/// token sequence is handed on.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LexerOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexerOutput {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn failed(error: LexError) -> Self {
        Self {
            tokens: Vec::new(),
            errors: vec![error],
        }
    }
}

/// No token pattern matched at `offset`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("unexpected character {found:?} at {position} (offset {offset}), unscanned input: {remaining:?}")]
pub struct LexError {
    pub offset: usize,
    pub position: Position,
    pub found: char,
    /// Everything from `offset` to the end of the source
    pub remaining: String,
}
