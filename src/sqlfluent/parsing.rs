//! Parsing module for the query language
//!
//! Turns the token sequence produced by [lexing](crate::sqlfluent::lexing) into a concrete
//! syntax tree:
//!
//! - [`engine`]: the LL(2) recursive descent [`GrammarEngine`] and its [`RecoveryMode`]
//! - [`cst`]: rule invocation records ([`CstNode`]) keyed by [`Role`]
//! - [`error`]: the [`ParseError`] diagnostic
//!
//! The CST is handed to [building](crate::sqlfluent::building) by value and dropped there.

pub mod cst;
pub mod engine;
pub mod error;

pub use cst::{CstChild, CstElement, CstNode, Role, Rule};
pub use engine::{GrammarEngine, ParseOutput, RecoveryMode, MAX_LOOKAHEAD};
pub use error::ParseError;
