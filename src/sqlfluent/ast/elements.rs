//! AST element definitions
//!
//! One file per node family:
//!
//! - [`program`]: the root [`Program`]
//! - [`statement`]: [`SelectStatement`]
//! - [`clause`]: [`SelectClause`], [`FromClause`], [`WhereClause`]
//! - [`expression`]: the [`Expression`] held by a where clause
//! - [`node`]: [`NodeRef`], the borrowed tagged union over all of the above

pub mod clause;
pub mod expression;
pub mod node;
pub mod program;
pub mod statement;

pub use clause::{FromClause, SelectClause, WhereClause};
pub use expression::Expression;
pub use node::NodeRef;
pub use program::Program;
pub use statement::SelectStatement;
