//! Abstract syntax tree
//!
//! The minimal tree produced by lowering: a [`Program`] of [`SelectStatement`]s. Every node
//! carries a [`Range`] that contains the ranges of all its descendants.
//!
//! - [`elements`]: node definitions and the [`NodeRef`] tagged union
//! - [`range`]: positions, ranges and offset to line/column conversion
//! - [`traits`]: the [`AstNode`] interface shared by all nodes
//! - [`snapshot`]: owned, serializable copies of a tree for the output formats

pub mod elements;
pub mod range;
pub mod snapshot;
pub mod traits;

pub use elements::{
    Expression, FromClause, NodeRef, Program, SelectClause, SelectStatement, WhereClause,
};
pub use range::{Position, Range, SourceLocation};
pub use snapshot::{snapshot_node, AstSnapshot};
pub use traits::AstNode;
