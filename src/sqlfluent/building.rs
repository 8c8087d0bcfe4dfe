//! AST building
//!
//!     This module lowers the CST produced by [parsing](crate::sqlfluent::parsing) into the
//!     AST. During this step:
//!
//!         1. Keywords, commas and newlines are discarded.
//!         2. Token text becomes node data (column names, table, operands, operator).
//!         3. Token ranges are aggregated into node ranges, so every node range contains the
//!            ranges of its descendants.
//!
//!     See [lowering] for the per rule functions and [location] for range aggregation.

pub mod error;
pub mod location;
pub mod lowering;

pub use error::LoweringError;
pub use lowering::lower;
