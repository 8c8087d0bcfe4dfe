//! # sqlfluent
//!
//! Compiles a tiny query language into a JavaScript program that drives a fluent query
//! builder, along with a source map back to the query text.
//!
//! ```text
//! SELECT column1 FROM table2 WHERE i < 0
//! ```
//!
//! becomes a program calling `.select("column1")`, `.from("table2")`, `.where(["i < 0"])`
//! and `.execute()` on a `QueryBuilder`.
//!
//! Stages, each usable on its own:
//!
//! - [lexing](sqlfluent::lexing): text to positioned tokens
//! - [parsing](sqlfluent::parsing): tokens to a concrete syntax tree
//! - [building](sqlfluent::building): CST to AST
//! - [codegen](sqlfluent::codegen): AST to program text and source map
//!
//! [`Compiler`] runs them all under one [`CompilerConfig`].

pub mod sqlfluent;

pub use sqlfluent::ast::Program;
pub use sqlfluent::codegen::{Generator, SourceMap};
pub use sqlfluent::lexing::tokenize;
pub use sqlfluent::parsing::{GrammarEngine, RecoveryMode};
pub use sqlfluent::pipeline::{CompileError, CompileOutput, Compiler, CompilerConfig, Loader};
