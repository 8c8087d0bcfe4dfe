//! Compilation pipeline
//!
//! [`Compiler`] owns one configured instance of every stage and runs them in order. Its
//! behavior is set by a [`CompilerConfig`], usually built with the [`Loader`] from the embedded
//! defaults plus user files and overrides.

pub mod config;
pub mod executor;

pub use config::{
    load_defaults, CompilerConfig, GenerationConfig, Loader, OutputConfig, ParsingConfig,
};
pub use executor::{CompileError, CompileOutput, Compiler, Stage};
