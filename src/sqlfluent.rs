//! Main module for sqlfluent library functionality

pub mod ast;
pub mod building;
pub mod codegen;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
pub mod runtime;
pub mod token;
