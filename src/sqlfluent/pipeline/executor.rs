//! Compiler: runs the stages in order
//!
//! text -> tokens -> CST -> AST -> {program text, source map}
//!
//! Each stage reports its own diagnostics. The first stage with errors ends the run and the
//! output holds whatever the earlier stages produced; nothing past that point is attempted.
//! Best-effort generation is the one exception: its diagnostics come back together with the
//! partial program.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::sqlfluent::ast::range::Position;
use crate::sqlfluent::ast::Program;
use crate::sqlfluent::building::{lower, LoweringError};
use crate::sqlfluent::codegen::{GenerationError, Generator, SourceMap};
use crate::sqlfluent::lexing::{tokenize, LexError};
use crate::sqlfluent::parsing::{CstNode, GrammarEngine, ParseError};
use crate::sqlfluent::token::Token;

use super::config::CompilerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Lexing,
    Parsing,
    Lowering,
    Generation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Lexing => "lexing",
            Stage::Parsing => "parsing",
            Stage::Lowering => "lowering",
            Stage::Generation => "generation",
        };
        f.write_str(name)
    }
}

/// Any diagnostic raised while compiling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum CompileError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("lowering error: {0}")]
    Lowering(#[from] LoweringError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("no AST to generate from")]
    MissingAst,
}

impl CompileError {
    pub fn stage(&self) -> Stage {
        match self {
            CompileError::Lex(_) => Stage::Lexing,
            CompileError::Parse(_) => Stage::Parsing,
            CompileError::Lowering(_) => Stage::Lowering,
            CompileError::Generation(_) | CompileError::MissingAst => Stage::Generation,
        }
    }

    /// Source position the diagnostic points at, when it has one
    pub fn position(&self) -> Option<Position> {
        match self {
            CompileError::Lex(error) => Some(error.position),
            CompileError::Parse(error) => Some(error.position),
            CompileError::Lowering(error) => error.position(),
            CompileError::Generation(error) => Some(error.position()),
            CompileError::MissingAst => None,
        }
    }
}

/// Everything a compile run produced, up to the stage it reached
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompileOutput {
    pub tokens: Option<Vec<Token>>,
    pub cst: Option<CstNode>,
    pub ast: Option<Program>,
    pub source: Option<String>,
    pub map: Option<SourceMap>,
    pub errors: Vec<CompileError>,
}

impl CompileOutput {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The stage that reported the first error
    pub fn failed_stage(&self) -> Option<Stage> {
        self.errors.first().map(CompileError::stage)
    }
}

/// Compiles query text into a program. Holds no per-call state; one instance may serve any
/// number of compile calls, from any number of threads.
#[derive(Debug, Clone)]
pub struct Compiler {
    config: CompilerConfig,
    engine: GrammarEngine,
    generator: Generator,
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        let engine = GrammarEngine::new(config.parsing.recovery);
        let generator = Generator::new(config.generator_options());
        Self {
            config,
            engine,
            generator,
        }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn compile(&self, text: &str) -> CompileOutput {
        let mut output = CompileOutput::default();

        let lexed = tokenize(text);
        if !lexed.is_ok() {
            output.errors = lexed.errors.into_iter().map(CompileError::from).collect();
            return output;
        }
        output.tokens = Some(lexed.tokens);

        let tokens = output.tokens.as_deref().unwrap_or_default();
        let parsed = self.engine.parse(tokens);
        output.cst = parsed.cst;
        if !parsed.errors.is_empty() {
            output.errors = parsed.errors.into_iter().map(CompileError::from).collect();
            return output;
        }

        // Lowering consumes its input; the output keeps a copy for inspection
        let Some(cst) = output.cst.clone() else {
            output.errors.push(CompileError::MissingAst);
            return output;
        };
        match lower(cst) {
            Ok(program) => output.ast = Some(program),
            Err(error) => {
                tracing::warn!(%error, "lowering failed");
                output.errors.push(error.into());
                return output;
            }
        }

        let Some(program) = output.ast.as_ref() else {
            output.errors.push(CompileError::MissingAst);
            return output;
        };
        let generated = self.generator.generate(program, text);
        output.source = generated.source;
        output.map = generated.map;
        output
            .errors
            .extend(generated.errors.into_iter().map(CompileError::from));

        output
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiler_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Compiler>();
    }

    #[test]
    fn test_success_reaches_every_stage() {
        let output = Compiler::default().compile("SELECT a FROM t");
        assert!(output.is_ok());
        assert!(output.tokens.is_some());
        assert!(output.cst.is_some());
        assert!(output.ast.is_some());
        assert!(output.source.is_some());
        assert!(output.map.is_some());
    }

    #[test]
    fn test_lex_error_stops_before_tokens() {
        let output = Compiler::default().compile("SELECT a FROM t WHERE a = 1");
        assert_eq!(output.failed_stage(), Some(Stage::Lexing));
        assert!(output.tokens.is_none());
        assert!(output.cst.is_none());
    }

    #[test]
    fn test_parse_error_keeps_tokens() {
        let output = Compiler::default().compile("SELECT FROM t");
        assert_eq!(output.failed_stage(), Some(Stage::Parsing));
        assert!(output.tokens.is_some());
        assert!(output.ast.is_none());
        assert!(output.source.is_none());
        assert_eq!(output.errors[0].position(), Some(Position::new(0, 7)));
    }

    #[test]
    fn test_resync_keeps_partial_cst_but_stops() {
        let compiler = Compiler::new(CompilerConfig::tooling());
        let output = compiler.compile("SELECT FROM t\nSELECT a FROM t\n");
        assert_eq!(output.errors.len(), 1);
        assert!(output.cst.is_some());
        assert!(output.ast.is_none());
    }

    #[test]
    fn test_carriage_return_lines_are_positioned() {
        let compiler = Compiler::new(CompilerConfig::tooling());
        let output = compiler.compile("SELECT a FROM t\rSELECT FROM u\r");
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].position(), Some(Position::new(1, 7)));

        let output = Compiler::default().compile("SELECT a FROM t\rSELECT b FROM u");
        let program = output.ast.unwrap();
        let second = &program.lines[1].location;
        assert_eq!(second.start, Position::new(1, 0));
        assert_eq!(second.end, Position::new(1, 15));
        assert_eq!(second.span, 16..31);
    }

    #[test]
    fn test_empty_input_is_parse_error() {
        let output = Compiler::default().compile("");
        assert_eq!(output.failed_stage(), Some(Stage::Parsing));
        assert_eq!(output.tokens, Some(Vec::new()));
    }

    #[test]
    fn test_error_messages_name_stage() {
        let output = Compiler::default().compile("SELECT FROM t");
        let message = output.errors[0].to_string();
        assert!(message.starts_with("parse error: expected identifier"));
        assert_eq!(output.errors[0].stage().to_string(), "parsing");
    }
}
