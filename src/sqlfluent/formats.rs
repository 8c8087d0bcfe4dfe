//! Output formats
//!
//! Serializers for the artifacts a compile run leaves behind: the generated program, its
//! source map, and debug views of the tokens and the AST.
//!
//! | name          | artifact                              |
//! |---------------|---------------------------------------|
//! | `source`      | generated program text                |
//! | `map`         | source map v3 JSON                    |
//! | `tokens-json` | token list as JSON                    |
//! | `ast-json`    | AST as JSON, locations included       |
//! | `ast-treeviz` | AST as a one-line-per-node tree       |

pub mod treeviz;

pub use treeviz::to_treeviz_str;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::sqlfluent::ast::Program;
use crate::sqlfluent::pipeline::CompileOutput;
use crate::sqlfluent::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Source,
    Map,
    TokensJson,
    AstJson,
    AstTreeviz,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Source,
        OutputFormat::Map,
        OutputFormat::TokensJson,
        OutputFormat::AstJson,
        OutputFormat::AstTreeviz,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Source => "source",
            OutputFormat::Map => "map",
            OutputFormat::TokensJson => "tokens-json",
            OutputFormat::AstJson => "ast-json",
            OutputFormat::AstTreeviz => "ast-treeviz",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| FormatError::FormatNotFound(s.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("format '{0}' not found")]
    FormatNotFound(String),
    #[error("nothing to print as {0}: compilation stopped before producing it")]
    NotProduced(OutputFormat),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub fn tokens_to_json(tokens: &[Token]) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(tokens)?)
}

pub fn ast_to_json(program: &Program) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(program)?)
}

/// Serialize one artifact of `output`
pub fn serialize(output: &CompileOutput, format: OutputFormat) -> Result<String, FormatError> {
    let missing = || FormatError::NotProduced(format);
    match format {
        OutputFormat::Source => output.source.clone().ok_or_else(missing),
        OutputFormat::Map => Ok(output.map.as_ref().ok_or_else(missing)?.to_json()?),
        OutputFormat::TokensJson => tokens_to_json(output.tokens.as_ref().ok_or_else(missing)?),
        OutputFormat::AstJson => ast_to_json(output.ast.as_ref().ok_or_else(missing)?),
        OutputFormat::AstTreeviz => Ok(to_treeviz_str(output.ast.as_ref().ok_or_else(missing)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlfluent::pipeline::Compiler;

    #[test]
    fn test_format_names_round_trip() {
        for format in OutputFormat::ALL {
            assert_eq!(format.name().parse::<OutputFormat>().unwrap(), format);
        }
        assert!(matches!(
            "yaml".parse::<OutputFormat>(),
            Err(FormatError::FormatNotFound(_))
        ));
    }

    #[test]
    fn test_tokens_json() {
        let output = Compiler::default().compile("SELECT a FROM t");
        let json = serialize(&output, OutputFormat::TokensJson).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["kind"], "SelectKeyword");
        assert_eq!(value[0]["text"], "SELECT");
        assert_eq!(value[0]["location"]["start"]["column"], 0);
    }

    #[test]
    fn test_ast_json() {
        let output = Compiler::default().compile("SELECT a, b FROM t");
        let json = serialize(&output, OutputFormat::AstJson).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["lines"][0]["select_clause"]["columns"][1], "b");
        assert!(value["lines"][0]["where_clause"].is_null());
    }

    #[test]
    fn test_missing_artifact() {
        let output = Compiler::default().compile("SELECT FROM t");
        assert!(serialize(&output, OutputFormat::TokensJson).is_ok());
        assert!(matches!(
            serialize(&output, OutputFormat::Source),
            Err(FormatError::NotProduced(OutputFormat::Source))
        ));
    }
}
