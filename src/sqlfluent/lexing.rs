//! Lexer
//!
//!     This module orchestrates tokenization for the query language. Lexing runs in two steps:
//!
//!         1. Core tokenization using logos. See [base_tokenization](base_tokenization).
//!            Candidate patterns are tried with whitespace/newline first, then keywords, then
//!            identifiers, integers and single character operators. Longest match decides
//!            between a keyword and a longer identifier.
//!
//!         2. Normalization. Whitespace is dropped, every span becomes a positioned [`Token`]
//!            and, when the input does not end on a line break, a synthetic `Newline` is
//!            appended right after the last real token. Every logical line, including the
//!            last, is therefore terminated the same way for the grammar engine.
//!
//! Source Token Preservation
//!
//!     Logos tokens carry the byte range of their source text. That range is converted once
//!     into a [`Range`](crate::sqlfluent::ast::range::Range) with line/column positions and is
//!     never altered afterwards: lowering and code generation rely on it for provenance.

pub mod base_tokenization;
pub mod common;

pub use common::{LexError, LexerOutput};

use crate::sqlfluent::ast::range::SourceLocation;
use crate::sqlfluent::token::{Token, TokenKind};

/// Tokenize `source` into positioned tokens.
///
/// Lexing is pure: calling it twice on the same text yields identical sequences.
pub fn tokenize(source: &str) -> LexerOutput {
    let raw = match base_tokenization::tokenize(source) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(%error, "lexing failed");
            return LexerOutput::failed(error);
        }
    };

    let source_location = SourceLocation::new(source);
    let tokens = raw
        .into_iter()
        .filter(|(kind, _)| !kind.is_skipped())
        .map(|(kind, span)| {
            let text = &source[span.clone()];
            Token::new(kind, text, source_location.byte_range_to_ast_range(&span))
        })
        .collect();

    let tokens = ensure_trailing_newline(tokens);
    tracing::debug!(count = tokens.len(), "lexed tokens");

    LexerOutput {
        tokens,
        errors: Vec::new(),
    }
}

/// Appends a synthetic `Newline` when the last token is anything else.
///
/// An empty sequence stays empty.
pub fn ensure_trailing_newline(mut tokens: Vec<Token>) -> Vec<Token> {
    let newline = match tokens.last() {
        Some(last) if last.kind != TokenKind::Newline => Token::synthetic_newline(last),
        _ => return tokens,
    };
    tokens.push(newline);
    tokens
}
