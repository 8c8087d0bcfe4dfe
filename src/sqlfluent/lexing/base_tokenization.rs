//! Base tokenization implementation for the query lexer
//!
//! This module provides the raw tokenization using the logos lexer library.
//! This is the entry point where source strings become `(TokenKind, span)` pairs. Skipped
//! whitespace is still present at this stage; [`crate::sqlfluent::lexing::tokenize`] drops it.

use logos::Logos;
use std::ops::Range;

use crate::sqlfluent::ast::range::SourceLocation;
use crate::sqlfluent::lexing::common::LexError;
use crate::sqlfluent::token::TokenKind;

/// Tokenize source code with byte spans
///
/// Stops at the first position where no pattern matches and reports it, together with the
/// unscanned remainder of the input.
pub fn tokenize(source: &str) -> Result<Vec<(TokenKind, Range<usize>)>, LexError> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(kind) => tokens.push((kind, lexer.span())),
            Err(()) => {
                let offset = lexer.span().start;
                let remaining = &source[offset..];
                return Err(LexError {
                    offset,
                    position: SourceLocation::new(source).byte_to_position(offset),
                    found: remaining.chars().next().unwrap_or('\0'),
                    remaining: remaining.to_string(),
                });
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlfluent::ast::range::Position;

    #[test]
    fn test_tokenizes_with_spans() {
        let tokens = tokenize("SELECT a").unwrap();
        assert_eq!(
            tokens,
            vec![
                (TokenKind::SelectKeyword, 0..6),
                (TokenKind::Whitespace, 6..7),
                (TokenKind::Identifier, 7..8),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }

    #[test]
    fn test_reports_first_unmatched_offset() {
        let error = tokenize("SELECT a\nFROM t WHERE x = 1").unwrap_err();
        assert_eq!(error.offset, 24);
        assert_eq!(error.position, Position::new(1, 15));
        assert_eq!(error.found, '=');
        assert_eq!(error.remaining, "= 1");
    }
}
