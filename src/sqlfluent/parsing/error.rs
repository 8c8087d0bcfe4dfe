//! Parse diagnostics

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::sqlfluent::ast::range::Position;
use crate::sqlfluent::token::{Token, TokenKind};

/// An unexpected token, or unexpected end of input, met by the grammar engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("expected {}, found {} at {position}", ExpectedList(.expected), Found(.found.as_ref()))]
pub struct ParseError {
    /// Token kinds that would have been accepted at this point
    pub expected: Vec<TokenKind>,
    /// `None` at end of input
    pub found: Option<Token>,
    pub position: Position,
    pub offset: usize,
}

impl ParseError {
    pub fn unexpected(expected: &[TokenKind], found: &Token) -> Self {
        Self {
            expected: expected.to_vec(),
            found: Some(found.clone()),
            position: found.start_position(),
            offset: found.start_offset(),
        }
    }

    pub fn end_of_input(expected: &[TokenKind], position: Position, offset: usize) -> Self {
        Self {
            expected: expected.to_vec(),
            found: None,
            position,
            offset,
        }
    }

    /// The source line the error was raised on
    pub fn line(&self) -> usize {
        self.position.line
    }
}

struct ExpectedList<'a>(&'a [TokenKind]);

impl fmt::Display for ExpectedList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            [] => f.write_str("nothing"),
            [only] => write!(f, "{}", only),
            [init @ .., last] => {
                let init: Vec<&str> = init.iter().map(|kind| kind.describe()).collect();
                write!(f, "{} or {}", init.join(", "), last)
            }
        }
    }
}

struct Found<'a>(Option<&'a Token>);

impl fmt::Display for Found<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(token) if token.kind == TokenKind::Newline => f.write_str("newline"),
            Some(token) => write!(f, "{} `{}`", token.kind, token.text),
            None => f.write_str("end of input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlfluent::ast::range::Range;

    #[test]
    fn test_message_for_unexpected_token() {
        let found = Token::new(
            TokenKind::FromKeyword,
            "FROM",
            Range::new(7..11, Position::new(0, 7), Position::new(0, 11)),
        );
        let error = ParseError::unexpected(&[TokenKind::Identifier], &found);
        assert_eq!(error.offset, 7);
        assert_eq!(error.to_string(), "expected identifier, found FROM `FROM` at 0:7");
    }

    #[test]
    fn test_message_for_end_of_input() {
        let error = ParseError::end_of_input(
            &[TokenKind::SelectKeyword, TokenKind::Newline],
            Position::default(),
            0,
        );
        assert!(error.found.is_none());
        assert_eq!(
            error.to_string(),
            "expected SELECT or newline, found end of input at 0:0"
        );
    }

    #[test]
    fn test_message_for_three_alternatives() {
        let error = ParseError::end_of_input(
            &[TokenKind::Integer, TokenKind::Identifier, TokenKind::Comma],
            Position::new(2, 4),
            20,
        );
        assert_eq!(
            error.to_string(),
            "expected integer, identifier or ',', found end of input at 2:4"
        );
        assert_eq!(error.line(), 2);
    }
}
