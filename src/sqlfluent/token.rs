//! Token definitions for the query language
//!
//! [`TokenKind`] is the closed set of lexical classes, derived with logos. Priorities follow the
//! declaration order of the grammar: whitespace and newlines separate tokens, keywords beat the
//! general identifier on equal length, and logos' longest-match rule turns keyword-shaped
//! prefixes of longer words (`SELECTOR`, `FROMAGE`) back into identifiers.
//!
//! [`Token`] is the positioned, immutable record handed to the grammar engine.

use logos::Logos;
use serde::Serialize;
use std::fmt;

use crate::sqlfluent::ast::range::{Position, Range};

/// All lexical classes of the query language
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Structural separators
    #[regex(r"[ \t\f]+")]
    Whitespace,
    #[regex(r"\n|\r\n?")]
    Newline,

    // Keywords
    #[token("SELECT")]
    SelectKeyword,
    #[token("FROM")]
    FromKeyword,
    #[token("WHERE")]
    WhereKeyword,

    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*")]
    Identifier,

    #[regex(r"0|[1-9][0-9]*")]
    Integer,

    // Punctuation and operators
    #[token(",")]
    Comma,
    #[token(">")]
    GreaterThan,
    #[token("<")]
    LessThan,
}

impl TokenKind {
    /// Whitespace is recognised by the lexer but never reaches the grammar engine
    pub fn is_skipped(&self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }

    /// Human-friendly name used in diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::Newline => "newline",
            TokenKind::SelectKeyword => "SELECT",
            TokenKind::FromKeyword => "FROM",
            TokenKind::WhereKeyword => "WHERE",
            TokenKind::Identifier => "identifier",
            TokenKind::Integer => "integer",
            TokenKind::Comma => "','",
            TokenKind::GreaterThan => "'>'",
            TokenKind::LessThan => "'<'",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A classified, positioned span of source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: Range,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: Range) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    /// The newline appended after the last real token of an unterminated input.
    ///
    /// It is zero-width and sits immediately after `last`.
    pub fn synthetic_newline(last: &Token) -> Self {
        Self::new(
            TokenKind::Newline,
            "\n",
            Range::empty_at(last.location.span.end, last.location.end),
        )
    }

    pub fn start_offset(&self) -> usize {
        self.location.span.start
    }

    pub fn end_offset(&self) -> usize {
        self.location.span.end
    }

    pub fn start_line(&self) -> usize {
        self.location.start.line
    }

    pub fn end_line(&self) -> usize {
        self.location.end.line
    }

    pub fn start_column(&self) -> usize {
        self.location.start.column
    }

    pub fn end_column(&self) -> usize {
        self.location.end.column
    }

    pub fn start_position(&self) -> Position {
        self.location.start
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Newline => write!(f, "newline at {}", self.location.start),
            _ => write!(f, "{} `{}` at {}", self.kind, self.text, self.location.start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        TokenKind::lexer(source).filter_map(|result| result.ok()).collect()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("SELECT FROM WHERE"),
            vec![
                TokenKind::SelectKeyword,
                TokenKind::Whitespace,
                TokenKind::FromKeyword,
                TokenKind::Whitespace,
                TokenKind::WhereKeyword,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(kinds("SELECTOR"), vec![TokenKind::Identifier]);
        assert_eq!(kinds("FROMAGE"), vec![TokenKind::Identifier]);
        assert_eq!(kinds("WHERE_1"), vec![TokenKind::Identifier]);
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(kinds("select"), vec![TokenKind::Identifier]);
        assert_eq!(kinds("From"), vec![TokenKind::Identifier]);
    }

    #[test]
    fn test_integers() {
        assert_eq!(kinds("0"), vec![TokenKind::Integer]);
        assert_eq!(kinds("120"), vec![TokenKind::Integer]);
        // Leading zeros split into separate integers
        assert_eq!(
            kinds("01"),
            vec![TokenKind::Integer, TokenKind::Integer]
        );
    }

    #[test]
    fn test_operators_and_newlines() {
        assert_eq!(
            kinds("a<1,b>2\r\n\r\n"),
            vec![
                TokenKind::Identifier,
                TokenKind::LessThan,
                TokenKind::Integer,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::GreaterThan,
                TokenKind::Integer,
                TokenKind::Newline,
                TokenKind::Newline,
            ]
        );
    }

    #[test]
    fn test_unknown_character_is_error() {
        let results: Vec<_> = TokenKind::lexer("a = 1").collect();
        assert!(results.iter().any(|result| result.is_err()));
    }

    #[test]
    fn test_only_whitespace_is_skipped() {
        assert!(TokenKind::Whitespace.is_skipped());
        assert!(!TokenKind::Newline.is_skipped());
    }

    #[test]
    fn test_synthetic_newline_sits_after_last_token() {
        let last = Token::new(
            TokenKind::Identifier,
            "t",
            Range::new(14..15, Position::new(0, 14), Position::new(0, 15)),
        );
        let newline = Token::synthetic_newline(&last);
        assert_eq!(newline.kind, TokenKind::Newline);
        assert_eq!(newline.start_offset(), 15);
        assert_eq!(newline.end_offset(), 15);
        assert_eq!(newline.start_position(), Position::new(0, 15));
    }
}
