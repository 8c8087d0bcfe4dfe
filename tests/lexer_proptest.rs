//! Property-based tests for the tokenizer
//!
//! Inputs are drawn from the lexical alphabet of the query language, so every generated
//! string tokenizes; properties then check the shape of the token sequence.

use proptest::prelude::*;
use sqlfluent::sqlfluent::ast::{Position, SourceLocation};
use sqlfluent::sqlfluent::token::TokenKind;
use sqlfluent::tokenize;

/// A single lexeme of the language
fn lexeme_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("SELECT".to_string()),
        Just("FROM".to_string()),
        Just("WHERE".to_string()),
        "[a-zA-Z][a-zA-Z0-9_]{0,8}",
        "0|[1-9][0-9]{0,4}",
        Just(",".to_string()),
        Just("<".to_string()),
        Just(">".to_string()),
    ]
}

fn separator_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => Just(" ".to_string()),
        1 => Just("\t".to_string()),
        1 => Just("\n".to_string()),
        1 => Just("\r\n".to_string()),
        1 => Just("\r".to_string()),
    ]
}

/// Lexemes joined by separators, optionally ending on a line break
fn source_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec((lexeme_strategy(), separator_strategy()), 0..20),
        any::<bool>(),
    )
        .prop_map(|(parts, trailing_newline)| {
            let mut source = String::new();
            for (lexeme, separator) in parts {
                source.push_str(&lexeme);
                source.push_str(&separator);
            }
            if trailing_newline {
                source.push('\n');
            }
            source
        })
}

/// Well-formed single statements
fn statement_strategy() -> impl Strategy<Value = String> {
    let column = "[a-z][a-z0-9_]{0,6}";
    (
        prop::collection::vec(column, 1..5),
        column,
        prop::option::of((column, prop_oneof![Just("<"), Just(">")], "[1-9][0-9]{0,3}")),
    )
        .prop_map(|(columns, table, condition)| {
            let mut source = format!("SELECT {} FROM {}", columns.join(", "), table);
            if let Some((lhs, operator, rhs)) = condition {
                source.push_str(&format!(" WHERE {lhs} {operator} {rhs}"));
            }
            source
        })
}

/// One identifier per line, each line ended by `\n`, `\r\n` or a lone `\r`
fn lines_strategy() -> impl Strategy<Value = Vec<(String, &'static str)>> {
    prop::collection::vec(
        (
            "[a-z][a-z0-9_]{0,6}",
            prop_oneof![Just("\n"), Just("\r\n"), Just("\r")],
        ),
        1..8,
    )
}

proptest! {
    #[test]
    fn test_every_line_terminator_advances_the_line(lines in lines_strategy()) {
        let source: String = lines
            .iter()
            .map(|(word, terminator)| format!("{word}{terminator}"))
            .collect();
        let output = tokenize(&source);
        prop_assert_eq!(output.tokens.len(), lines.len() * 2);

        for (line, ((word, _), pair)) in lines.iter().zip(output.tokens.chunks(2)).enumerate() {
            let (identifier, newline) = (&pair[0], &pair[1]);
            prop_assert_eq!(identifier.kind, TokenKind::Identifier);
            prop_assert_eq!(identifier.location.start, Position::new(line, 0));
            prop_assert_eq!(identifier.location.end, Position::new(line, word.len()));
            prop_assert_eq!(newline.kind, TokenKind::Newline);
            prop_assert_eq!(newline.location.start, Position::new(line, word.len()));
            prop_assert_eq!(newline.location.end, Position::new(line + 1, 0));
        }
    }

    #[test]
    fn test_lexing_is_idempotent(source in source_strategy()) {
        let first = tokenize(&source);
        let second = tokenize(&source);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_alphabet_always_tokenizes(source in source_strategy()) {
        let output = tokenize(&source);
        prop_assert!(output.is_ok(), "{:?}", output.errors);
    }

    #[test]
    fn test_non_empty_sequences_end_with_newline(source in source_strategy()) {
        let output = tokenize(&source);
        if let Some(last) = output.tokens.last() {
            prop_assert_eq!(last.kind, TokenKind::Newline);
        }
    }

    #[test]
    fn test_no_whitespace_tokens_survive(source in source_strategy()) {
        let output = tokenize(&source);
        prop_assert!(output.tokens.iter().all(|token| token.kind != TokenKind::Whitespace));
    }

    #[test]
    fn test_token_positions_round_trip(source in source_strategy()) {
        let output = tokenize(&source);
        let location = SourceLocation::new(&source);
        let mut previous_end = 0;

        for token in &output.tokens {
            prop_assert!(token.start_offset() <= token.end_offset());
            prop_assert!(previous_end <= token.start_offset());
            previous_end = token.end_offset();

            prop_assert_eq!(location.byte_to_position(token.start_offset()), token.location.start);
            prop_assert_eq!(location.byte_to_position(token.end_offset()), token.location.end);

            // Real tokens carry exactly their source text; the synthetic newline is zero-width
            let text = &source[token.location.span.clone()];
            if token.start_offset() == token.end_offset() {
                prop_assert_eq!(token.kind, TokenKind::Newline);
            } else {
                prop_assert_eq!(text, token.text.as_str());
            }
        }
    }

    #[test]
    fn test_keyword_prefixes_are_identifiers(
        keyword in prop_oneof![Just("SELECT"), Just("FROM"), Just("WHERE")],
        suffix in "[a-zA-Z0-9_]{1,6}",
    ) {
        let word = format!("{keyword}{suffix}");
        let output = tokenize(&word);
        prop_assert_eq!(output.tokens.len(), 2);
        prop_assert_eq!(output.tokens[0].kind, TokenKind::Identifier);
        prop_assert_eq!(&output.tokens[0].text, &word);
    }

    #[test]
    fn test_well_formed_statements_compile(source in statement_strategy()) {
        let output = sqlfluent::Compiler::default().compile(&source);
        prop_assert!(output.is_ok(), "{:?}", output.errors);
        let program = output.ast.unwrap();
        prop_assert_eq!(program.lines.len(), 1);
    }
}

#[test]
fn test_longest_match_selector() {
    let output = tokenize("SELECTOR");
    assert_eq!(output.tokens[0].kind, TokenKind::Identifier);
    assert_eq!(output.tokens[0].text, "SELECTOR");
}
