//! Grammar engine
//!
//! Deterministic recursive descent over the query grammar:
//!
//! ```text
//! program            := code_line*
//! code_line          := selectStatement? Newline+
//! selectStatement    := selectClause fromClause whereClause?
//! selectClause       := SELECT Identifier (Comma Identifier)*
//! fromClause         := FROM Identifier
//! whereClause        := WHERE expression
//! expression         := atomicExpression relationalOperator atomicExpression
//! atomicExpression   := Integer | Identifier
//! relationalOperator := GreaterThan | LessThan
//! ```
//!
//! Every alternative is decided by peeking at most [`MAX_LOOKAHEAD`] tokens; nothing is ever
//! rewound. All parse state lives in a [`RuleParser`] created per call, the [`GrammarEngine`]
//! itself only carries the recovery mode and can be shared freely between threads.

use serde::{Deserialize, Serialize};

use super::cst::{CstNode, Role, Rule};
use super::error::ParseError;
use crate::sqlfluent::ast::range::Position;
use crate::sqlfluent::token::{Token, TokenKind};

/// Upper bound for `LA(k)`
pub const MAX_LOOKAHEAD: usize = 2;

const CODE_LINE_START: &[TokenKind] = &[TokenKind::SelectKeyword, TokenKind::Newline];
const ATOMIC_EXPRESSION: &[TokenKind] = &[TokenKind::Integer, TokenKind::Identifier];
const RELATIONAL_OPERATOR: &[TokenKind] = &[TokenKind::GreaterThan, TokenKind::LessThan];

/// What the engine does after the first unexpected token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryMode {
    /// Stop at the first error and return no tree
    #[default]
    Strict,
    /// Skip past the next run of newlines and continue with the following line
    Resync,
}

/// Result of a parse: the tree (if any) plus every diagnostic raised
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseOutput {
    pub cst: Option<CstNode>,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty() && self.cst.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct GrammarEngine {
    recovery: RecoveryMode,
}

impl GrammarEngine {
    pub fn new(recovery: RecoveryMode) -> Self {
        Self { recovery }
    }

    pub fn recovery(&self) -> RecoveryMode {
        self.recovery
    }

    /// Parse a token sequence into a `program` tree.
    ///
    /// In [`RecoveryMode::Strict`] a tree is only returned when there are no errors. In
    /// [`RecoveryMode::Resync`] the tree holds every line that parsed, broken lines are left
    /// out and reported, one error each.
    pub fn parse(&self, tokens: &[Token]) -> ParseOutput {
        if tokens.is_empty() {
            return ParseOutput {
                cst: None,
                errors: vec![ParseError::end_of_input(
                    &[TokenKind::SelectKeyword],
                    Position::default(),
                    0,
                )],
            };
        }

        let mut parser = RuleParser::new(tokens, self.recovery);
        let program = parser.program();
        let errors = parser.errors;

        if !errors.is_empty() {
            tracing::warn!(count = errors.len(), mode = ?self.recovery, "parse reported errors");
        }

        let cst = match self.recovery {
            RecoveryMode::Strict if !errors.is_empty() => None,
            _ => Some(program),
        };
        if let Some(cst) = &cst {
            tracing::debug!(lines = cst.children.len(), "parsed program");
        }

        ParseOutput { cst, errors }
    }
}

type RuleResult = Result<CstNode, ParseError>;

/// Call-local parser state
struct RuleParser<'t> {
    tokens: &'t [Token],
    pos: usize,
    recovery: RecoveryMode,
    errors: Vec<ParseError>,
}

impl<'t> RuleParser<'t> {
    fn new(tokens: &'t [Token], recovery: RecoveryMode) -> Self {
        Self {
            tokens,
            pos: 0,
            recovery,
            errors: Vec::new(),
        }
    }

    /// `LA(k)`: the token `k` positions ahead, 1-based
    fn la(&self, k: usize) -> Option<&'t Token> {
        debug_assert!((1..=MAX_LOOKAHEAD).contains(&k));
        self.tokens.get(self.pos + k - 1)
    }

    fn la_kind(&self, k: usize) -> Option<TokenKind> {
        self.la(k).map(|token| token.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.la_kind(1) == Some(kind)
    }

    fn at_any(&self, kinds: &[TokenKind]) -> bool {
        self.la_kind(1).is_some_and(|kind| kinds.contains(&kind))
    }

    fn enter(&self, rule: Rule) {
        tracing::trace!(rule = %rule, pos = self.pos, "enter rule");
    }

    fn error(&self, expected: &[TokenKind]) -> ParseError {
        self.error_at(1, expected)
    }

    /// Error raised against `LA(k)` instead of the current token
    fn error_at(&self, k: usize, expected: &[TokenKind]) -> ParseError {
        match self.la(k) {
            Some(token) => ParseError::unexpected(expected, token),
            None => {
                let (position, offset) = self
                    .tokens
                    .last()
                    .map(|last| (last.location.end, last.end_offset()))
                    .unwrap_or_default();
                ParseError::end_of_input(expected, position, offset)
            }
        }
    }

    /// Consume one token of any of `kinds`
    fn consume_any(&mut self, kinds: &[TokenKind]) -> Result<Token, ParseError> {
        match self.la(1) {
            Some(token) if kinds.contains(&token.kind) => {
                self.pos += 1;
                Ok(token.clone())
            }
            _ => Err(self.error(kinds)),
        }
    }

    fn consume(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        self.consume_any(&[kind])
    }

    /// Skip to the next newline and past the whole run of newlines that follows
    fn resync(&mut self) {
        while self.la(1).is_some() && !self.at(TokenKind::Newline) {
            self.pos += 1;
        }
        while self.at(TokenKind::Newline) {
            self.pos += 1;
        }
        tracing::trace!(pos = self.pos, "resynchronized");
    }

    // program := code_line*
    fn program(&mut self) -> CstNode {
        self.enter(Rule::Program);
        let mut program = CstNode::new(Rule::Program);

        while self.la(1).is_some() {
            let line = if self.at_any(CODE_LINE_START) {
                self.code_line()
            } else {
                Err(self.error(CODE_LINE_START))
            };

            match line {
                Ok(line) => program.push_node(Role::CodeLine, line),
                Err(error) => {
                    tracing::debug!(%error, "broken line");
                    self.errors.push(error);
                    if self.recovery == RecoveryMode::Strict {
                        break;
                    }
                    self.resync();
                }
            }
        }

        program
    }

    // code_line := selectStatement? Newline+
    fn code_line(&mut self) -> RuleResult {
        self.enter(Rule::CodeLine);
        let mut node = CstNode::new(Rule::CodeLine);

        if self.at(TokenKind::SelectKeyword) {
            node.push_node(Role::SelectStatement, self.select_statement()?);
        }

        node.push_token(Role::Newline, self.consume(TokenKind::Newline)?);
        while self.at(TokenKind::Newline) {
            node.push_token(Role::Newline, self.consume(TokenKind::Newline)?);
        }

        Ok(node)
    }

    // selectStatement := selectClause fromClause whereClause?
    fn select_statement(&mut self) -> RuleResult {
        self.enter(Rule::SelectStatement);
        let mut node = CstNode::new(Rule::SelectStatement);

        node.push_node(Role::SelectClause, self.select_clause()?);
        node.push_node(Role::FromClause, self.from_clause()?);
        if self.at(TokenKind::WhereKeyword) {
            node.push_node(Role::WhereClause, self.where_clause()?);
        }

        Ok(node)
    }

    // selectClause := SELECT Identifier (Comma Identifier)*
    fn select_clause(&mut self) -> RuleResult {
        self.enter(Rule::SelectClause);
        let mut node = CstNode::new(Rule::SelectClause);

        node.push_token(Role::Keyword, self.consume(TokenKind::SelectKeyword)?);
        node.push_token(Role::Identifier, self.consume(TokenKind::Identifier)?);
        while self.at(TokenKind::Comma) {
            node.push_token(Role::Comma, self.consume(TokenKind::Comma)?);
            node.push_token(Role::Identifier, self.consume(TokenKind::Identifier)?);
        }

        Ok(node)
    }

    // fromClause := FROM Identifier
    fn from_clause(&mut self) -> RuleResult {
        self.enter(Rule::FromClause);
        let mut node = CstNode::new(Rule::FromClause);

        node.push_token(Role::Keyword, self.consume(TokenKind::FromKeyword)?);
        node.push_token(Role::Identifier, self.consume(TokenKind::Identifier)?);

        Ok(node)
    }

    // whereClause := WHERE expression
    fn where_clause(&mut self) -> RuleResult {
        self.enter(Rule::WhereClause);
        let mut node = CstNode::new(Rule::WhereClause);

        node.push_token(Role::Keyword, self.consume(TokenKind::WhereKeyword)?);
        node.push_node(Role::Expression, self.expression()?);

        Ok(node)
    }

    // expression := atomicExpression relationalOperator atomicExpression
    fn expression(&mut self) -> RuleResult {
        self.enter(Rule::Expression);
        let mut node = CstNode::new(Rule::Expression);

        // An operand directly followed by something other than an operator fails here, on the
        // operator position, rather than inside the operand rule.
        if self.at_any(ATOMIC_EXPRESSION) {
            let operator_follows = self
                .la_kind(2)
                .is_some_and(|kind| RELATIONAL_OPERATOR.contains(&kind));
            if !operator_follows {
                return Err(self.error_at(2, RELATIONAL_OPERATOR));
            }
        }

        node.push_node(Role::Lhs, self.atomic_expression()?);
        node.push_node(Role::RelationalOperator, self.relational_operator()?);
        node.push_node(Role::Rhs, self.atomic_expression()?);

        Ok(node)
    }

    // atomicExpression := Integer | Identifier
    fn atomic_expression(&mut self) -> RuleResult {
        self.enter(Rule::AtomicExpression);
        let mut node = CstNode::new(Rule::AtomicExpression);

        let token = self.consume_any(ATOMIC_EXPRESSION)?;
        let role = match token.kind {
            TokenKind::Integer => Role::Integer,
            _ => Role::Identifier,
        };
        node.push_token(role, token);

        Ok(node)
    }

    // relationalOperator := GreaterThan | LessThan
    fn relational_operator(&mut self) -> RuleResult {
        self.enter(Rule::RelationalOperator);
        let mut node = CstNode::new(Rule::RelationalOperator);

        node.push_token(Role::Operator, self.consume_any(RELATIONAL_OPERATOR)?);

        Ok(node)
    }
}
