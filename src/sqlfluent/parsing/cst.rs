//! Concrete syntax tree produced by the grammar engine
//!
//! A [`CstNode`] records one rule invocation. It keeps every matched token and every sub-rule
//! invocation, in match order, each tagged with the [`Role`] it plays inside the rule. Nothing
//! is dropped here; discarding keywords and punctuation is the lowerer's job.

use serde::Serialize;
use std::fmt;

use crate::sqlfluent::ast::range::Range;
use crate::sqlfluent::token::Token;

/// Grammar rules, one per production
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rule {
    Program,
    CodeLine,
    SelectStatement,
    SelectClause,
    FromClause,
    WhereClause,
    Expression,
    AtomicExpression,
    RelationalOperator,
}

impl Rule {
    /// The rule name as written in the grammar
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Program => "program",
            Rule::CodeLine => "code_line",
            Rule::SelectStatement => "selectStatement",
            Rule::SelectClause => "selectClause",
            Rule::FromClause => "fromClause",
            Rule::WhereClause => "whereClause",
            Rule::Expression => "expression",
            Rule::AtomicExpression => "atomicExpression",
            Rule::RelationalOperator => "relationalOperator",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The key a child is stored under inside its parent rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    // Tokens
    Keyword,
    Identifier,
    Integer,
    Comma,
    Newline,
    Operator,
    // Sub-rules
    CodeLine,
    SelectStatement,
    SelectClause,
    FromClause,
    WhereClause,
    Expression,
    Lhs,
    Rhs,
    RelationalOperator,
}

/// A child of a rule invocation: either a matched token or a nested rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CstElement {
    Token(Token),
    Node(CstNode),
}

impl CstElement {
    /// Bounding range of everything below this element
    pub fn location(&self) -> Option<Range> {
        match self {
            CstElement::Token(token) => Some(token.location.clone()),
            CstElement::Node(node) => node.location(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CstChild {
    pub role: Role,
    pub element: CstElement,
}

/// A rule invocation record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CstNode {
    pub rule: Rule,
    pub children: Vec<CstChild>,
}

impl CstNode {
    pub fn new(rule: Rule) -> Self {
        Self {
            rule,
            children: Vec::new(),
        }
    }

    pub fn push_token(&mut self, role: Role, token: Token) {
        self.children.push(CstChild {
            role,
            element: CstElement::Token(token),
        });
    }

    pub fn push_node(&mut self, role: Role, node: CstNode) {
        self.children.push(CstChild {
            role,
            element: CstElement::Node(node),
        });
    }

    /// All tokens stored under `role`, in match order
    pub fn tokens(&self, role: Role) -> impl Iterator<Item = &Token> {
        self.children
            .iter()
            .filter(move |child| child.role == role)
            .filter_map(|child| match &child.element {
                CstElement::Token(token) => Some(token),
                CstElement::Node(_) => None,
            })
    }

    pub fn token(&self, role: Role) -> Option<&Token> {
        self.tokens(role).next()
    }

    /// All sub-rule invocations stored under `role`, in match order
    pub fn nodes(&self, role: Role) -> impl Iterator<Item = &CstNode> {
        self.children
            .iter()
            .filter(move |child| child.role == role)
            .filter_map(|child| match &child.element {
                CstElement::Node(node) => Some(node),
                CstElement::Token(_) => None,
            })
    }

    pub fn node(&self, role: Role) -> Option<&CstNode> {
        self.nodes(role).next()
    }

    /// Bounding range of every token below this node, `None` for a node without tokens
    pub fn location(&self) -> Option<Range> {
        let ranges: Vec<Range> = self
            .children
            .iter()
            .filter_map(|child| child.element.location())
            .collect();
        Range::bounding_box(ranges.iter())
    }

    /// Every token below this node in source order
    pub fn flatten_tokens(&self) -> Vec<&Token> {
        let mut tokens = Vec::new();
        self.collect_tokens(&mut tokens);
        tokens
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        for child in &self.children {
            match &child.element {
                CstElement::Token(token) => out.push(token),
                CstElement::Node(node) => node.collect_tokens(out),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlfluent::ast::range::Position;
    use crate::sqlfluent::token::TokenKind;

    fn token(kind: TokenKind, text: &str, start: usize) -> Token {
        let end = start + text.len();
        Token::new(
            kind,
            text,
            Range::new(start..end, Position::new(0, start), Position::new(0, end)),
        )
    }

    fn from_clause() -> CstNode {
        let mut node = CstNode::new(Rule::FromClause);
        node.push_token(Role::Keyword, token(TokenKind::FromKeyword, "FROM", 9));
        node.push_token(Role::Identifier, token(TokenKind::Identifier, "t", 14));
        node
    }

    #[test]
    fn test_lookup_by_role() {
        let node = from_clause();
        assert_eq!(node.token(Role::Identifier).unwrap().text, "t");
        assert_eq!(node.token(Role::Keyword).unwrap().kind, TokenKind::FromKeyword);
        assert!(node.token(Role::Comma).is_none());
        assert!(node.node(Role::Identifier).is_none());
    }

    #[test]
    fn test_location_is_bounding_box() {
        let mut statement = CstNode::new(Rule::SelectStatement);
        let mut select = CstNode::new(Rule::SelectClause);
        select.push_token(Role::Keyword, token(TokenKind::SelectKeyword, "SELECT", 0));
        select.push_token(Role::Identifier, token(TokenKind::Identifier, "a", 7));
        statement.push_node(Role::SelectClause, select);
        statement.push_node(Role::FromClause, from_clause());

        let location = statement.location().unwrap();
        assert_eq!(location.span, 0..15);
        assert_eq!(location.start, Position::new(0, 0));
        assert_eq!(location.end, Position::new(0, 15));
        assert_eq!(statement.flatten_tokens().len(), 4);
    }

    #[test]
    fn test_empty_node_has_no_location() {
        assert!(CstNode::new(Rule::Program).location().is_none());
    }
}
