//! CST to AST lowering
//!
//! One function per grammar rule, each structurally recursive over the CST record of that
//! rule. Lowering keeps what the statement means and drops the rest: keywords, commas and
//! newlines disappear, comma separated identifiers become an ordered list, a missing where
//! clause becomes `None`. Ranges are carried over from the CST per
//! [location](super::location).

use crate::sqlfluent::ast::range::Position;
use crate::sqlfluent::ast::{
    Expression, FromClause, NodeRef, Program, SelectClause, SelectStatement, WhereClause,
};
use crate::sqlfluent::parsing::{CstNode, Role, Rule};
use crate::sqlfluent::token::Token;

use super::error::LoweringError;
use super::location::{aggregate_with_children, cst_location};

/// Lower a `program` CST into its AST.
///
/// The CST is consumed and dropped once the AST is built.
pub fn lower(cst: CstNode) -> Result<Program, LoweringError> {
    let program = lower_program(&cst)?;
    tracing::debug!(statements = program.lines.len(), "lowered program");
    Ok(program)
}

fn start_of(node: &CstNode) -> Position {
    node.location().map(|range| range.start).unwrap_or_default()
}

fn expect_rule(node: &CstNode, expected: Rule) -> Result<(), LoweringError> {
    if node.rule == expected {
        Ok(())
    } else {
        Err(LoweringError::UnexpectedRule {
            expected,
            found: node.rule,
            position: start_of(node),
        })
    }
}

fn required_node(node: &CstNode, role: Role) -> Result<&CstNode, LoweringError> {
    node.node(role).ok_or(LoweringError::MissingChild {
        rule: node.rule,
        role,
        position: start_of(node),
    })
}

fn required_token(node: &CstNode, role: Role) -> Result<&Token, LoweringError> {
    node.token(role).ok_or(LoweringError::MissingChild {
        rule: node.rule,
        role,
        position: start_of(node),
    })
}

fn lower_program(node: &CstNode) -> Result<Program, LoweringError> {
    expect_rule(node, Rule::Program)?;

    let mut lines = Vec::new();
    for line in node.nodes(Role::CodeLine) {
        expect_rule(line, Rule::CodeLine)?;
        if let Some(statement) = line.node(Role::SelectStatement) {
            lines.push(lower_select_statement(statement)?);
        }
    }

    // A program made only of broken lines (resync mode) has no tokens left
    let location = node.location().unwrap_or_default();
    let children: Vec<NodeRef<'_>> = lines.iter().map(NodeRef::SelectStatement).collect();
    let location = aggregate_with_children(location, &children);

    Ok(Program::new(lines).at(location))
}

fn lower_select_statement(node: &CstNode) -> Result<SelectStatement, LoweringError> {
    expect_rule(node, Rule::SelectStatement)?;

    let select_clause = lower_select_clause(required_node(node, Role::SelectClause)?)?;
    let from_clause = lower_from_clause(required_node(node, Role::FromClause)?)?;
    let where_clause = node
        .node(Role::WhereClause)
        .map(lower_where_clause)
        .transpose()?;

    let mut children = vec![
        NodeRef::SelectClause(&select_clause),
        NodeRef::FromClause(&from_clause),
    ];
    if let Some(clause) = &where_clause {
        children.push(NodeRef::WhereClause(clause));
    }
    let location = aggregate_with_children(cst_location(node)?, &children);

    Ok(SelectStatement::new(select_clause, from_clause, where_clause).at(location))
}

fn lower_select_clause(node: &CstNode) -> Result<SelectClause, LoweringError> {
    expect_rule(node, Rule::SelectClause)?;

    let columns: Vec<String> = node
        .tokens(Role::Identifier)
        .map(|token| token.text.clone())
        .collect();
    if columns.is_empty() {
        return Err(LoweringError::MissingChild {
            rule: node.rule,
            role: Role::Identifier,
            position: start_of(node),
        });
    }

    Ok(SelectClause::new(columns).at(cst_location(node)?))
}

fn lower_from_clause(node: &CstNode) -> Result<FromClause, LoweringError> {
    expect_rule(node, Rule::FromClause)?;
    let table = required_token(node, Role::Identifier)?;
    Ok(FromClause::new(table.text.clone()).at(cst_location(node)?))
}

fn lower_where_clause(node: &CstNode) -> Result<WhereClause, LoweringError> {
    expect_rule(node, Rule::WhereClause)?;

    let condition = lower_expression(required_node(node, Role::Expression)?)?;
    let location = aggregate_with_children(
        cst_location(node)?,
        &[NodeRef::Expression(&condition)],
    );

    Ok(WhereClause::new(condition).at(location))
}

fn lower_expression(node: &CstNode) -> Result<Expression, LoweringError> {
    expect_rule(node, Rule::Expression)?;

    let lhs = lower_atomic_expression(required_node(node, Role::Lhs)?)?;
    let operator = lower_relational_operator(required_node(node, Role::RelationalOperator)?)?;
    let rhs = lower_atomic_expression(required_node(node, Role::Rhs)?)?;

    Ok(Expression::new(lhs, operator, rhs).at(cst_location(node)?))
}

/// The literal text of an operand, integer or identifier
fn lower_atomic_expression(node: &CstNode) -> Result<String, LoweringError> {
    expect_rule(node, Rule::AtomicExpression)?;
    node.token(Role::Integer)
        .or_else(|| node.token(Role::Identifier))
        .map(|token| token.text.clone())
        .ok_or(LoweringError::MissingChild {
            rule: node.rule,
            role: Role::Integer,
            position: start_of(node),
        })
}

fn lower_relational_operator(node: &CstNode) -> Result<String, LoweringError> {
    expect_rule(node, Rule::RelationalOperator)?;
    Ok(required_token(node, Role::Operator)?.text.clone())
}
