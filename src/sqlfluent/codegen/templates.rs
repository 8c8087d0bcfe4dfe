//! Code templates, one per AST node kind
//!
//! [`render`] is the single dispatch point: an exhaustive match over [`NodeRef`]. Every
//! fragment is tagged with the start of the node that produced it. A node that cannot be
//! rendered yields an empty fragment at its position and a [`GenerationError`] in the
//! context; its siblings are rendered regardless.

use crate::sqlfluent::ast::range::Position;
use crate::sqlfluent::ast::{
    Expression, FromClause, NodeRef, Program, SelectClause, SelectStatement, WhereClause,
};

use super::error::GenerationError;
use super::fragment::Fragment;

const RELATIONAL_OPERATORS: &[&str] = &["<", ">"];

/// State shared by all templates of one generation run
#[derive(Debug)]
pub struct RenderContext<'a> {
    generated_file: &'a str,
    errors: Vec<GenerationError>,
}

impl<'a> RenderContext<'a> {
    pub fn new(generated_file: &'a str) -> Self {
        Self {
            generated_file,
            errors: Vec::new(),
        }
    }

    pub fn into_errors(self) -> Vec<GenerationError> {
        self.errors
    }
}

type TemplateResult = Result<Fragment, GenerationError>;

pub fn render(node: NodeRef<'_>, ctx: &mut RenderContext<'_>) -> Fragment {
    let rendered = match node {
        NodeRef::Program(program) => Ok(render_program(program, ctx)),
        NodeRef::SelectStatement(statement) => Ok(render_select_statement(statement, ctx)),
        NodeRef::SelectClause(clause) => render_select_clause(clause),
        NodeRef::FromClause(clause) => render_from_clause(clause),
        NodeRef::WhereClause(clause) => Ok(render_where_clause(clause, ctx)),
        NodeRef::Expression(expression) => render_expression(expression),
    };

    rendered.unwrap_or_else(|error| {
        tracing::warn!(%error, "node not rendered");
        let position = error.position();
        ctx.errors.push(error);
        Fragment::new(position)
    })
}

fn check_literal(text: &str, position: Position) -> Result<(), GenerationError> {
    if text.contains(['"', '\\', '\n', '\r']) {
        return Err(GenerationError::UnsafeLiteral {
            text: text.to_string(),
            position,
        });
    }
    Ok(())
}

fn render_program(program: &Program, ctx: &mut RenderContext<'_>) -> Fragment {
    let mut fragment = Fragment::new(program.location.start)
        .text("try { // first-line\n")
        .text("console.log(\"..:: START ::..\");\n");

    for (index, line) in program.lines.iter().enumerate() {
        fragment.push(render(NodeRef::SelectStatement(line), ctx));
        fragment.push_text(format!("\n/* line: {} */\n", index));
    }

    fragment
        .text("} catch (e) {\n")
        .text("debugger;\n")
        .text("const err = new Error(e.message);\n")
        .text("throw err;\n")
        .text("}\n")
        .text(format!("//# sourceMappingURL={}.map", ctx.generated_file))
}

fn render_select_statement(statement: &SelectStatement, ctx: &mut RenderContext<'_>) -> Fragment {
    let mut fragment = Fragment::new(statement.location.start)
        .text("/* Query Begins */\n")
        .text("{\n")
        .text("const query = new QueryBuilder();\n")
        .text("const result = query")
        .child(render(NodeRef::SelectClause(&statement.select_clause), ctx))
        .text("\n\t")
        .child(render(NodeRef::FromClause(&statement.from_clause), ctx))
        .text("\n\t");

    if let Some(clause) = &statement.where_clause {
        fragment.push(render(NodeRef::WhereClause(clause), ctx));
        fragment.push_text("\n\t");
    }

    fragment.text(".execute();\n").text("}")
}

fn render_select_clause(clause: &SelectClause) -> TemplateResult {
    let position = clause.location.start;
    if clause.columns.is_empty() {
        return Err(GenerationError::EmptyColumnList { position });
    }

    let mut columns = Vec::with_capacity(clause.columns.len());
    for column in &clause.columns {
        check_literal(column, position)?;
        columns.push(format!("\"{}\"", column));
    }

    Ok(Fragment::new(position).text(format!(".select({})", columns.join(", "))))
}

fn render_from_clause(clause: &FromClause) -> TemplateResult {
    let position = clause.location.start;
    check_literal(&clause.table, position)?;
    Ok(Fragment::new(position).text(format!(".from(\"{}\")", clause.table)))
}

fn render_where_clause(clause: &WhereClause, ctx: &mut RenderContext<'_>) -> Fragment {
    Fragment::new(clause.location.start)
        .text(".where([")
        .child(render(NodeRef::Expression(&clause.condition), ctx))
        .text("])")
}

fn render_expression(expression: &Expression) -> TemplateResult {
    let position = expression.location.start;
    check_literal(&expression.lhs, position)?;
    check_literal(&expression.rhs, position)?;
    if !RELATIONAL_OPERATORS.contains(&expression.operator.as_str()) {
        return Err(GenerationError::UnsupportedOperator {
            operator: expression.operator.clone(),
            position,
        });
    }

    Ok(Fragment::new(position).text(format!("\"{}\"", expression.condition())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(node: NodeRef<'_>) -> (String, Vec<GenerationError>) {
        let mut ctx = RenderContext::new("codegen.js");
        let text = render(node, &mut ctx).to_text();
        (text, ctx.into_errors())
    }

    #[test]
    fn test_select_clause_keeps_order() {
        let clause = SelectClause::new(vec!["b".into(), "a".into(), "b".into()]);
        let (text, errors) = rendered(NodeRef::SelectClause(&clause));
        assert_eq!(text, r#".select("b", "a", "b")"#);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_where_clause() {
        let clause = WhereClause::new(Expression::new("i", "<", "0"));
        let (text, _) = rendered(NodeRef::WhereClause(&clause));
        assert_eq!(text, r#".where(["i < 0"])"#);
    }

    #[test]
    fn test_statement_without_where() {
        let statement = SelectStatement::new(
            SelectClause::new(vec!["a".into()]),
            FromClause::new("t"),
            None,
        );
        let (text, _) = rendered(NodeRef::SelectStatement(&statement));
        assert_eq!(
            text,
            "/* Query Begins */\n{\nconst query = new QueryBuilder();\nconst result = query.select(\"a\")\n\t.from(\"t\")\n\t.execute();\n}"
        );
    }

    #[test]
    fn test_empty_program() {
        let (text, errors) = rendered(NodeRef::Program(&Program::new(Vec::new())));
        assert!(errors.is_empty());
        assert!(text.starts_with("try { // first-line\n"));
        assert!(text.ends_with("}\n//# sourceMappingURL=codegen.js.map"));
        assert!(!text.contains("QueryBuilder"));
    }

    #[test]
    fn test_empty_columns_is_error() {
        let clause = SelectClause::new(Vec::new());
        let (text, errors) = rendered(NodeRef::SelectClause(&clause));
        assert!(text.is_empty());
        assert!(matches!(errors[0], GenerationError::EmptyColumnList { .. }));
    }

    #[test]
    fn test_unsafe_literal_is_error() {
        let clause = FromClause::new("t\"); evil(\"");
        let (_, errors) = rendered(NodeRef::FromClause(&clause));
        assert!(matches!(errors[0], GenerationError::UnsafeLiteral { .. }));
    }

    #[test]
    fn test_unsupported_operator() {
        let expression = Expression::new("a", "=", "1");
        let (text, errors) = rendered(NodeRef::Expression(&expression));
        assert!(text.is_empty());
        assert_eq!(
            errors,
            vec![GenerationError::UnsupportedOperator {
                operator: "=".into(),
                position: Position::default(),
            }]
        );
    }

    #[test]
    fn test_siblings_rendered_after_error() {
        let statement = SelectStatement::new(
            SelectClause::new(Vec::new()),
            FromClause::new("t"),
            Some(WhereClause::new(Expression::new("a", ">", "1"))),
        );
        let (text, errors) = rendered(NodeRef::SelectStatement(&statement));
        assert_eq!(errors.len(), 1);
        assert!(text.contains("const result = query\n\t.from(\"t\")"));
        assert!(text.contains(".where([\"a > 1\"])"));
    }
}
