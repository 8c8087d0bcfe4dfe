//! Reference runtime
//!
//! The Rust counterpart of the query builder generated programs talk to. [`QueryBuilder`] is
//! an immutable value: every step returns a new builder. [`execute`] walks a [`Program`] and
//! returns the query strings the generated program would log, one per statement, which lets
//! compiled output be checked without a JavaScript engine.

use serde::Serialize;

use crate::sqlfluent::ast::Program;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryBuilder {
    columns: Vec<String>,
    table: String,
    conditions: Vec<String>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn from(self, table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..self
        }
    }

    /// The `where` step of the builder
    pub fn filter<I, S>(self, conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            conditions: conditions.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn execute(&self) -> String {
        fold_query(&self.columns, &self.table, &self.conditions)
    }
}

/// `SELECT <columns> FROM <table>`, plus ` WHERE <conditions>` when there are any
pub fn fold_query<C, W>(columns: &[C], table: &str, conditions: &[W]) -> String
where
    C: AsRef<str>,
    W: AsRef<str>,
{
    let columns: Vec<&str> = columns.iter().map(AsRef::as_ref).collect();
    let mut query = format!("SELECT {} FROM {}", columns.join(", "), table);
    if !conditions.is_empty() {
        let conditions: Vec<&str> = conditions.iter().map(AsRef::as_ref).collect();
        query.push_str(" WHERE ");
        query.push_str(&conditions.join(" AND "));
    }
    query
}

/// Run every statement of `program` through the builder, in order
pub fn execute(program: &Program) -> Vec<String> {
    program
        .lines
        .iter()
        .map(|statement| {
            QueryBuilder::new()
                .select(statement.select_clause.columns.iter().cloned())
                .from(statement.from_clause.table.as_str())
                .filter(statement.conditions())
                .execute()
        })
        .collect()
}
