//! JavaScript rendition of the query builder targeted by generated programs
//!
//! Emitted in front of the program when the runtime is requested, so the generated file runs
//! on its own.

use super::fragment::Fragment;

pub const QUERY_BUILDER_JS: &str = r#"class QueryBuilder {
  constructor(columns = [], table = "", conditions = []) {
    this.columns = columns;
    this.table = table;
    this.conditions = conditions;
  }

  select(...columns) {
    return new QueryBuilder(columns, this.table, this.conditions);
  }

  from(table) {
    return new QueryBuilder(this.columns, table, this.conditions);
  }

  where(conditions) {
    return new QueryBuilder(this.columns, this.table, conditions);
  }

  execute() {
    let query = `SELECT ${this.columns.join(", ")} FROM ${this.table}`;
    if (this.conditions && this.conditions.length > 0) {
      query += ` WHERE ${this.conditions.join(" AND ")}`;
    }
    console.log("execute", query);
    return query;
  }
}
"#;

/// The runtime as an unpositioned fragment; it produces no mappings
pub fn runtime_fragment() -> Fragment {
    Fragment::unpositioned().text(QUERY_BUILDER_JS)
}
