//! Treeviz formatter for AST nodes
//!
//! One line per node, nesting drawn with box characters:
//!
//! ```text
//! └─ Program: 1 statement(s) @0:0..0:27
//!   └─ SelectStatement: a from t where a > 1 @0:0..0:27
//!     ├─ SelectClause: a @0:0..0:8
//!     ├─ FromClause: t @0:9..0:15
//!     └─ WhereClause: a > 1 @0:16..0:27
//!       └─ Expression: a > 1 @0:22..0:27
//! ```
//!
//! Labels are truncated to 40 characters.

use crate::sqlfluent::ast::{snapshot_node, AstSnapshot, NodeRef, Program};

const MAX_LABEL: usize = 40;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(program: &Program) -> String {
    let mut result = String::new();
    append_snapshot(&mut result, &snapshot_node(NodeRef::Program(program)), "", true);
    result
}

fn append_snapshot(result: &mut String, snapshot: &AstSnapshot, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    let range = snapshot
        .attributes
        .get("range")
        .map(String::as_str)
        .unwrap_or_default();

    result.push_str(&format!(
        "{}{} {}: {} @{}\n",
        prefix,
        connector,
        snapshot.node_type,
        truncate(&snapshot.label, MAX_LABEL),
        range
    ));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    for (i, child) in snapshot.children.iter().enumerate() {
        append_snapshot(result, child, &new_prefix, i == snapshot.children.len() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlfluent::pipeline::Compiler;

    #[test]
    fn test_tree_shape() {
        let output = Compiler::default().compile("SELECT a FROM t WHERE a > 1");
        let tree = to_treeviz_str(output.ast.as_ref().unwrap());
        let lines: Vec<&str> = tree.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "└─ Program: 1 statement(s) @0:0..0:27");
        assert_eq!(lines[2], "    ├─ SelectClause: a @0:0..0:8");
        assert_eq!(lines[5], "      └─ Expression: a > 1 @0:22..0:27");
    }

    #[test]
    fn test_long_labels_truncated() {
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("abc", 3), "abc");
    }
}
