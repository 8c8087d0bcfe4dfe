//! Location utilities for AST node building
//!
//! Node ranges are the bounding box of everything the node was built from: the tokens of its
//! CST record (keywords and commas included) and the ranges of the AST children built below
//! it. [`Range::bounding_box`] compares positions lexicographically, so the result always
//! contains every input range.

use crate::sqlfluent::ast::range::Range;
use crate::sqlfluent::ast::traits::AstNode;
use crate::sqlfluent::ast::NodeRef;
use crate::sqlfluent::parsing::CstNode;

use super::error::LoweringError;

/// Compute the range covering all `locations`, or an empty range at the origin for none
pub fn compute_location_from_locations(locations: &[Range]) -> Range {
    Range::bounding_box(locations.iter()).unwrap_or_default()
}

/// Range of every token below a CST node
pub fn cst_location(node: &CstNode) -> Result<Range, LoweringError> {
    node.location()
        .ok_or(LoweringError::EmptyNode { rule: node.rule })
}

/// Widen `primary` so it also covers each child node
pub fn aggregate_with_children(primary: Range, children: &[NodeRef<'_>]) -> Range {
    let mut locations = Vec::with_capacity(children.len() + 1);
    locations.push(primary);
    locations.extend(children.iter().map(|child| child.range().clone()));
    compute_location_from_locations(&locations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlfluent::ast::range::Position;
    use crate::sqlfluent::ast::FromClause;
    use crate::sqlfluent::parsing::Rule;

    #[test]
    fn test_empty_locations() {
        assert_eq!(compute_location_from_locations(&[]), Range::default());
    }

    #[test]
    fn test_aggregate_with_children_widens() {
        let primary = Range::new(0..6, Position::new(0, 0), Position::new(0, 6));
        let from = FromClause::new("t").at(Range::new(
            9..15,
            Position::new(1, 0),
            Position::new(1, 6),
        ));
        let location = aggregate_with_children(primary, &[NodeRef::FromClause(&from)]);
        assert_eq!(location.span, 0..15);
        assert_eq!(location.end, Position::new(1, 6));
    }

    #[test]
    fn test_cst_without_tokens_is_error() {
        let error = cst_location(&CstNode::new(Rule::FromClause)).unwrap_err();
        assert_eq!(error, LoweringError::EmptyNode { rule: Rule::FromClause });
    }
}
