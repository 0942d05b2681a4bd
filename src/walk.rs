//! Depth-bounded pre-order traversal over [`Expression`] trees.
//!
//! Every rule that inspects a predicate goes through [`walk_preorder`] or
//! [`collect_matching`]. The walk is iterative with an explicit stack, so
//! input nesting never turns into native recursion. Nodes are visited
//! parent first, then the left subtree, then the right subtree; children of
//! [`Expression::Unknown`] are visited in their stored order.
//!
//! ```
//! use sql_lint::{ast::Expression, walk::collect_matching};
//!
//! let predicate = Expression::binary(
//!     "OR",
//!     Expression::binary("=", Expression::column("a"), Expression::number("1")),
//!     Expression::binary("=", Expression::column("b"), Expression::number("2"))
//! );
//! let ors = collect_matching(&predicate, 16, |e| {
//!     matches!(e, Expression::BinaryOp { operator, .. } if operator.as_str() == "OR")
//! })
//! .unwrap();
//! assert_eq!(ors.len(), 1);
//! ```

use smallvec::SmallVec;

use crate::{ast::Expression, error::AnalysisError};

/// Receives every node of a walk.
pub trait Visitor<'a> {
    /// `depth` is 1 for the root.
    fn visit(&mut self, expr: &'a Expression, depth: usize);
}

impl<'a, F> Visitor<'a> for F
where
    F: FnMut(&'a Expression, usize)
{
    fn visit(&mut self, expr: &'a Expression, depth: usize) {
        self(expr, depth)
    }
}

/// Visit `root` and its descendants in pre-order.
///
/// # Errors
///
/// [`AnalysisError::DepthLimitExceeded`] as soon as a node deeper than
/// `max_depth` is reached. Nodes above it have already been visited.
pub fn walk_preorder<'a, V>(
    root: &'a Expression,
    max_depth: usize,
    visitor: &mut V
) -> Result<(), AnalysisError>
where
    V: Visitor<'a> + ?Sized
{
    let mut stack: SmallVec<[(&'a Expression, usize); 32]> = SmallVec::new();
    stack.push((root, 1));
    while let Some((expr, depth)) = stack.pop() {
        if depth > max_depth {
            return Err(AnalysisError::DepthLimitExceeded {
                limit: max_depth
            });
        }
        visitor.visit(expr, depth);
        // reversed so the leftmost child is popped first
        for child in expr.children().into_iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    Ok(())
}

/// Nodes for which `predicate` holds, in visit order.
pub fn collect_matching<'a, P>(
    root: &'a Expression,
    max_depth: usize,
    predicate: P
) -> Result<Vec<&'a Expression>, AnalysisError>
where
    P: Fn(&Expression) -> bool
{
    let mut found = Vec::new();
    walk_preorder(root, max_depth, &mut |expr: &'a Expression, _depth: usize| {
        if predicate(expr) {
            found.push(expr);
        }
    })?;
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deepest(root: &Expression, max_depth: usize) -> Result<usize, AnalysisError> {
        let mut deepest = 0;
        walk_preorder(root, max_depth, &mut |_: &Expression, depth: usize| {
            deepest = deepest.max(depth);
        })?;
        Ok(deepest)
    }

    fn chain(ops: usize) -> Expression {
        let mut expr = Expression::column("c0");
        for i in 1..=ops {
            expr = Expression::binary("OR", expr, Expression::column(format!("c{}", i)));
        }
        expr
    }

    #[test]
    fn preorder_visits_parent_left_right() {
        let tree = Expression::binary(
            "AND",
            Expression::binary("=", Expression::column("a"), Expression::number("1")),
            Expression::column("b")
        );
        let mut seen = Vec::new();
        walk_preorder(&tree, 8, &mut |e: &Expression, _: usize| {
            seen.push(match e {
                Expression::BinaryOp {
                    operator, ..
                } => operator.to_string(),
                Expression::ColumnRef {
                    name
                } => name.to_string(),
                Expression::Literal {
                    value, ..
                } => value.clone(),
                Expression::Unknown {
                    text, ..
                } => text.clone()
            });
        })
        .unwrap();
        assert_eq!(seen, ["AND", "=", "a", "1", "b"]);
    }

    #[test]
    fn unknown_children_are_walked() {
        let tree = Expression::unknown(
            "NOT",
            vec![Expression::binary(
                "OR",
                Expression::column("a"),
                Expression::column("b")
            )]
        );
        let ors = collect_matching(&tree, 8, |e| {
            matches!(e, Expression::BinaryOp { operator, .. } if operator.as_str() == "OR")
        })
        .unwrap();
        assert_eq!(ors.len(), 1);
    }

    #[test]
    fn depth_of_chain() {
        assert_eq!(deepest(&chain(3), 64).unwrap(), 4);
    }

    #[test]
    fn depth_limit_is_enforced() {
        let err = deepest(&chain(10), 5).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::DepthLimitExceeded {
                limit: 5
            }
        );
    }

    #[test]
    fn exact_limit_is_allowed() {
        assert!(walk_preorder(&chain(4), 5, &mut |_: &Expression, _: usize| {}).is_ok());
    }
}
