//! Span consistency checks.

use super::span::Spanned;
use super::walk::{walk, Node, VisitResult, Visitor};
use crate::token::Pos;
use log::warn;
use std::convert::Infallible;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanProblem {
    /// `end` lies before `pos`.
    Inverted { kind: &'static str, pos: Pos, end: Pos },
    /// A child starts before its parent.
    Escapes {
        kind: &'static str,
        pos: Pos,
        parent: &'static str,
        parent_pos: Pos,
    },
}

impl fmt::Display for SpanProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanProblem::Inverted { kind, pos, end } => {
                write!(f, "{} ends at {} before it starts at {}", kind, end, pos)
            }
            SpanProblem::Escapes {
                kind,
                pos,
                parent,
                parent_pos,
            } => write!(
                f,
                "{} at {} starts before its parent {} at {}",
                kind, pos, parent, parent_pos
            ),
        }
    }
}

#[derive(Default)]
struct SpanChecker {
    /// Kinds and start positions of the nodes currently being entered.
    stack: Vec<(&'static str, Pos)>,
    problems: Vec<SpanProblem>,
}

impl<'a> Visitor<'a> for SpanChecker {
    type Error = Infallible;

    fn visit(&mut self, node: Node<'a>) -> Result<VisitResult, Infallible> {
        let (pos, end) = (node.pos(), node.end());
        if pos.is_valid() && end.is_valid() && end < pos {
            self.problems.push(SpanProblem::Inverted {
                kind: node.kind(),
                pos,
                end,
            });
        }
        if let Some(&(parent, parent_pos)) = self.stack.iter().rev().find(|(_, p)| p.is_valid()) {
            if pos.is_valid() && pos < parent_pos {
                self.problems.push(SpanProblem::Escapes {
                    kind: node.kind(),
                    pos,
                    parent,
                    parent_pos,
                });
            }
        }
        if !node.is_leaf() {
            self.stack.push((node.kind(), pos));
        }
        Ok(VisitResult::Continue)
    }

    fn leave(&mut self, _node: Node<'a>) -> Result<(), Infallible> {
        self.stack.pop();
        Ok(())
    }
}

/// Walks the tree and reports every span that breaks ordering.
pub fn check_spans<'a>(node: impl Into<Node<'a>>) -> Vec<SpanProblem> {
    let mut checker = SpanChecker::default();
    match walk(&mut checker, node.into()) {
        Ok(()) => {}
        Err(never) => match never {},
    }
    for problem in &checker.problems {
        warn!("{}", problem);
    }
    checker.problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::nodes::*;

    #[test]
    fn test_well_formed_tree_has_no_problems() {
        let stmt = Stmt::expr(Expr::Call(CallExpr {
            func: Ident::at("echo", Pos(1)),
            recv: vec![Expr::Ident(Ident::at("hi", Pos(6)))],
        }));
        assert!(check_spans(&stmt).is_empty());
    }

    #[test]
    fn test_inverted_span_is_reported() {
        let expr = Expr::BasicTest(BasicTestExpr {
            lbrack: Pos(10),
            x: Box::new(Expr::Ident(Ident::at("x", Pos(12)))),
            rbrack: Pos(2),
        });
        let problems = check_spans(&expr);
        assert_eq!(
            problems,
            vec![SpanProblem::Inverted {
                kind: "BasicTestExpr",
                pos: Pos(10),
                end: Pos(3),
            }]
        );
    }

    #[test]
    fn test_child_before_parent_is_reported() {
        let expr = Expr::ArithExp(ArithExp {
            dollar: Pos(5),
            lparen: Pos(6),
            x: Box::new(Expr::Ident(Ident::at("n", Pos(2)))),
            rparen: Pos(10),
        });
        let problems = check_spans(&expr);
        assert_eq!(problems.len(), 1);
        assert!(matches!(problems[0], SpanProblem::Escapes { kind: "Ident", .. }));
    }
}
