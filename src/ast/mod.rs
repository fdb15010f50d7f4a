pub mod check;
pub mod nodes;
pub mod span;
pub mod walk;

pub use check::{check_spans, SpanProblem};
pub use nodes::*;
pub use span::Spanned;
pub use walk::{inspect, walk, Node, VisitResult, Visitor};
