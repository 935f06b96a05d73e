//! Abstract syntax tree for boolean formulas

pub mod eval;
pub mod nodes;

pub use eval::{EvaluationError, EvaluationResult, Namespace};
pub use nodes::{BinaryOperator, Node};
