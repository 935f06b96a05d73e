//! Grammar definitions for boolean formulas
//!
//! ```text
//! Primary       := Identifier | Const | '!' Primary | ('(' | '[') Statement (')' | ']')
//! IntersectExpr := Primary ( '*' IntersectExpr )?
//! Statement     := IntersectExpr ( ('+' | '-' | '\') Statement )?
//! Formula       := Statement EndOfInput
//! ```

pub mod ast;

pub use ast::{BinaryOperator, EvaluationError, EvaluationResult, Namespace, Node};
