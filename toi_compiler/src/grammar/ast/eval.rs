//! Formula evaluation over a namespace of boolean bindings

use super::nodes::Node;
use crate::logging::codes;
use std::collections::HashMap;

/// Variable name to value bindings
pub type Namespace = HashMap<String, bool>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("Variable '{name}' is not defined")]
    UndefinedVariable { name: String },
}

impl EvaluationError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            EvaluationError::UndefinedVariable { .. } => codes::evaluation::UNDEFINED_VARIABLE,
        }
    }
}

pub type EvaluationResult<T> = Result<T, EvaluationError>;

impl Node {
    /// Evaluate against `namespace`
    ///
    /// Both operands of a binary node are always evaluated, so an undefined
    /// variable on either side is reported even when the other side decides
    /// the value. The left operand's error wins.
    pub fn evaluate(&self, namespace: &Namespace) -> EvaluationResult<bool> {
        match self {
            Node::Identifier(name) => {
                namespace
                    .get(name)
                    .copied()
                    .ok_or_else(|| EvaluationError::UndefinedVariable { name: name.clone() })
            }
            Node::Const(value) => Ok(*value),
            Node::Negation(operand) => Ok(!operand.evaluate(namespace)?),
            Node::Binary(operator, left, right) => {
                let left = left.evaluate(namespace)?;
                let right = right.evaluate(namespace)?;
                Ok(operator.apply(left, right))
            }
        }
    }
}
