use toi_compiler::logging::{codes, Code};
use toi_compiler::EvaluationError;

/// Single-cycle evaluation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Namespace already binds output variable '{name}'")]
    OutputAlreadyBound { name: String },

    #[error("No formula for output variable '{name}'")]
    MissingFormula { name: String },

    #[error("Evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),
}

impl EngineError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::OutputAlreadyBound { .. } => codes::scheme::OUTPUT_ALREADY_BOUND,
            Self::MissingFormula { .. } => codes::scheme::MISSING_FORMULA,
            Self::Evaluation(error) => error.error_code(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
