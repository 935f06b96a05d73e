use toi_compiler::logging::{codes, Code};
use toi_compiler::PipelineError;

/// Scheme construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemeError {
    #[error("Input variable '{name}' has a formula")]
    InputHasFormula { name: String },

    #[error("Output variable '{name}' has no formula")]
    OutputMissingFormula { name: String },

    #[error("Formula for '{name}' is invalid: {source}")]
    InvalidFormula {
        name: String,
        #[source]
        source: PipelineError,
    },
}

impl SchemeError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::InputHasFormula { .. } => codes::scheme::INPUT_HAS_FORMULA,
            Self::OutputMissingFormula { .. } => codes::scheme::OUTPUT_MISSING_FORMULA,
            Self::InvalidFormula { .. } => codes::scheme::INVALID_FORMULA,
        }
    }
}
