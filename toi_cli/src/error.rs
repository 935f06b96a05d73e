use std::io;
use toi_compiler::config::runtime::ConfigError;
use toi_compiler::logging::{codes, Code};
use toi_compiler::{EvaluationError, PipelineError};
use toi_scheme::{DefinitionError, EngineError, SchemeError, TruthTableError};

/// Errors ending a `toi` invocation
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error(transparent)]
    Scheme(#[from] SchemeError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    TruthTable(#[from] TruthTableError),

    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::Config(_) | Self::Logging(_) => codes::system::INITIALIZATION_FAILURE,
            Self::Pipeline(error) => error.error_code(),
            Self::Evaluation(error) => error.error_code(),
            Self::Scheme(error) => error.error_code(),
            Self::Engine(error) => error.error_code(),
            Self::TruthTable(error) => error.error_code(),
            Self::Definition(error) => error.error_code(),
            Self::Json(_) | Self::Output(_) => codes::system::INTERNAL_ERROR,
        }
    }
}
