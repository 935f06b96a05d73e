// truth_table/error.rs

use crate::engine::EngineError;
use toi_compiler::logging::{codes, Code};

/// Truth table enumeration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TruthTableError {
    /// Row count would be `2^count`
    #[error("Truth table over {count} variables exceeds the limit of {max}")]
    TooManyVariables { count: usize, max: usize },

    #[error("Truth table row {row} failed: {source}")]
    RowFailed {
        row: usize,
        #[source]
        source: EngineError,
    },

    #[error("Truth table serialization failed: {message}")]
    Serialization { message: String },
}

impl TruthTableError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::TooManyVariables { .. } => codes::scheme::TABLE_TOO_LARGE,
            Self::RowFailed { .. } => codes::scheme::TABLE_ROW_FAILED,
            Self::Serialization { .. } => codes::system::INTERNAL_ERROR,
        }
    }
}
