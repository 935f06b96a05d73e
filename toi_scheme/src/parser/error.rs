use crate::scheme::SchemeError;
use std::path::PathBuf;
use toi_compiler::logging::{codes, Code};

/// Scheme definition loading errors
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error("Cannot access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse line {line}: '{content}'")]
    MalformedLine { line: usize, content: String },

    #[error("Definition has no '{header}:' line")]
    MissingHeader { header: &'static str },

    #[error("Formula for '{name}' not defined")]
    UndefinedFormula { name: String },

    #[error(transparent)]
    Scheme(#[from] SchemeError),
}

impl DefinitionError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::Io { .. } => codes::definition::IO_ERROR,
            Self::MalformedLine { .. } => codes::definition::MALFORMED_LINE,
            Self::MissingHeader { .. } => codes::definition::MISSING_HEADER,
            Self::UndefinedFormula { .. } => codes::definition::UNDEFINED_FORMULA,
            Self::Scheme(error) => error.error_code(),
        }
    }
}
