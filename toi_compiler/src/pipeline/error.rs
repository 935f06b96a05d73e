use crate::lexical::LexerError;
use crate::logging::Code;
use crate::syntax::SyntaxError;

/// Formula compilation errors
///
/// A `LexError` token met by the parser surfaces as `LexicalAnalysis`, so
/// callers see exactly two failure categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Syntax analysis failed: {0}")]
    SyntaxAnalysis(SyntaxError),
}

impl From<SyntaxError> for PipelineError {
    fn from(error: SyntaxError) -> Self {
        match error {
            SyntaxError::Lexical(lexical) => Self::LexicalAnalysis(lexical),
            other => Self::SyntaxAnalysis(other),
        }
    }
}

impl PipelineError {
    pub fn is_lexical(&self) -> bool {
        matches!(self, Self::LexicalAnalysis(_))
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::LexicalAnalysis(error) => error.error_code(),
            Self::SyntaxAnalysis(error) => error.error_code(),
        }
    }
}
