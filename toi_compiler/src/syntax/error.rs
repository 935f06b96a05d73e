//! Syntax errors for token-to-AST transformation
//!
//! Every variant carries the offset of the token it concerns.

use crate::config::compile_time::syntax::MAX_PARSE_DEPTH;
use crate::lexical::LexerError;
use crate::logging::{codes, Code};
use crate::tokens::{Token, TokenKind};

pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Unexpected token: expected {expected}, found '{found}' at offset {offset}")]
    UnexpectedToken {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("Unexpected end of input: expected {expected} at offset {offset}")]
    UnexpectedEndOfInput { expected: String, offset: usize },

    #[error("Unmatched delimiter: '{opening}' at offset {opening_offset} closed by {found} at offset {offset}")]
    UnmatchedDelimiter {
        opening: String,
        opening_offset: usize,
        found: String,
        offset: usize,
    },

    #[error("Missing operand after '{operator}' at offset {offset}")]
    MissingOperand { operator: String, offset: usize },

    #[error("Unexpected trailing input '{found}' at offset {offset}")]
    TrailingInput { found: String, offset: usize },

    #[error("Maximum parse depth {MAX_PARSE_DEPTH} exceeded at offset {offset}")]
    MaxRecursionDepth { offset: usize },

    #[error("Lexical error: {0}")]
    Lexical(LexerError),
}

impl SyntaxError {
    /// Create unexpected token error
    pub fn unexpected_token(expected: &str, found: &Token) -> Self {
        Self::UnexpectedToken {
            expected: expected.to_string(),
            found: found.text.clone(),
            offset: found.offset,
        }
    }

    pub fn unexpected_end_of_input(expected: &str, offset: usize) -> Self {
        Self::UnexpectedEndOfInput {
            expected: expected.to_string(),
            offset,
        }
    }

    pub fn unmatched_delimiter(opening: &Token, found: &Token) -> Self {
        Self::UnmatchedDelimiter {
            opening: opening.text.clone(),
            opening_offset: opening.offset,
            found: found.kind.describe().to_string(),
            offset: found.offset,
        }
    }

    pub fn missing_operand(operator: &Token) -> Self {
        Self::MissingOperand {
            operator: operator.text.clone(),
            offset: operator.offset,
        }
    }

    pub fn trailing_input(found: &Token) -> Self {
        Self::TrailingInput {
            found: found.text.clone(),
            offset: found.offset,
        }
    }

    pub fn max_recursion_depth(offset: usize) -> Self {
        Self::MaxRecursionDepth { offset }
    }

    /// Error for a position where `expected` did not match `found`
    ///
    /// Terminal tokens get their own variants so callers can tell a premature
    /// end or a lexical failure from a misplaced token.
    pub fn at_token(expected: &str, found: &Token) -> Self {
        match found.kind {
            TokenKind::LexError => Self::Lexical(LexerError::from_token(found)),
            TokenKind::EndOfInput => Self::unexpected_end_of_input(expected, found.offset),
            _ => Self::unexpected_token(expected, found),
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, Self::Lexical(_))
    }

    /// Offset of the offending token
    pub fn offset(&self) -> usize {
        match self {
            Self::UnexpectedToken { offset, .. }
            | Self::UnexpectedEndOfInput { offset, .. }
            | Self::UnmatchedDelimiter { offset, .. }
            | Self::MissingOperand { offset, .. }
            | Self::TrailingInput { offset, .. }
            | Self::MaxRecursionDepth { offset } => *offset,
            Self::Lexical(LexerError::Reported { offset, .. })
            | Self::Lexical(LexerError::ReadFailure { offset, .. })
            | Self::Lexical(LexerError::IdentifierTooLong { offset, .. }) => *offset,
            Self::Lexical(_) => 0,
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::UnexpectedEndOfInput { .. } => codes::syntax::UNEXPECTED_END_OF_INPUT,
            Self::UnmatchedDelimiter { .. } => codes::syntax::UNMATCHED_DELIMITER,
            Self::MissingOperand { .. } => codes::syntax::MISSING_OPERAND,
            Self::TrailingInput { .. } => codes::syntax::TRAILING_INPUT,
            Self::MaxRecursionDepth { .. } => codes::syntax::MAX_RECURSION_DEPTH,
            Self::Lexical(error) => error.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_at_token_classifies_terminals() {
        assert_matches!(
            SyntaxError::at_token("expression", &Token::end_of_input(4)),
            SyntaxError::UnexpectedEndOfInput { offset: 4, .. }
        );
        assert_matches!(
            SyntaxError::at_token("expression", &Token::lex_error("bad read", 2)),
            SyntaxError::Lexical(LexerError::Reported { offset: 2, .. })
        );
        assert_matches!(
            SyntaxError::at_token("expression", &Token::new(TokenKind::CloseParen, 1, ")")),
            SyntaxError::UnexpectedToken { offset: 1, .. }
        );
    }

    #[test]
    fn test_error_codes_and_offsets() {
        let error = SyntaxError::missing_operand(&Token::new(TokenKind::Union, 3, "+"));
        assert_eq!(error.error_code(), codes::syntax::MISSING_OPERAND);
        assert_eq!(error.offset(), 3);
        assert_eq!(error.to_string(), "Missing operand after '+' at offset 3");

        let error = SyntaxError::at_token("expression", &Token::lex_error("oops", 9));
        assert!(error.is_lexical());
        assert_eq!(error.offset(), 9);
        assert_eq!(error.error_code(), codes::lexical::LEXICAL_FAILURE);
    }

    #[test]
    fn test_unmatched_delimiter_message() {
        let error = SyntaxError::unmatched_delimiter(
            &Token::new(TokenKind::OpenParen, 0, "("),
            &Token::new(TokenKind::CloseBracket, 2, "]"),
        );
        assert_eq!(
            error.to_string(),
            "Unmatched delimiter: '(' at offset 0 closed by ']' at offset 2"
        );
    }
}
