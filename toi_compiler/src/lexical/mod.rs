//! Lexical analysis module
//!
//! Turns formula text into a terminated token sequence, either pulled
//! directly by the consumer or produced on a dedicated thread.

pub mod analyzer;
pub mod channel;

use crate::tokens::Token;

pub use analyzer::{LexerError, LexicalMetrics, Tokenizer};
pub use channel::{spawn_tokenizer, spawn_tokenizer_with_preferences, ChannelSource};

/// Tokenize a complete in-memory formula
pub fn tokenize(text: &str) -> Vec<Token> {
    Tokenizer::new(text.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenKind;

    #[test]
    fn test_tokenize_convenience() {
        let tokens = tokenize("x+y");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Union,
                TokenKind::Identifier,
                TokenKind::EndOfInput
            ]
        );
    }
}
