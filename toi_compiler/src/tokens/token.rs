//! Token definitions for boolean formula lexical analysis
//!
//! Every token carries its kind, the offset where it starts and the exact
//! text it was produced from. A lexical error travels as a token as well so
//! consumers see one uniform, terminated sequence.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === OPERANDS ===
    /// Letter followed by letters or digits
    Identifier,
    /// `0` or `1`
    Const,

    // === OPERATORS ===
    Union,               // +
    Intersection,        // *
    Difference,          // -
    SymmetricDifference, // \
    Negation,            // !

    // === GROUPING ===
    OpenParen,    // (
    CloseParen,   // )
    OpenBracket,  // [
    CloseBracket, // ]

    // === TERMINALS ===
    EndOfInput,
    /// Text holds the error message
    LexError,
}

/// Broad token categories used by diagnostics and metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Operand,
    Operator,
    Grouping,
    Terminal,
}

impl TokenKind {
    pub fn class(&self) -> TokenClass {
        match self {
            Self::Identifier | Self::Const => TokenClass::Operand,
            Self::Union
            | Self::Intersection
            | Self::Difference
            | Self::SymmetricDifference
            | Self::Negation => TokenClass::Operator,
            Self::OpenParen | Self::CloseParen | Self::OpenBracket | Self::CloseBracket => {
                TokenClass::Grouping
            }
            Self::EndOfInput | Self::LexError => TokenClass::Terminal,
        }
    }

    /// Check if this kind ends a token sequence
    pub fn is_terminal(&self) -> bool {
        self.class() == TokenClass::Terminal
    }

    pub fn is_opening_delimiter(&self) -> bool {
        matches!(self, Self::OpenParen | Self::OpenBracket)
    }

    /// Closing delimiter that matches an opening one
    pub fn closing_delimiter(&self) -> Option<TokenKind> {
        match self {
            Self::OpenParen => Some(Self::CloseParen),
            Self::OpenBracket => Some(Self::CloseBracket),
            _ => None,
        }
    }

    /// Human readable name used in error messages
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Const => "constant",
            Self::Union => "'+'",
            Self::Intersection => "'*'",
            Self::Difference => "'-'",
            Self::SymmetricDifference => "'\\'",
            Self::Negation => "'!'",
            Self::OpenParen => "'('",
            Self::CloseParen => "')'",
            Self::OpenBracket => "'['",
            Self::CloseBracket => "']'",
            Self::EndOfInput => "end of input",
            Self::LexError => "lexical error",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Position of the token's first character, for diagnostics only
    pub offset: usize,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, offset: usize, text: impl Into<String>) -> Self {
        Self {
            kind,
            offset,
            text: text.into(),
        }
    }

    pub fn identifier(name: impl Into<String>, offset: usize) -> Self {
        Self::new(TokenKind::Identifier, offset, name)
    }

    pub fn end_of_input(offset: usize) -> Self {
        Self::new(TokenKind::EndOfInput, offset, "")
    }

    pub fn lex_error(message: impl Into<String>, offset: usize) -> Self {
        Self::new(TokenKind::LexError, offset, message)
    }

    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => write!(f, "end of input"),
            TokenKind::LexError => write!(f, "lexical error: {}", self.text),
            _ => write!(f, "'{}'", self.text),
        }
    }
}

static SINGLE_CHAR_TOKENS: OnceLock<HashMap<u8, TokenKind>> = OnceLock::new();

fn single_char_table() -> &'static HashMap<u8, TokenKind> {
    SINGLE_CHAR_TOKENS.get_or_init(|| {
        HashMap::from([
            (b'+', TokenKind::Union),
            (b'*', TokenKind::Intersection),
            (b'-', TokenKind::Difference),
            (b'\\', TokenKind::SymmetricDifference),
            (b'!', TokenKind::Negation),
            (b'(', TokenKind::OpenParen),
            (b')', TokenKind::CloseParen),
            (b'[', TokenKind::OpenBracket),
            (b']', TokenKind::CloseBracket),
        ])
    })
}

/// Kind of a token spelled by exactly one character
pub fn classify_single_char(byte: u8) -> Option<TokenKind> {
    single_char_table().get(&byte).copied()
}

pub fn is_const_char(byte: u8) -> bool {
    byte == b'0' || byte == b'1'
}

pub fn is_identifier_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic()
}

pub fn is_identifier_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_char_table() {
        assert_eq!(classify_single_char(b'+'), Some(TokenKind::Union));
        assert_eq!(classify_single_char(b'\\'), Some(TokenKind::SymmetricDifference));
        assert_eq!(classify_single_char(b']'), Some(TokenKind::CloseBracket));
        assert_eq!(classify_single_char(b'/'), None);
        assert_eq!(classify_single_char(b'a'), None);
    }

    #[test]
    fn test_classes() {
        assert_eq!(TokenKind::Const.class(), TokenClass::Operand);
        assert_eq!(TokenKind::Negation.class(), TokenClass::Operator);
        assert!(TokenKind::LexError.is_terminal());
        assert!(!TokenKind::CloseParen.is_terminal());
    }

    #[test]
    fn test_closing_delimiters() {
        assert_eq!(
            TokenKind::OpenParen.closing_delimiter(),
            Some(TokenKind::CloseParen)
        );
        assert_eq!(
            TokenKind::OpenBracket.closing_delimiter(),
            Some(TokenKind::CloseBracket)
        );
        assert_eq!(TokenKind::CloseBracket.closing_delimiter(), None);
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::identifier("abc", 0).to_string(), "'abc'");
        assert_eq!(Token::end_of_input(3).to_string(), "end of input");
        assert_eq!(
            Token::lex_error("broken pipe", 1).to_string(),
            "lexical error: broken pipe"
        );
    }
}
