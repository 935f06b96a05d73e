//! Streaming tokenizer over any byte reader
//!
//! Reads through a buffered reader one byte at a time and yields tokens
//! lazily. The sequence always ends with exactly one `EndOfInput` or
//! `LexError` token, after which the iterator is exhausted.

use crate::config::compile_time::lexical::*;
use crate::config::runtime::{runtime_config, LexicalPreferences};
use crate::logging::codes;
use crate::tokens::token::{
    classify_single_char, is_const_char, is_identifier_continue, is_identifier_start,
};
use crate::tokens::{Token, TokenClass, TokenKind};
use crate::{log_debug, log_error, log_success};
use std::io::{self, BufRead, BufReader, Read};

/// Lexical analysis errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Read failure at offset {offset}: {message}")]
    ReadFailure { message: String, offset: usize },

    #[error("Identifier too long: {length} characters (max {MAX_IDENTIFIER_LENGTH}) at offset {offset}")]
    IdentifierTooLong { length: usize, offset: usize },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },

    #[error("Tokenizer thread could not start: {message}")]
    ProducerUnavailable { message: String },

    /// A `LexError` token as seen by a consumer of the token sequence
    #[error("{message} (offset {offset})")]
    Reported { message: String, offset: usize },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::ReadFailure { .. } => codes::lexical::READ_FAILURE,
            LexerError::IdentifierTooLong { .. } => codes::lexical::IDENTIFIER_TOO_LONG,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
            LexerError::ProducerUnavailable { .. } => codes::system::INITIALIZATION_FAILURE,
            LexerError::Reported { .. } => codes::lexical::LEXICAL_FAILURE,
        }
    }

    /// Rebuild the error carried by a `LexError` token
    pub fn from_token(token: &Token) -> Self {
        LexerError::Reported {
            message: token.text.clone(),
            offset: token.offset,
        }
    }
}

/// Per-class token counts collected while tokenizing
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub identifier_tokens: usize,
    pub const_tokens: usize,
    pub operator_tokens: usize,
    pub grouping_tokens: usize,
    pub skipped_chars: usize,
    pub max_identifier_length: usize,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token) {
        self.total_tokens += 1;

        match token.kind.class() {
            TokenClass::Operand if token.kind == TokenKind::Identifier => {
                self.identifier_tokens += 1;
                self.max_identifier_length = self.max_identifier_length.max(token.text.len());
            }
            TokenClass::Operand => self.const_tokens += 1,
            TokenClass::Operator => self.operator_tokens += 1,
            TokenClass::Grouping => self.grouping_tokens += 1,
            TokenClass::Terminal => {}
        }
    }

    pub(crate) fn record_skipped(&mut self) {
        self.skipped_chars += 1;
    }
}

/// Pull-mode tokenizer; each `next()` reads just enough input for one token
pub struct Tokenizer<R: Read> {
    reader: BufReader<R>,
    offset: usize,
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
    finished: bool,
}

impl<R: Read> Tokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self::with_preferences(reader, runtime_config().lexical.clone())
    }

    pub fn with_preferences(reader: R, preferences: LexicalPreferences) -> Self {
        Self {
            reader: BufReader::with_capacity(READ_BUFFER_SIZE, reader),
            offset: 0,
            metrics: LexicalMetrics::default(),
            preferences,
            finished: false,
        }
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// Offset of the next unread character
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn peek_byte(&mut self) -> Result<Option<u8>, LexerError> {
        loop {
            match self.reader.fill_buf() {
                Ok(buffer) => return Ok(buffer.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(LexerError::ReadFailure {
                        message: e.to_string(),
                        offset: self.offset,
                    })
                }
            }
        }
    }

    fn bump(&mut self) {
        self.reader.consume(1);
    }

    fn scan(&mut self) -> Result<Token, LexerError> {
        loop {
            let Some(byte) = self.peek_byte()? else {
                return Ok(Token::end_of_input(self.offset));
            };

            if let Some(kind) = classify_single_char(byte) {
                return Ok(self.single_char_token(kind, byte));
            }

            if is_const_char(byte) {
                return Ok(self.single_char_token(TokenKind::Const, byte));
            }

            if is_identifier_start(byte) {
                return self.scan_identifier();
            }

            // Whitespace and any unrecognized character are skipped alike
            if byte > b' ' {
                self.metrics.record_skipped();
            }
            self.bump();
            self.offset += 1;
        }
    }

    fn single_char_token(&mut self, kind: TokenKind, byte: u8) -> Token {
        self.bump();
        let token = Token::new(kind, self.offset, char::from(byte).to_string());
        self.offset += 1;
        token
    }

    fn scan_identifier(&mut self) -> Result<Token, LexerError> {
        let start = self.offset;
        let mut name = String::new();

        while let Some(byte) = self.peek_byte()? {
            if !is_identifier_continue(byte) {
                break;
            }
            if name.len() == MAX_IDENTIFIER_LENGTH {
                return Err(LexerError::IdentifierTooLong {
                    length: name.len() + 1,
                    offset: start,
                });
            }
            name.push(char::from(byte));
            self.bump();
        }

        self.offset += name.len();
        Ok(Token::identifier(name, start))
    }

    fn error_token(&self, error: LexerError) -> Token {
        let message = error.to_string();
        log_error!(error.error_code(), &message, offset = self.offset);
        Token::lex_error(message, self.offset)
    }

    fn report_completion(&self, terminal: &Token) {
        if self.preferences.collect_metrics {
            log_debug!("Tokenizer metrics",
                "total_tokens" => self.metrics.total_tokens,
                "identifiers" => self.metrics.identifier_tokens,
                "constants" => self.metrics.const_tokens,
                "operators" => self.metrics.operator_tokens,
                "grouping" => self.metrics.grouping_tokens,
                "skipped_chars" => self.metrics.skipped_chars
            );
        }

        if terminal.kind == TokenKind::EndOfInput {
            log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization completed",
                "tokens" => self.metrics.total_tokens,
                "characters" => self.offset
            );
        }
    }
}

impl<R: Read> Iterator for Tokenizer<R> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let token = match self.scan() {
            Ok(token) if !token.is_terminal() && self.metrics.total_tokens >= MAX_TOKEN_COUNT => {
                self.error_token(LexerError::TooManyTokens {
                    count: self.metrics.total_tokens + 1,
                })
            }
            Ok(token) => token,
            Err(error) => self.error_token(error),
        };

        self.metrics.record_token(&token);

        if token.is_terminal() {
            self.finished = true;
            self.report_completion(&token);
        }

        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::token_stream::validation::validate_token_sequence;

    fn kinds(text: &str) -> Vec<TokenKind> {
        Tokenizer::new(text.as_bytes()).map(|t| t.kind).collect()
    }

    /// Reader that fails after handing out its prefix
    struct FailingReader {
        prefix: Vec<u8>,
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.served {
                self.served = true;
                let n = self.prefix.len().min(buf.len());
                buf[..n].copy_from_slice(&self.prefix[..n]);
                return Ok(n);
            }
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    /// Reader that is interrupted once before every chunk
    struct InterruptingReader<'a> {
        data: &'a [u8],
        interrupt_next: bool,
    }

    impl Read for InterruptingReader<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.interrupt_next {
                self.interrupt_next = false;
                return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
            }
            self.interrupt_next = true;
            let n = self.data.len().min(buf.len()).min(2);
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_whitespace_only_input() {
        assert_eq!(kinds(""), vec![TokenKind::EndOfInput]);
        assert_eq!(kinds("  \t\r\n "), vec![TokenKind::EndOfInput]);
    }

    #[test]
    fn test_full_operator_mix() {
        assert_eq!(
            kinds("a + c * d - !(q \\ 1) "),
            vec![
                TokenKind::Identifier,
                TokenKind::Union,
                TokenKind::Identifier,
                TokenKind::Intersection,
                TokenKind::Identifier,
                TokenKind::Difference,
                TokenKind::Negation,
                TokenKind::OpenParen,
                TokenKind::Identifier,
                TokenKind::SymmetricDifference,
                TokenKind::Const,
                TokenKind::CloseParen,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_offsets_and_text() {
        let tokens: Vec<Token> = Tokenizer::new(" ab1 *[0]".as_bytes()).collect();

        assert_eq!(tokens[0], Token::identifier("ab1", 1));
        assert_eq!(tokens[1], Token::new(TokenKind::Intersection, 5, "*"));
        assert_eq!(tokens[2], Token::new(TokenKind::OpenBracket, 6, "["));
        assert_eq!(tokens[3], Token::new(TokenKind::Const, 7, "0"));
        assert_eq!(tokens[4], Token::new(TokenKind::CloseBracket, 8, "]"));
        assert_eq!(tokens[5], Token::end_of_input(9));
        assert!(validate_token_sequence(&tokens).is_ok());
    }

    #[test]
    fn test_constants_are_single_characters() {
        let tokens: Vec<Token> = Tokenizer::new("01".as_bytes()).collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "0");
        assert_eq!(tokens[1].text, "1");

        // A digit after a letter belongs to the identifier
        let tokens: Vec<Token> = Tokenizer::new("1a1".as_bytes()).collect();
        assert_eq!(tokens[0].kind, TokenKind::Const);
        assert_eq!(tokens[1], Token::identifier("a1", 1));
    }

    #[test]
    fn test_unrecognized_characters_are_skipped() {
        let mut tokenizer = Tokenizer::new("a _ 7 & b".as_bytes());
        let tokens: Vec<Token> = tokenizer.by_ref().collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "a");
        assert_eq!(tokens[1], Token::identifier("b", 8));
        assert_eq!(tokenizer.metrics().skipped_chars, 3);
    }

    #[test]
    fn test_underscore_ends_identifier() {
        let tokens: Vec<Token> = Tokenizer::new("foo_bar".as_bytes()).collect();
        assert_eq!(tokens[0], Token::identifier("foo", 0));
        assert_eq!(tokens[1], Token::identifier("bar", 4));
    }

    #[test]
    fn test_iterator_is_exhausted_after_terminal() {
        let mut tokenizer = Tokenizer::new("x".as_bytes());
        assert!(tokenizer.next().is_some());
        assert_eq!(tokenizer.next().map(|t| t.kind), Some(TokenKind::EndOfInput));
        assert!(tokenizer.next().is_none());
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn test_read_failure_becomes_lex_error() {
        let reader = FailingReader {
            prefix: b"a + ".to_vec(),
            served: false,
        };
        let tokens: Vec<Token> = Tokenizer::new(reader).collect();

        assert_eq!(tokens.len(), 3);
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::LexError);
        assert!(last.text.contains("pipe closed"));
        assert_eq!(last.offset, 4);
        assert!(validate_token_sequence(&tokens).is_ok());
    }

    #[test]
    fn test_interrupted_reads_are_retried() {
        let reader = InterruptingReader {
            data: b"alpha*beta",
            interrupt_next: true,
        };
        let tokens: Vec<Token> = Tokenizer::new(reader).collect();

        assert_eq!(tokens[0], Token::identifier("alpha", 0));
        assert_eq!(tokens[1].kind, TokenKind::Intersection);
        assert_eq!(tokens[2], Token::identifier("beta", 6));
        assert_eq!(tokens[3].kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_identifier_limit() {
        let long = "a".repeat(MAX_IDENTIFIER_LENGTH + 1);
        let tokens: Vec<Token> = Tokenizer::new(long.as_bytes()).collect();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::LexError);
        assert!(tokens[0].text.contains("Identifier too long"));
    }

    #[test]
    fn test_metrics() {
        let mut tokenizer = Tokenizer::new("(a + b1) * 0".as_bytes());
        tokenizer.by_ref().for_each(drop);

        let metrics = tokenizer.metrics();
        assert_eq!(metrics.total_tokens, 8);
        assert_eq!(metrics.identifier_tokens, 2);
        assert_eq!(metrics.const_tokens, 1);
        assert_eq!(metrics.operator_tokens, 2);
        assert_eq!(metrics.grouping_tokens, 2);
        assert_eq!(metrics.max_identifier_length, 2);
    }

    #[test]
    fn test_reported_error_round_trip() {
        let token = Token::lex_error("pipe closed", 3);
        let error = LexerError::from_token(&token);
        assert_eq!(error.to_string(), "pipe closed (offset 3)");
        assert_eq!(error.error_code(), codes::lexical::LEXICAL_FAILURE);
    }
}
