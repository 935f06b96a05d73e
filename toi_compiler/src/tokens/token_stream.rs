//! Token stream with one current token and unbounded push-back
//!
//! The stream pulls lazily from any token iterator, so the producer may be
//! an in-thread tokenizer, a channel fed by a tokenizer thread, or a
//! prepared vector in tests.

use crate::tokens::token::{Token, TokenKind};

#[derive(Debug)]
pub struct TokenStream<I>
where
    I: Iterator<Item = Token>,
{
    source: I,
    current: Token,
    /// Tokens displaced by `push_back`, most recent last
    pushed_back: Vec<Token>,
    /// Tokens pulled from the source so far
    consumed: usize,
}

impl<I> TokenStream<I>
where
    I: Iterator<Item = Token>,
{
    /// Create a stream and load its first token
    pub fn new(mut source: I) -> Self {
        let current = source.next().unwrap_or_else(|| Token::end_of_input(0));
        Self {
            source,
            current,
            pushed_back: Vec::new(),
            consumed: 1,
        }
    }

    /// The current token; never consumes
    pub fn peek(&self) -> &Token {
        &self.current
    }

    pub fn current_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Discard the current token and make the next one current
    ///
    /// Pushed-back tokens are restored first. With an empty buffer a terminal
    /// token stays current forever.
    pub fn advance(&mut self) {
        if let Some(token) = self.pushed_back.pop() {
            self.current = token;
            return;
        }

        if self.current.is_terminal() {
            return;
        }

        let end_offset = self.current.offset + self.current.text.len();
        self.current = match self.source.next() {
            Some(token) => {
                self.consumed += 1;
                token
            }
            // A source that stops without a terminal token still ends cleanly
            None => Token::end_of_input(end_offset),
        };
    }

    /// Make `token` current; the previous current comes back on the next `advance`
    ///
    /// `take` never moves past the sticky terminal token, so pushing that
    /// token back while it is still current changes nothing.
    pub fn push_back(&mut self, token: Token) {
        if self.current.is_terminal() && token == self.current {
            return;
        }

        let displaced = std::mem::replace(&mut self.current, token);
        self.pushed_back.push(displaced);
    }

    /// Return the current token and advance past it
    pub fn take(&mut self) -> Token {
        let token = self.current.clone();
        self.advance();
        token
    }

    /// Advance past the current token if it has the given kind
    pub fn advance_if(&mut self, kind: TokenKind) -> Option<Token> {
        if self.current.kind == kind {
            Some(self.take())
        } else {
            None
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.pushed_back.is_empty() && self.current.is_terminal()
    }

    pub fn pushed_back_depth(&self) -> usize {
        self.pushed_back.len()
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Get diagnostic information
    pub fn diagnostic(&self) -> String {
        format!(
            "TokenStream {{ current: {:?} at {}, pushed_back: {}, consumed: {} }}",
            self.current.kind,
            self.current.offset,
            self.pushed_back.len(),
            self.consumed
        )
    }
}

impl TokenStream<std::vec::IntoIter<Token>> {
    /// Stream over prepared tokens
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self::new(tokens.into_iter())
    }
}

/// Builds token vectors with offsets computed from the token text
#[derive(Debug, Default)]
pub struct TokenStreamBuilder {
    tokens: Vec<Token>,
    offset: usize,
}

impl TokenStreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token whose offset follows the previous token directly
    pub fn push_token(mut self, kind: TokenKind, text: &str) -> Self {
        self.tokens.push(Token::new(kind, self.offset, text));
        self.offset += text.len().max(1);
        self
    }

    /// Skip offset positions, as whitespace would
    pub fn skip(mut self, count: usize) -> Self {
        self.offset += count;
        self
    }

    pub fn push_tokens(mut self, tokens: Vec<(TokenKind, &str)>) -> Self {
        for (kind, text) in tokens {
            self = self.push_token(kind, text);
        }
        self
    }

    /// Finish with an EndOfInput token
    pub fn build(mut self) -> TokenStream<std::vec::IntoIter<Token>> {
        self.tokens.push(Token::end_of_input(self.offset));
        TokenStream::from_tokens(self.tokens)
    }

    /// Finish without a terminal token
    pub fn build_unterminated(self) -> TokenStream<std::vec::IntoIter<Token>> {
        TokenStream::from_tokens(self.tokens)
    }
}

/// Token sequence validation helpers
pub mod validation {
    use super::*;

    /// Offsets never decrease and exactly one terminal token closes the sequence
    pub fn validate_token_sequence(tokens: &[Token]) -> Result<(), String> {
        let last = tokens
            .last()
            .ok_or_else(|| "Token sequence is empty".to_string())?;

        if !last.is_terminal() {
            return Err(format!("Sequence ends with non-terminal {:?}", last.kind));
        }

        if let Some(position) = tokens[..tokens.len() - 1]
            .iter()
            .position(|token| token.is_terminal())
        {
            return Err(format!("Terminal token before end at index {}", position));
        }

        for pair in tokens.windows(2) {
            if pair[1].offset < pair[0].offset {
                return Err(format!(
                    "Offset decreases from {} to {}",
                    pair[0].offset, pair[1].offset
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream_of(kinds: &[(TokenKind, &str)]) -> TokenStream<std::vec::IntoIter<Token>> {
        TokenStreamBuilder::new().push_tokens(kinds.to_vec()).build()
    }

    #[test]
    fn test_advance_walks_tokens_then_sticks_at_end() {
        let mut stream = stream_of(&[(TokenKind::Identifier, "a"), (TokenKind::Union, "+")]);

        assert_eq!(stream.current_kind(), TokenKind::Identifier);
        stream.advance();
        assert_eq!(stream.current_kind(), TokenKind::Union);
        stream.advance();
        assert_eq!(stream.current_kind(), TokenKind::EndOfInput);
        stream.advance();
        stream.advance();
        assert_eq!(stream.current_kind(), TokenKind::EndOfInput);
        assert!(stream.is_at_end());
    }

    #[test]
    fn test_push_back_restores_previous_current() {
        let mut stream = stream_of(&[(TokenKind::Identifier, "a"), (TokenKind::Const, "1")]);

        let a = stream.take();
        assert_eq!(stream.current_kind(), TokenKind::Const);

        stream.push_back(a.clone());
        assert_eq!(stream.peek(), &a);
        assert_eq!(stream.pushed_back_depth(), 1);

        stream.advance();
        assert_eq!(stream.current_kind(), TokenKind::Const);
        stream.advance();
        assert_eq!(stream.current_kind(), TokenKind::EndOfInput);
    }

    #[test]
    fn test_nested_push_back_is_lifo() {
        let mut stream = stream_of(&[
            (TokenKind::Identifier, "a"),
            (TokenKind::Intersection, "*"),
            (TokenKind::Identifier, "b"),
        ]);

        let a = stream.take();
        let star = stream.take();
        stream.push_back(star);
        stream.push_back(a);

        let seen: Vec<String> = (0..3).map(|_| stream.take().text).collect();
        assert_eq!(seen, vec!["a", "*", "b"]);
        assert_eq!(stream.current_kind(), TokenKind::EndOfInput);
    }

    #[test]
    fn test_push_back_at_end_of_input() {
        let mut stream = stream_of(&[]);
        let end = stream.take();
        assert!(end.is_terminal());

        stream.push_back(end);
        stream.advance();
        assert_eq!(stream.current_kind(), TokenKind::EndOfInput);
        assert!(stream.is_at_end());
    }

    #[test]
    fn test_take_then_push_back_at_end_does_not_duplicate() {
        let mut stream = stream_of(&[(TokenKind::Identifier, "a")]);
        stream.advance();

        let end = stream.take();
        assert_eq!(end.kind, TokenKind::EndOfInput);
        stream.push_back(end);

        assert!(stream.is_at_end());
        assert_eq!(stream.pushed_back_depth(), 0);
        assert_eq!(stream.current_kind(), TokenKind::EndOfInput);

        // A different token pushed over the terminal still comes back first
        stream.push_back(Token::identifier("a", 0));
        assert_eq!(stream.pushed_back_depth(), 1);
        stream.advance();
        assert!(stream.is_at_end());
    }

    #[test]
    fn test_lex_error_is_sticky() {
        let mut stream = TokenStream::from_tokens(vec![
            Token::identifier("a", 0),
            Token::lex_error("read failed", 1),
        ]);

        stream.advance();
        stream.advance();
        assert_eq!(stream.current_kind(), TokenKind::LexError);
        assert_eq!(stream.peek().text, "read failed");
    }

    #[test]
    fn test_unterminated_source_synthesizes_end() {
        let mut stream = TokenStreamBuilder::new()
            .push_token(TokenKind::Identifier, "abc")
            .build_unterminated();

        stream.advance();
        assert_eq!(stream.current_kind(), TokenKind::EndOfInput);
        assert_eq!(stream.peek().offset, 3);

        let mut empty = TokenStream::from_tokens(Vec::new());
        assert_eq!(empty.take().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_advance_if() {
        let mut stream = stream_of(&[(TokenKind::Negation, "!"), (TokenKind::Identifier, "x")]);

        assert!(stream.advance_if(TokenKind::Union).is_none());
        assert!(stream.advance_if(TokenKind::Negation).is_some());
        assert_eq!(stream.current_kind(), TokenKind::Identifier);
    }

    #[test]
    fn test_sequence_validation() {
        let good = vec![Token::identifier("a", 0), Token::end_of_input(1)];
        assert!(validation::validate_token_sequence(&good).is_ok());

        let unterminated = vec![Token::identifier("a", 0)];
        assert!(validation::validate_token_sequence(&unterminated).is_err());

        let backwards = vec![
            Token::identifier("a", 4),
            Token::identifier("b", 2),
            Token::end_of_input(5),
        ];
        assert!(validation::validate_token_sequence(&backwards).is_err());
    }
}
