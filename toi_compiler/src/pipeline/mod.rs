//! Formula compilation pipeline: text -> tokens -> token stream -> AST

mod error;

pub use error::PipelineError;

use crate::config::runtime::{runtime_config, LexicalPreferences};
use crate::grammar::ast::Node;
use crate::lexical::{spawn_tokenizer_with_preferences, Tokenizer};
use crate::tokens::TokenStream;
use std::io::{Cursor, Read};

/// Parse formula text using the process-wide runtime preferences
pub fn parse(text: &str) -> Result<Node, PipelineError> {
    parse_with_preferences(text, &runtime_config().lexical)
}

/// Parse formula text, choosing the tokenizer delivery mode from `preferences`
pub fn parse_with_preferences(
    text: &str,
    preferences: &LexicalPreferences,
) -> Result<Node, PipelineError> {
    if preferences.concurrent_tokenizer {
        parse_reader_with_preferences(Cursor::new(text.to_owned()), preferences)
    } else {
        let tokenizer = Tokenizer::with_preferences(text.as_bytes(), preferences.clone());
        Ok(crate::syntax::parse_token_stream(TokenStream::new(tokenizer))?)
    }
}

/// Parse a formula read from `reader`
pub fn parse_reader<R>(reader: R) -> Result<Node, PipelineError>
where
    R: Read + Send + 'static,
{
    parse_reader_with_preferences(reader, &runtime_config().lexical)
}

pub fn parse_reader_with_preferences<R>(
    reader: R,
    preferences: &LexicalPreferences,
) -> Result<Node, PipelineError>
where
    R: Read + Send + 'static,
{
    if preferences.concurrent_tokenizer {
        let source = spawn_tokenizer_with_preferences(reader, preferences.clone())?;
        Ok(crate::syntax::parse_token_stream(TokenStream::new(source))?)
    } else {
        let tokenizer = Tokenizer::with_preferences(reader, preferences.clone());
        Ok(crate::syntax::parse_token_stream(TokenStream::new(tokenizer))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ast::{BinaryOperator, Namespace};
    use crate::lexical::LexerError;
    use crate::syntax::SyntaxError;
    use assert_matches::assert_matches;
    use std::io;

    fn preferences(concurrent_tokenizer: bool) -> LexicalPreferences {
        LexicalPreferences {
            concurrent_tokenizer,
            collect_metrics: false,
        }
    }

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device unplugged"))
        }
    }

    #[test]
    fn test_both_delivery_modes_agree() {
        for text in ["a + b * c", "![x \\ 1] - (y)", "q"] {
            let pulled = parse_with_preferences(text, &preferences(false)).unwrap();
            let channelled = parse_with_preferences(text, &preferences(true)).unwrap();
            assert_eq!(pulled, channelled, "input {}", text);
        }
    }

    #[test]
    fn test_parse_then_evaluate() {
        let node = parse("a + b * c").unwrap();
        assert_eq!(
            node,
            Node::binary(
                BinaryOperator::Union,
                Node::identifier("a"),
                Node::binary(
                    BinaryOperator::Intersection,
                    Node::identifier("b"),
                    Node::identifier("c")
                )
            )
        );

        let namespace: Namespace = [("a", false), ("b", true), ("c", true)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        assert_eq!(node.evaluate(&namespace), Ok(true));
    }

    #[test]
    fn test_syntax_failure_category() {
        let error = parse_with_preferences("(a", &preferences(false)).unwrap_err();
        assert!(!error.is_lexical());
        assert_matches!(
            error,
            PipelineError::SyntaxAnalysis(SyntaxError::UnmatchedDelimiter { .. })
        );
    }

    #[test]
    fn test_read_failure_is_lexical_in_both_modes() {
        for concurrent in [false, true] {
            let error = parse_reader_with_preferences(BrokenReader, &preferences(concurrent))
                .unwrap_err();
            assert!(error.is_lexical());
            assert_matches!(
                error,
                PipelineError::LexicalAnalysis(LexerError::Reported { ref message, .. })
                    if message.contains("device unplugged")
            );
        }
    }

    #[test]
    fn test_reader_input() {
        let node = parse_reader(Cursor::new(b"[a]".to_vec())).unwrap();
        assert_eq!(node, Node::identifier("a"));
    }
}
