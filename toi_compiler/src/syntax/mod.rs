//! Syntax analysis module - token stream to AST transformation

mod error;
mod parser;

pub use error::{SyntaxError, SyntaxResult};
pub use parser::FormulaParser;

use crate::grammar::ast::Node;
use crate::logging::codes;
use crate::tokens::{Token, TokenStream};
use crate::{log_debug, log_error, log_success};

/// Parse one formula from a token stream with global logging
pub fn parse_token_stream<I>(tokens: TokenStream<I>) -> SyntaxResult<Node>
where
    I: Iterator<Item = Token>,
{
    log_debug!("Starting syntax analysis");

    let mut parser = FormulaParser::new(tokens);
    let result = parser.parse_formula();

    match &result {
        Ok(node) => {
            log_success!(
                codes::success::PARSE_COMPLETE,
                "Syntax analysis completed successfully",
                "nodes" => node.node_count(),
                "depth" => node.depth(),
                "nesting" => parser.deepest_nesting()
            );
        }
        Err(error) => {
            log_error!(error.error_code(), "Syntax analysis failed",
                offset = error.offset(),
                "error" => error
            );
        }
    }

    result
}
