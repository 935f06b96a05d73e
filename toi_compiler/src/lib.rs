// Internal modules
pub mod config;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod syntax;
pub mod tokens;

// Re-export key types for library consumers
pub use grammar::ast::{BinaryOperator, EvaluationError, EvaluationResult, Namespace, Node};
pub use lexical::LexerError;
pub use pipeline::{parse, parse_reader, PipelineError};
pub use syntax::SyntaxError;

/// Commonly used items for scheme and CLI crates
pub mod prelude {
    pub use crate::config::runtime::{runtime_config, RuntimeConfig};
    pub use crate::grammar::ast::{BinaryOperator, EvaluationError, Namespace, Node};
    pub use crate::logging::{codes, Code};
    pub use crate::pipeline::{parse, parse_reader, PipelineError};
}
