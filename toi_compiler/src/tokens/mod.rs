//! Token system for boolean formula analysis
//!
//! Formulas are made of identifiers, the constants `0` and `1`, the unary
//! negation `!`, four binary set operators and two interchangeable grouping
//! delimiter pairs:
//!
//! | Text | Kind                  |
//! |------|-----------------------|
//! | `+`  | `Union`               |
//! | `*`  | `Intersection`        |
//! | `-`  | `Difference`          |
//! | `\`  | `SymmetricDifference` |
//! | `!`  | `Negation`            |
//! | `( )`, `[ ]` | grouping      |
//!
//! A sequence always ends with exactly one `EndOfInput` or `LexError` token.
//! [`TokenStream`] wraps such a sequence with a current token and push-back
//! so the parser can try alternatives.

pub mod token;
pub mod token_stream;

pub use token::{Token, TokenClass, TokenKind};
pub use token_stream::{TokenStream, TokenStreamBuilder};
