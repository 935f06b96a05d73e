//! # Truth Tables
//!
//! - [`TruthTable`] - column names plus one [`TruthTableRow`] per combination
//! - [`generate`] - exhaustive enumeration over a scheme
//! - [`TruthTableError`] - enumeration failures

pub mod error;
pub mod generator;
pub mod types;

pub use error::TruthTableError;
pub use generator::{generate, row_bits};
pub use types::{TruthTable, TruthTableRow};
