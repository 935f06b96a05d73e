//! # toi scheme simulator
//!
//! A scheme is a one-input/one-output synchronous circuit: each cycle the
//! output and every memory variable are recomputed from boolean formulas over
//! the current input and the previous cycle's memory values.

pub mod engine;
pub mod parser;
pub mod scheme;
pub mod truth_table;

// Convenience re-exports
pub use engine::{run_word, step, trace_word, CycleTrace, EngineError};
pub use parser::{load_file, parse_definition, render_definition, save_file, DefinitionError};
pub use scheme::{Scheme, SchemeError};
pub use truth_table::{TruthTable, TruthTableError, TruthTableRow};

pub mod prelude {
    pub use crate::engine::{run_word, step, trace_word, CycleTrace, EngineError};
    pub use crate::parser::{load_file, parse_definition, save_file, DefinitionError};
    pub use crate::scheme::{Scheme, SchemeError};
    pub use crate::truth_table::{generate, TruthTable, TruthTableError, TruthTableRow};

    pub use toi_compiler::{Namespace, Node};
}
