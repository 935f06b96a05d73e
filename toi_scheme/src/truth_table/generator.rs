//! # Truth Table Generator
//!
//! Enumerates every binding of the input columns and runs one cycle for each.
use super::{TruthTable, TruthTableError, TruthTableRow};
use crate::engine::{step, EngineError};
use crate::scheme::Scheme;
use toi_compiler::config::compile_time::scheme::MAX_TABLE_VARIABLES;
use toi_compiler::logging::codes;
use toi_compiler::{log_error, log_success, Namespace};

/// Enumerate `scheme` over all `2^n` rows, `n` being its formula count
///
/// The input is never formula-bearing and the output always is, so `n`
/// equals the number of input columns. Row `i` binds the bits of `i` to the
/// input columns, most significant bit first.
pub fn generate(scheme: &Scheme) -> Result<TruthTable, TruthTableError> {
    let variable_count = scheme.formulas().len();
    if variable_count > MAX_TABLE_VARIABLES {
        let error = TruthTableError::TooManyVariables {
            count: variable_count,
            max: MAX_TABLE_VARIABLES,
        };
        log_error!(error.error_code(), "Truth table too large", "error" => error);
        return Err(error);
    }

    let input_columns = scheme.input_columns();
    let output_columns = scheme.output_columns();
    let row_count = 1usize << variable_count;

    let rows = (0..row_count)
        .map(|row| {
            evaluate_row(scheme, &input_columns, &output_columns, row, variable_count).map_err(
                |source| {
                    let error = TruthTableError::RowFailed { row, source };
                    log_error!(error.error_code(), "Truth table row failed",
                        "row" => row,
                        "error" => error
                    );
                    error
                },
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    log_success!(
        codes::success::TRUTH_TABLE_GENERATED,
        "Truth table generated",
        "rows" => rows.len(),
        "columns" => input_columns.len() + output_columns.len()
    );

    Ok(TruthTable {
        input_columns: input_columns.iter().map(|c| c.to_string()).collect(),
        output_columns: output_columns.iter().map(|c| c.to_string()).collect(),
        rows,
    })
}

/// Bits of `row` across `width` columns, most significant first
pub fn row_bits(row: usize, width: usize) -> Vec<bool> {
    (0..width).map(|j| (row >> (width - 1 - j)) & 1 == 1).collect()
}

fn evaluate_row(
    scheme: &Scheme,
    input_columns: &[&str],
    output_columns: &[&str],
    row: usize,
    width: usize,
) -> Result<TruthTableRow, EngineError> {
    let inputs = row_bits(row, width);
    let namespace: Namespace = input_columns
        .iter()
        .zip(&inputs)
        .map(|(name, value)| (name.to_string(), *value))
        .collect();

    let result = step(scheme, &namespace)?;

    let outputs = output_columns
        .iter()
        .map(|name| {
            result
                .get(*name)
                .copied()
                .ok_or_else(|| EngineError::MissingFormula {
                    name: name.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TruthTableRow { inputs, outputs })
}

impl Scheme {
    pub fn truth_table(&self) -> Result<TruthTable, TruthTableError> {
        generate(self)
    }
}
