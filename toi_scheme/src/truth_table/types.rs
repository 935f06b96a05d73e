use super::TruthTableError;
use serde::Serialize;
use std::fmt;

/// One enumerated combination and the values it produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruthTableRow {
    pub inputs: Vec<bool>,
    pub outputs: Vec<bool>,
}

/// Exhaustive enumeration of a scheme's outputs over every input/memory combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruthTable {
    pub input_columns: Vec<String>,
    pub output_columns: Vec<String>,
    pub rows: Vec<TruthTableRow>,
}

impl TruthTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Output value of `column` in `row`
    pub fn output(&self, row: usize, column: &str) -> Option<bool> {
        let index = self.output_columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.outputs.get(index).copied()
    }

    pub fn to_json(&self) -> Result<String, TruthTableError> {
        serde_json::to_string_pretty(self).map_err(|e| TruthTableError::Serialization {
            message: e.to_string(),
        })
    }
}

fn bit(value: bool) -> char {
    if value {
        '1'
    } else {
        '0'
    }
}

/// Bordered text rendering, inputs and outputs separated by a double bar
///
/// ```text
/// |x|q||y|q|
/// |0|0||0|0|
/// ```
impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_line = |f: &mut fmt::Formatter<'_>, inputs: &[String], outputs: &[String]| {
            writeln!(f, "|{}||{}|", inputs.join("|"), outputs.join("|"))
        };

        write_line(f, &self.input_columns, &self.output_columns)?;

        let cells = |columns: &[String], values: &[bool]| -> Vec<String> {
            columns
                .iter()
                .zip(values)
                .map(|(name, value)| format!("{:>width$}", bit(*value), width = name.len().max(1)))
                .collect()
        };

        for row in &self.rows {
            write_line(
                f,
                &cells(&self.input_columns, &row.inputs),
                &cells(&self.output_columns, &row.outputs),
            )?;
        }
        Ok(())
    }
}
