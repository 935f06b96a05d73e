//! Scheme model: named input, named output and one formula per output/memory variable

mod error;

pub use error::SchemeError;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use toi_compiler::config::runtime::runtime_config;
use toi_compiler::logging::codes;
use toi_compiler::{log_error, log_success, log_warning, Node};

/// A one-input/one-output synchronous circuit
///
/// The input never has a formula and the output always has one. Formulas are
/// kept in name order, which fixes the memory column order everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SchemeParts")]
pub struct Scheme {
    input: String,
    output: String,
    formulas: BTreeMap<String, Node>,
}

/// Serialized shape of a [`Scheme`], checked by [`Scheme::from_nodes`] on the way in
#[derive(Deserialize)]
struct SchemeParts {
    input: String,
    output: String,
    formulas: BTreeMap<String, Node>,
}

impl TryFrom<SchemeParts> for Scheme {
    type Error = SchemeError;

    fn try_from(parts: SchemeParts) -> Result<Self, Self::Error> {
        Self::from_nodes(parts.input, parts.output, parts.formulas)
    }
}

impl Scheme {
    /// Build a scheme from formula text, parsing every formula
    pub fn new<I, K, V>(
        input: impl Into<String>,
        output: impl Into<String>,
        formulas: I,
    ) -> Result<Self, SchemeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let input = input.into();
        let output = output.into();
        let texts: BTreeMap<String, V> = formulas
            .into_iter()
            .map(|(name, text)| (name.into(), text))
            .collect();

        check_bindings(&input, &output, texts.keys())?;

        let mut nodes = BTreeMap::new();
        for (name, text) in texts {
            let node = toi_compiler::parse(text.as_ref()).map_err(|source| {
                let error = SchemeError::InvalidFormula {
                    name: name.clone(),
                    source,
                };
                log_error!(error.error_code(), "Scheme formula failed to parse",
                    "variable" => name,
                    "error" => error
                );
                error
            })?;
            nodes.insert(name, node);
        }

        Ok(Self::assemble(input, output, nodes))
    }

    /// Build a scheme from already parsed formulas
    pub fn from_nodes(
        input: impl Into<String>,
        output: impl Into<String>,
        formulas: BTreeMap<String, Node>,
    ) -> Result<Self, SchemeError> {
        let input = input.into();
        let output = output.into();
        check_bindings(&input, &output, formulas.keys())?;
        Ok(Self::assemble(input, output, formulas))
    }

    fn assemble(input: String, output: String, formulas: BTreeMap<String, Node>) -> Self {
        let scheme = Self {
            input,
            output,
            formulas,
        };

        if runtime_config().scheme.warn_unresolved_variables {
            for name in scheme.unresolved_variables() {
                log_warning!(code = codes::scheme::UNRESOLVED_VARIABLE,
                    "Formula references a variable without input binding or formula",
                    "variable" => name
                );
            }
        }

        log_success!(
            codes::success::SCHEME_CONSTRUCTED,
            "Scheme constructed",
            "input" => scheme.input,
            "output" => scheme.output,
            "memory" => scheme.formulas.len() - 1
        );

        scheme
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn formulas(&self) -> &BTreeMap<String, Node> {
        &self.formulas
    }

    pub fn formula(&self, name: &str) -> Option<&Node> {
        self.formulas.get(name)
    }

    /// Formula-bearing variables other than the output, in name order
    pub fn memory_variables(&self) -> Vec<&str> {
        self.formulas
            .keys()
            .map(String::as_str)
            .filter(|name| *name != self.output)
            .collect()
    }

    /// `[input] + memory variables`
    pub fn input_columns(&self) -> Vec<&str> {
        std::iter::once(self.input.as_str())
            .chain(self.memory_variables())
            .collect()
    }

    /// `[output] + memory variables`
    pub fn output_columns(&self) -> Vec<&str> {
        std::iter::once(self.output.as_str())
            .chain(self.memory_variables())
            .collect()
    }

    /// Identifiers referenced by some formula that are neither the input nor formula-bearing
    pub fn unresolved_variables(&self) -> BTreeSet<&str> {
        self.formulas
            .values()
            .flat_map(|node| node.variables())
            .filter(|name| *name != self.input && !self.formulas.contains_key(*name))
            .collect()
    }
}

fn check_bindings<'a>(
    input: &str,
    output: &str,
    mut names: impl Iterator<Item = &'a String> + Clone,
) -> Result<(), SchemeError> {
    let error = if names.clone().any(|name| name == input) {
        SchemeError::InputHasFormula {
            name: input.to_string(),
        }
    } else if !names.any(|name| name == output) {
        SchemeError::OutputMissingFormula {
            name: output.to_string(),
        }
    } else {
        return Ok(());
    };

    log_error!(error.error_code(), "Scheme construction failed", "error" => error);
    Err(error)
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let memory = self.memory_variables();
        writeln!(f, "input: {}", self.input)?;
        writeln!(f, "output: {}", self.output)?;
        writeln!(f, "memory: {}", memory.join(","))?;

        if let Some(node) = self.formulas.get(&self.output) {
            writeln!(f, "{}: {}", self.output, node)?;
        }
        for name in memory {
            if let Some(node) = self.formulas.get(name) {
                writeln!(f, "{}: {}", name, node)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::engine::EngineError;
    use toi_compiler::{PipelineError, SyntaxError};

    fn counter() -> Scheme {
        Scheme::new("x", "y", [("y", "x * q"), ("q", "x \\ q"), ("c", "!c")]).unwrap()
    }

    #[test]
    fn test_input_has_formula() {
        assert_matches!(
            Scheme::new("x", "y", [("x", "1")]),
            Err(SchemeError::InputHasFormula { ref name }) if name == "x"
        );
    }

    #[test]
    fn test_output_missing_formula() {
        assert_matches!(
            Scheme::new("x", "y", [("z", "1")]),
            Err(SchemeError::OutputMissingFormula { ref name }) if name == "y"
        );
    }

    #[test]
    fn test_input_check_precedes_output_check() {
        assert_matches!(
            Scheme::new("x", "y", [("x", "1"), ("z", "0")]),
            Err(SchemeError::InputHasFormula { .. })
        );
    }

    #[test]
    fn test_invalid_formula_names_the_variable() {
        let error = Scheme::new("x", "y", [("y", "x +")]).unwrap_err();
        assert_matches!(
            error,
            SchemeError::InvalidFormula {
                ref name,
                source: PipelineError::SyntaxAnalysis(SyntaxError::MissingOperand { .. }),
            } if name == "y"
        );
        assert_eq!(error.error_code(), codes::scheme::INVALID_FORMULA);
    }

    #[test]
    fn test_columns() {
        let scheme = counter();
        assert_eq!(scheme.memory_variables(), vec!["c", "q"]);
        assert_eq!(scheme.input_columns(), vec!["x", "c", "q"]);
        assert_eq!(scheme.output_columns(), vec!["y", "c", "q"]);
    }

    #[test]
    fn test_unresolved_variables_are_allowed() {
        let scheme = Scheme::new("x", "y", [("y", "x + ghost")]).unwrap();
        assert_eq!(scheme.unresolved_variables().into_iter().collect::<Vec<_>>(), vec!["ghost"]);
        assert!(counter().unresolved_variables().is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            counter().to_string(),
            "input: x\noutput: y\nmemory: c,q\ny: (x * q)\nc: !c\nq: (x \\ q)\n"
        );

        let plain = Scheme::new("a", "b", [("b", "[a]")]).unwrap();
        assert_eq!(plain.to_string(), "input: a\noutput: b\nmemory: \nb: a\n");
    }

    #[test]
    fn test_deserialization_checks_bindings() {
        let scheme = counter();
        let json = serde_json::to_string(&scheme).unwrap();
        assert_eq!(serde_json::from_str::<Scheme>(&json).unwrap(), scheme);

        let without_output = r#"{"input":"x","output":"y","formulas":{"x":{"Const":true}}}"#;
        let error = serde_json::from_str::<Scheme>(without_output).unwrap_err();
        assert!(error.to_string().contains("has a formula"), "{}", error);

        let missing_output = r#"{"input":"x","output":"y","formulas":{"z":{"Const":true}}}"#;
        let error = serde_json::from_str::<Scheme>(missing_output).unwrap_err();
        assert!(error.to_string().contains("has no formula"), "{}", error);
    }

    #[test]
    fn test_step_without_output_formula() {
        // Only reachable by bypassing the constructors
        let scheme = Scheme {
            input: "x".to_string(),
            output: "y".to_string(),
            formulas: BTreeMap::from([("q".to_string(), Node::identifier("x"))]),
        };
        let namespace: toi_compiler::Namespace = [("x".to_string(), true)].into_iter().collect();

        assert_matches!(
            scheme.step(&namespace),
            Err(EngineError::MissingFormula { ref name }) if name == "y"
        );
        assert_eq!(
            scheme.step(&namespace).unwrap_err().error_code(),
            codes::scheme::MISSING_FORMULA
        );
    }

    #[test]
    fn test_from_nodes_matches_parsed() {
        let parsed = counter();
        let rebuilt = Scheme::from_nodes("x", "y", parsed.formulas().clone()).unwrap();
        assert_eq!(parsed, rebuilt);

        assert_matches!(
            Scheme::from_nodes("x", "y", BTreeMap::new()),
            Err(SchemeError::OutputMissingFormula { .. })
        );
    }
}
