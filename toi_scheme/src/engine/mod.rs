//! Cycle engine: single-step evaluation and input word simulation

mod error;

pub use error::{EngineError, EngineResult};

use crate::scheme::Scheme;
use serde::Serialize;
use std::collections::BTreeMap;
use toi_compiler::logging::codes;
use toi_compiler::{log_debug, log_error, log_success, Namespace};

/// Evaluate one cycle
///
/// The output formula is evaluated first and its value bound into a working
/// copy of `namespace`; every formula is then evaluated against that copy.
/// The result holds exactly the formula-bearing variables. `namespace` itself
/// is never modified.
pub fn step(scheme: &Scheme, namespace: &Namespace) -> EngineResult<Namespace> {
    let output = scheme.output();
    if namespace.contains_key(output) {
        return Err(EngineError::OutputAlreadyBound {
            name: output.to_string(),
        });
    }

    let output_formula = scheme
        .formula(output)
        .ok_or_else(|| EngineError::MissingFormula {
            name: output.to_string(),
        })?;

    let mut working = namespace.clone();
    let value = output_formula.evaluate(&working)?;
    working.insert(output.to_string(), value);

    scheme
        .formulas()
        .iter()
        .map(|(name, node)| Ok((name.clone(), node.evaluate(&working)?)))
        .collect()
}

/// One simulated cycle of an input word
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleTrace {
    pub cycle: usize,
    pub input: bool,
    pub output: bool,
    /// Values of every formula-bearing variable after the cycle
    pub state: BTreeMap<String, bool>,
}

/// Feed `input_bits` through the scheme and collect the output word
///
/// Memory variables start at `false`. The first failing cycle aborts the run.
pub fn run_word(scheme: &Scheme, input_bits: &[bool]) -> EngineResult<Vec<bool>> {
    let outputs = simulate(scheme, input_bits, |_, _| {})?;
    log_success!(
        codes::success::WORD_SIMULATED,
        "Input word simulated",
        "length" => outputs.len()
    );
    Ok(outputs)
}

/// Like [`run_word`], also recording the state after each cycle
pub fn trace_word(scheme: &Scheme, input_bits: &[bool]) -> EngineResult<Vec<CycleTrace>> {
    let mut traces = Vec::with_capacity(input_bits.len());
    simulate(scheme, input_bits, |cycle, state| {
        traces.push(CycleTrace {
            cycle,
            input: input_bits[cycle],
            output: state.get(scheme.output()).copied().unwrap_or_default(),
            state: state.iter().map(|(k, v)| (k.clone(), *v)).collect(),
        })
    })?;
    Ok(traces)
}

fn simulate<F>(scheme: &Scheme, input_bits: &[bool], mut observe: F) -> EngineResult<Vec<bool>>
where
    F: FnMut(usize, &Namespace),
{
    let mut namespace: Namespace = scheme
        .memory_variables()
        .into_iter()
        .map(|name| (name.to_string(), false))
        .collect();
    let mut outputs = Vec::with_capacity(input_bits.len());

    for (cycle, &bit) in input_bits.iter().enumerate() {
        namespace.insert(scheme.input().to_string(), bit);
        namespace.remove(scheme.output());

        let state = step(scheme, &namespace).map_err(|error| {
            log_error!(error.error_code(), "Cycle evaluation failed",
                "cycle" => cycle,
                "error" => error
            );
            error
        })?;

        log_debug!("Cycle evaluated", "cycle" => cycle, "input" => bit);
        observe(cycle, &state);

        // step returns every formula-bearing variable, the output included
        outputs.push(state.get(scheme.output()).copied().unwrap_or_default());
        namespace = state;
    }

    Ok(outputs)
}

impl Scheme {
    pub fn step(&self, namespace: &Namespace) -> EngineResult<Namespace> {
        step(self, namespace)
    }

    pub fn run_word(&self, input_bits: &[bool]) -> EngineResult<Vec<bool>> {
        run_word(self, input_bits)
    }

    pub fn trace_word(&self, input_bits: &[bool]) -> EngineResult<Vec<CycleTrace>> {
        trace_word(self, input_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use toi_compiler::EvaluationError;

    fn namespace(pairs: &[(&str, bool)]) -> Namespace {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn bits(word: &str) -> Vec<bool> {
        word.chars().map(|c| c == '1').collect()
    }

    fn delay() -> Scheme {
        Scheme::new("x", "y", [("y", "q"), ("q", "x")]).unwrap()
    }

    #[test]
    fn test_identity_word() {
        let scheme = Scheme::new("x", "y", [("y", "x")]).unwrap();
        assert_eq!(scheme.run_word(&bits("101")).unwrap(), bits("101"));
        assert_eq!(scheme.run_word(&[]).unwrap(), Vec::<bool>::new());
    }

    #[test]
    fn test_delay_word() {
        assert_eq!(delay().run_word(&bits("101")).unwrap(), bits("010"));
        assert_eq!(delay().run_word(&bits("1101")).unwrap(), bits("0110"));
    }

    #[test]
    fn test_memory_sees_fresh_output() {
        // q latches the output computed in the same cycle
        let scheme = Scheme::new("x", "y", [("y", "x + q"), ("q", "y")]).unwrap();
        assert_eq!(scheme.run_word(&bits("0100")).unwrap(), bits("0111"));
    }

    #[test]
    fn test_step_result_keys_and_values() {
        let scheme = delay();
        let before = namespace(&[("x", true), ("q", false)]);
        let after = scheme.step(&before).unwrap();

        assert_eq!(after, namespace(&[("y", false), ("q", true)]));
        assert_eq!(before, namespace(&[("x", true), ("q", false)]));
    }

    #[test]
    fn test_step_rejects_bound_output() {
        assert_matches!(
            delay().step(&namespace(&[("x", true), ("q", false), ("y", true)])),
            Err(EngineError::OutputAlreadyBound { ref name }) if name == "y"
        );
    }

    #[test]
    fn test_step_undefined_variable() {
        let scheme = delay();
        assert_matches!(
            scheme.step(&namespace(&[("x", true)])),
            Err(EngineError::Evaluation(EvaluationError::UndefinedVariable { ref name })) if name == "q"
        );
    }

    #[test]
    fn test_run_word_fails_fast() {
        let scheme = Scheme::new("x", "y", [("y", "x * ghost")]).unwrap();
        let error = scheme.run_word(&bits("11")).unwrap_err();
        assert_eq!(error.error_code(), codes::evaluation::UNDEFINED_VARIABLE);
    }

    #[test]
    fn test_trace_word() {
        let traces = delay().trace_word(&bits("10")).unwrap();
        assert_eq!(traces.len(), 2);

        assert_eq!(traces[0].cycle, 0);
        assert!(traces[0].input);
        assert!(!traces[0].output);
        assert_eq!(traces[0].state.get("q"), Some(&true));

        assert!(!traces[1].input);
        assert!(traces[1].output);
        assert_eq!(traces[1].state.get("q"), Some(&false));
    }
}
