//! Subcommand handlers
//!
//! Handlers write their results to the given writer; diagnostics go through
//! the logging system.

use crate::cli::Command;
use crate::error::CliError;
use std::io::Write;
use toi_compiler::{Namespace, Node};
use toi_scheme::{load_file, save_file, Scheme};

pub fn run(command: &Command, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::Parse { formula, json } => parse(formula, *json, out),
        Command::Eval { formula, bindings } => eval(formula, bindings, out),
        Command::Show { file } => {
            let scheme = load_file(file)?;
            write!(out, "{}", scheme)?;
            Ok(())
        }
        Command::Table { file, json } => table(&load_file(file)?, *json, out),
        Command::Run { file, word, trace } => run_word(&load_file(file)?, word, *trace, out),
        Command::New {
            input,
            output,
            formulas,
            save,
        } => {
            let scheme = Scheme::new(input, output, formulas.iter().cloned())?;
            if let Some(path) = save {
                save_file(path, &scheme)?;
            }
            write!(out, "{}", scheme)?;
            Ok(())
        }
    }
}

fn parse(formula: &str, json: bool, out: &mut impl Write) -> Result<(), CliError> {
    let node = toi_compiler::parse(formula)?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&node)?)?;
    } else {
        writeln!(out, "{}", node)?;
    }
    Ok(())
}

fn eval(formula: &str, bindings: &[(String, bool)], out: &mut impl Write) -> Result<(), CliError> {
    let node: Node = toi_compiler::parse(formula)?;
    let namespace: Namespace = bindings.iter().cloned().collect();
    let value = node.evaluate(&namespace)?;
    writeln!(out, "{}", render_bits(&[value]))?;
    Ok(())
}

fn table(scheme: &Scheme, json: bool, out: &mut impl Write) -> Result<(), CliError> {
    let table = scheme.truth_table()?;
    if json {
        writeln!(out, "{}", table.to_json()?)?;
    } else {
        write!(out, "{}", table)?;
    }
    Ok(())
}

fn run_word(scheme: &Scheme, word: &str, trace: bool, out: &mut impl Write) -> Result<(), CliError> {
    let input = filter_word(word);

    if trace {
        for cycle in scheme.trace_word(&input)? {
            let state: Vec<String> = cycle
                .state
                .iter()
                .map(|(name, value)| format!("{}={}", name, render_bits(&[*value])))
                .collect();
            writeln!(
                out,
                "{:>4}: {} -> {}  {}",
                cycle.cycle,
                render_bits(&[cycle.input]),
                render_bits(&[cycle.output]),
                state.join(" ")
            )?;
        }
        return Ok(());
    }

    let output = scheme.run_word(&input)?;
    writeln!(out, "{}", render_bits(&input))?;
    writeln!(out, "{}", render_bits(&output))?;
    Ok(())
}

/// Keep only the `0` and `1` characters of `word`
pub fn filter_word(word: &str) -> Vec<bool> {
    word.chars()
        .filter_map(|c| match c {
            '0' => Some(false),
            '1' => Some(true),
            _ => None,
        })
        .collect()
}

pub fn render_bits(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use toi_compiler::EvaluationError;
    use toi_scheme::DefinitionError;

    const DELAY: &str = "input: x\noutput: y\nmemory: q\ny: q\nq: x\n";

    fn execute(command: Command) -> Result<String, CliError> {
        let mut out = Vec::new();
        run(&command, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn delay_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("delay.toi");
        std::fs::write(&path, DELAY).unwrap();
        path
    }

    #[test]
    fn test_filter_word() {
        assert_eq!(filter_word("1 0-1x"), vec![true, false, true]);
        assert_eq!(render_bits(&filter_word("abc")), "");
    }

    #[test]
    fn test_parse_command() {
        let text = execute(Command::Parse {
            formula: "a + b * c".to_string(),
            json: false,
        })
        .unwrap();
        assert_eq!(text, "(a + (b * c))\n");

        let json = execute(Command::Parse {
            formula: "!q".to_string(),
            json: true,
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!({ "Negation": { "Identifier": "q" } }));
    }

    #[test]
    fn test_eval_command() {
        let text = execute(Command::Eval {
            formula: "x - y".to_string(),
            bindings: vec![("x".to_string(), true), ("y".to_string(), false)],
        })
        .unwrap();
        assert_eq!(text, "1\n");

        assert_matches!(
            execute(Command::Eval {
                formula: "x".to_string(),
                bindings: Vec::new(),
            }),
            Err(CliError::Evaluation(EvaluationError::UndefinedVariable { .. }))
        );
    }

    #[test]
    fn test_show_and_run_commands() {
        let dir = TempDir::new().unwrap();
        let path = delay_file(&dir);

        let shown = execute(Command::Show { file: path.clone() }).unwrap();
        assert_eq!(shown, DELAY);

        let ran = execute(Command::Run {
            file: path.clone(),
            word: "1 0 1".to_string(),
            trace: false,
        })
        .unwrap();
        assert_eq!(ran, "101\n010\n");

        let traced = execute(Command::Run {
            file: path,
            word: "10".to_string(),
            trace: true,
        })
        .unwrap();
        assert_eq!(traced, "   0: 1 -> 0  q=1 y=0\n   1: 0 -> 1  q=0 y=1\n");
    }

    #[test]
    fn test_table_command() {
        let dir = TempDir::new().unwrap();
        let text = execute(Command::Table {
            file: delay_file(&dir),
            json: false,
        })
        .unwrap();
        assert_eq!(text, "|x|q||y|q|\n|0|0||0|0|\n|0|1||1|0|\n|1|0||0|1|\n|1|1||1|1|\n");
    }

    #[test]
    fn test_new_command_saves() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("new.toi");

        let text = execute(Command::New {
            input: "x".to_string(),
            output: "y".to_string(),
            formulas: vec![("y".to_string(), "q".to_string()), ("q".to_string(), "x".to_string())],
            save: Some(path.clone()),
        })
        .unwrap();
        assert_eq!(text, DELAY);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DELAY);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        assert_matches!(
            execute(Command::Show {
                file: dir.path().join("absent.toi"),
            }),
            Err(CliError::Definition(DefinitionError::Io { .. }))
        );
    }
}
