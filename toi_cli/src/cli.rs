//! Command line definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use toi_compiler::config::runtime::LogLevel;

#[derive(Debug, Parser)]
#[command(name = "toi", version)]
#[command(about = "Boolean formula evaluator and synchronous scheme simulator")]
pub struct Cli {
    /// Minimum level of diagnostic events (error, warning, info, debug)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Emit diagnostics as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Runtime configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a formula and print its normalized form
    Parse {
        formula: String,

        /// Print the syntax tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a formula under variable bindings
    Eval {
        formula: String,

        /// Variable binding, repeatable
        #[arg(short = 's', long = "set", value_name = "NAME=0|1", value_parser = parse_binding)]
        bindings: Vec<(String, bool)>,
    },

    /// Print a scheme definition file in normalized form
    Show { file: PathBuf },

    /// Print the truth table of a scheme
    Table {
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Feed an input word through a scheme; characters other than 0 and 1 are ignored
    Run {
        file: PathBuf,
        word: String,

        /// Print the state after every cycle
        #[arg(long)]
        trace: bool,
    },

    /// Build a scheme from command line formulas
    New {
        #[arg(long)]
        input: String,

        #[arg(long)]
        output: String,

        /// Formula assignment, repeatable
        #[arg(short = 'f', long = "formula", value_name = "NAME=FORMULA", value_parser = parse_assignment)]
        formulas: Vec<(String, String)>,

        /// Write the scheme definition to this file
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,
    },
}

/// `name=0` or `name=1`
pub fn parse_binding(text: &str) -> Result<(String, bool), String> {
    let (name, value) = parse_assignment(text)?;
    match value.as_str() {
        "0" => Ok((name, false)),
        "1" => Ok((name, true)),
        _ => Err(format!("value of '{}' must be 0 or 1, got '{}'", name, value)),
    }
}

/// `name=text`, split at the first `=`
pub fn parse_assignment(text: &str) -> Result<(String, String), String> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", text))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing name in '{}'", text));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
