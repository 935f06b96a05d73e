//! Line-oriented scheme definition format
//!
//! ```text
//! # comment
//! input: x
//! output: y
//! memory: q, r
//! y: x * q
//! q: x
//! r: !r
//! ```
//!
//! Header keywords are case-insensitive. Headers are only read before the
//! first formula line and each one at most once; any later `input:`,
//! `output:` or `memory:` line is a formula for a variable of that name.
//! Every other non-blank line is `name: formula`. Writing a scheme produces
//! this format, so a saved scheme loads back equal.

mod error;

pub use error::DefinitionError;

use crate::scheme::Scheme;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use toi_compiler::logging::codes;
use toi_compiler::{log_error, log_info, log_success, log_warning};

const INPUT_HEADER: &str = "input";
const OUTPUT_HEADER: &str = "output";
const MEMORY_HEADER: &str = "memory";

fn header_keyword(key: &str) -> Option<&'static str> {
    [INPUT_HEADER, OUTPUT_HEADER, MEMORY_HEADER]
        .into_iter()
        .find(|keyword| key.eq_ignore_ascii_case(keyword))
}

/// Build a scheme from definition text
pub fn parse_definition(text: &str) -> Result<Scheme, DefinitionError> {
    parse_lines(text).map_err(|error| {
        log_error!(error.error_code(), "Scheme definition rejected", "error" => error);
        error
    })
}

fn parse_lines(text: &str) -> Result<Scheme, DefinitionError> {
    let mut input: Option<String> = None;
    let mut output: Option<String> = None;
    let mut memory: Option<Vec<String>> = None;
    let mut in_headers = true;
    let mut formulas: BTreeMap<String, String> = BTreeMap::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let malformed = || DefinitionError::MalformedLine {
            line: index + 1,
            content: line.to_string(),
        };

        let (key, value) = line.split_once(':').ok_or_else(malformed)?;
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() {
            return Err(malformed());
        }

        let header = in_headers && header_keyword(key).is_some_and(|keyword| match keyword {
            INPUT_HEADER => input.is_none(),
            OUTPUT_HEADER => output.is_none(),
            _ => memory.is_none(),
        });

        if !header {
            in_headers = false;
            if formulas.insert(key.to_string(), value.to_string()).is_some() {
                log_warning!("Formula redefined, the later line wins",
                    "variable" => key,
                    "line" => index + 1
                );
            }
        } else if key.eq_ignore_ascii_case(MEMORY_HEADER) {
            memory = Some(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect(),
            );
        } else if value.is_empty() {
            return Err(malformed());
        } else if key.eq_ignore_ascii_case(INPUT_HEADER) {
            input = Some(value.to_string());
        } else {
            output = Some(value.to_string());
        }
    }

    let memory = memory.unwrap_or_default();
    let input = input.ok_or(DefinitionError::MissingHeader {
        header: INPUT_HEADER,
    })?;
    let output = output.ok_or(DefinitionError::MissingHeader {
        header: OUTPUT_HEADER,
    })?;

    if let Some(name) = memory
        .iter()
        .chain(std::iter::once(&output))
        .find(|name| !formulas.contains_key(*name))
    {
        return Err(DefinitionError::UndefinedFormula { name: name.clone() });
    }

    Ok(Scheme::new(input, output, formulas)?)
}

/// Render `scheme` in definition format
pub fn render_definition(scheme: &Scheme) -> String {
    scheme.to_string()
}

/// Load a scheme definition file
pub fn load_file(path: impl AsRef<Path>) -> Result<Scheme, DefinitionError> {
    let path = path.as_ref();
    log_info!("Loading scheme definition", "path" => path.display());

    let text = fs::read_to_string(path).map_err(|source| {
        let error = DefinitionError::Io {
            path: path.to_path_buf(),
            source,
        };
        log_error!(error.error_code(), "Cannot read scheme definition", "error" => error);
        error
    })?;

    let scheme = parse_definition(&text)?;
    log_success!(
        codes::success::DEFINITION_LOADED,
        "Scheme definition loaded",
        "path" => path.display(),
        "formulas" => scheme.formulas().len()
    );
    Ok(scheme)
}

/// Write `scheme` to `path` in definition format
pub fn save_file(path: impl AsRef<Path>, scheme: &Scheme) -> Result<(), DefinitionError> {
    let path = path.as_ref();

    fs::write(path, render_definition(scheme)).map_err(|source| {
        let error = DefinitionError::Io {
            path: path.to_path_buf(),
            source,
        };
        log_error!(error.error_code(), "Cannot write scheme definition", "error" => error);
        error
    })?;

    log_success!(
        codes::success::DEFINITION_SAVED,
        "Scheme definition saved",
        "path" => path.display()
    );
    Ok(())
}
