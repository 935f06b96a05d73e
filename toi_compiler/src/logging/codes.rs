//! Error, warning and success codes with their classification metadata
//!
//! Every code a component logs is declared here together with its category,
//! severity and recommended action.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const READ_FAILURE: Code = Code::new("E020");
    pub const LEXICAL_FAILURE: Code = Code::new("E021");
    pub const IDENTIFIER_TOO_LONG: Code = Code::new("E023");
    pub const TOO_MANY_TOKENS: Code = Code::new("E027");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_END_OF_INPUT: Code = Code::new("E040");
    pub const UNMATCHED_DELIMITER: Code = Code::new("E042");
    pub const MISSING_OPERAND: Code = Code::new("E044");
    pub const TRAILING_INPUT: Code = Code::new("E045");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
    pub const MAX_RECURSION_DEPTH: Code = Code::new("E087");
}

/// Formula evaluation error codes
pub mod evaluation {
    use super::Code;

    pub const UNDEFINED_VARIABLE: Code = Code::new("E060");
}

/// Scheme construction and simulation error codes
pub mod scheme {
    use super::Code;

    pub const INPUT_HAS_FORMULA: Code = Code::new("E070");
    pub const OUTPUT_MISSING_FORMULA: Code = Code::new("E071");
    pub const INVALID_FORMULA: Code = Code::new("E072");
    pub const OUTPUT_ALREADY_BOUND: Code = Code::new("E073");
    pub const MISSING_FORMULA: Code = Code::new("E074");
    pub const TABLE_TOO_LARGE: Code = Code::new("E075");
    pub const TABLE_ROW_FAILED: Code = Code::new("E076");
    pub const UNRESOLVED_VARIABLE: Code = Code::new("W070");
}

/// Scheme definition file error codes
pub mod definition {
    use super::Code;

    pub const IO_ERROR: Code = Code::new("E080");
    pub const MALFORMED_LINE: Code = Code::new("E081");
    pub const MISSING_HEADER: Code = Code::new("E082");
    pub const UNDEFINED_FORMULA: Code = Code::new("E083");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const PARSE_COMPLETE: Code = Code::new("I040");
    pub const SCHEME_CONSTRUCTED: Code = Code::new("I070");
    pub const WORD_SIMULATED: Code = Code::new("I071");
    pub const TRUTH_TABLE_GENERATED: Code = Code::new("I072");
    pub const DEFINITION_LOADED: Code = Code::new("I080");
    pub const DEFINITION_SAVED: Code = Code::new("I081");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        use Severity::*;

        let entries = [
            // System
            ErrorMetadata::new(
                "ERR001",
                "System",
                Critical,
                false,
                "Critical internal system error",
                "File a bug report with the failing input",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Critical,
                false,
                "System initialization failure",
                "Check runtime configuration and environment variables",
            ),
            // Lexical
            ErrorMetadata::new(
                "E020",
                "Lexical",
                High,
                false,
                "Reading the formula source failed",
                "Check that the input source is readable",
            ),
            ErrorMetadata::new(
                "E021",
                "Lexical",
                High,
                false,
                "Token stream terminated by a lexical error",
                "Inspect the reported lexical error message",
            ),
            ErrorMetadata::new(
                "E023",
                "Lexical",
                Medium,
                false,
                "Identifier exceeds maximum length",
                "Use shorter variable names",
            ),
            ErrorMetadata::new(
                "E027",
                "Lexical",
                Medium,
                false,
                "Formula exceeds maximum token count",
                "Split the formula into smaller formulas",
            ),
            // Syntax
            ErrorMetadata::new(
                "E040",
                "Syntax",
                High,
                false,
                "Formula ended where an expression was expected",
                "Complete the formula",
            ),
            ErrorMetadata::new(
                "E042",
                "Syntax",
                High,
                false,
                "Grouping delimiter not closed by its matching delimiter",
                "Close '(' with ')' and '[' with ']'",
            ),
            ErrorMetadata::new(
                "E044",
                "Syntax",
                High,
                false,
                "Operator without an operand",
                "Add the missing operand after the operator",
            ),
            ErrorMetadata::new(
                "E045",
                "Syntax",
                High,
                false,
                "Tokens left over after a complete formula",
                "Join the trailing tokens with an operator or remove them",
            ),
            ErrorMetadata::new(
                "E050",
                "Syntax",
                High,
                false,
                "Unexpected token",
                "Check formula syntax near the reported offset",
            ),
            ErrorMetadata::new(
                "E087",
                "Syntax",
                High,
                false,
                "Formula nesting exceeds maximum parse depth",
                "Reduce nesting depth",
            ),
            // Evaluation
            ErrorMetadata::new(
                "E060",
                "Evaluation",
                Medium,
                true,
                "Formula references a variable without a value",
                "Bind the variable or define a formula for it",
            ),
            // Scheme
            ErrorMetadata::new(
                "E070",
                "Scheme",
                Medium,
                true,
                "Input variable has a formula",
                "Remove the formula for the input variable",
            ),
            ErrorMetadata::new(
                "E071",
                "Scheme",
                Medium,
                true,
                "Output variable has no formula",
                "Define a formula for the output variable",
            ),
            ErrorMetadata::new(
                "E072",
                "Scheme",
                Medium,
                true,
                "Scheme formula failed to parse",
                "Fix the syntax of the reported formula",
            ),
            ErrorMetadata::new(
                "E073",
                "Scheme",
                Medium,
                true,
                "Output variable already bound before a step",
                "Remove the output binding before stepping",
            ),
            ErrorMetadata::new(
                "E074",
                "Scheme",
                High,
                false,
                "Scheme has no formula for its output",
                "Rebuild the scheme through its constructor",
            ),
            ErrorMetadata::new(
                "E075",
                "Scheme",
                Medium,
                true,
                "Truth table would exceed the maximum variable count",
                "Reduce the number of memory variables",
            ),
            ErrorMetadata::new(
                "E076",
                "Scheme",
                Medium,
                true,
                "Truth table row evaluation failed",
                "Define formulas for every referenced variable",
            ),
            ErrorMetadata::new(
                "W070",
                "Scheme",
                Low,
                true,
                "Formula references a variable the scheme never defines",
                "Define the variable or expect an evaluation error",
            ),
            // Definition files
            ErrorMetadata::new(
                "E080",
                "Definition",
                High,
                true,
                "Scheme definition file could not be read or written",
                "Check the file path and permissions",
            ),
            ErrorMetadata::new(
                "E081",
                "Definition",
                Medium,
                true,
                "Malformed scheme definition line",
                "Use 'name: formula' or an input/output/memory header",
            ),
            ErrorMetadata::new(
                "E082",
                "Definition",
                Medium,
                true,
                "Scheme definition lacks a required header",
                "Add the missing 'input:' or 'output:' line",
            ),
            ErrorMetadata::new(
                "E083",
                "Definition",
                Medium,
                true,
                "Declared variable has no formula",
                "Add a 'name: formula' line for the variable",
            ),
            // Success
            ErrorMetadata::new(
                "I001",
                "System",
                Low,
                true,
                "Logging system initialized",
                "",
            ),
            ErrorMetadata::new(
                "I020",
                "Lexical",
                Low,
                true,
                "Tokenization completed",
                "",
            ),
            ErrorMetadata::new("I040", "Syntax", Low, true, "Formula parsed", ""),
            ErrorMetadata::new("I070", "Scheme", Low, true, "Scheme constructed", ""),
            ErrorMetadata::new("I071", "Scheme", Low, true, "Input word simulated", ""),
            ErrorMetadata::new("I072", "Scheme", Low, true, "Truth table generated", ""),
            ErrorMetadata::new("I080", "Definition", Low, true, "Scheme definition loaded", ""),
            ErrorMetadata::new("I081", "Definition", Low, true, "Scheme definition saved", ""),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .filter(|action| !action.is_empty())
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
