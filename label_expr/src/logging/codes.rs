//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and the
//! classification functions that act on them.

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

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
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

    pub const INVALID_CHARACTER: Code = Code::new("E020");
    pub const UNTERMINATED_QUOTE: Code = Code::new("E021");
    pub const ATOM_TOO_LONG: Code = Code::new("E022");
    pub const EXPRESSION_TOO_LARGE: Code = Code::new("E023");
    pub const TOO_MANY_TOKENS: Code = Code::new("E024");
    pub const MALFORMED_OPERATOR: Code = Code::new("E025");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const MISSING_EOF: Code = Code::new("E040");
    pub const EMPTY_EXPRESSION: Code = Code::new("E041");
    pub const UNBALANCED_PARENTHESIS: Code = Code::new("E042");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
    pub const TRAILING_TOKENS: Code = Code::new("E051");
    pub const INTERNAL_PARSER_ERROR: Code = Code::new("E086");
    pub const MAX_RECURSION_DEPTH: Code = Code::new("E087");
}

/// Evaluation error codes
pub mod eval {
    use super::Code;

    pub const RESOLVER_FAILURE: Code = Code::new("E060");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");

    // Lexical success codes
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");

    // Syntax success codes
    pub const AST_CONSTRUCTION_COMPLETE: Code = Code::new("I040");
    pub const EXPRESSION_VALIDATED: Code = Code::new("I041");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        registry.insert(
            "ERR001",
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the expression that triggered it",
            ),
        );
        registry.insert(
            "ERR002",
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "Engine initialization failure",
                "Check logging configuration and environment variables",
            ),
        );

        // Lexical errors
        registry.insert(
            "E020",
            ErrorMetadata::new(
                "E020",
                "Lexical",
                Severity::Medium,
                true,
                false,
                "Character is not valid at this point in an expression",
                "Quote the label name if it contains special characters",
            ),
        );
        registry.insert(
            "E021",
            ErrorMetadata::new(
                "E021",
                "Lexical",
                Severity::Medium,
                true,
                false,
                "Quoted label name is missing its closing quote",
                "Add the closing double quote",
            ),
        );
        registry.insert(
            "E022",
            ErrorMetadata::new(
                "E022",
                "Lexical",
                Severity::Medium,
                true,
                false,
                "Label name exceeds the maximum length",
                "Shorten the label name",
            ),
        );
        registry.insert(
            "E023",
            ErrorMetadata::new(
                "E023",
                "Lexical",
                Severity::Medium,
                false,
                true,
                "Expression exceeds the maximum size limit",
                "Reduce expression size or split it",
            ),
        );
        registry.insert(
            "E024",
            ErrorMetadata::new(
                "E024",
                "Lexical",
                Severity::Medium,
                false,
                true,
                "Expression produces too many tokens",
                "Reduce expression complexity",
            ),
        );
        registry.insert(
            "E025",
            ErrorMetadata::new(
                "E025",
                "Lexical",
                Severity::Medium,
                true,
                false,
                "Incomplete operator sequence",
                "Use one of the operators !, &&, ||, ->, <->",
            ),
        );

        // Syntax errors
        registry.insert(
            "E040",
            ErrorMetadata::new(
                "E040",
                "Syntax",
                Severity::High,
                false,
                true,
                "Token stream is missing its end-of-input marker",
                "Tokenize the expression through the lexical module",
            ),
        );
        registry.insert(
            "E041",
            ErrorMetadata::new(
                "E041",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Expression is empty",
                "Provide a label expression",
            ),
        );
        registry.insert(
            "E042",
            ErrorMetadata::new(
                "E042",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Parenthesis has no matching partner",
                "Balance the parentheses in the expression",
            ),
        );
        registry.insert(
            "E050",
            ErrorMetadata::new(
                "E050",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Token does not fit the grammar at this position",
                "Check the expression near the reported location",
            ),
        );
        registry.insert(
            "E051",
            ErrorMetadata::new(
                "E051",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Input continues after a complete expression",
                "Remove the trailing tokens or join them with an operator",
            ),
        );
        registry.insert(
            "E086",
            ErrorMetadata::new(
                "E086",
                "Syntax",
                Severity::Critical,
                false,
                true,
                "Internal parser invariant violated",
                "File a bug report with the expression that triggered it",
            ),
        );
        registry.insert(
            "E087",
            ErrorMetadata::new(
                "E087",
                "Syntax",
                Severity::High,
                false,
                true,
                "Expression nests deeper than the parser allows",
                "Reduce nesting depth",
            ),
        );

        // Evaluation errors
        registry.insert(
            "E060",
            ErrorMetadata::new(
                "E060",
                "Evaluation",
                Severity::Medium,
                true,
                false,
                "Caller-supplied resolver failed for a label name",
                "Check the resolver backing registry for the reported label",
            ),
        );

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get full metadata for an error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get the severity of an error code (defaults to Medium for unknown codes)
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|m| m.severity)
        .unwrap_or(Severity::Medium)
}

/// Get the category of an error code
pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code).map(|m| m.category).unwrap_or("Unknown")
}

/// Get the description of an error code
pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|m| m.description)
        .unwrap_or("Unknown error")
}

/// Get the recommended action for an error code
pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|m| m.recommended_action)
        .unwrap_or("No specific action available")
}

/// Check whether an error code is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code).map(|m| m.recoverable).unwrap_or(true)
}

/// Check whether an error code requires halting
pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|m| m.requires_halt)
        .unwrap_or(false)
}
