//! Syntax analysis module - TokenStream to AST transformation
//!
//! Converts token streams into expression trees via a recursive-descent,
//! precedence-climbing parser with span-accurate error reporting.

mod error;
mod parser;

// Re-export core types
pub use error::{ParseError, SyntaxError, SyntaxResult};
pub use parser::{parse_token_stream, ExpressionParser};

use crate::logging::codes;

/// Validate that all syntax error codes are properly configured
pub fn init_syntax_logging() -> Result<(), String> {
    let test_codes = [
        codes::syntax::UNEXPECTED_TOKEN,
        codes::syntax::EMPTY_EXPRESSION,
        codes::syntax::UNBALANCED_PARENTHESIS,
        codes::syntax::TRAILING_TOKENS,
        codes::syntax::INTERNAL_PARSER_ERROR,
        codes::syntax::MAX_RECURSION_DEPTH,
    ];

    for code in &test_codes {
        if codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!(
                "Syntax error code {} has no description",
                code.as_str()
            ));
        }
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Syntax error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    Ok(())
}
