//! Lexical analysis module
//!
//! Provides systematic tokenization for label expression text with
//! compile-time security boundaries and metrics gated by runtime
//! preferences.

pub mod analyzer;

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::tokens::TokenStream;

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics};

// ============================================================================
// MODULE API
// ============================================================================

/// Tokenize expression text with default preferences
pub fn tokenize(source: &str) -> Result<TokenStream, LexerError> {
    let mut analyzer = LexicalAnalyzer::new();
    analyzer.tokenize(source)
}

/// Tokenize with custom runtime preferences (security boundaries remain
/// compile-time)
pub fn tokenize_with_preferences(
    source: &str,
    preferences: LexicalPreferences,
) -> Result<TokenStream, LexerError> {
    let mut analyzer = LexicalAnalyzer::with_preferences(preferences);
    analyzer.tokenize(source)
}

// ============================================================================
// MODULE VALIDATION
// ============================================================================

/// Validate lexical error code wiring and compile-time limits
pub fn validate_tokenization() -> Result<(), String> {
    let test_codes = [
        crate::logging::codes::lexical::INVALID_CHARACTER,
        crate::logging::codes::lexical::UNTERMINATED_QUOTE,
        crate::logging::codes::lexical::ATOM_TOO_LONG,
        crate::logging::codes::lexical::EXPRESSION_TOO_LARGE,
        crate::logging::codes::lexical::TOO_MANY_TOKENS,
        crate::logging::codes::lexical::MALFORMED_OPERATOR,
    ];

    for code in &test_codes {
        if crate::logging::codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!(
                "Lexical error code {} has no description",
                code.as_str()
            ));
        }
    }

    if MAX_EXPRESSION_LENGTH == 0 {
        return Err("MAX_EXPRESSION_LENGTH cannot be zero".to_string());
    }
    if MAX_ATOM_LENGTH == 0 {
        return Err("MAX_ATOM_LENGTH cannot be zero".to_string());
    }
    if MAX_TOKEN_COUNT == 0 {
        return Err("MAX_TOKEN_COUNT cannot be zero".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Token;

    #[test]
    fn test_module_tokenize() {
        let stream = tokenize("linux && docker").unwrap();
        assert_eq!(stream.len(), 4); // two atoms, one operator, EOF
        assert!(stream.has_eof());
    }

    #[test]
    fn test_tokenize_with_preferences() {
        let preferences = LexicalPreferences {
            collect_detailed_metrics: false,
            track_operator_usage: true,
            include_position_in_errors: true,
        };
        let stream = tokenize_with_preferences("a||b", preferences).unwrap();
        assert_eq!(
            stream.current_token(),
            Some(&Token::atom("a"))
        );
    }

    #[test]
    fn test_validate_tokenization() {
        assert!(validate_tokenization().is_ok());
    }
}
