//! Error types for syntax analysis
//!
//! `SyntaxError` covers token-to-AST transformation failures with
//! span-accurate reporting; `ParseError` is the aggregate error the public
//! parse API surfaces, wrapping either lexical or syntax failures. A
//! malformed expression always fails loudly: there is no partial tree and
//! no silent default.

use crate::lexical::LexerError;
use crate::logging::{codes, Code};
use crate::utils::Span;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Syntax transformation errors with span-accurate reporting
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Unexpected token: expected {expected}, found '{found}' at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEndOfInput { expected: String },

    #[error("Empty expression")]
    EmptyExpression,

    #[error("Missing end-of-input marker in token stream")]
    MissingEof,

    #[error("Unbalanced parenthesis at {span}")]
    UnbalancedParenthesis { span: Span },

    #[error("Input continues after a complete expression: '{found}' at {span}")]
    TrailingTokens { found: String, span: Span },

    #[error("Maximum expression nesting depth exceeded at {span}")]
    MaxRecursionDepth { span: Span },

    #[error("Internal parser error: {message}")]
    InternalParserError { message: String },
}

impl SyntaxError {
    /// Create unexpected token error
    pub fn unexpected_token(expected: &str, found: &str, span: Span) -> Self {
        Self::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
            span,
        }
    }

    /// Create unexpected end of input error
    pub fn unexpected_end_of_input(expected: &str) -> Self {
        Self::UnexpectedEndOfInput {
            expected: expected.to_string(),
        }
    }

    /// Create unbalanced parenthesis error
    pub fn unbalanced_parenthesis(span: Span) -> Self {
        Self::UnbalancedParenthesis { span }
    }

    /// Create trailing tokens error
    pub fn trailing_tokens(found: &str, span: Span) -> Self {
        Self::TrailingTokens {
            found: found.to_string(),
            span,
        }
    }

    /// Create max recursion depth error
    pub fn max_recursion_depth(span: Span) -> Self {
        Self::MaxRecursionDepth { span }
    }

    /// Create internal parser error
    pub fn internal_parser_error(message: &str) -> Self {
        Self::InternalParserError {
            message: message.to_string(),
        }
    }

    /// Get error code for the logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::UnexpectedEndOfInput { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::EmptyExpression => codes::syntax::EMPTY_EXPRESSION,
            Self::MissingEof => codes::syntax::MISSING_EOF,
            Self::UnbalancedParenthesis { .. } => codes::syntax::UNBALANCED_PARENTHESIS,
            Self::TrailingTokens { .. } => codes::syntax::TRAILING_TOKENS,
            Self::MaxRecursionDepth { .. } => codes::syntax::MAX_RECURSION_DEPTH,
            Self::InternalParserError { .. } => codes::syntax::INTERNAL_PARSER_ERROR,
        }
    }

    /// Get span if available
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::UnbalancedParenthesis { span }
            | Self::TrailingTokens { span, .. }
            | Self::MaxRecursionDepth { span } => Some(*span),
            Self::UnexpectedEndOfInput { .. }
            | Self::EmptyExpression
            | Self::MissingEof
            | Self::InternalParserError { .. } => None,
        }
    }

    /// Check if this error is recoverable by fixing the expression
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::InternalParserError { .. } | Self::MaxRecursionDepth { .. }
        )
    }
}

/// Aggregate error surfaced by the public parse API
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexical(#[from] LexerError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    /// Get error code for the logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::Lexical(e) => e.error_code(),
            Self::Syntax(e) => e.error_code(),
        }
    }

    /// Get span if available
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Lexical(_) => None,
            Self::Syntax(e) => e.span(),
        }
    }
}
