//! Token system with dedicated symbol tokens for systematic parsing
//!
//! Every operator is its own token variant; atom names are carried as a
//! single `Atom` variant whether they appeared bare or quoted in the source
//! (quoted atoms are unquoted during lexical analysis, and re-quoted on
//! rendering only when the name requires it).

use crate::naming;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Complete token set for label expressions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    // === OPERATORS ===
    /// Prefix negation (`!`)
    Not,
    /// Conjunction (`&&`)
    And,
    /// Disjunction (`||`)
    Or,
    /// Implication (`->`)
    Implies,
    /// Biconditional (`<->`)
    Iff,

    // === GROUPING ===
    /// Opening parenthesis
    LeftParen,
    /// Closing parenthesis
    RightParen,

    // === ATOMS ===
    /// A label name, already unquoted if it was quoted in the source
    Atom(String),

    // === WHITESPACE AND STRUCTURE ===
    /// Single space character
    Space,
    /// Tab character
    Tab,
    /// Newline character
    Newline,
    /// End of input marker
    Eof,
}

impl Token {
    /// Create an atom token from a name
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(name.into())
    }

    /// Check if this token is any operator
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Self::Not | Self::And | Self::Or | Self::Implies | Self::Iff
        )
    }

    /// Check if this token is a binary (infix) operator
    pub fn is_binary_operator(&self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Implies | Self::Iff)
    }

    /// Check if this token is an atom
    pub fn is_atom(&self) -> bool {
        matches!(self, Self::Atom(_))
    }

    /// Get the atom name if this token is an atom
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Self::Atom(name) => Some(name),
            _ => None,
        }
    }

    /// Check if this token is whitespace
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Self::Space | Self::Tab | Self::Newline)
    }

    /// Check if this token participates in parsing
    pub fn is_significant(&self) -> bool {
        !self.is_whitespace()
    }

    /// Get the token as it would appear in expression source
    pub fn as_source_string(&self) -> String {
        match self {
            Self::Not => "!".to_string(),
            Self::And => "&&".to_string(),
            Self::Or => "||".to_string(),
            Self::Implies => "->".to_string(),
            Self::Iff => "<->".to_string(),
            Self::LeftParen => "(".to_string(),
            Self::RightParen => ")".to_string(),
            Self::Atom(name) => naming::escape(name),
            Self::Space => " ".to_string(),
            Self::Tab => "\t".to_string(),
            Self::Newline => "\n".to_string(),
            Self::Eof => "<EOF>".to_string(),
        }
    }

    /// Get the classification of this token
    pub fn token_class(&self) -> TokenClass {
        match self {
            Self::Not | Self::And | Self::Or | Self::Implies | Self::Iff => TokenClass::Operator,
            Self::LeftParen | Self::RightParen => TokenClass::Grouping,
            Self::Atom(_) => TokenClass::Atom,
            Self::Space | Self::Tab | Self::Newline => TokenClass::Whitespace,
            Self::Eof => TokenClass::Special,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_source_string())
    }
}

/// Token classification for diagnostics and metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// Operator symbols
    Operator,
    /// Parentheses
    Grouping,
    /// Label names
    Atom,
    /// Whitespace and formatting
    Whitespace,
    /// Special tokens (EOF)
    Special,
}
