//! Operator precedence table
//!
//! Single source of truth for operator binding strength, used by both the
//! parser (to structure mixed expressions) and the renderer (to decide when
//! parentheses are structurally required). Declaration order is binding
//! order: `Atom` binds tightest, `Iff` loosest, and the derived `Ord`
//! compares by that order, so a greater level means a more loosely binding
//! operator.

use serde::{Deserialize, Serialize};

/// Precedence levels, tightest binding first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Precedence {
    /// Identifiers and parenthesized groups (no operator token)
    Atom,
    /// Prefix negation `!`
    Not,
    /// Conjunction `&&`
    And,
    /// Disjunction `||`
    Or,
    /// Implication `->`
    Implies,
    /// Biconditional `<->`
    Iff,
}

impl Precedence {
    /// The display token for this level, if it has one
    pub fn token(&self) -> Option<&'static str> {
        match self {
            Self::Atom => None,
            Self::Not => Some("!"),
            Self::And => Some("&&"),
            Self::Or => Some("||"),
            Self::Implies => Some("->"),
            Self::Iff => Some("<->"),
        }
    }

    /// Whether this level is a binary infix operator
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Implies | Self::Iff)
    }

    /// All levels in binding order, tightest first
    pub fn all() -> [Precedence; 6] {
        [
            Self::Atom,
            Self::Not,
            Self::And,
            Self::Or,
            Self::Implies,
            Self::Iff,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_order() {
        // Atom binds tightest, Iff loosest
        assert!(Precedence::Atom < Precedence::Not);
        assert!(Precedence::Not < Precedence::And);
        assert!(Precedence::And < Precedence::Or);
        assert!(Precedence::Or < Precedence::Implies);
        assert!(Precedence::Implies < Precedence::Iff);
    }

    #[test]
    fn test_all_is_sorted() {
        let all = Precedence::all();
        for window in all.windows(2) {
            assert!(window[0] < window[1]);
        }
    }

    #[test]
    fn test_tokens() {
        assert_eq!(Precedence::Atom.token(), None);
        assert_eq!(Precedence::Not.token(), Some("!"));
        assert_eq!(Precedence::And.token(), Some("&&"));
        assert_eq!(Precedence::Or.token(), Some("||"));
        assert_eq!(Precedence::Implies.token(), Some("->"));
        assert_eq!(Precedence::Iff.token(), Some("<->"));
    }

    #[test]
    fn test_binary_classification() {
        assert!(!Precedence::Atom.is_binary());
        assert!(!Precedence::Not.is_binary());
        assert!(Precedence::And.is_binary());
        assert!(Precedence::Iff.is_binary());
    }
}
