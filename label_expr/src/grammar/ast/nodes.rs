//! AST node definitions for label expressions
//!
//! The node set is closed, so it is modeled as a tagged sum type dispatched
//! by pattern matching rather than trait objects. Nodes are immutable after
//! construction; trees built by the parser (or programmatically through the
//! constructor helpers) can be shared freely across threads.
//!
//! Canonical text is reconstructed recursively: a child is parenthesized
//! exactly when the enclosing operator binds tighter than the child's own
//! top-level operator, and `Paren` nodes preserve parentheses the user wrote
//! even when redundant.

use crate::grammar::precedence::Precedence;
use crate::naming;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A single label name, the smallest expression unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabelAtom {
    name: String,
}

impl LabelAtom {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The raw (unquoted) label name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this name must be quoted when rendered
    pub fn needs_escape(&self) -> bool {
        naming::needs_escape(&self.name)
    }

    pub fn into_name(self) -> String {
        self.name
    }
}

impl fmt::Display for LabelAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", naming::escape(&self.name))
    }
}

/// A parsed label expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelExpr {
    /// A bare label name
    Atom(LabelAtom),
    /// Prefix negation
    Not(Box<LabelExpr>),
    /// User-supplied grouping, preserved through re-rendering
    Paren(Box<LabelExpr>),
    /// Conjunction
    And(Box<LabelExpr>, Box<LabelExpr>),
    /// Disjunction
    Or(Box<LabelExpr>, Box<LabelExpr>),
    /// Implication
    Implies(Box<LabelExpr>, Box<LabelExpr>),
    /// Biconditional
    Iff(Box<LabelExpr>, Box<LabelExpr>),
}

impl LabelExpr {
    // === CONSTRUCTOR HELPERS ===

    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(LabelAtom::new(name))
    }

    pub fn not(expr: LabelExpr) -> Self {
        Self::Not(Box::new(expr))
    }

    pub fn paren(expr: LabelExpr) -> Self {
        Self::Paren(Box::new(expr))
    }

    pub fn and(lhs: LabelExpr, rhs: LabelExpr) -> Self {
        Self::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: LabelExpr, rhs: LabelExpr) -> Self {
        Self::Or(Box::new(lhs), Box::new(rhs))
    }

    pub fn implies(lhs: LabelExpr, rhs: LabelExpr) -> Self {
        Self::Implies(Box::new(lhs), Box::new(rhs))
    }

    pub fn iff(lhs: LabelExpr, rhs: LabelExpr) -> Self {
        Self::Iff(Box::new(lhs), Box::new(rhs))
    }

    // === STRUCTURE ===

    /// The precedence level of this node's top-level operator.
    ///
    /// `Paren` reports `Atom`: its own parentheses already group it, so an
    /// enclosing operator never needs to add more.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Atom(_) | Self::Paren(_) => Precedence::Atom,
            Self::Not(_) => Precedence::Not,
            Self::And(_, _) => Precedence::And,
            Self::Or(_, _) => Precedence::Or,
            Self::Implies(_, _) => Precedence::Implies,
            Self::Iff(_, _) => Precedence::Iff,
        }
    }

    /// Collect the set of atom names referenced by this expression.
    pub fn atoms(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_atoms(&mut names);
        names
    }

    fn collect_atoms(&self, names: &mut BTreeSet<String>) {
        match self {
            Self::Atom(atom) => {
                names.insert(atom.name().to_string());
            }
            Self::Not(child) | Self::Paren(child) => child.collect_atoms(names),
            Self::And(lhs, rhs)
            | Self::Or(lhs, rhs)
            | Self::Implies(lhs, rhs)
            | Self::Iff(lhs, rhs) => {
                lhs.collect_atoms(names);
                rhs.collect_atoms(names);
            }
        }
    }

    // === RENDERING ===

    /// The canonical text form of this expression.
    pub fn expression(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Self::Atom(atom) => out.push_str(&naming::escape(atom.name())),
            Self::Not(child) => {
                out.push('!');
                Self::write_operand(Precedence::Not, child, out);
            }
            Self::Paren(child) => {
                out.push('(');
                child.write_to(out);
                out.push(')');
            }
            Self::And(lhs, rhs) => Self::write_binary(Precedence::And, lhs, rhs, out),
            Self::Or(lhs, rhs) => Self::write_binary(Precedence::Or, lhs, rhs, out),
            Self::Implies(lhs, rhs) => Self::write_binary(Precedence::Implies, lhs, rhs, out),
            Self::Iff(lhs, rhs) => Self::write_binary(Precedence::Iff, lhs, rhs, out),
        }
    }

    fn write_binary(op: Precedence, lhs: &LabelExpr, rhs: &LabelExpr, out: &mut String) {
        Self::write_operand(op, lhs, out);
        // Binary levels always carry a token
        if let Some(token) = op.token() {
            out.push_str(token);
        }
        Self::write_operand(op, rhs, out);
    }

    /// Write a child of operator `op`, parenthesizing when `op` binds
    /// tighter than the child's own operator.
    fn write_operand(op: Precedence, child: &LabelExpr, out: &mut String) {
        if op < child.precedence() {
            out.push('(');
            child.write_to(out);
            out.push(')');
        } else {
            child.write_to(out);
        }
    }
}

impl fmt::Display for LabelExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression())
    }
}
