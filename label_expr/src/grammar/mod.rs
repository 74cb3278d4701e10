//! Grammar definitions for label expressions

pub mod ast;
pub mod precedence;

// Re-export AST types
pub use ast::{LabelAtom, LabelExpr};

// Re-export the precedence table
pub use precedence::Precedence;
