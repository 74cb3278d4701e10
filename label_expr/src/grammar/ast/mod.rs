//! Abstract syntax tree for label expressions

pub mod nodes;

pub use nodes::{LabelAtom, LabelExpr};
