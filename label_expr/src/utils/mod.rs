//! Shared primitive types for the label expression engine
//!
//! Provides dependency-free source-location types used by both the lexer
//! and the parser for error reporting.

pub mod span;

pub use span::{Position, SourceMap, Span, Spanned};
