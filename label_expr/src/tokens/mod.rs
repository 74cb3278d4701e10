//! Token system for label expression lexical analysis
//!
//! Converts raw expression text into a structured stream of tokens consumed
//! by the parser. Operators are dedicated symbol tokens (`!`, `&&`, `||`,
//! `->`, `<->`), atoms carry their unquoted name, and whitespace is retained
//! in the stream (with spans) but filtered out of the parser's view.

pub mod token;
pub mod token_stream;

// Re-export key types for convenience
pub use token::{Token, TokenClass};
pub use token_stream::{SpannedToken, TokenStream, TokenStreamBuilder, TokenStreamError};

// Re-export span types from utils
pub use crate::utils::{Position, SourceMap, Span, Spanned};
