//! Span-accurate token stream management
//!
//! Whitespace tokens are kept in the stream with their original spans but
//! filtered out of parsing, so error reports always point at the exact
//! source location even in expressions padded with spaces.

use crate::tokens::token::Token;
use crate::utils::{Position, SourceMap, Span, Spanned};
use thiserror::Error;

/// A token with span information
pub type SpannedToken = Spanned<Token>;

/// Token stream that maintains precise source locations while filtering
/// whitespace out of the parser's view.
#[derive(Debug, Clone)]
pub struct TokenStream {
    /// All tokens (including whitespace) with original spans
    all_tokens: Vec<SpannedToken>,
    /// Indices into all_tokens for significant tokens
    significant_indices: Vec<usize>,
    /// Current position in significant_indices
    position: usize,
    /// Source text for error reporting
    source_map: Option<SourceMap>,
}

impl TokenStream {
    /// Create a new token stream with automatic whitespace filtering
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        let mut stream = Self {
            all_tokens: tokens,
            significant_indices: Vec::new(),
            position: 0,
            source_map: None,
        };
        stream.rebuild_significant_indices();
        stream
    }

    /// Create stream with source text for enhanced error reporting
    pub fn with_source_map(tokens: Vec<SpannedToken>, source_map: SourceMap) -> Self {
        let mut stream = Self {
            all_tokens: tokens,
            significant_indices: Vec::new(),
            position: 0,
            source_map: Some(source_map),
        };
        stream.rebuild_significant_indices();
        stream
    }

    fn rebuild_significant_indices(&mut self) {
        self.significant_indices = self
            .all_tokens
            .iter()
            .enumerate()
            .filter(|(_, spanned)| spanned.value.is_significant())
            .map(|(i, _)| i)
            .collect();
        self.position = 0;
    }

    // === CORE NAVIGATION ===

    /// Get the current significant token with its span
    pub fn current(&self) -> Option<&SpannedToken> {
        self.significant_indices
            .get(self.position)
            .and_then(|&original_index| self.all_tokens.get(original_index))
    }

    /// Get the current token value (without span)
    pub fn current_token(&self) -> Option<&Token> {
        self.current().map(|spanned| &spanned.value)
    }

    /// Get the span of the current token
    pub fn current_span(&self) -> Option<Span> {
        self.current().map(|spanned| spanned.span)
    }

    /// Peek ahead by n positions in significant tokens
    pub fn peek_ahead(&self, n: usize) -> Option<&SpannedToken> {
        self.significant_indices
            .get(self.position + n)
            .and_then(|&original_index| self.all_tokens.get(original_index))
    }

    /// Advance to the next significant token
    pub fn advance(&mut self) -> Option<&SpannedToken> {
        if self.position < self.significant_indices.len() {
            self.position += 1;
        }
        self.current()
    }

    /// Check if we're past the last significant token
    pub fn is_at_end(&self) -> bool {
        self.position >= self.significant_indices.len()
    }

    /// Number of significant tokens
    pub fn len(&self) -> usize {
        self.significant_indices.len()
    }

    /// Check if the stream has no significant tokens
    pub fn is_empty(&self) -> bool {
        self.significant_indices.is_empty()
    }

    /// Current position for diagnostics
    pub fn position(&self) -> usize {
        self.position
    }

    // === CHECKPOINTS ===

    /// Save current position for backtracking
    pub fn save_position(&self) -> usize {
        self.position
    }

    /// Restore position from checkpoint
    pub fn restore_position(&mut self, saved_position: usize) {
        self.position = saved_position.min(self.significant_indices.len());
    }

    // === PARSER INTEGRATION ===

    /// Advance if the current token equals `expected`
    pub fn advance_if(&mut self, expected: &Token) -> bool {
        if self.current_token() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect a specific token, advancing past it
    pub fn expect_token(&mut self, expected: Token) -> Result<SpannedToken, TokenStreamError> {
        match self.current() {
            Some(current) if current.value == expected => {
                let result = current.clone();
                self.advance();
                Ok(result)
            }
            Some(current) => Err(TokenStreamError::UnexpectedToken {
                expected: expected.as_source_string(),
                found: current.value.as_source_string(),
                span: current.span,
            }),
            None => Err(TokenStreamError::UnexpectedEndOfStream {
                expected: expected.as_source_string(),
            }),
        }
    }

    // === ERROR REPORTING ===

    /// Format an error with source context when a source map is available
    pub fn format_error(&self, span: Span, message: &str) -> String {
        if let Some(ref source_map) = self.source_map {
            source_map.format_error(&span, message)
        } else {
            format!("Error at {}: {}", span, message)
        }
    }

    /// Get source text for a span (if source map available)
    pub fn source_text(&self, span: &Span) -> Option<&str> {
        self.source_map.as_ref().map(|sm| sm.span_text(span))
    }

    // === ITERATION ===

    /// All tokens (including whitespace) with spans
    pub fn all_tokens(&self) -> &[SpannedToken] {
        &self.all_tokens
    }

    /// Iterator over significant tokens with spans
    pub fn iter_significant(&self) -> impl Iterator<Item = &SpannedToken> {
        self.significant_indices
            .iter()
            .map(|&i| &self.all_tokens[i])
    }

    /// Check whether the stream is terminated by an EOF token
    pub fn has_eof(&self) -> bool {
        self.significant_indices
            .last()
            .and_then(|&i| self.all_tokens.get(i))
            .map(|t| matches!(t.value, Token::Eof))
            .unwrap_or(false)
    }
}

/// Token stream errors with span accuracy
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TokenStreamError {
    #[error("Expected '{expected}', found '{found}' at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Expected '{expected}', but reached end of input")]
    UnexpectedEndOfStream { expected: String },
}

/// Token stream builder with span tracking (used by tests and tools)
#[derive(Debug, Default)]
pub struct TokenStreamBuilder {
    tokens: Vec<SpannedToken>,
    current_position: Position,
}

impl TokenStreamBuilder {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            current_position: Position::start(),
        }
    }

    /// Add a token whose span covers `text`
    pub fn push_token(mut self, token: Token, text: &str) -> Self {
        let start = self.current_position;
        let end = start.advance_str(text);
        self.tokens.push(SpannedToken::new(token, Span::new(start, end)));
        self.current_position = end;
        self
    }

    /// Add a token with an explicit span
    pub fn push_token_with_span(mut self, token: Token, span: Span) -> Self {
        self.tokens.push(SpannedToken::new(token, span));
        self.current_position = span.end;
        self
    }

    pub fn build(self) -> TokenStream {
        TokenStream::new(self.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stream() -> TokenStream {
        TokenStreamBuilder::new()
            .push_token(Token::atom("linux"), "linux")
            .push_token(Token::Space, " ")
            .push_token(Token::And, "&&")
            .push_token(Token::Space, " ")
            .push_token(Token::atom("docker"), "docker")
            .push_token(Token::Eof, "")
            .build()
    }

    #[test]
    fn test_whitespace_filtering() {
        let stream = sample_stream();
        // 6 raw tokens, 4 significant (two spaces filtered)
        assert_eq!(stream.all_tokens().len(), 6);
        assert_eq!(stream.len(), 4);
    }

    #[test]
    fn test_navigation() {
        let mut stream = sample_stream();
        assert_eq!(stream.current_token(), Some(&Token::atom("linux")));

        stream.advance();
        assert_eq!(stream.current_token(), Some(&Token::And));

        // Peeking skips whitespace too
        assert_eq!(
            stream.peek_ahead(1).map(|t| &t.value),
            Some(&Token::atom("docker"))
        );
    }

    #[test]
    fn test_spans_survive_filtering() {
        let mut stream = sample_stream();
        stream.advance();
        // The && sits after "linux " in the source
        let span = stream.current_span().unwrap();
        assert_eq!(span.start.offset, 6);
        assert_eq!(span.end.offset, 8);
    }

    #[test]
    fn test_expect_token() {
        let mut stream = sample_stream();
        assert!(stream.expect_token(Token::atom("linux")).is_ok());
        assert!(stream.expect_token(Token::And).is_ok());

        let err = stream.expect_token(Token::Or).unwrap_err();
        assert!(matches!(err, TokenStreamError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_expect_past_end() {
        let mut stream = TokenStreamBuilder::new().build();
        let err = stream.expect_token(Token::Eof).unwrap_err();
        assert!(matches!(err, TokenStreamError::UnexpectedEndOfStream { .. }));
    }

    #[test]
    fn test_checkpoints() {
        let mut stream = sample_stream();
        let checkpoint = stream.save_position();

        stream.advance();
        stream.advance();
        assert_eq!(stream.current_token(), Some(&Token::atom("docker")));

        stream.restore_position(checkpoint);
        assert_eq!(stream.current_token(), Some(&Token::atom("linux")));
    }

    #[test]
    fn test_has_eof() {
        assert!(sample_stream().has_eof());

        let no_eof = TokenStreamBuilder::new()
            .push_token(Token::atom("linux"), "linux")
            .build();
        assert!(!no_eof.has_eof());
    }

    #[test]
    fn test_format_error_with_source() {
        let source = "linux &&".to_string();
        let tokens = vec![
            SpannedToken::new(
                Token::atom("linux"),
                Span::new(Position::new(0, 1, 1), Position::new(5, 1, 6)),
            ),
            SpannedToken::new(
                Token::And,
                Span::new(Position::new(6, 1, 7), Position::new(8, 1, 9)),
            ),
        ];
        let stream = TokenStream::with_source_map(tokens, SourceMap::new(source));

        let span = Span::new(Position::new(6, 1, 7), Position::new(8, 1, 9));
        let formatted = stream.format_error(span, "operator is missing an operand");
        assert!(formatted.contains("--> 1:7"));
        assert_eq!(stream.source_text(&span), Some("&&"));
    }
}
