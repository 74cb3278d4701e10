//! Core lexical analyzer implementation
//!
//! Systematic tokenization of label expression text: dedicated symbol tokens
//! for the five operators, parentheses, bare and quoted atom names, and
//! retained whitespace. Compile-time security limits bound expression size,
//! atom length, and token count.

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::naming;
use crate::tokens::{SpannedToken, Token, TokenStream};
use crate::utils::{Position, SourceMap, Span};
use crate::{log_debug, log_error, log_success};
use std::collections::HashMap;

/// Lexical analysis errors with compile-time security boundaries
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexerError {
    #[error("Invalid character '{character}' at line {line}, column {column}")]
    InvalidCharacter {
        character: char,
        line: u32,
        column: u32,
    },

    #[error("Unterminated quoted label name starting at line {line}, column {column}")]
    UnterminatedQuote { line: u32, column: u32 },

    #[error("Incomplete operator '{found}' at line {line}, column {column} (expected one of !, &&, ||, ->, <->)")]
    MalformedOperator {
        found: String,
        line: u32,
        column: u32,
    },

    #[error("Label name too long: {length} characters (max {MAX_ATOM_LENGTH})")]
    AtomTooLong { length: usize },

    #[error("Expression too large: {size} bytes (max {MAX_EXPRESSION_LENGTH})")]
    ExpressionTooLarge { size: usize },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::InvalidCharacter { .. } => codes::lexical::INVALID_CHARACTER,
            LexerError::UnterminatedQuote { .. } => codes::lexical::UNTERMINATED_QUOTE,
            LexerError::MalformedOperator { .. } => codes::lexical::MALFORMED_OPERATOR,
            LexerError::AtomTooLong { .. } => codes::lexical::ATOM_TOO_LONG,
            LexerError::ExpressionTooLarge { .. } => codes::lexical::EXPRESSION_TOO_LARGE,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
        }
    }
}

/// Essential lexical analysis metrics with runtime preferences
#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub atom_tokens: usize,
    pub operator_tokens: usize,
    pub whitespace_tokens: usize,
    pub max_atom_length: usize,

    // Runtime preference-controlled metrics
    pub operator_usage: HashMap<&'static str, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        match token {
            Token::Atom(name) => {
                self.atom_tokens += 1;
                self.max_atom_length = self.max_atom_length.max(name.chars().count());
            }
            Token::Not | Token::And | Token::Or | Token::Implies | Token::Iff => {
                self.operator_tokens += 1;

                if preferences.track_operator_usage {
                    let op = match token {
                        Token::Not => "!",
                        Token::And => "&&",
                        Token::Or => "||",
                        Token::Implies => "->",
                        _ => "<->",
                    };
                    *self.operator_usage.entry(op).or_insert(0) += 1;
                }
            }
            Token::Space | Token::Tab | Token::Newline => {
                if preferences.collect_detailed_metrics {
                    self.whitespace_tokens += 1;
                }
            }
            _ => {} // Parentheses, EOF
        }
    }
}

/// Core lexical analyzer with compile-time security boundaries
pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences: LexicalPreferences::default(),
        }
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// Tokenize expression text into a span-accurate token stream
    pub fn tokenize(&mut self, source: &str) -> Result<TokenStream, LexerError> {
        // Reset metrics for this tokenization
        self.metrics = LexicalMetrics::default();

        // SECURITY: bound input size before any allocation proportional to it
        if source.len() > MAX_EXPRESSION_LENGTH {
            let error = LexerError::ExpressionTooLarge { size: source.len() };
            log_error!(error.error_code(), "Expression exceeds size limit",
                "size" => source.len(),
                "limit" => MAX_EXPRESSION_LENGTH
            );
            return Err(error);
        }

        log_debug!("Starting lexical analysis",
            "length" => source.len(),
            "max_tokens_allowed" => MAX_TOKEN_COUNT
        );

        let chars: Vec<(usize, char)> = source.char_indices().collect();
        let mut tokens: Vec<SpannedToken> = Vec::new();
        let mut pos = Position::start();
        let mut i = 0usize;

        while i < chars.len() {
            // SECURITY: token count limit
            if tokens.len() >= MAX_TOKEN_COUNT {
                let error = LexerError::TooManyTokens {
                    count: tokens.len(),
                };
                log_error!(error.error_code(), "Token limit exceeded",
                    "count" => tokens.len(),
                    "limit" => MAX_TOKEN_COUNT
                );
                return Err(error);
            }

            let (_, ch) = chars[i];
            let start = pos;

            match ch {
                // Whitespace (kept in stream, filtered by the parser)
                ' ' => {
                    pos = pos.advance(' ');
                    self.push(&mut tokens, Token::Space, start, pos);
                    i += 1;
                }
                '\t' => {
                    pos = pos.advance('\t');
                    self.push(&mut tokens, Token::Tab, start, pos);
                    i += 1;
                }
                '\n' => {
                    pos = pos.advance('\n');
                    self.push(&mut tokens, Token::Newline, start, pos);
                    i += 1;
                }
                '\r' => {
                    // CRLF folds into a single newline token
                    let len = if matches!(chars.get(i + 1), Some((_, '\n'))) {
                        2
                    } else {
                        1
                    };
                    pos = Position::new(pos.offset + len, pos.line + 1, 1);
                    self.push(&mut tokens, Token::Newline, start, pos);
                    i += len;
                }

                // Grouping
                '(' => {
                    pos = pos.advance('(');
                    self.push(&mut tokens, Token::LeftParen, start, pos);
                    i += 1;
                }
                ')' => {
                    pos = pos.advance(')');
                    self.push(&mut tokens, Token::RightParen, start, pos);
                    i += 1;
                }

                // Single-character operator
                '!' => {
                    pos = pos.advance('!');
                    self.push(&mut tokens, Token::Not, start, pos);
                    i += 1;
                }

                // Two-character operators
                '&' => {
                    if matches!(chars.get(i + 1), Some((_, '&'))) {
                        pos = pos.advance_bytes(2);
                        self.push(&mut tokens, Token::And, start, pos);
                        i += 2;
                    } else {
                        return Err(self.malformed_operator("&", start));
                    }
                }
                '|' => {
                    if matches!(chars.get(i + 1), Some((_, '|'))) {
                        pos = pos.advance_bytes(2);
                        self.push(&mut tokens, Token::Or, start, pos);
                        i += 2;
                    } else {
                        return Err(self.malformed_operator("|", start));
                    }
                }
                '-' if matches!(chars.get(i + 1), Some((_, '>'))) => {
                    pos = pos.advance_bytes(2);
                    self.push(&mut tokens, Token::Implies, start, pos);
                    i += 2;
                }

                // Three-character operator
                '<' => {
                    if matches!(chars.get(i + 1), Some((_, '-')))
                        && matches!(chars.get(i + 2), Some((_, '>')))
                    {
                        pos = pos.advance_bytes(3);
                        self.push(&mut tokens, Token::Iff, start, pos);
                        i += 3;
                    } else {
                        return Err(self.malformed_operator("<", start));
                    }
                }
                '>' => {
                    return Err(self.malformed_operator(">", start));
                }

                // Quoted atom
                '"' => {
                    let (name, consumed) = self.scan_quoted_atom(&chars, i, start)?;
                    for k in i..i + consumed {
                        pos = pos.advance(chars[k].1);
                    }
                    self.push(&mut tokens, Token::Atom(name), start, pos);
                    i += consumed;
                }

                // Bare atom (or invalid character)
                _ => {
                    let (name, consumed) = self.scan_bare_atom(&chars, i, start)?;
                    for k in i..i + consumed {
                        pos = pos.advance(chars[k].1);
                    }
                    self.push(&mut tokens, Token::Atom(name), start, pos);
                    i += consumed;
                }
            }
        }

        let eof_span = Span::new(pos, pos);
        tokens.push(SpannedToken::new(Token::Eof, eof_span));
        self.metrics.record_token(&Token::Eof, &self.preferences);

        log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization completed",
            "tokens" => tokens.len(),
            "atoms" => self.metrics.atom_tokens,
            "operators" => self.metrics.operator_tokens
        );

        Ok(TokenStream::with_source_map(
            tokens,
            SourceMap::new(source.to_string()),
        ))
    }

    fn push(&mut self, tokens: &mut Vec<SpannedToken>, token: Token, start: Position, end: Position) {
        self.metrics.record_token(&token, &self.preferences);
        tokens.push(SpannedToken::new(token, Span::new(start, end)));
    }

    fn malformed_operator(&self, found: &str, at: Position) -> LexerError {
        let error = LexerError::MalformedOperator {
            found: found.to_string(),
            line: at.line,
            column: at.column,
        };
        log_error!(error.error_code(), "Incomplete operator sequence",
            span = Span::single(at),
            "found" => found
        );
        error
    }

    /// Scan a double-quoted atom starting at `chars[i]` (the opening quote).
    /// Returns the unquoted name and the number of characters consumed.
    fn scan_quoted_atom(
        &mut self,
        chars: &[(usize, char)],
        i: usize,
        start: Position,
    ) -> Result<(String, usize), LexerError> {
        let mut end = i + 1;
        let mut closed = false;

        while end < chars.len() {
            match chars[end].1 {
                '\\' if end + 1 < chars.len() => end += 2,
                '"' => {
                    closed = true;
                    end += 1;
                    break;
                }
                _ => end += 1,
            }
        }

        if !closed {
            let error = LexerError::UnterminatedQuote {
                line: start.line,
                column: start.column,
            };
            log_error!(error.error_code(), "Unterminated quoted label name",
                span = Span::single(start)
            );
            return Err(error);
        }

        let raw: String = chars[i..end].iter().map(|&(_, c)| c).collect();
        let name = naming::unescape(&raw).map_err(|_| LexerError::UnterminatedQuote {
            line: start.line,
            column: start.column,
        })?;

        self.check_atom_length(&name)?;
        Ok((name, end - i))
    }

    /// Scan a bare atom starting at `chars[i]`. A `-` ends the atom only when
    /// immediately followed by `>`, so hyphenated names stay whole while
    /// `a->b` still splits at the implication operator.
    fn scan_bare_atom(
        &mut self,
        chars: &[(usize, char)],
        i: usize,
        start: Position,
    ) -> Result<(String, usize), LexerError> {
        let mut end = i;

        while end < chars.len() {
            let c = chars[end].1;
            if c.is_whitespace()
                || c.is_control()
                || matches!(c, '(' | ')' | '&' | '|' | '!' | '<' | '>' | '"')
            {
                break;
            }
            if c == '-' && matches!(chars.get(end + 1), Some((_, '>'))) {
                break;
            }
            end += 1;
        }

        if end == i {
            let error = LexerError::InvalidCharacter {
                character: chars[i].1,
                line: start.line,
                column: start.column,
            };
            log_error!(error.error_code(), "Invalid character in expression",
                span = Span::single(start),
                "character" => chars[i].1
            );
            return Err(error);
        }

        let name: String = chars[i..end].iter().map(|&(_, c)| c).collect();
        self.check_atom_length(&name)?;
        Ok((name, end - i))
    }

    fn check_atom_length(&self, name: &str) -> Result<(), LexerError> {
        let length = name.chars().count();
        if length > MAX_ATOM_LENGTH {
            let error = LexerError::AtomTooLong { length };
            log_error!(error.error_code(), "Label name exceeds length limit",
                "length" => length,
                "limit" => MAX_ATOM_LENGTH
            );
            return Err(error);
        }
        Ok(())
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
