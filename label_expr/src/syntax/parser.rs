//! Recursive-descent parser for label expressions
//!
//! Climbs the precedence ladder from `<->` (loosest) down to atoms: each
//! binary level folds a left-associative chain over the next-tighter level,
//! so mixed expressions structure themselves from the precedence table
//! without lookahead beyond the current token. Parenthesized groups become
//! `Paren` nodes so user-written grouping survives re-rendering.

use crate::config::compile_time::syntax::MAX_PARSE_DEPTH;
use crate::grammar::{LabelAtom, LabelExpr};
use crate::logging::codes;
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::tokens::{Token, TokenStream};
use crate::utils::Span;
use crate::{log_debug, log_error, log_success};

/// Parser over a significant-token stream
pub struct ExpressionParser {
    tokens: TokenStream,
    depth: usize,
}

impl ExpressionParser {
    pub fn new(tokens: TokenStream) -> Self {
        log_debug!("Creating expression parser", "tokens" => tokens.len());
        Self { tokens, depth: 0 }
    }

    /// Parse the token stream into a single expression tree.
    ///
    /// Fails (never returns a partial tree) when the stream is empty, does
    /// not reduce to one expression, or ends inside an open construct.
    pub fn parse(mut self) -> SyntaxResult<LabelExpr> {
        if self.tokens.is_empty() {
            return Err(SyntaxError::EmptyExpression);
        }
        if !self.tokens.has_eof() {
            return Err(SyntaxError::MissingEof);
        }
        if matches!(self.tokens.current_token(), Some(Token::Eof)) {
            return Err(SyntaxError::EmptyExpression);
        }

        let expr = self.parse_iff()?;

        // The expression must consume everything up to EOF
        match self.tokens.current() {
            Some(spanned) if spanned.value == Token::Eof => Ok(expr),
            Some(spanned) if spanned.value == Token::RightParen => {
                Err(SyntaxError::unbalanced_parenthesis(spanned.span))
            }
            Some(spanned) => Err(SyntaxError::trailing_tokens(
                &spanned.value.as_source_string(),
                spanned.span,
            )),
            None => Err(SyntaxError::internal_parser_error(
                "token stream ended without EOF after validation",
            )),
        }
    }

    // === PRECEDENCE LADDER ===
    // Each level folds a left-associative chain over the next-tighter level.

    fn parse_iff(&mut self) -> SyntaxResult<LabelExpr> {
        let mut expr = self.parse_implies()?;
        while self.tokens.advance_if(&Token::Iff) {
            let rhs = self.parse_implies()?;
            expr = LabelExpr::iff(expr, rhs);
        }
        Ok(expr)
    }

    fn parse_implies(&mut self) -> SyntaxResult<LabelExpr> {
        let mut expr = self.parse_or()?;
        while self.tokens.advance_if(&Token::Implies) {
            let rhs = self.parse_or()?;
            expr = LabelExpr::implies(expr, rhs);
        }
        Ok(expr)
    }

    fn parse_or(&mut self) -> SyntaxResult<LabelExpr> {
        let mut expr = self.parse_and()?;
        while self.tokens.advance_if(&Token::Or) {
            let rhs = self.parse_and()?;
            expr = LabelExpr::or(expr, rhs);
        }
        Ok(expr)
    }

    fn parse_and(&mut self) -> SyntaxResult<LabelExpr> {
        let mut expr = self.parse_not()?;
        while self.tokens.advance_if(&Token::And) {
            let rhs = self.parse_not()?;
            expr = LabelExpr::and(expr, rhs);
        }
        Ok(expr)
    }

    fn parse_not(&mut self) -> SyntaxResult<LabelExpr> {
        self.enter()?;
        let result = if self.tokens.advance_if(&Token::Not) {
            self.parse_not().map(LabelExpr::not)
        } else {
            self.parse_primary()
        };
        self.exit();
        result
    }

    fn parse_primary(&mut self) -> SyntaxResult<LabelExpr> {
        const EXPECTED: &str = "label name, '!', or '('";

        self.enter()?;
        let result = match self.tokens.current().cloned() {
            Some(spanned) => match spanned.value {
                Token::Atom(name) => {
                    self.tokens.advance();
                    Ok(LabelExpr::Atom(LabelAtom::new(name)))
                }
                Token::LeftParen => {
                    self.tokens.advance();
                    self.parse_group(spanned.span)
                }
                Token::Eof => Err(SyntaxError::unexpected_end_of_input(EXPECTED)),
                other => Err(SyntaxError::unexpected_token(
                    EXPECTED,
                    &other.as_source_string(),
                    spanned.span,
                )),
            },
            None => Err(SyntaxError::unexpected_end_of_input(EXPECTED)),
        };
        self.exit();
        result
    }

    /// Parse the remainder of a parenthesized group whose `(` sits at
    /// `open_span`. The group becomes a `Paren` node.
    fn parse_group(&mut self, open_span: Span) -> SyntaxResult<LabelExpr> {
        let inner = self.parse_iff()?;

        match self.tokens.current().cloned() {
            Some(spanned) if spanned.value == Token::RightParen => {
                self.tokens.advance();
                Ok(LabelExpr::paren(inner))
            }
            Some(spanned) if spanned.value == Token::Eof => {
                Err(SyntaxError::unbalanced_parenthesis(open_span))
            }
            Some(spanned) => Err(SyntaxError::unexpected_token(
                "')'",
                &spanned.value.as_source_string(),
                spanned.span,
            )),
            None => Err(SyntaxError::unbalanced_parenthesis(open_span)),
        }
    }

    // === RECURSION BOUNDS ===

    fn enter(&mut self) -> SyntaxResult<()> {
        self.depth += 1;
        if self.depth > MAX_PARSE_DEPTH {
            let span = self.tokens.current_span().unwrap_or_else(Span::dummy);
            return Err(SyntaxError::max_recursion_depth(span));
        }
        Ok(())
    }

    fn exit(&mut self) {
        self.depth -= 1;
    }
}

/// Parse a token stream into an expression tree, logging the outcome
pub fn parse_token_stream(tokens: TokenStream) -> SyntaxResult<LabelExpr> {
    log_debug!("Starting syntax analysis", "tokens" => tokens.len());

    let result = ExpressionParser::new(tokens).parse();

    match &result {
        Ok(expr) => {
            log_success!(codes::success::AST_CONSTRUCTION_COMPLETE,
                "Expression parsed successfully",
                "expression" => expr.expression()
            );
        }
        Err(error) => {
            log_error!(error.error_code(), "Expression parsing failed",
                "error" => error
            );
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical;
    use assert_matches::assert_matches;

    fn parse(source: &str) -> SyntaxResult<LabelExpr> {
        let tokens = lexical::tokenize(source).expect("tokenization failed");
        parse_token_stream(tokens)
    }

    fn atom(name: &str) -> LabelExpr {
        LabelExpr::atom(name)
    }

    #[test]
    fn test_single_atom() {
        assert_eq!(parse("linux").unwrap(), atom("linux"));
    }

    #[test]
    fn test_quoted_atom() {
        assert_eq!(parse("\"needs space\"").unwrap(), atom("needs space"));
    }

    #[test]
    fn test_negation_and_double_negation() {
        assert_eq!(parse("!a").unwrap(), LabelExpr::not(atom("a")));
        assert_eq!(
            parse("!!a").unwrap(),
            LabelExpr::not(LabelExpr::not(atom("a")))
        );
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        // a||b&&c parses as a||(b&&c)
        assert_eq!(
            parse("a||b&&c").unwrap(),
            LabelExpr::or(atom("a"), LabelExpr::and(atom("b"), atom("c")))
        );
        // a&&b||c parses as (a&&b)||c
        assert_eq!(
            parse("a&&b||c").unwrap(),
            LabelExpr::or(LabelExpr::and(atom("a"), atom("b")), atom("c"))
        );
    }

    #[test]
    fn test_or_binds_tighter_than_implies() {
        assert_eq!(
            parse("a||b->c").unwrap(),
            LabelExpr::implies(LabelExpr::or(atom("a"), atom("b")), atom("c"))
        );
    }

    #[test]
    fn test_implies_binds_tighter_than_iff() {
        assert_eq!(
            parse("a->b<->c").unwrap(),
            LabelExpr::iff(LabelExpr::implies(atom("a"), atom("b")), atom("c"))
        );
    }

    #[test]
    fn test_not_binds_tighter_than_and() {
        assert_eq!(
            parse("!a&&b").unwrap(),
            LabelExpr::and(LabelExpr::not(atom("a")), atom("b"))
        );
    }

    #[test]
    fn test_left_associative_chains() {
        assert_eq!(
            parse("a&&b&&c").unwrap(),
            LabelExpr::and(LabelExpr::and(atom("a"), atom("b")), atom("c"))
        );
        assert_eq!(
            parse("a->b->c").unwrap(),
            LabelExpr::implies(LabelExpr::implies(atom("a"), atom("b")), atom("c"))
        );
        assert_eq!(
            parse("a<->b<->c").unwrap(),
            LabelExpr::iff(LabelExpr::iff(atom("a"), atom("b")), atom("c"))
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(
            parse("(a||b)&&c").unwrap(),
            LabelExpr::and(
                LabelExpr::paren(LabelExpr::or(atom("a"), atom("b"))),
                atom("c")
            )
        );
    }

    #[test]
    fn test_redundant_parentheses_are_preserved() {
        assert_eq!(parse("(a)").unwrap(), LabelExpr::paren(atom("a")));
        assert_eq!(
            parse("((a))").unwrap(),
            LabelExpr::paren(LabelExpr::paren(atom("a")))
        );
    }

    #[test]
    fn test_negated_group() {
        assert_eq!(
            parse("!(a&&b)").unwrap(),
            LabelExpr::not(LabelExpr::paren(LabelExpr::and(atom("a"), atom("b"))))
        );
    }

    #[test]
    fn test_whitespace_tolerance() {
        assert_eq!(parse(" a && b ").unwrap(), parse("a&&b").unwrap());
    }

    #[test]
    fn test_empty_expression_rejected() {
        assert_matches!(parse(""), Err(SyntaxError::EmptyExpression));
        assert_matches!(parse("   "), Err(SyntaxError::EmptyExpression));
    }

    #[test]
    fn test_missing_operand_rejected() {
        assert_matches!(parse("a&&"), Err(SyntaxError::UnexpectedEndOfInput { .. }));
        assert_matches!(parse("||a"), Err(SyntaxError::UnexpectedToken { .. }));
        assert_matches!(parse("!"), Err(SyntaxError::UnexpectedEndOfInput { .. }));
        assert_matches!(parse("a->"), Err(SyntaxError::UnexpectedEndOfInput { .. }));
    }

    #[test]
    fn test_unbalanced_parentheses_rejected() {
        assert_matches!(parse("(a"), Err(SyntaxError::UnbalancedParenthesis { .. }));
        assert_matches!(parse("a)"), Err(SyntaxError::UnbalancedParenthesis { .. }));
        assert_matches!(parse("((a)"), Err(SyntaxError::UnbalancedParenthesis { .. }));
    }

    #[test]
    fn test_empty_group_rejected() {
        assert_matches!(parse("()"), Err(SyntaxError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        assert_matches!(parse("a b"), Err(SyntaxError::TrailingTokens { .. }));
        assert_matches!(parse("a!b"), Err(SyntaxError::TrailingTokens { .. }));
    }

    #[test]
    fn test_error_spans_point_at_source() {
        let err = parse("a&&||b").unwrap_err();
        match err {
            SyntaxError::UnexpectedToken { span, found, .. } => {
                assert_eq!(found, "||");
                assert_eq!(span.start.offset, 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_depth_limit() {
        let deep = format!("{}a", "!".repeat(MAX_PARSE_DEPTH + 1));
        assert_matches!(parse(&deep), Err(SyntaxError::MaxRecursionDepth { .. }));

        // A modest chain stays well within bounds
        let fine = format!("{}a", "!".repeat(10));
        assert!(parse(&fine).is_ok());
    }
}
