//! Label expression engine for build-agent matching
//!
//! Parses boolean expressions over named agent labels (`linux && !docker`),
//! evaluates them against a caller-supplied resolver, and renders them back
//! to canonical text with minimal parenthesization and quoting of unsafe
//! names.
//!
//! ```
//! use label_expr::{parse, FnResolver};
//!
//! let expr = parse("linux && !docker").unwrap();
//! let agent = FnResolver(|label: &str| label == "linux");
//!
//! assert!(expr.matches(&agent).unwrap());
//! assert_eq!(expr.expression(), "linux&&!docker");
//! ```

// Internal modules
pub mod config;
pub mod eval;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod naming;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use eval::{FnResolver, Resolver, ResolverError};
pub use grammar::{LabelAtom, LabelExpr, Precedence};
pub use lexical::LexerError;
pub use syntax::{ParseError, SyntaxError};

use tokens::Token;

/// Parse a label expression into an immutable tree.
pub fn parse(expression: &str) -> Result<LabelExpr, ParseError> {
    let stream = lexical::tokenize(expression)?;
    let expr = syntax::parse_token_stream(stream)?;
    Ok(expr)
}

/// Parse-check an expression without keeping the tree.
///
/// Used by configuration forms to reject malformed expressions before they
/// are persisted.
pub fn validate(expression: &str) -> Result<(), ParseError> {
    let expr = parse(expression)?;
    crate::log_success!(logging::codes::success::EXPRESSION_VALIDATED,
        "Expression validated",
        "expression" => expr.expression()
    );
    Ok(())
}

/// Parse a whitespace-separated list of (possibly quoted) atom names, the
/// format used when assigning labels to an agent.
///
/// Quoting rules are shared with expressions, so a label containing spaces
/// is written `"needs space"` in both places. Operators and parentheses are
/// not valid here.
pub fn parse_atom_list(text: &str) -> Result<Vec<LabelAtom>, ParseError> {
    let stream = lexical::tokenize(text)?;
    let mut atoms = Vec::new();

    for spanned in stream.iter_significant() {
        match &spanned.value {
            Token::Atom(name) => atoms.push(LabelAtom::new(name.clone())),
            Token::Eof => break,
            other => {
                return Err(SyntaxError::unexpected_token(
                    "label name",
                    &other.as_source_string(),
                    spanned.span,
                )
                .into());
            }
        }
    }

    Ok(atoms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::{HashMap, HashSet};

    fn resolver(values: &[(&str, bool)]) -> HashMap<String, bool> {
        values.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_canonical_round_trip() {
        // Parsing then rendering reproduces the canonical corpus exactly
        for text in [
            "foo",
            "!foo",
            "foo&&bar",
            "foo||bar&&baz",
            "(foo||bar)&&baz",
            "foo->bar<->baz",
            "(foo)",
            "!!foo",
            "!(foo&&bar)",
            "\"needs space\"&&bar",
        ] {
            let expr = parse(text).unwrap();
            assert_eq!(expr.expression(), text, "canonical form of {:?}", text);
        }
    }

    #[test]
    fn test_reparse_preserves_semantics() {
        // For arbitrary spacing the text normalizes, but re-parsing the
        // rendered form evaluates identically under every assignment
        for text in ["a && b || !c", "a -> (b <-> c)", "!( a || b ) && c"] {
            let original = parse(text).unwrap();
            let reparsed = parse(&original.expression()).unwrap();

            for bits in 0..8u8 {
                let r = resolver(&[
                    ("a", bits & 1 != 0),
                    ("b", bits & 2 != 0),
                    ("c", bits & 4 != 0),
                ]);
                assert_eq!(
                    original.matches(&r).unwrap(),
                    reparsed.matches(&r).unwrap(),
                    "expression {:?}, assignment {:03b}",
                    text,
                    bits
                );
            }
        }
    }

    #[test]
    fn test_precedence_evaluation() {
        // AND binds tighter than OR
        let expr = parse("foo||bar&&baz").unwrap();
        assert!(expr
            .matches(&resolver(&[("foo", false), ("bar", true), ("baz", true)]))
            .unwrap());
        assert!(!expr
            .matches(&resolver(&[("foo", false), ("bar", true), ("baz", false)]))
            .unwrap());
    }

    #[test]
    fn test_quoted_name_round_trip() {
        let expr = parse("\"needs space\"").unwrap();
        assert_eq!(expr.atoms().into_iter().collect::<Vec<_>>(), vec!["needs space"]);
        assert_eq!(expr.expression(), "\"needs space\"");
        assert_eq!(parse(&expr.expression()).unwrap(), expr);
    }

    #[test]
    fn test_malformed_expressions_rejected() {
        assert_matches!(parse("foo&&"), Err(ParseError::Syntax(_)));
        assert_matches!(parse("(foo"), Err(ParseError::Syntax(_)));
        assert_matches!(parse(""), Err(ParseError::Syntax(_)));
        assert_matches!(parse("\"open"), Err(ParseError::Lexical(_)));
        assert_matches!(parse("a & b"), Err(ParseError::Lexical(_)));
    }

    #[test]
    fn test_validate() {
        assert!(validate("linux && (docker || podman)").is_ok());
        assert!(validate("linux &&").is_err());
    }

    #[test]
    fn test_matching_against_agent_label_set() {
        let agent: HashSet<String> = ["linux".to_string(), "fast-disk".to_string()].into();

        assert!(parse("linux").unwrap().matches(&agent).unwrap());
        assert!(parse("linux&&fast-disk").unwrap().matches(&agent).unwrap());
        assert!(parse("linux&&!docker").unwrap().matches(&agent).unwrap());
        assert!(!parse("docker||windows").unwrap().matches(&agent).unwrap());
    }

    #[test]
    fn test_parse_atom_list() {
        let atoms = parse_atom_list("linux fast-disk \"needs space\"").unwrap();
        let names: Vec<_> = atoms.iter().map(|a| a.name().to_string()).collect();
        assert_eq!(names, vec!["linux", "fast-disk", "needs space"]);
    }

    #[test]
    fn test_parse_atom_list_rejects_operators() {
        assert_matches!(parse_atom_list("linux && docker"), Err(ParseError::Syntax(_)));
        assert_matches!(parse_atom_list("(linux)"), Err(ParseError::Syntax(_)));
    }

    #[test]
    fn test_parse_atom_list_empty() {
        assert!(parse_atom_list("").unwrap().is_empty());
        assert!(parse_atom_list("   ").unwrap().is_empty());
    }

    #[test]
    fn test_shared_tree_across_threads() {
        use std::sync::Arc;

        let expr = Arc::new(parse("linux&&!docker").unwrap());
        let mut handles = Vec::new();

        for i in 0..4 {
            let expr = Arc::clone(&expr);
            handles.push(std::thread::spawn(move || {
                let has_docker = i % 2 == 0;
                let r = FnResolver(move |label: &str| match label {
                    "linux" => true,
                    "docker" => has_docker,
                    _ => false,
                });
                expr.matches(&r).unwrap()
            }));
        }

        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![false, true, false, true]);
    }

    #[test]
    fn test_error_includes_position() {
        let err = parse("linux && ").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("end of input"), "message: {}", message);

        let err = parse("linux ** docker").unwrap_err();
        assert_matches!(err, ParseError::Syntax(SyntaxError::TrailingTokens { .. }));
    }
}
