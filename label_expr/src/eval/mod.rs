//! Expression evaluation against a caller-supplied resolver
//!
//! The resolver answers "does this candidate agent have label X?" and is
//! injected per call; the engine holds no label registry of its own. Both
//! operands of every binary operator are always evaluated: `&&` and `||`
//! name the boolean operation, not an evaluation-order shortcut, and callers
//! rely on every atom being resolved exactly once per evaluation.
//!
//! Evaluation itself is pure and does not log; it is the hot path of agent
//! matching and runs on shared immutable trees from many threads.

use crate::grammar::LabelExpr;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Failure reported by a caller-supplied resolver.
///
/// The evaluator propagates it unchanged: no retries, no suppression, no
/// fallback value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("resolver failed for label '{label}': {message}")]
pub struct ResolverError {
    label: String,
    message: String,
}

impl ResolverError {
    pub fn new(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for registries that reject unknown names
    pub fn unknown_label(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            message: format!("label '{}' is not known to the registry", label),
            label,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Error code for callers that route failures through the logging system
    pub fn error_code(&self) -> crate::logging::Code {
        crate::logging::codes::eval::RESOLVER_FAILURE
    }
}

/// Maps an atomic label name to a boolean for one candidate agent.
pub trait Resolver {
    fn resolve(&self, name: &str) -> Result<bool, ResolverError>;
}

/// Adapter turning any `Fn(&str) -> bool` into an infallible resolver.
///
/// A blanket impl over `Fn` would collide with the concrete set/map impls
/// below under coherence rules, so closures go through this newtype.
pub struct FnResolver<F>(pub F);

impl<F> Resolver for FnResolver<F>
where
    F: Fn(&str) -> bool,
{
    fn resolve(&self, name: &str) -> Result<bool, ResolverError> {
        Ok((self.0)(name))
    }
}

/// Set membership: the agent's assigned label set.
impl Resolver for HashSet<String> {
    fn resolve(&self, name: &str) -> Result<bool, ResolverError> {
        Ok(self.contains(name))
    }
}

impl Resolver for HashSet<&str> {
    fn resolve(&self, name: &str) -> Result<bool, ResolverError> {
        Ok(self.contains(name))
    }
}

/// Explicit truth assignment per label name; absent names resolve to false.
impl Resolver for HashMap<String, bool> {
    fn resolve(&self, name: &str) -> Result<bool, ResolverError> {
        Ok(self.get(name).copied().unwrap_or(false))
    }
}

impl LabelExpr {
    /// Evaluate this expression against `resolver`.
    ///
    /// Both operands of every binary operator are evaluated before the
    /// boolean is combined; a resolver with observable side effects sees
    /// exactly one call per atom node regardless of operand values.
    pub fn matches<R: Resolver + ?Sized>(&self, resolver: &R) -> Result<bool, ResolverError> {
        match self {
            Self::Atom(atom) => resolver.resolve(atom.name()),
            Self::Not(child) => Ok(!child.matches(resolver)?),
            Self::Paren(child) => child.matches(resolver),
            Self::And(lhs, rhs) => {
                let lhs = lhs.matches(resolver)?;
                let rhs = rhs.matches(resolver)?;
                Ok(lhs & rhs)
            }
            Self::Or(lhs, rhs) => {
                let lhs = lhs.matches(resolver)?;
                let rhs = rhs.matches(resolver)?;
                Ok(lhs | rhs)
            }
            Self::Implies(lhs, rhs) => {
                let lhs = lhs.matches(resolver)?;
                let rhs = rhs.matches(resolver)?;
                Ok(!lhs | rhs)
            }
            Self::Iff(lhs, rhs) => {
                let lhs = lhs.matches(resolver)?;
                let rhs = rhs.matches(resolver)?;
                Ok(lhs == rhs)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical;
    use crate::syntax;
    use std::cell::RefCell;

    fn parse(source: &str) -> LabelExpr {
        syntax::parse_token_stream(lexical::tokenize(source).unwrap()).unwrap()
    }

    /// Resolver that counts how often each label is resolved.
    struct CountingResolver {
        values: HashMap<String, bool>,
        calls: RefCell<HashMap<String, usize>>,
    }

    impl CountingResolver {
        fn new(values: &[(&str, bool)]) -> Self {
            Self {
                values: values
                    .iter()
                    .map(|(k, v)| (k.to_string(), *v))
                    .collect(),
                calls: RefCell::new(HashMap::new()),
            }
        }

        fn calls_for(&self, name: &str) -> usize {
            self.calls.borrow().get(name).copied().unwrap_or(0)
        }
    }

    impl Resolver for CountingResolver {
        fn resolve(&self, name: &str) -> Result<bool, ResolverError> {
            *self.calls.borrow_mut().entry(name.to_string()).or_insert(0) += 1;
            Ok(self.values.get(name).copied().unwrap_or(false))
        }
    }

    #[test]
    fn test_atom_resolution() {
        let expr = parse("linux");
        assert!(expr.matches(&FnResolver(|name: &str| name == "linux")).unwrap());
        assert!(!expr.matches(&FnResolver(|name: &str| name == "windows")).unwrap());
    }

    #[test]
    fn test_not_and_double_not() {
        let always = FnResolver(|_: &str| true);
        assert!(!parse("!foo").matches(&always).unwrap());
        assert!(parse("!!foo").matches(&always).unwrap());
    }

    #[test]
    fn test_and_truth_table() {
        for (a, b, expected) in [
            (false, false, false),
            (false, true, false),
            (true, false, false),
            (true, true, true),
        ] {
            let resolver: HashMap<String, bool> =
                [("a".to_string(), a), ("b".to_string(), b)].into();
            assert_eq!(
                parse("a&&b").matches(&resolver).unwrap(),
                expected,
                "a={}, b={}",
                a,
                b
            );
        }
    }

    #[test]
    fn test_or_truth_table() {
        for (a, b, expected) in [
            (false, false, false),
            (false, true, true),
            (true, false, true),
            (true, true, true),
        ] {
            let resolver: HashMap<String, bool> =
                [("a".to_string(), a), ("b".to_string(), b)].into();
            assert_eq!(
                parse("a||b").matches(&resolver).unwrap(),
                expected,
                "a={}, b={}",
                a,
                b
            );
        }
    }

    #[test]
    fn test_implies_truth_table() {
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            let resolver: HashMap<String, bool> =
                [("a".to_string(), a), ("b".to_string(), b)].into();
            assert_eq!(
                parse("a->b").matches(&resolver).unwrap(),
                !a | b,
                "a={}, b={}",
                a,
                b
            );
        }
    }

    #[test]
    fn test_iff_truth_table() {
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            let resolver: HashMap<String, bool> =
                [("a".to_string(), a), ("b".to_string(), b)].into();
            assert_eq!(
                parse("a<->b").matches(&resolver).unwrap(),
                a == b,
                "a={}, b={}",
                a,
                b
            );
        }
    }

    #[test]
    fn test_and_does_not_short_circuit() {
        // a is false; a lazy && would skip b entirely
        let resolver = CountingResolver::new(&[("a", false), ("b", true)]);
        assert!(!parse("a&&b").matches(&resolver).unwrap());
        assert_eq!(resolver.calls_for("a"), 1);
        assert_eq!(resolver.calls_for("b"), 1);
    }

    #[test]
    fn test_or_does_not_short_circuit() {
        // a is true; a lazy || would skip b entirely
        let resolver = CountingResolver::new(&[("a", true), ("b", false)]);
        assert!(parse("a||b").matches(&resolver).unwrap());
        assert_eq!(resolver.calls_for("a"), 1);
        assert_eq!(resolver.calls_for("b"), 1);
    }

    #[test]
    fn test_every_atom_resolved_exactly_once() {
        let resolver =
            CountingResolver::new(&[("a", true), ("b", false), ("c", true), ("d", false)]);
        parse("(a||b)&&!c->d").matches(&resolver).unwrap();

        for name in ["a", "b", "c", "d"] {
            assert_eq!(resolver.calls_for(name), 1, "atom {}", name);
        }
    }

    #[test]
    fn test_repeated_atom_resolved_per_occurrence() {
        let resolver = CountingResolver::new(&[("a", true)]);
        parse("a&&a").matches(&resolver).unwrap();
        assert_eq!(resolver.calls_for("a"), 2);
    }

    #[test]
    fn test_paren_is_transparent() {
        let resolver: HashSet<&str> = ["a"].into();
        assert_eq!(
            parse("(a)").matches(&resolver).unwrap(),
            parse("a").matches(&resolver).unwrap()
        );
    }

    #[test]
    fn test_set_resolvers() {
        let labels: HashSet<String> =
            ["linux".to_string(), "docker".to_string()].into();
        assert!(parse("linux&&docker").matches(&labels).unwrap());
        assert!(!parse("linux&&windows").matches(&labels).unwrap());
        assert!(parse("linux&&!windows").matches(&labels).unwrap());
    }

    #[test]
    fn test_resolver_error_propagates() {
        struct Failing;
        impl Resolver for Failing {
            fn resolve(&self, name: &str) -> Result<bool, ResolverError> {
                Err(ResolverError::unknown_label(name))
            }
        }

        let err = parse("a&&b").matches(&Failing).unwrap_err();
        assert_eq!(err.label(), "a");
        assert!(err.to_string().contains("not known"));
    }

    #[test]
    fn test_precedence_equivalence_under_evaluation() {
        // foo||bar&&baz must evaluate exactly like foo||(bar&&baz)
        let left = parse("foo||bar&&baz");
        let right = parse("foo||(bar&&baz)");

        for bits in 0..8u8 {
            let resolver: HashMap<String, bool> = [
                ("foo".to_string(), bits & 1 != 0),
                ("bar".to_string(), bits & 2 != 0),
                ("baz".to_string(), bits & 4 != 0),
            ]
            .into();
            assert_eq!(
                left.matches(&resolver).unwrap(),
                right.matches(&resolver).unwrap(),
                "assignment {:03b}",
                bits
            );
        }
    }
}
