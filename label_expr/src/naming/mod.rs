//! Atom-name validity and quoting rules
//!
//! Label names that would be ambiguous inside an expression (spaces,
//! parentheses, operator characters) are rendered as shell-style
//! double-quoted tokens with backslash escapes. The validity predicate is
//! pluggable: platforms with stricter naming rules supply their own
//! [`NamePolicy`] and the escaper quotes anything the policy rejects.

use thiserror::Error;

/// Characters that always force quoting regardless of policy.
const UNSAFE_CHARS: [char; 5] = [' ', '(', ')', '\t', '\n'];

/// Pluggable "good name" predicate supplied by external collaborators.
pub trait NamePolicy {
    /// Whether `name` is acceptable as a bare (unquoted) atom.
    fn is_good_name(&self, name: &str) -> bool;
}

/// Default policy: non-empty and free of structural expression characters.
///
/// The rejected set matches exactly what the tokenizer treats as structural
/// (`&`, `|`, `!`, `<`, `>`, `"`, `\`), so any name this policy accepts
/// round-trips through tokenization as a single bare atom.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNamePolicy;

impl NamePolicy for DefaultNamePolicy {
    fn is_good_name(&self, name: &str) -> bool {
        !name.is_empty()
            && !name
                .chars()
                .any(|c| matches!(c, '&' | '|' | '!' | '<' | '>' | '"' | '\\'))
    }
}

/// Check whether a name must be quoted when rendered, under `policy`.
pub fn needs_escape_with(policy: &dyn NamePolicy, name: &str) -> bool {
    !policy.is_good_name(name) || name.chars().any(|c| UNSAFE_CHARS.contains(&c))
}

/// Check whether a name must be quoted when rendered (default policy).
pub fn needs_escape(name: &str) -> bool {
    needs_escape_with(&DefaultNamePolicy, name)
}

/// Quote a name if needed, under `policy`.
///
/// Safe names pass through unchanged. Unsafe names are wrapped in double
/// quotes with embedded `"` and `\` backslash-escaped, so [`unescape`]
/// reconstructs the original exactly.
pub fn escape_with(policy: &dyn NamePolicy, name: &str) -> String {
    if !needs_escape_with(policy, name) {
        return name.to_string();
    }

    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('"');
    for ch in name.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// Quote a name if needed (default policy).
pub fn escape(name: &str) -> String {
    escape_with(&DefaultNamePolicy, name)
}

/// Errors produced when unquoting a name token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnescapeError {
    #[error("Quoted name must start and end with a double quote")]
    NotQuoted,

    #[error("Quoted name is missing its closing quote")]
    UnterminatedQuote,

    #[error("Backslash escape at end of quoted name")]
    DanglingEscape,
}

/// Reconstruct the original name from a quoted token produced by [`escape`].
pub fn unescape(quoted: &str) -> Result<String, UnescapeError> {
    let mut chars = quoted.chars();

    if chars.next() != Some('"') {
        return Err(UnescapeError::NotQuoted);
    }

    let mut name = String::with_capacity(quoted.len().saturating_sub(2));
    loop {
        match chars.next() {
            Some('"') => {
                // Closing quote must be the final character
                if chars.next().is_some() {
                    return Err(UnescapeError::NotQuoted);
                }
                return Ok(name);
            }
            Some('\\') => match chars.next() {
                Some(escaped) => name.push(escaped),
                None => return Err(UnescapeError::DanglingEscape),
            },
            Some(ch) => name.push(ch),
            None => return Err(UnescapeError::UnterminatedQuote),
        }
    }
}
