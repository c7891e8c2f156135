//! Resource patterns
//!
//! A [`Pattern`] is a compiled predicate over a full resource string. It is
//! built either from a literal (escaped and anchored so that only that exact
//! string matches) or from a raw expression used as-is, which allows prefix,
//! substring and wildcard matches.
//!
//! Patterns keep their source expression so the rule set can be written out
//! and read back losslessly. The textual form wraps the source in `/`
//! delimiters: `^\/foo$` is written as `/^\/foo$/`.

use std::fmt;
use std::hash::{Hash, Hasher};

use regex::Regex;

use crate::error::{AclError, Result};

/// Delimiter around a pattern source in its textual form
pub const DELIMITER: char = '/';

/// Characters escaped when compiling a literal, besides ASCII whitespace.
///
/// `/` is not special to the regex engine but is escaped so a literal's
/// source is already in delimited-safe form.
const LITERAL_METACHARACTERS: &[char] = &[
    '-', '[', ']', '{', '}', '(', ')', '*', '+', '?', '.', ',', '\\', '^', '$', '|', '#', '/',
];

/// Compiled resource pattern
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compiles a literal that matches only `text` as a whole
    ///
    /// # Examples
    ///
    /// ```
    /// use seal_acl::Pattern;
    ///
    /// let pattern = Pattern::literal("/foo/bar?").unwrap();
    /// assert_eq!(pattern.source(), r"^\/foo\/bar\?$");
    /// assert!(pattern.test("/foo/bar?"));
    /// assert!(!pattern.test("/foo/bar"));
    /// ```
    pub fn literal(text: &str) -> Result<Self> {
        let source = format!("^{}$", escape_literal(text));
        Regex::new(&source)
            .map(|regex| Self { regex })
            .map_err(|e| AclError::InvalidResource(format!("literal {text:?}: {e}")))
    }

    /// Compiles a raw expression; no anchors are added
    pub fn expression(expr: &str) -> Result<Self> {
        Regex::new(expr)
            .map(|regex| Self { regex })
            .map_err(|e| AclError::InvalidResource(format!("expression {expr:?}: {e}")))
    }

    /// Source expression, exactly as compiled
    pub fn source(&self) -> &str {
        self.regex.as_str()
    }

    /// Tests the pattern against a candidate resource.
    ///
    /// Each call is independent; no match state is carried between calls.
    pub fn test(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    /// Delimited textual form, e.g. `/^\/foo$/`
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parses the delimited textual form produced by [`Pattern::encode`]
    pub fn decode(text: &str) -> Result<Self> {
        let body = text
            .strip_prefix(DELIMITER)
            .and_then(|rest| rest.strip_suffix(DELIMITER))
            .ok_or_else(|| {
                AclError::Deserialization(format!(
                    "resource {text:?} is not a {DELIMITER}-delimited pattern"
                ))
            })?;

        Regex::new(body)
            .map(|regex| Self { regex })
            .map_err(|e| AclError::Deserialization(format!("resource {text:?}: {e}")))
    }
}

/// Only the source expression is kept, so flags set through
/// `regex::RegexBuilder` (e.g. case-insensitivity) do not survive
/// [`Pattern::encode`] / [`Pattern::decode`]. Use inline flags like `(?i)`
/// instead.
impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self { regex }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source() == other.source()
    }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source().hash(state);
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source()).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DELIMITER}{}{DELIMITER}", self.source())
    }
}

/// Raw pattern expression, compiled without escaping or anchoring
///
/// Plain strings passed to [`Acl::matching`](crate::Acl::matching) are treated
/// as literals; wrap them in `Expr` to match by expression instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expr<'a>(pub &'a str);

/// Anything a rule can be matched against
pub trait IntoPattern {
    fn into_pattern(self) -> Result<Pattern>;
}

impl IntoPattern for &str {
    fn into_pattern(self) -> Result<Pattern> {
        Pattern::literal(self)
    }
}

impl IntoPattern for String {
    fn into_pattern(self) -> Result<Pattern> {
        Pattern::literal(&self)
    }
}

impl IntoPattern for &String {
    fn into_pattern(self) -> Result<Pattern> {
        Pattern::literal(self)
    }
}

impl IntoPattern for Expr<'_> {
    fn into_pattern(self) -> Result<Pattern> {
        Pattern::expression(self.0)
    }
}

/// Keeps only the source expression, like `From<Regex>`
impl IntoPattern for Regex {
    fn into_pattern(self) -> Result<Pattern> {
        Ok(Pattern::from(self))
    }
}

impl IntoPattern for Pattern {
    fn into_pattern(self) -> Result<Pattern> {
        Ok(self)
    }
}

fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if LITERAL_METACHARACTERS.contains(&c) || c.is_ascii_whitespace() {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
