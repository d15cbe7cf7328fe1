//! Step matchers and whole-line matching.
//! A matcher is either a literal string compared by exact equality or a
//! regular expression that must describe the entire step text. Patterns are
//! compiled once, anchored at both ends, so partial containment never counts
//! as a match.

use crate::types::StepText;
use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Error raised when a pattern matcher fails to compile.
///
/// # Examples
///
/// ```
/// use stepbind::StepMatcher;
///
/// let err = StepMatcher::pattern("a (broken").unwrap_err();
/// assert!(err.to_string().starts_with("invalid step pattern /a (broken/"));
/// ```
#[derive(Debug, Error)]
#[error("invalid step pattern /{source_text}/: {error}")]
pub struct MatcherError {
    source_text: String,
    #[source]
    error: regex::Error,
}

impl MatcherError {
    /// Pattern source that failed to compile.
    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.source_text
    }
}

/// Regular-expression matcher that keeps the caller's source for display.
#[derive(Debug, Clone)]
pub struct StepPattern {
    source: String,
    regex: Regex,
}

// Equality and hashing are by the caller's source text, so two registrations
// of the same pattern compare equal even though each owns its own `Regex`.
impl PartialEq for StepPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for StepPattern {}

impl Hash for StepPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
    }
}

impl StepPattern {
    /// Compile `source` so that it only matches whole lines.
    ///
    /// # Errors
    /// Returns [`MatcherError`] when `source` is not a valid regular
    /// expression.
    pub fn new(source: impl Into<String>) -> Result<Self, MatcherError> {
        let source = source.into();
        let anchored = format!("^(?:{source})$");
        match Regex::new(&anchored) {
            Ok(regex) => Ok(Self { source, regex }),
            Err(error) => Err(MatcherError {
                source_text: source,
                error,
            }),
        }
    }

    /// Access the pattern source as supplied by the caller.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Return `true` when the pattern describes the whole of `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Literal or pattern used to decide whether a step definition applies to a
/// line of step text.
///
/// # Examples
///
/// ```
/// use stepbind::StepMatcher;
///
/// let literal = StepMatcher::from("a user exists");
/// assert!(literal.matches("a user exists"));
/// assert!(!literal.matches("a user exists twice"));
///
/// let pattern = StepMatcher::pattern(r"a user (\w+) exists").unwrap();
/// assert!(pattern.matches("a user alice exists"));
/// assert!(!pattern.matches("so a user alice exists"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StepMatcher {
    /// Exact, case-sensitive, whole-string comparison.
    Literal(String),
    /// Regular expression that must match the entire step text.
    Pattern(StepPattern),
}

impl StepMatcher {
    /// Build a literal matcher.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Build a pattern matcher from regular-expression source.
    ///
    /// # Errors
    /// Returns [`MatcherError`] when `source` does not compile.
    pub fn pattern(source: impl Into<String>) -> Result<Self, MatcherError> {
        StepPattern::new(source).map(Self::Pattern)
    }

    /// Return `true` when this matcher accepts `text`. Never fails.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == text,
            Self::Pattern(pattern) => pattern.is_match(text),
        }
    }

    /// Source text of the matcher, without delimiters.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(literal) => literal,
            Self::Pattern(pattern) => pattern.as_str(),
        }
    }

    /// Returns `true` for pattern matchers.
    #[must_use]
    pub const fn is_pattern(&self) -> bool {
        matches!(self, Self::Pattern(_))
    }
}

/// Free-function form of [`StepMatcher::matches`] taking typed step text.
#[must_use]
pub fn matches(text: &StepText, matcher: &StepMatcher) -> bool {
    matcher.matches(text.as_str())
}

impl From<&str> for StepMatcher {
    fn from(value: &str) -> Self {
        Self::literal(value)
    }
}

impl From<String> for StepMatcher {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl From<StepPattern> for StepMatcher {
    fn from(value: StepPattern) -> Self {
        Self::Pattern(value)
    }
}

impl fmt::Display for StepMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => f.write_str(literal),
            Self::Pattern(pattern) => write!(f, "/{}/", pattern.as_str()),
        }
    }
}
