//! Core types and error enums shared across the crate.
//!
//! The module defines the owned step text wrapper, the keyword recorded for
//! each registration verb, and the error returned by step handlers.

use derive_more::{Deref, From};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Rendered text of one Given/When/Then line in a concrete scenario.
///
/// The wrapper dereferences to the inner `String`, so matchers and messages
/// can treat it as plain text.
///
/// # Examples
///
/// ```
/// use stepbind::StepText;
///
/// let text = StepText::from("a user exists");
/// assert_eq!(text.as_str(), "a user exists");
/// assert!(text.starts_with("a user"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, From)]
pub struct StepText(String);

impl StepText {
    /// Construct step text from anything convertible into a `String`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Access the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StepText {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for StepText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registration verb used to define a step.
///
/// Every verb registers identically; the keyword only changes how the
/// registration is described in diagnostics. `Step` records the unconditional
/// `define_step` verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKeyword {
    /// Setup preconditions for a scenario.
    Given,
    /// Perform an action when testing behaviour.
    When,
    /// Assert the expected outcome of a scenario.
    Then,
    /// Additional conditions that share context with the previous step.
    And,
    /// Negative or contrasting conditions.
    But,
    /// Keyword-agnostic registration.
    Step,
}

impl StepKeyword {
    /// Return the keyword as a string slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepbind::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::Given.as_str(), "Given");
    /// assert_eq!(StepKeyword::Step.as_str(), "Step");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
            Self::Step => "Step",
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`StepKeyword`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid step keyword: {0}")]
pub struct StepKeywordParseError(pub String);

impl FromStr for StepKeyword {
    type Err = StepKeywordParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        [
            Self::Given,
            Self::When,
            Self::Then,
            Self::And,
            Self::But,
            Self::Step,
        ]
        .into_iter()
        .find(|kw| trimmed.eq_ignore_ascii_case(kw.as_str()))
        .ok_or_else(|| StepKeywordParseError(trimmed.to_string()))
    }
}

impl From<gherkin::StepType> for StepKeyword {
    fn from(ty: gherkin::StepType) -> Self {
        match ty {
            gherkin::StepType::Given => Self::Given,
            gherkin::StepType::When => Self::When,
            gherkin::StepType::Then => Self::Then,
        }
    }
}

/// Failure reported by a step handler when it runs.
///
/// # Examples
///
/// ```
/// use stepbind::StepError;
///
/// let err = StepError::failed("balance mismatch");
/// assert_eq!(err.to_string(), "step failed: balance mismatch");
/// assert!(StepError::skip(None).is_skip());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StepError {
    /// The handler returned an error.
    #[error("step failed: {message}")]
    Failed {
        /// Human-readable failure description.
        message: String,
    },
    /// The handler panicked.
    #[error("step panicked: {message}")]
    Panicked {
        /// Rendered panic payload.
        message: String,
    },
    /// The handler asked for the rest of the scenario to be skipped.
    #[error("step skipped{}", .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
    Skipped {
        /// Optional reason for skipping.
        message: Option<String>,
    },
}

impl StepError {
    /// Construct a [`StepError::Failed`] from any displayable message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Construct a [`StepError::Skipped`] with an optional reason.
    #[must_use]
    pub fn skip(message: Option<String>) -> Self {
        Self::Skipped { message }
    }

    /// Returns `true` if this error is a skip request rather than a failure.
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}
