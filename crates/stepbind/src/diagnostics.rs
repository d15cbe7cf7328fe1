//! Resolution diagnostics and the aggregate failure.
//!
//! A [`Diagnostic`] records one step that did not resolve to exactly one
//! definition. Diagnostics are collected for the whole run and surfaced once
//! through [`finalize`], which turns a non-empty collection into a single
//! [`AggregateBindingFailure`].

use crate::registry::{RegisteredStep, StepId};
use crate::types::{StepKeyword, StepText};
use std::fmt;
use thiserror::Error;

#[cfg(feature = "diagnostics")]
mod report;

#[cfg(feature = "diagnostics")]
pub use report::DiagnosticReport;

/// Why a step failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// No definition matched the step text.
    Unmatched,
    /// More than one definition matched the step text.
    Ambiguous,
}

impl DiagnosticKind {
    /// Classify a match count. Returns `None` for exactly one match.
    #[must_use]
    pub const fn from_count(count: usize) -> Option<Self> {
        match count {
            0 => Some(Self::Unmatched),
            1 => None,
            _ => Some(Self::Ambiguous),
        }
    }

    /// Lower-case name used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unmatched => "unmatched",
            Self::Ambiguous => "ambiguous",
        }
    }
}

/// Rendering of one registration that matched a diagnosed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticCandidate {
    /// Identity of the registration.
    pub id: StepId,
    /// Verb used to register it.
    pub keyword: StepKeyword,
    /// Matcher as displayed: literal text or `/pattern/`.
    pub matcher: String,
    /// Handler label.
    pub handler: String,
}

impl From<&RegisteredStep> for DiagnosticCandidate {
    fn from(step: &RegisteredStep) -> Self {
        Self {
            id: step.id(),
            keyword: step.keyword(),
            matcher: step.matcher().to_string(),
            handler: step.handler().label().to_owned(),
        }
    }
}

/// A step that resolved to zero or several definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    feature_title: String,
    scenario_title: String,
    step_text: StepText,
    step_index: usize,
    candidates: Vec<DiagnosticCandidate>,
}

impl Diagnostic {
    /// Record a resolution failure for one step.
    #[must_use]
    pub fn new(
        feature_title: impl Into<String>,
        scenario_title: impl Into<String>,
        step_text: StepText,
        step_index: usize,
        candidates: Vec<DiagnosticCandidate>,
    ) -> Self {
        Self {
            feature_title: feature_title.into(),
            scenario_title: scenario_title.into(),
            step_text,
            step_index,
            candidates,
        }
    }

    /// Title of the feature containing the step.
    #[must_use]
    pub fn feature_title(&self) -> &str {
        &self.feature_title
    }

    /// Title of the scenario containing the step.
    #[must_use]
    pub fn scenario_title(&self) -> &str {
        &self.scenario_title
    }

    /// Text of the unresolved step.
    #[must_use]
    pub fn step_text(&self) -> &StepText {
        &self.step_text
    }

    /// Position of the step within its scenario.
    #[must_use]
    pub const fn step_index(&self) -> usize {
        self.step_index
    }

    /// Number of definitions that matched.
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.candidates.len()
    }

    /// Definitions that matched, in registration order.
    #[must_use]
    pub fn candidates(&self) -> &[DiagnosticCandidate] {
        &self.candidates
    }

    /// Whether the step was unmatched or ambiguous.
    ///
    /// `None` for a diagnostic built with exactly one candidate, which
    /// resolution never produces.
    #[must_use]
    pub fn kind(&self) -> Option<DiagnosticKind> {
        DiagnosticKind::from_count(self.candidates.len())
    }

    /// Matcher and handler of every candidate, blank-line separated.
    #[must_use]
    pub fn matched_handlers_description(&self) -> String {
        self.candidates
            .iter()
            .map(|candidate| format!("{}\n\n{}", candidate.matcher, candidate.handler))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} step definition matches were found for step \"{}\" in scenario \"{}\" in \
             feature \"{}\". Each step can only have one matching step definition. The \
             following step definition matches were found:\n\n{}",
            self.match_count(),
            self.step_text,
            self.scenario_title,
            self.feature_title,
            self.matched_handlers_description()
        )
    }
}

/// Every resolution failure of a binding run, reported as one error.
///
/// The message is each diagnostic's text joined by a blank line, in the
/// order the steps were encountered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render(.diagnostics))]
pub struct AggregateBindingFailure {
    diagnostics: Vec<Diagnostic>,
}

fn render(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

impl AggregateBindingFailure {
    /// The individual diagnostics, in encounter order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the failure, returning its diagnostics.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Count of diagnostics of the given kind.
    #[must_use]
    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.kind() == Some(kind))
            .count()
    }

    /// Serialize the diagnostics to JSON for external tooling.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    #[cfg(feature = "diagnostics")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        DiagnosticReport::new(&self.diagnostics).to_json()
    }
}

/// Append-only collection of diagnostics for one binding run.
#[derive(Debug, Default, Clone)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one diagnostic.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    /// Append several diagnostics, preserving their order.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.record(diagnostic);
        }
    }

    /// Diagnostics recorded so far.
    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of diagnostics recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the log; see [`finalize`].
    ///
    /// # Errors
    /// Returns [`AggregateBindingFailure`] when any diagnostic was recorded.
    pub fn finalize(self) -> Result<(), AggregateBindingFailure> {
        finalize(self.entries)
    }
}

/// Turn the diagnostics of a completed run into its outcome.
///
/// # Errors
/// Returns one [`AggregateBindingFailure`] carrying every diagnostic when
/// the collection is non-empty.
///
/// # Examples
///
/// ```
/// use stepbind::{finalize, Diagnostic};
///
/// assert!(finalize(Vec::new()).is_ok());
///
/// let missing = Diagnostic::new("Accounts", "Deposit", "I deposit 5".into(), 0, Vec::new());
/// let err = finalize(vec![missing]).unwrap_err();
/// assert!(err.to_string().starts_with("0 step definition matches were found for step \"I deposit 5\""));
/// ```
pub fn finalize(diagnostics: Vec<Diagnostic>) -> Result<(), AggregateBindingFailure> {
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(AggregateBindingFailure { diagnostics })
    }
}
