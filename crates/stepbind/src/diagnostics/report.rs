//! JSON export of resolution diagnostics.
//!
//! The report mirrors [`Diagnostic`] in a flat, string-typed shape so that
//! editors and CI tooling can consume it without depending on this crate.

use super::{Diagnostic, DiagnosticKind};
use serde::Serialize;

#[derive(Serialize)]
struct ReportedCandidate<'a> {
    id: usize,
    keyword: &'static str,
    matcher: &'a str,
    handler: &'a str,
}

#[derive(Serialize)]
struct ReportedDiagnostic<'a> {
    feature: &'a str,
    scenario: &'a str,
    step: &'a str,
    step_index: usize,
    kind: Option<&'static str>,
    match_count: usize,
    candidates: Vec<ReportedCandidate<'a>>,
}

/// Serializable view over a run's diagnostics.
///
/// # Examples
///
/// ```
/// use stepbind::{Diagnostic, DiagnosticReport};
///
/// let diagnostics = vec![Diagnostic::new("F", "S", "a step".into(), 0, Vec::new())];
/// let json = DiagnosticReport::new(&diagnostics).to_json().unwrap();
/// assert!(json.contains("\"kind\":\"unmatched\""));
/// ```
#[derive(Serialize)]
pub struct DiagnosticReport<'a> {
    diagnostics: Vec<ReportedDiagnostic<'a>>,
}

impl<'a> DiagnosticReport<'a> {
    /// Build a report borrowing from `diagnostics`.
    #[must_use]
    pub fn new(diagnostics: &'a [Diagnostic]) -> Self {
        let diagnostics = diagnostics
            .iter()
            .map(|diagnostic| ReportedDiagnostic {
                feature: diagnostic.feature_title(),
                scenario: diagnostic.scenario_title(),
                step: diagnostic.step_text().as_str(),
                step_index: diagnostic.step_index(),
                kind: diagnostic.kind().map(DiagnosticKind::as_str),
                match_count: diagnostic.match_count(),
                candidates: diagnostic
                    .candidates()
                    .iter()
                    .map(|candidate| ReportedCandidate {
                        id: candidate.id.index(),
                        keyword: candidate.keyword.as_str(),
                        matcher: &candidate.matcher,
                        handler: &candidate.handler,
                    })
                    .collect(),
            })
            .collect();
        Self { diagnostics }
    }

    /// Number of diagnostics in the report.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` when the report is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Serialize the report to a JSON object with a `diagnostics` array.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
