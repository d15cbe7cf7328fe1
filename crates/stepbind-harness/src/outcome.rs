//! Scenario outcomes and run summaries.

use crate::config;
use crate::runner::ScenarioMetadata;
use std::fmt;
use stepbind::{StepError, StepText};
use thiserror::Error;

/// Result of running one scenario plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScenarioOutcome {
    /// Every step succeeded.
    Passed,
    /// A step returned an error or panicked.
    Failed {
        /// Position of the failing step within the plan.
        step_index: usize,
        /// Text of the failing step.
        step_text: StepText,
        /// Error returned by the step.
        error: StepError,
    },
    /// A step asked for the rest of the scenario to be skipped.
    Skipped {
        /// Optional reason given by the step.
        message: Option<String>,
    },
}

impl ScenarioOutcome {
    /// Returns `true` for [`ScenarioOutcome::Passed`].
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Returns `true` for [`ScenarioOutcome::Failed`].
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Returns `true` for [`ScenarioOutcome::Skipped`].
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

impl fmt::Display for ScenarioOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => f.write_str("passed"),
            Self::Failed {
                step_index,
                step_text,
                error,
            } => write!(f, "failed at step {step_index} \"{step_text}\": {error}"),
            Self::Skipped { message: Some(message) } => write!(f, "skipped: {message}"),
            Self::Skipped { message: None } => f.write_str("skipped"),
        }
    }
}

/// Outcome of one scenario together with its metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioRecord {
    /// Which scenario ran.
    pub metadata: ScenarioMetadata,
    /// How it ended.
    pub outcome: ScenarioOutcome,
}

/// Failure of a harness run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    /// At least one scenario failed.
    #[error("{failed} of {total} scenarios failed; first failure in \"{first}\"")]
    ScenariosFailed {
        /// Number of failed scenarios.
        failed: usize,
        /// Number of scenarios run.
        total: usize,
        /// Title of the first failed scenario.
        first: String,
    },
    /// Scenarios were skipped while `fail_on_skipped` is enabled.
    #[error("{skipped} scenarios were skipped and fail_on_skipped is enabled")]
    SkippedDisallowed {
        /// Number of skipped scenarios.
        skipped: usize,
    },
}

/// Outcomes of a full harness run, in execution order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    records: Vec<ScenarioRecord>,
}

impl RunSummary {
    /// Creates a summary from records in execution order.
    #[must_use]
    pub fn new(records: Vec<ScenarioRecord>) -> Self {
        Self { records }
    }

    /// Every scenario record.
    #[must_use]
    pub fn records(&self) -> &[ScenarioRecord] {
        &self.records
    }

    /// Number of passed scenarios.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(ScenarioOutcome::is_passed)
    }

    /// Number of failed scenarios.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(ScenarioOutcome::is_failed)
    }

    /// Number of skipped scenarios.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(ScenarioOutcome::is_skipped)
    }

    fn count(&self, predicate: impl Fn(&ScenarioOutcome) -> bool) -> usize {
        self.records.iter().filter(|r| predicate(&r.outcome)).count()
    }

    /// Convert the summary into the run's overall result, consulting
    /// [`config::fail_on_skipped`].
    ///
    /// # Errors
    /// Returns [`HarnessError::ScenariosFailed`] when any scenario failed and
    /// [`HarnessError::SkippedDisallowed`] when scenarios were skipped while
    /// `fail_on_skipped` is enabled.
    pub fn into_result(self) -> Result<Self, HarnessError> {
        self.into_result_with(config::fail_on_skipped())
    }

    /// As [`RunSummary::into_result`], with an explicit skip policy.
    ///
    /// # Errors
    /// See [`RunSummary::into_result`].
    pub fn into_result_with(self, fail_on_skipped: bool) -> Result<Self, HarnessError> {
        if let Some(first) = self.records.iter().find(|r| r.outcome.is_failed()) {
            return Err(HarnessError::ScenariosFailed {
                failed: self.failed(),
                total: self.records.len(),
                first: first.metadata.scenario_title().to_owned(),
            });
        }
        let skipped = self.skipped();
        if fail_on_skipped && skipped > 0 {
            return Err(HarnessError::SkippedDisallowed { skipped });
        }
        Ok(self)
    }
}
