//! Scenario plans recorded by the harness and their execution.

use crate::outcome::ScenarioOutcome;
use crate::panic::panic_message;
use std::panic::{AssertUnwindSafe, catch_unwind};
use stepbind::{ScenarioContext, StepError, StepHandler, StepMatcher, StepText};

/// Scenario metadata attached to every plan and outcome.
///
/// # Examples
///
/// ```
/// use stepbind_harness::ScenarioMetadata;
///
/// let metadata = ScenarioMetadata::new("Accounts", "Deposit money");
/// assert_eq!(metadata.feature_title(), "Accounts");
/// assert_eq!(metadata.scenario_title(), "Deposit money");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioMetadata {
    feature_title: String,
    scenario_title: String,
}

impl ScenarioMetadata {
    /// Creates metadata for one scenario.
    #[must_use]
    pub fn new(feature_title: impl Into<String>, scenario_title: impl Into<String>) -> Self {
        Self {
            feature_title: feature_title.into(),
            scenario_title: scenario_title.into(),
        }
    }

    /// Returns the feature title.
    #[must_use]
    pub fn feature_title(&self) -> &str {
        &self.feature_title
    }

    /// Returns the scenario title.
    #[must_use]
    pub fn scenario_title(&self) -> &str {
        &self.scenario_title
    }
}

impl Default for ScenarioMetadata {
    fn default() -> Self {
        Self::new("<unknown>", "<unknown>")
    }
}

/// One resolved step of a scenario plan.
#[derive(Clone, Debug)]
pub struct PlannedStep {
    text: StepText,
    matcher: StepMatcher,
    handler: StepHandler,
}

impl PlannedStep {
    /// Creates a planned step.
    #[must_use]
    pub fn new(text: StepText, matcher: StepMatcher, handler: StepHandler) -> Self {
        Self {
            text,
            matcher,
            handler,
        }
    }

    /// Text of the feature step this entry runs.
    #[must_use]
    pub fn text(&self) -> &StepText {
        &self.text
    }

    /// Matcher the step resolved to.
    #[must_use]
    pub fn matcher(&self) -> &StepMatcher {
        &self.matcher
    }

    /// Handler executed for the step.
    #[must_use]
    pub fn handler(&self) -> &StepHandler {
        &self.handler
    }
}

/// The resolved steps of one scenario, ready to run.
///
/// # Examples
///
/// ```
/// use stepbind::{StepError, StepHandler, StepMatcher};
/// use stepbind_harness::{PlannedStep, ScenarioMetadata, ScenarioOutcome, ScenarioPlan};
///
/// let plan = ScenarioPlan::new(
///     ScenarioMetadata::new("Accounts", "Withdraw"),
///     vec![PlannedStep::new(
///         "the account is frozen".into(),
///         StepMatcher::literal("the account is frozen"),
///         StepHandler::new(|_| Err(StepError::failed("frozen"))),
///     )],
/// );
/// assert!(matches!(plan.run(), ScenarioOutcome::Failed { step_index: 0, .. }));
/// ```
#[derive(Clone, Debug)]
pub struct ScenarioPlan {
    metadata: ScenarioMetadata,
    steps: Vec<PlannedStep>,
}

impl ScenarioPlan {
    /// Creates a plan from metadata and steps in execution order.
    #[must_use]
    pub fn new(metadata: ScenarioMetadata, steps: Vec<PlannedStep>) -> Self {
        Self { metadata, steps }
    }

    /// Returns the scenario metadata.
    #[must_use]
    pub fn metadata(&self) -> &ScenarioMetadata {
        &self.metadata
    }

    /// Returns the planned steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[PlannedStep] {
        &self.steps
    }

    /// Runs every step against a fresh [`ScenarioContext`], stopping at the
    /// first step that fails, panics, or asks to skip.
    #[must_use]
    pub fn run(&self) -> ScenarioOutcome {
        let mut ctx = ScenarioContext::default();
        for (step_index, step) in self.steps.iter().enumerate() {
            let result = catch_unwind(AssertUnwindSafe(|| step.handler.call(&mut ctx)))
                .unwrap_or_else(|payload| {
                    Err(StepError::Panicked {
                        message: panic_message(payload.as_ref()),
                    })
                });
            match result {
                Ok(()) => {}
                Err(StepError::Skipped { message }) => {
                    return ScenarioOutcome::Skipped { message };
                }
                Err(error) => {
                    return ScenarioOutcome::Failed {
                        step_index,
                        step_text: step.text.clone(),
                        error,
                    };
                }
            }
        }
        ScenarioOutcome::Passed
    }
}
