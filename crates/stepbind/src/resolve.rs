//! Step resolution against the registry.
//!
//! Each step is matched against every registration. Exactly one match binds
//! the step; zero or several produce a [`Diagnostic`] and resolution carries
//! on with the next step, so a run always reports every problem at once.

use crate::diagnostics::{Diagnostic, DiagnosticCandidate, DiagnosticKind};
use crate::flatten::flatten;
use crate::model::{Feature, Scenario, Step};
use crate::registry::{RegisteredStep, StepRegistry};
use crate::types::StepText;

/// Outcome of matching a single step.
#[derive(Debug, Clone)]
pub enum StepResolution<'r> {
    /// Exactly one registration matched.
    Bound(&'r RegisteredStep),
    /// Zero or several registrations matched.
    Unresolved {
        /// Classification of the failure.
        kind: DiagnosticKind,
        /// Every matching registration, in registration order.
        matches: Vec<&'r RegisteredStep>,
    },
}

/// Match one step against every registration.
///
/// # Examples
///
/// ```
/// use stepbind::{resolve_step, Scenario, StepRegistry, StepResolution};
///
/// let mut registry = StepRegistry::new();
/// registry.definitions().given("a user exists", |_| Ok(()));
///
/// let scenario = Scenario::new("s").with_step("a user exists").with_step("nobody");
/// let outcomes: Vec<_> = scenario.steps.iter().map(|s| resolve_step(&registry, s)).collect();
/// assert!(matches!(outcomes[0], StepResolution::Bound(_)));
/// assert!(matches!(outcomes[1], StepResolution::Unresolved { .. }));
/// ```
#[must_use]
pub fn resolve_step<'r>(registry: &'r StepRegistry, step: &Step) -> StepResolution<'r> {
    let matches = registry.matching(&step.text);
    match (
        DiagnosticKind::from_count(matches.len()),
        matches.first().copied(),
    ) {
        (None, Some(registration)) => StepResolution::Bound(registration),
        (kind, _) => StepResolution::Unresolved {
            kind: kind.unwrap_or(DiagnosticKind::Unmatched),
            matches,
        },
    }
}

/// A step bound to the registration that implements it.
#[derive(Debug, Clone)]
pub struct BoundStep<'r> {
    /// Position of the step within its scenario.
    pub index: usize,
    /// Text of the step.
    pub text: StepText,
    /// The single registration that matched.
    pub registration: &'r RegisteredStep,
}

/// The runnable part of one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioBinding<'r> {
    feature_title: String,
    scenario_title: String,
    step_count: usize,
    bound: Vec<BoundStep<'r>>,
}

impl<'r> ScenarioBinding<'r> {
    /// Title of the owning feature.
    #[must_use]
    pub fn feature_title(&self) -> &str {
        &self.feature_title
    }

    /// Title of the scenario.
    #[must_use]
    pub fn scenario_title(&self) -> &str {
        &self.scenario_title
    }

    /// Steps that resolved, in step order.
    #[must_use]
    pub fn bound(&self) -> &[BoundStep<'r>] {
        &self.bound
    }

    /// Returns `true` when every step of the scenario resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.bound.len() == self.step_count
    }
}

/// Binding and diagnostics produced for one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioResolution<'r> {
    /// Steps that resolved.
    pub binding: ScenarioBinding<'r>,
    /// Steps that did not, in step order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve every step of `scenario`.
#[must_use]
pub fn resolve_scenario<'r>(
    registry: &'r StepRegistry,
    feature_title: &str,
    scenario: &Scenario,
) -> ScenarioResolution<'r> {
    let mut bound = Vec::with_capacity(scenario.steps.len());
    let mut diagnostics = Vec::new();
    for step in &scenario.steps {
        match resolve_step(registry, step) {
            StepResolution::Bound(registration) => {
                log::debug!(
                    "bound step {} \"{}\" of \"{}\" to {}",
                    step.index,
                    step.text,
                    scenario.title,
                    registration.matcher()
                );
                bound.push(BoundStep {
                    index: step.index,
                    text: step.text.clone(),
                    registration,
                });
            }
            StepResolution::Unresolved { matches, .. } => {
                diagnostics.push(Diagnostic::new(
                    feature_title,
                    scenario.title.as_str(),
                    step.text.clone(),
                    step.index,
                    matches.into_iter().map(DiagnosticCandidate::from).collect(),
                ));
            }
        }
    }
    ScenarioResolution {
        binding: ScenarioBinding {
            feature_title: feature_title.to_owned(),
            scenario_title: scenario.title.clone(),
            step_count: scenario.steps.len(),
            bound,
        },
        diagnostics,
    }
}

/// Bindings and diagnostics for every flattened scenario of a feature.
#[derive(Debug, Clone)]
pub struct FeatureResolution<'r> {
    /// One binding per flattened scenario, in flattening order.
    pub bindings: Vec<ScenarioBinding<'r>>,
    /// Diagnostics in scenario order, then step order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve every step of every flattened scenario of `feature`.
#[must_use]
pub fn resolve_feature<'r>(registry: &'r StepRegistry, feature: &Feature) -> FeatureResolution<'r> {
    let mut resolution = FeatureResolution {
        bindings: Vec::new(),
        diagnostics: Vec::new(),
    };
    for scenario in flatten(feature) {
        let ScenarioResolution {
            binding,
            diagnostics,
        } = resolve_scenario(registry, &feature.title, scenario);
        resolution.bindings.push(binding);
        resolution.diagnostics.extend(diagnostics);
    }
    resolution
}

#[cfg(test)]
mod tests;
