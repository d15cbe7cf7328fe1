//! Default synchronous execution adapter.

use crate::outcome::{RunSummary, ScenarioRecord};
use crate::runner::{PlannedStep, ScenarioMetadata, ScenarioPlan};
use stepbind::{
    BindError, ExecutionAdapter, Feature, Scenario, ScenarioRegistrar, StepBinder, StepHandler,
    StepMatcher, StepModule, StepText, auto_bind_steps, flatten,
};

/// Framework-agnostic synchronous harness.
///
/// `StdHarness` records a [`ScenarioPlan`] for every scenario the binder
/// registers and runs them on the calling thread with [`StdHarness::run_all`].
///
/// # Examples
///
/// ```
/// use stepbind::{Feature, MatcherError, Scenario, StepDefinitions};
/// use stepbind_harness::StdHarness;
///
/// fn steps(defs: &mut StepDefinitions<'_>) -> Result<(), MatcherError> {
///     defs.given("a user exists", |_| Ok(()));
///     Ok(())
/// }
///
/// let features = [Feature::new("Users")
///     .with_scenario(Scenario::new("exists").with_step("a user exists"))];
/// let harness = StdHarness::bind(&features, &[&steps]).unwrap();
/// let summary = harness.run_all();
/// assert_eq!(summary.passed(), 1);
/// ```
#[derive(Debug, Default)]
pub struct StdHarness {
    plans: Vec<ScenarioPlan>,
}

impl StdHarness {
    /// Creates a harness without plans.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `features` against `modules` and returns the populated harness.
    ///
    /// # Errors
    /// Propagates [`BindError`] from [`auto_bind_steps`]; no plan is returned
    /// when any step failed to resolve.
    pub fn bind(features: &[Feature], modules: &[&dyn StepModule]) -> Result<Self, BindError> {
        let mut harness = Self::new();
        auto_bind_steps(features, modules, &mut harness)?;
        Ok(harness)
    }

    /// Recorded plans in registration order.
    #[must_use]
    pub fn plans(&self) -> &[ScenarioPlan] {
        &self.plans
    }

    /// Runs every recorded plan in order.
    #[must_use]
    pub fn run_all(&self) -> RunSummary {
        let records = self
            .plans
            .iter()
            .map(|plan| {
                let outcome = plan.run();
                let metadata = plan.metadata();
                if outcome.is_passed() {
                    log::info!(
                        "scenario \"{}\" in feature \"{}\" {outcome}",
                        metadata.scenario_title(),
                        metadata.feature_title()
                    );
                } else {
                    log::warn!(
                        "scenario \"{}\" in feature \"{}\" {outcome}",
                        metadata.scenario_title(),
                        metadata.feature_title()
                    );
                }
                ScenarioRecord {
                    metadata: metadata.clone(),
                    outcome,
                }
            })
            .collect();
        RunSummary::new(records)
    }
}

impl ExecutionAdapter for StdHarness {
    fn define_feature(
        &mut self,
        feature: &Feature,
        tests: &mut dyn FnMut(&mut dyn ScenarioRegistrar),
    ) {
        let mut registrar = FeatureRegistrar {
            feature,
            scenarios: flatten(feature),
            next: 0,
            plans: &mut self.plans,
        };
        tests(&mut registrar);
    }
}

/// Registers scenarios in flattening order; titles may repeat, so the
/// `next` position pairs each registered test with its scenario.
struct FeatureRegistrar<'a> {
    feature: &'a Feature,
    scenarios: Vec<&'a Scenario>,
    next: usize,
    plans: &'a mut Vec<ScenarioPlan>,
}

impl FeatureRegistrar<'_> {
    /// Step texts of the next scenario in flattening order.
    fn next_step_texts(&mut self) -> Vec<StepText> {
        let texts = self
            .scenarios
            .get(self.next)
            .map(|scenario| scenario.steps.iter().map(|s| s.text.clone()).collect())
            .unwrap_or_default();
        self.next += 1;
        texts
    }
}

impl ScenarioRegistrar for FeatureRegistrar<'_> {
    fn test(&mut self, title: &str, body: &mut dyn FnMut(&mut dyn StepBinder)) {
        let mut collector = StepCollector::default();
        body(&mut collector);

        let texts = self.next_step_texts();
        let aligned = texts.len() == collector.steps.len();
        let steps = collector
            .steps
            .into_iter()
            .enumerate()
            .map(|(idx, (matcher, handler))| {
                let text = texts
                    .get(idx)
                    .filter(|_| aligned)
                    .cloned()
                    .unwrap_or_else(|| StepText::new(matcher.as_str()));
                PlannedStep::new(text, matcher, handler)
            })
            .collect();
        log::debug!(
            "planned scenario \"{title}\" in feature \"{}\"",
            self.feature.title
        );
        self.plans.push(ScenarioPlan::new(
            ScenarioMetadata::new(self.feature.title.as_str(), title),
            steps,
        ));
    }
}

#[derive(Default)]
struct StepCollector {
    steps: Vec<(StepMatcher, StepHandler)>,
}

impl StepBinder for StepCollector {
    fn define_step(&mut self, matcher: &StepMatcher, handler: &StepHandler) {
        self.steps.push((matcher.clone(), handler.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plans_carry_feature_step_text() {
        let mut harness = StdHarness::new();
        let feature = Feature::new("F").with_scenario(Scenario::new("S").with_step("a step"));
        harness.define_feature(&feature, &mut |tests: &mut dyn ScenarioRegistrar| {
            tests.test("S", &mut |steps: &mut dyn StepBinder| {
                steps.define_step(
                    &StepMatcher::literal("a step"),
                    &StepHandler::new(|_| Ok(())),
                );
            });
        });

        let Some(plan) = harness.plans().first() else {
            panic!("plan should be recorded");
        };
        assert_eq!(plan.metadata(), &ScenarioMetadata::new("F", "S"));
        let texts: Vec<_> = plan.steps().iter().map(|s| s.text().as_str()).collect();
        assert_eq!(texts, ["a step"]);
    }

    #[test]
    fn unknown_scenario_falls_back_to_matcher_text() {
        let mut harness = StdHarness::new();
        harness.define_feature(&Feature::new("F"), &mut |tests: &mut dyn ScenarioRegistrar| {
            tests.test("missing", &mut |steps: &mut dyn StepBinder| {
                steps.define_step(
                    &StepMatcher::literal("bound"),
                    &StepHandler::new(|_| Ok(())),
                );
            });
        });
        let texts: Vec<_> = harness
            .plans()
            .iter()
            .flat_map(ScenarioPlan::steps)
            .map(|s| s.text().as_str())
            .collect();
        assert_eq!(texts, ["bound"]);
    }
}
