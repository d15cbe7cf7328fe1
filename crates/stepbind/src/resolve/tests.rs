//! Unit tests for step resolution.

use super::*;
use crate::context::ScenarioContext;
use crate::matcher::StepMatcher;
use crate::model::ScenarioOutline;
use crate::types::StepError;
use rstest::{fixture, rstest};

#[expect(
    clippy::unnecessary_wraps,
    reason = "step bodies must match the StepFn signature"
)]
fn noop(_: &mut ScenarioContext) -> Result<(), StepError> {
    Ok(())
}

#[fixture]
fn registry() -> StepRegistry {
    let mut registry = StepRegistry::new();
    registry
        .definitions()
        .given("a user exists", noop)
        .when(
            StepMatcher::pattern(r"they deposit (\d+)")
                .unwrap_or_else(|err| panic!("pattern should compile: {err}")),
            noop,
        )
        .then("the balance is 5", noop)
        .then(
            StepMatcher::pattern(r"the balance is \d+")
                .unwrap_or_else(|err| panic!("pattern should compile: {err}")),
            noop,
        );
    registry
}

#[rstest]
fn single_match_binds(registry: StepRegistry) {
    let scenario = Scenario::new("deposit").with_step("a user exists");
    let resolution = resolve_scenario(&registry, "Accounts", &scenario);
    assert!(resolution.diagnostics.is_empty());
    assert!(resolution.binding.is_complete());
    let Some(bound) = resolution.binding.bound().first() else {
        panic!("step should be bound");
    };
    assert_eq!(bound.index, 0);
    assert_eq!(bound.registration.id().index(), 0);
}

#[rstest]
fn ambiguous_step_is_recorded_with_all_matches(registry: StepRegistry) {
    let step = Scenario::new("s").with_step("the balance is 5");
    let Some(first) = step.steps.first() else {
        panic!("scenario has a step");
    };
    match resolve_step(&registry, first) {
        StepResolution::Unresolved { kind, matches } => {
            assert_eq!(kind, DiagnosticKind::Ambiguous);
            let ids: Vec<_> = matches.iter().map(|m| m.id().index()).collect();
            assert_eq!(ids, [2, 3]);
        }
        StepResolution::Bound(_) => panic!("two matchers should make the step ambiguous"),
    }
}

#[rstest]
fn resolution_continues_after_failures(registry: StepRegistry) {
    let scenario = Scenario::new("mixed")
        .with_step("nobody defines this")
        .with_step("a user exists")
        .with_step("the balance is 5")
        .with_step("they deposit 10");
    let resolution = resolve_scenario(&registry, "Accounts", &scenario);

    let bound: Vec<_> = resolution.binding.bound().iter().map(|b| b.index).collect();
    assert_eq!(bound, [1, 3]);
    assert!(!resolution.binding.is_complete());

    let failures: Vec<_> = resolution
        .diagnostics
        .iter()
        .map(|d| (d.step_index(), d.match_count()))
        .collect();
    assert_eq!(failures, [(0, 0), (2, 2)]);
}

#[test]
fn every_unresolvable_step_is_reported() {
    let registry = StepRegistry::new();
    let feature = (0..3).fold(Feature::new("empty registry"), |feature, n| {
        feature.with_scenario(
            (0..4).fold(Scenario::new(format!("scenario {n}")), |scenario, m| {
                scenario.with_step(format!("step {m}"))
            }),
        )
    });
    let resolution = resolve_feature(&registry, &feature);
    assert_eq!(resolution.diagnostics.len(), 12);
    assert_eq!(resolution.bindings.len(), 3);
    let order: Vec<_> = resolution
        .diagnostics
        .iter()
        .take(5)
        .map(|d| (d.scenario_title().to_owned(), d.step_index()))
        .collect();
    assert_eq!(
        order,
        [
            ("scenario 0".to_owned(), 0),
            ("scenario 0".to_owned(), 1),
            ("scenario 0".to_owned(), 2),
            ("scenario 0".to_owned(), 3),
            ("scenario 1".to_owned(), 0),
        ]
    );
}

#[rstest]
fn outlines_are_checked_through_their_first_row(registry: StepRegistry) {
    let feature = Feature::new("Accounts").with_outline(
        ScenarioOutline::new("deposits")
            .with_scenario(Scenario::new("deposits (example 1)").with_step("they deposit 1"))
            .with_scenario(Scenario::new("deposits (example 2)").with_step("unmatched row"))
            .with_scenario(Scenario::new("deposits (example 3)").with_step("unmatched row")),
    );
    let resolution = resolve_feature(&registry, &feature);
    assert!(resolution.diagnostics.is_empty());
    assert_eq!(resolution.bindings.len(), 1);
}

#[rstest]
fn diagnostics_carry_feature_and_scenario(registry: StepRegistry) {
    let feature = Feature::new("Accounts")
        .with_scenario(Scenario::new("withdraw").with_step("they withdraw 5"));
    let resolution = resolve_feature(&registry, &feature);
    let Some(diagnostic) = resolution.diagnostics.first() else {
        panic!("unmatched step should be diagnosed");
    };
    assert_eq!(diagnostic.feature_title(), "Accounts");
    assert_eq!(diagnostic.scenario_title(), "withdraw");
    assert_eq!(diagnostic.step_text().as_str(), "they withdraw 5");
    assert_eq!(diagnostic.kind(), Some(DiagnosticKind::Unmatched));
}
