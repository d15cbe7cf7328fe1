//! Behavioural tests for binding parsed features to step definitions.

use std::path::PathBuf;

use stepbind::{
    BindError, CheckOnly, DiagnosticKind, ExecutionAdapter, Feature, MatcherError,
    ScenarioContext, ScenarioRegistrar, StepBinder, StepDefinitions, StepError, StepHandler,
    StepMatcher, StepRegistry, auto_bind_steps, check_features, parse_feature_file,
};

fn feature(name: &str) -> Feature {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/features")
        .join(name);
    parse_feature_file(&path).unwrap_or_else(|err| panic!("{name} should parse: {err}"))
}

#[expect(
    clippy::unnecessary_wraps,
    reason = "step bodies must match the StepFn signature"
)]
fn noop(_: &mut ScenarioContext) -> Result<(), StepError> {
    Ok(())
}

fn bank_steps(steps: &mut StepDefinitions<'_>) -> Result<(), MatcherError> {
    steps
        .given("the bank is open", noop)
        .given(StepMatcher::pattern(r"a customer named \w+")?, noop)
        .given(StepMatcher::pattern(r"an account with balance \d+")?, noop)
        .when("they open an account", noop)
        .when(StepMatcher::pattern(r"they deposit \d+")?, noop)
        .then(StepMatcher::pattern(r"the account balance is \d+")?, noop);
    Ok(())
}

fn transfer_steps(steps: &mut StepDefinitions<'_>) -> Result<(), MatcherError> {
    steps
        .when(StepMatcher::pattern(r"they transfer \d+ to \w+")?, noop)
        .when(StepMatcher::pattern(r"they transfer .+")?, noop);
    steps.pending("the transfer is rejected");
    Ok(())
}

/// Records the matchers bound into each scenario.
#[derive(Default)]
struct Plans(Vec<(String, Vec<String>)>);

impl ScenarioRegistrar for Plans {
    fn test(&mut self, title: &str, body: &mut dyn FnMut(&mut dyn StepBinder)) {
        struct Collect(Vec<String>);
        impl StepBinder for Collect {
            fn define_step(&mut self, matcher: &StepMatcher, _handler: &StepHandler) {
                self.0.push(matcher.to_string());
            }
        }
        let mut steps = Collect(Vec::new());
        body(&mut steps);
        self.0.push((title.to_owned(), steps.0));
    }
}

impl ExecutionAdapter for Plans {
    fn define_feature(
        &mut self,
        _feature: &Feature,
        tests: &mut dyn FnMut(&mut dyn ScenarioRegistrar),
    ) {
        tests(self);
    }
}

#[test]
fn accounts_feature_binds_every_step() {
    let mut plans = Plans::default();
    let result = auto_bind_steps(&[feature("accounts.feature")], &[&bank_steps], &mut plans);
    assert!(result.is_ok(), "binding should succeed: {result:?}");

    let titles: Vec<_> = plans.0.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(titles, ["Open an account", "Deposit money (example 1)"]);
    let Some((_, deposit)) = plans.0.get(1) else {
        panic!("outline representative missing");
    };
    assert_eq!(
        deposit,
        &[
            "the bank is open",
            r"/an account with balance \d+/",
            r"/they deposit \d+/",
            r"/the account balance is \d+/",
        ]
    );
}

#[test]
fn every_problem_is_reported_in_one_error() {
    let features = [feature("accounts.feature"), feature("ambiguous.feature")];
    let err = auto_bind_steps(&features, &[&bank_steps, &transfer_steps], &mut CheckOnly)
        .err()
        .unwrap_or_else(|| panic!("transfers feature should not bind"));
    let Some(failure) = err.as_unresolved() else {
        panic!("expected unresolved steps, got {err}");
    };

    assert_eq!(failure.diagnostics().len(), 2);
    assert_eq!(failure.count_of(DiagnosticKind::Ambiguous), 1);
    assert_eq!(failure.count_of(DiagnosticKind::Unmatched), 1);

    let message = err.to_string();
    assert!(message.starts_with(
        "2 step definition matches were found for step \"they transfer 10 to savings\" in \
         scenario \"Transfer between accounts\" in feature \"Transfers\"."
    ));
    assert!(message.contains(r"/they transfer \d+ to \w+/"));
    assert!(message.contains(
        "0 step definition matches were found for step \"the transfer is rejected\""
    ));
}

#[test]
fn invalid_pattern_aborts_registration() {
    fn broken(steps: &mut StepDefinitions<'_>) -> Result<(), MatcherError> {
        steps.given(StepMatcher::pattern(r"a customer named (\w+")?, noop);
        Ok(())
    }

    let result = auto_bind_steps(&[feature("accounts.feature")], &[&broken], &mut CheckOnly);
    match result {
        Err(BindError::Definition(err)) => {
            assert_eq!(err.source_text(), r"a customer named (\w+");
        }
        other => panic!("expected a definition error, got {other:?}"),
    }
}

#[test]
fn prebuilt_registry_checks_without_an_adapter() {
    let registry = StepRegistry::from_modules(&[&bank_steps])
        .unwrap_or_else(|err| panic!("modules should register: {err}"));
    assert!(check_features(&[feature("accounts.feature")], &registry).is_ok());
}
