//! Unit tests for the Gherkin bridge.

use super::*;
use rstest::{fixture, rstest};
use std::sync::{Mutex, Once, PoisonError};

struct CapturingLogger {
    messages: Mutex<Vec<String>>,
}

impl log::Log for CapturingLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::Level::Warn
    }
    fn log(&self, record: &log::Record<'_>) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.args().to_string());
    }
    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    messages: Mutex::new(Vec::new()),
};
static INIT_LOGGER: Once = Once::new();

/// Installs the capturing logger once for the test binary.
#[fixture]
fn logger() -> &'static CapturingLogger {
    INIT_LOGGER.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Warn);
    });
    &LOGGER
}

const ACCOUNTS: &str = "\
Feature: Accounts

  Background:
    Given an open bank

  Scenario: Open an account
    Given a customer
    When they open an account

  Scenario Outline: Deposit
    Given an account with <balance>
    When I deposit <amount>
    Then the balance is <total>

    Examples:
      | balance | amount | total |
      | 0       | 5      | 5     |
      | 10      | 1      | 11    |

    Examples: large
      | balance | amount | total |
      | 100     | 900    | 1000  |

  Rule: Closing

    Background:
      Given the account is empty

    Scenario: Close an account
      When they close the account
";

fn texts(scenario: &Scenario) -> Vec<&str> {
    scenario.steps.iter().map(|s| s.text.as_str()).collect()
}

fn parsed() -> Feature {
    parse_feature_str(ACCOUNTS).unwrap_or_else(|err| panic!("fixture should parse: {err}"))
}

#[test]
fn plain_scenarios_include_background_steps() {
    let feature = parsed();
    assert_eq!(feature.title, "Accounts");
    let titles: Vec<_> = feature.scenarios.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["Open an account", "Close an account"]);

    let Some(open) = feature.scenarios.first() else {
        panic!("first scenario missing");
    };
    assert_eq!(
        texts(open),
        ["an open bank", "a customer", "they open an account"]
    );
    let indexes: Vec<_> = open.steps.iter().map(|s| s.index).collect();
    assert_eq!(indexes, [0, 1, 2]);
}

#[test]
fn rule_scenarios_get_feature_then_rule_background() {
    let feature = parsed();
    let Some(close) = feature.scenarios.get(1) else {
        panic!("rule scenario missing");
    };
    assert_eq!(
        texts(close),
        ["an open bank", "the account is empty", "they close the account"]
    );
}

#[test]
fn outline_rows_span_every_examples_block() {
    let feature = parsed();
    let Some(outline) = feature.scenario_outlines.first() else {
        panic!("outline missing");
    };
    assert_eq!(outline.title, "Deposit");
    let titles: Vec<_> = outline.scenarios.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        ["Deposit (example 1)", "Deposit (example 2)", "Deposit (example 3)"]
    );
    let Some(last) = outline.scenarios.last() else {
        panic!("generated scenario missing");
    };
    assert_eq!(
        texts(last),
        [
            "an open bank",
            "an account with 100",
            "I deposit 900",
            "the balance is 1000"
        ]
    );
}

#[rstest]
#[case::known("I have <count> items", "I have 3 items")]
#[case::repeated("<count> and <count>", "3 and 3")]
#[case::unknown("I have <missing>", "I have <missing>")]
#[case::spaced_column("<item name> costs", "apple costs")]
#[case::no_placeholder("plain text", "plain text")]
fn placeholders_are_replaced_by_column(#[case] text: &str, #[case] expected: &str) {
    let headers = ["count".to_owned(), "item name".to_owned()];
    let row = ["3".to_owned(), "apple".to_owned()];
    assert_eq!(substitute_placeholders(text, &headers, &row), expected);
}

#[test]
fn examples_without_data_rows_yield_empty_outline() {
    let feature = parse_feature_str(
        "Feature: F\n  Scenario Outline: O\n    Given <x>\n\n    Examples:\n      | x |\n",
    )
    .unwrap_or_else(|err| panic!("feature should parse: {err}"));
    let Some(outline) = feature.scenario_outlines.first() else {
        panic!("outline missing");
    };
    assert!(outline.scenarios.is_empty());
}

#[rstest]
fn outline_without_data_rows_is_logged(logger: &'static CapturingLogger) {
    let feature = parse_feature_str(
        "Feature: F\n  Scenario Outline: Header only outline\n    Given <x>\n\n    \
         Examples:\n      | x |\n",
    )
    .unwrap_or_else(|err| panic!("feature should parse: {err}"));
    assert_eq!(feature.scenario_outlines.len(), 1);

    let messages = logger
        .messages
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    assert!(
        messages
            .iter()
            .any(|m| m.contains("\"Header only outline\" has no example rows")),
        "missing warning in {messages:?}"
    );
}

#[test]
fn mismatched_row_width_is_rejected() {
    let result = parse_feature_str(
        "Feature: F\n  Scenario Outline: O\n    Given <x>\n\n    Examples:\n      | x | y |\n      | 1 |\n",
    );
    assert!(result.is_err(), "ragged examples table should fail");
}

#[test]
fn invalid_gherkin_is_reported() {
    let result = parse_feature_str("this is not gherkin");
    assert!(matches!(result, Err(ParseError::Gherkin(_))));
}

#[test]
fn missing_file_reports_path() {
    let Err(err) = parse_feature_file("no/such/file.feature") else {
        panic!("missing file should fail");
    };
    assert!(matches!(err, ParseError::Io { .. }));
    assert!(err.to_string().contains("no/such/file.feature"));
}
