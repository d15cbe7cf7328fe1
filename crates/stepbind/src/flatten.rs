//! Scenario flattening for static resolution checks.

use crate::model::{Feature, Scenario};

/// Plain scenarios followed by the first generated scenario of each outline.
///
/// Every row of an outline shares the same step template, so one
/// representative is enough to prove each step resolves. Outlines without
/// rows contribute nothing.
///
/// # Examples
///
/// ```
/// use stepbind::{flatten, Feature, Scenario, ScenarioOutline};
///
/// let feature = Feature::new("Accounts")
///     .with_scenario(Scenario::new("plain"))
///     .with_outline(
///         ScenarioOutline::new("deposits")
///             .with_scenario(Scenario::new("deposits (example 1)"))
///             .with_scenario(Scenario::new("deposits (example 2)")),
///     );
/// let titles: Vec<_> = flatten(&feature).iter().map(|s| s.title.as_str()).collect();
/// assert_eq!(titles, ["plain", "deposits (example 1)"]);
/// ```
#[must_use]
pub fn flatten(feature: &Feature) -> Vec<&Scenario> {
    feature
        .scenarios
        .iter()
        .chain(
            feature
                .scenario_outlines
                .iter()
                .filter_map(|outline| outline.scenarios.first()),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScenarioOutline;

    fn outline(title: &str, rows: usize) -> ScenarioOutline {
        (1..=rows).fold(ScenarioOutline::new(title), |outline, row| {
            outline.with_scenario(
                Scenario::new(format!("{title} (example {row})"))
                    .with_step(format!("row {row} step")),
            )
        })
    }

    #[test]
    fn plain_scenarios_come_before_outline_representatives() {
        let feature = Feature::new("f")
            .with_outline(outline("first outline", 2))
            .with_scenario(Scenario::new("a"))
            .with_outline(outline("second outline", 1))
            .with_scenario(Scenario::new("b"));

        let titles: Vec<_> = flatten(&feature).iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            ["a", "b", "first outline (example 1)", "second outline (example 1)"]
        );
    }

    #[test]
    fn outline_with_three_rows_contributes_one_scenario() {
        let feature = Feature::new("f").with_outline(outline("rows", 3));
        let flat = flatten(&feature);
        assert_eq!(flat.len(), 1);
        assert_eq!(
            flat.first().and_then(|s| s.steps.first()).map(|s| s.text.as_str()),
            Some("row 1 step")
        );
    }

    #[test]
    fn empty_outline_contributes_nothing() {
        let feature = Feature::new("f").with_outline(ScenarioOutline::new("no rows"));
        assert!(flatten(&feature).is_empty());
    }

    #[test]
    fn flattening_is_deterministic() {
        let feature = Feature::new("f")
            .with_scenario(Scenario::new("a"))
            .with_outline(outline("o", 2));
        assert_eq!(flatten(&feature), flatten(&feature));
    }
}
