//! Parsed feature structure consumed by the resolver.
//!
//! These are plain owned values produced by a parser (see
//! [`crate::parser`]) or built directly in tests. Outline rows are expected to
//! be materialised already: each generated scenario carries concrete step
//! text.

use crate::types::StepText;

/// One line of a scenario, reduced to its text and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Rendered step text.
    pub text: StepText,
    /// Zero-based position within the owning scenario.
    pub index: usize,
}

/// A titled, ordered list of steps.
///
/// # Examples
///
/// ```
/// use stepbind::Scenario;
///
/// let scenario = Scenario::new("Sign in").with_step("a user exists").with_step("they sign in");
/// let indexes: Vec<_> = scenario.steps.iter().map(|s| s.index).collect();
/// assert_eq!(indexes, [0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scenario {
    /// Scenario title.
    pub title: String,
    /// Steps in declaration order.
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Create a scenario without steps.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step, assigning the next index.
    #[must_use]
    pub fn with_step(mut self, text: impl Into<StepText>) -> Self {
        self.push_step(text);
        self
    }

    /// Append a step in place, assigning the next index.
    pub fn push_step(&mut self, text: impl Into<StepText>) {
        let index = self.steps.len();
        self.steps.push(Step {
            text: text.into(),
            index,
        });
    }
}

/// A parametrised scenario expanded into one generated scenario per row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScenarioOutline {
    /// Outline title.
    pub title: String,
    /// Generated scenarios, one per example row.
    pub scenarios: Vec<Scenario>,
}

impl ScenarioOutline {
    /// Create an outline without rows.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            scenarios: Vec::new(),
        }
    }

    /// Append a generated scenario.
    #[must_use]
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenarios.push(scenario);
        self
    }
}

/// A titled group of scenarios and scenario outlines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Feature {
    /// Feature title.
    pub title: String,
    /// Plain scenarios in declaration order.
    pub scenarios: Vec<Scenario>,
    /// Scenario outlines in declaration order.
    pub scenario_outlines: Vec<ScenarioOutline>,
}

impl Feature {
    /// Create an empty feature.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            scenarios: Vec::new(),
            scenario_outlines: Vec::new(),
        }
    }

    /// Append a plain scenario.
    #[must_use]
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenarios.push(scenario);
        self
    }

    /// Append a scenario outline.
    #[must_use]
    pub fn with_outline(mut self, outline: ScenarioOutline) -> Self {
        self.scenario_outlines.push(outline);
        self
    }
}
