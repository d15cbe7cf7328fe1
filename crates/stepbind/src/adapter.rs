//! Execution adapter contract.
//!
//! The binder hands every feature to an [`ExecutionAdapter`], which decides
//! how scenarios are registered and run. The adapter receives callbacks; it
//! invokes the feature callback with a [`ScenarioRegistrar`], and each
//! scenario body with a [`StepBinder`] into which resolved steps are defined
//! in step order. Callbacks cannot outlive the call that received them, so
//! every binding is complete before any scenario body can execute.

use crate::handler::StepHandler;
use crate::matcher::StepMatcher;
use crate::model::Feature;

/// Scoped registration of one scenario's resolved steps.
pub trait StepBinder {
    /// Define the next step of the scenario.
    fn define_step(&mut self, matcher: &StepMatcher, handler: &StepHandler);
}

/// Registers the scenarios of one feature.
pub trait ScenarioRegistrar {
    /// Register a scenario titled `title`; `body` defines its steps.
    fn test(&mut self, title: &str, body: &mut dyn FnMut(&mut dyn StepBinder));
}

/// Runs features on behalf of the binder.
///
/// # Examples
///
/// ```
/// use stepbind::{ExecutionAdapter, Feature, ScenarioRegistrar, StepBinder, StepHandler, StepMatcher};
///
/// #[derive(Default)]
/// struct TitleCollector(Vec<String>);
///
/// impl ScenarioRegistrar for TitleCollector {
///     fn test(&mut self, title: &str, body: &mut dyn FnMut(&mut dyn StepBinder)) {
///         struct Ignore;
///         impl StepBinder for Ignore {
///             fn define_step(&mut self, _: &StepMatcher, _: &StepHandler) {}
///         }
///         self.0.push(title.to_owned());
///         body(&mut Ignore);
///     }
/// }
///
/// impl ExecutionAdapter for TitleCollector {
///     fn define_feature(
///         &mut self,
///         _feature: &Feature,
///         tests: &mut dyn FnMut(&mut dyn ScenarioRegistrar),
///     ) {
///         tests(self);
///     }
/// }
/// ```
pub trait ExecutionAdapter {
    /// Register `feature`; `tests` registers its scenarios.
    fn define_feature(&mut self, feature: &Feature, tests: &mut dyn FnMut(&mut dyn ScenarioRegistrar));
}

/// Adapter that registers nothing and runs nothing.
///
/// Used to check that every step resolves without binding scenarios to a
/// runner.
#[derive(Debug, Default, Clone, Copy)]
pub struct CheckOnly;

impl StepBinder for CheckOnly {
    fn define_step(&mut self, _matcher: &StepMatcher, _handler: &StepHandler) {}
}

impl ScenarioRegistrar for CheckOnly {
    fn test(&mut self, _title: &str, body: &mut dyn FnMut(&mut dyn StepBinder)) {
        body(self);
    }
}

impl ExecutionAdapter for CheckOnly {
    fn define_feature(
        &mut self,
        _feature: &Feature,
        tests: &mut dyn FnMut(&mut dyn ScenarioRegistrar),
    ) {
        tests(self);
    }
}
