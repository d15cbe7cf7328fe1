//! Core library for `stepbind`.
//!
//! Binds the steps of Gherkin scenarios to step definitions before any
//! scenario runs. Step-definition modules register literal or regex matchers
//! into a [`StepRegistry`]; every step of every scenario must then match
//! exactly one registration. Steps that match none or several are collected
//! as [`Diagnostic`]s and reported together in a single
//! [`AggregateBindingFailure`] once every feature has been processed.
//! Resolved steps are handed to an [`ExecutionAdapter`], which decides how
//! scenarios run.
//!
//! ```
//! use stepbind::{auto_bind_steps, parse_feature_str, CheckOnly, MatcherError, StepDefinitions, StepMatcher};
//!
//! fn account_steps(steps: &mut StepDefinitions<'_>) -> Result<(), MatcherError> {
//!     steps.given("an empty account", |_| Ok(()));
//!     steps.when(StepMatcher::pattern(r"I deposit \d+")?, |_| Ok(()));
//!     Ok(())
//! }
//!
//! let feature = parse_feature_str(
//!     "Feature: Accounts\n  Scenario: Deposit\n    Given an empty account\n    When I deposit 5\n",
//! )?;
//! auto_bind_steps(&[feature], &[&account_steps], &mut CheckOnly)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod adapter;
mod binder;
mod context;
mod diagnostics;
mod flatten;
mod handler;
mod matcher;
mod model;
mod parser;
mod registry;
mod resolve;
mod types;

pub use adapter::{CheckOnly, ExecutionAdapter, ScenarioRegistrar, StepBinder};
pub use binder::{BindError, auto_bind_steps, bind_with_registry, check_features};
pub use context::ScenarioContext;
#[cfg(feature = "diagnostics")]
pub use diagnostics::DiagnosticReport;
pub use diagnostics::{
    AggregateBindingFailure, Diagnostic, DiagnosticCandidate, DiagnosticKind, DiagnosticLog,
    finalize,
};
pub use flatten::flatten;
pub use handler::{StepFn, StepHandler};
pub use matcher::{MatcherError, StepMatcher, StepPattern, matches};
pub use model::{Feature, Scenario, ScenarioOutline, Step};
pub use parser::{ParseError, parse_feature_file, parse_feature_str};
pub use registry::{RegisteredStep, StepDefinitions, StepId, StepModule, StepRegistry};
pub use resolve::{
    BoundStep, FeatureResolution, ScenarioBinding, ScenarioResolution, StepResolution,
    resolve_feature, resolve_scenario, resolve_step,
};
pub use types::{StepError, StepKeyword, StepKeywordParseError, StepText};
