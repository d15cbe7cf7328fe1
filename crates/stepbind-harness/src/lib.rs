//! Synchronous execution adapter for `stepbind`.
//!
//! [`StdHarness`] receives resolved scenarios from the binder, records them
//! as [`ScenarioPlan`]s, and runs them on the calling thread. Each scenario
//! gets a fresh [`stepbind::ScenarioContext`]; step panics are caught and
//! reported as failures, and the run is summarised in a [`RunSummary`].

pub mod config;
mod outcome;
mod panic;
mod runner;
mod std_harness;

pub use outcome::{HarnessError, RunSummary, ScenarioOutcome, ScenarioRecord};
pub use panic::panic_message;
pub use runner::{PlannedStep, ScenarioMetadata, ScenarioPlan};
pub use std_harness::StdHarness;
