//! Step handlers: opaque callables bound to scenarios after resolution.
//!
//! The resolution engine only clones and forwards handlers; running them is
//! left to the execution adapter. Every handler carries a label so that
//! diagnostics can say which definition is involved without reflecting on
//! code.

use crate::context::ScenarioContext;
use crate::types::StepError;
use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Single-call interface executed against a scenario's context.
///
/// Any `Fn(&mut ScenarioContext) -> Result<(), StepError>` closure that is
/// `Send + Sync` implements this trait.
pub trait StepFn: Send + Sync {
    /// Run the step body.
    ///
    /// # Errors
    /// Returns [`StepError`] when the step fails or asks to skip.
    fn call(&self, ctx: &mut ScenarioContext) -> Result<(), StepError>;
}

impl<F> StepFn for F
where
    F: Fn(&mut ScenarioContext) -> Result<(), StepError> + Send + Sync,
{
    fn call(&self, ctx: &mut ScenarioContext) -> Result<(), StepError> {
        self(ctx)
    }
}

/// A labelled, cheaply clonable step body.
///
/// Clones share the same underlying callable; [`StepHandler::ptr_eq`] tells
/// whether two handlers are the same definition.
///
/// # Examples
///
/// ```
/// use stepbind::{ScenarioContext, StepHandler};
///
/// let handler = StepHandler::new(|ctx: &mut ScenarioContext| {
///     ctx.insert(1_u8);
///     Ok(())
/// })
/// .with_label("seed the counter");
///
/// let mut ctx = ScenarioContext::default();
/// assert!(handler.call(&mut ctx).is_ok());
/// assert_eq!(ctx.get::<u8>(), Some(&1));
/// assert_eq!(handler.label(), "seed the counter");
/// ```
#[derive(Clone)]
pub struct StepHandler {
    label: Cow<'static, str>,
    run: Arc<dyn StepFn>,
}

impl StepHandler {
    /// Wrap a closure, labelling it with the caller's source location.
    #[must_use]
    #[track_caller]
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(&mut ScenarioContext) -> Result<(), StepError> + Send + Sync + 'static,
    {
        Self::from_step_fn(run)
    }

    /// Wrap any [`StepFn`] implementation, labelling it with the caller's
    /// source location.
    #[must_use]
    #[track_caller]
    pub fn from_step_fn(run: impl StepFn + 'static) -> Self {
        let location = Location::caller();
        Self {
            label: Cow::Owned(format!("{}:{}", location.file(), location.line())),
            run: Arc::new(run),
        }
    }

    /// Replace the label shown in diagnostics.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    /// Human-readable description of the handler.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run the handler against `ctx`.
    ///
    /// # Errors
    /// Propagates the [`StepError`] returned by the step body.
    pub fn call(&self, ctx: &mut ScenarioContext) -> Result<(), StepError> {
        self.run.call(ctx)
    }

    /// Returns `true` when both handlers share the same callable.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.run, &other.run)
    }
}

impl fmt::Debug for StepHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepHandler")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
