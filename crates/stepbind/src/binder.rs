//! Automatic step binding.
//!
//! Binding runs in two strictly ordered phases: every step-definition module
//! registers into a fresh registry, then every feature is resolved against
//! the finished registry and handed to the execution adapter. Each flattened
//! scenario is resolved exactly once, before the adapter sees it, so the
//! diagnostics do not depend on which callbacks the adapter invokes. They are
//! collected for all features and reported once at the end.

use crate::adapter::{CheckOnly, ExecutionAdapter, ScenarioRegistrar, StepBinder};
use crate::diagnostics::{AggregateBindingFailure, DiagnosticLog};
use crate::matcher::MatcherError;
use crate::model::Feature;
use crate::registry::{StepModule, StepRegistry};
use crate::resolve::{FeatureResolution, resolve_feature};
use thiserror::Error;

/// Failure of a binding run.
#[derive(Debug, Error)]
pub enum BindError {
    /// A step-definition module could not register its steps.
    #[error("step definition registration failed: {0}")]
    Definition(#[from] MatcherError),
    /// One or more steps resolved to zero or several definitions.
    #[error(transparent)]
    Unresolved(#[from] AggregateBindingFailure),
}

impl BindError {
    /// The aggregate resolution failure, if that is what this error is.
    #[must_use]
    pub fn as_unresolved(&self) -> Option<&AggregateBindingFailure> {
        match self {
            Self::Unresolved(failure) => Some(failure),
            Self::Definition(_) => None,
        }
    }
}

/// Register `modules`, then bind every step of every feature through
/// `adapter`.
///
/// # Errors
/// Returns [`BindError::Definition`] when a module fails to register, and
/// [`BindError::Unresolved`] after all features have been processed when any
/// step matched zero or several definitions.
///
/// # Examples
///
/// ```
/// use stepbind::{auto_bind_steps, CheckOnly, Feature, MatcherError, Scenario, StepDefinitions};
///
/// fn user_steps(steps: &mut StepDefinitions<'_>) -> Result<(), MatcherError> {
///     steps.given("a user exists", |_| Ok(()));
///     Ok(())
/// }
///
/// let features = [Feature::new("Users")
///     .with_scenario(Scenario::new("exists").with_step("a user exists"))];
/// assert!(auto_bind_steps(&features, &[&user_steps], &mut CheckOnly).is_ok());
/// ```
pub fn auto_bind_steps(
    features: &[Feature],
    modules: &[&dyn StepModule],
    adapter: &mut dyn ExecutionAdapter,
) -> Result<(), BindError> {
    let registry = StepRegistry::from_modules(modules)?;
    for group in registry.duplicate_matchers() {
        let ids: Vec<_> = group.iter().map(|step| step.id().to_string()).collect();
        if let Some(first) = group.first() {
            log::warn!(
                "matcher {} is registered {} times ({}); steps it matches will be ambiguous",
                first.matcher(),
                group.len(),
                ids.join(", ")
            );
        }
    }
    bind_with_registry(features, &registry, adapter)?;
    Ok(())
}

/// Bind every step of every feature through `adapter` using a finished
/// registry.
///
/// # Errors
/// Returns [`AggregateBindingFailure`] when any step matched zero or several
/// definitions.
pub fn bind_with_registry(
    features: &[Feature],
    registry: &StepRegistry,
    adapter: &mut dyn ExecutionAdapter,
) -> Result<(), AggregateBindingFailure> {
    let mut diagnostics = DiagnosticLog::new();
    for feature in features {
        let FeatureResolution {
            bindings,
            diagnostics: unresolved,
        } = resolve_feature(registry, feature);
        diagnostics.extend(unresolved);
        adapter.define_feature(feature, &mut |tests: &mut dyn ScenarioRegistrar| {
            for binding in &bindings {
                tests.test(binding.scenario_title(), &mut |steps: &mut dyn StepBinder| {
                    for bound in binding.bound() {
                        steps.define_step(
                            bound.registration.matcher(),
                            bound.registration.handler(),
                        );
                    }
                });
            }
        });
    }
    log::info!(
        "bound {} features against {} step definitions with {} diagnostics",
        features.len(),
        registry.len(),
        diagnostics.len()
    );
    diagnostics.finalize()
}

/// Resolve every feature without registering scenarios anywhere.
///
/// # Errors
/// Returns [`AggregateBindingFailure`] when any step matched zero or several
/// definitions.
pub fn check_features(
    features: &[Feature],
    registry: &StepRegistry,
) -> Result<(), AggregateBindingFailure> {
    bind_with_registry(features, registry, &mut CheckOnly)
}
