//! Step registration and lookup.
//! This module defines the `RegisteredStep` record, the registration surface
//! handed to step-definition modules, and the ordered registry the resolver
//! queries. The registry is append-only: registering the same matcher twice
//! yields two entries, and both will match the same step text.

use crate::context::ScenarioContext;
use crate::handler::StepHandler;
use crate::matcher::{MatcherError, StepMatcher};
use crate::types::{StepError, StepKeyword, StepText};
use std::collections::HashMap;
use std::fmt;
use std::panic::Location;

/// Identity of a registration: its zero-based insertion index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(usize);

impl StepId {
    /// Insertion index of the registration.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Represents a single step definition registered with the registry.
#[derive(Debug, Clone)]
pub struct RegisteredStep {
    id: StepId,
    keyword: StepKeyword,
    matcher: StepMatcher,
    handler: StepHandler,
    location: &'static Location<'static>,
}

impl RegisteredStep {
    /// Identity of this registration.
    #[must_use]
    pub const fn id(&self) -> StepId {
        self.id
    }

    /// Verb used to register the step.
    #[must_use]
    pub const fn keyword(&self) -> StepKeyword {
        self.keyword
    }

    /// Matcher deciding which step text this definition implements.
    #[must_use]
    pub const fn matcher(&self) -> &StepMatcher {
        &self.matcher
    }

    /// Handler bound into scenarios whose steps resolve to this definition.
    #[must_use]
    pub const fn handler(&self) -> &StepHandler {
        &self.handler
    }

    /// Source location of the registering call.
    #[must_use]
    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Returns `true` when this definition's matcher accepts `text`.
    #[must_use]
    pub fn matches(&self, text: &StepText) -> bool {
        self.matcher.matches(text.as_str())
    }
}

/// Ordered collection of step definitions.
///
/// # Examples
///
/// ```
/// use stepbind::{StepKeyword, StepMatcher, StepRegistry, StepText};
///
/// let mut registry = StepRegistry::new();
/// registry.definitions().given("a user exists", |_| Ok(()));
/// registry.definitions().then(StepMatcher::pattern(r"a user \w+").unwrap(), |_| Ok(()));
///
/// let text = StepText::from("a user exists");
/// let matches = registry.matching(&text);
/// assert_eq!(matches.len(), 2);
/// assert_eq!(matches[0].keyword(), StepKeyword::Given);
/// ```
#[derive(Debug, Default, Clone)]
pub struct StepRegistry {
    steps: Vec<RegisteredStep>,
}

impl StepRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry by running every module in order.
    ///
    /// # Errors
    /// Returns the first [`MatcherError`] raised by a module. Registrations
    /// made before the failure are discarded along with the registry.
    pub fn from_modules(modules: &[&dyn StepModule]) -> Result<Self, MatcherError> {
        let mut registry = Self::new();
        for module in modules {
            module.register(&mut registry.definitions())?;
        }
        log::debug!(
            "registered {} step definitions from {} modules",
            registry.len(),
            modules.len()
        );
        Ok(registry)
    }

    /// Registration surface writing into this registry.
    pub fn definitions(&mut self) -> StepDefinitions<'_> {
        StepDefinitions { registry: self }
    }

    /// Append a definition, returning its identity.
    #[track_caller]
    pub fn register(
        &mut self,
        keyword: StepKeyword,
        matcher: StepMatcher,
        handler: StepHandler,
    ) -> StepId {
        let id = StepId(self.steps.len());
        log::trace!("registering {keyword} {matcher} as {id}");
        self.steps.push(RegisteredStep {
            id,
            keyword,
            matcher,
            handler,
            location: Location::caller(),
        });
        id
    }

    /// Every registration in insertion order.
    #[must_use]
    pub fn all_registrations(&self) -> &[RegisteredStep] {
        &self.steps
    }

    /// Look up a registration by identity.
    #[must_use]
    pub fn get(&self, id: StepId) -> Option<&RegisteredStep> {
        self.steps.get(id.0)
    }

    /// Number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` when nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All registrations whose matcher accepts `text`, in insertion order.
    #[must_use]
    pub fn matching(&self, text: &StepText) -> Vec<&RegisteredStep> {
        self.steps.iter().filter(|step| step.matches(text)).collect()
    }

    /// Group registrations that share an identical matcher.
    ///
    /// Groups are ordered by their first member and only groups with more
    /// than one member are returned.
    #[must_use]
    pub fn duplicate_matchers(&self) -> Vec<Vec<&RegisteredStep>> {
        let mut slots: HashMap<&StepMatcher, usize> = HashMap::new();
        let mut groups: Vec<Vec<&RegisteredStep>> = Vec::new();
        for step in &self.steps {
            match slots.get(&step.matcher).copied() {
                Some(slot) => {
                    if let Some(group) = groups.get_mut(slot) {
                        group.push(step);
                    }
                }
                None => {
                    slots.insert(&step.matcher, groups.len());
                    groups.push(vec![step]);
                }
            }
        }
        groups.retain(|group| group.len() > 1);
        groups
    }
}

/// Registration surface handed to step-definition modules.
///
/// `given`, `when`, `then`, `and`, `but`, and `define_step` are identical in
/// effect; the verb is only recorded for diagnostics. `pending` registers
/// nothing.
pub struct StepDefinitions<'r> {
    registry: &'r mut StepRegistry,
}

macro_rules! registration_verb {
    ($(#[$doc:meta])* $name:ident => $keyword:ident) => {
        $(#[$doc])*
        #[track_caller]
        pub fn $name<F>(&mut self, matcher: impl Into<StepMatcher>, handler: F) -> &mut Self
        where
            F: Fn(&mut ScenarioContext) -> Result<(), StepError> + Send + Sync + 'static,
        {
            self.register(StepKeyword::$keyword, matcher.into(), StepHandler::new(handler))
        }
    };
}

impl StepDefinitions<'_> {
    registration_verb!(
        /// Register a step without a keyword.
        define_step => Step
    );
    registration_verb!(
        /// Register a `Given` step.
        given => Given
    );
    registration_verb!(
        /// Register a `When` step.
        when => When
    );
    registration_verb!(
        /// Register a `Then` step.
        then => Then
    );
    registration_verb!(
        /// Register an `And` step.
        and => And
    );
    registration_verb!(
        /// Register a `But` step.
        but => But
    );

    /// Register a prebuilt handler, keeping its label.
    #[track_caller]
    pub fn register(
        &mut self,
        keyword: StepKeyword,
        matcher: StepMatcher,
        handler: StepHandler,
    ) -> &mut Self {
        self.registry.register(keyword, matcher, handler);
        self
    }

    /// Acknowledge a step that is intentionally left unimplemented.
    ///
    /// Nothing is registered, so a feature step with this text still resolves
    /// to zero definitions unless another module defines it.
    pub fn pending(&mut self, matcher: impl Into<StepMatcher>) -> &mut Self {
        let matcher: StepMatcher = matcher.into();
        log::debug!("step {matcher} is pending");
        self
    }
}

/// A step-definition module: a callable that registers steps.
///
/// Implemented for every `Fn(&mut StepDefinitions<'_>) -> Result<(),
/// MatcherError>`, so plain functions work:
///
/// ```
/// use stepbind::{MatcherError, StepDefinitions, StepMatcher, StepRegistry};
///
/// fn account_steps(steps: &mut StepDefinitions<'_>) -> Result<(), MatcherError> {
///     steps.given("an empty account", |_| Ok(()));
///     steps.when(StepMatcher::pattern(r"I deposit (\d+)")?, |_| Ok(()));
///     steps.pending("the bank is closed");
///     Ok(())
/// }
///
/// let registry = StepRegistry::from_modules(&[&account_steps]).unwrap();
/// assert_eq!(registry.len(), 2);
/// ```
pub trait StepModule {
    /// Register this module's steps.
    ///
    /// # Errors
    /// Returns [`MatcherError`] when a pattern fails to compile.
    fn register(&self, steps: &mut StepDefinitions<'_>) -> Result<(), MatcherError>;
}

impl<F> StepModule for F
where
    F: Fn(&mut StepDefinitions<'_>) -> Result<(), MatcherError>,
{
    fn register(&self, steps: &mut StepDefinitions<'_>) -> Result<(), MatcherError> {
        self(steps)
    }
}
