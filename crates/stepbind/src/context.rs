//! Per-scenario state shared between step handlers.
//! `ScenarioContext` is a type-indexed map: each scenario run starts with an
//! empty context, and handlers store or read at most one value per type.
//! Inserting a value of a type already present replaces it (last write wins).

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Context passed to step handlers for the duration of one scenario.
///
/// # Examples
///
/// ```
/// use stepbind::ScenarioContext;
///
/// let mut ctx = ScenarioContext::default();
/// ctx.insert(41_u32);
/// if let Some(value) = ctx.get_mut::<u32>() {
///     *value += 1;
/// }
/// assert_eq!(ctx.get::<u32>(), Some(&42));
/// ```
#[derive(Default)]
pub struct ScenarioContext {
    values: HashMap<TypeId, Box<dyn Any>>,
}

impl ScenarioContext {
    /// Store a value, returning the previous value of the same type.
    pub fn insert<T: Any>(&mut self, value: T) -> Option<T> {
        self.values
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    /// Borrow the stored value of type `T`.
    #[must_use]
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.values.get(&TypeId::of::<T>())?.downcast_ref::<T>()
    }

    /// Mutably borrow the stored value of type `T`.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.values.get_mut(&TypeId::of::<T>())?.downcast_mut::<T>()
    }

    /// Remove and return the stored value of type `T`.
    pub fn take<T: Any>(&mut self) -> Option<T> {
        self.values
            .remove(&TypeId::of::<T>())
            .and_then(|value| value.downcast::<T>().ok())
            .map(|value| *value)
    }

    /// Borrow the value of type `T`, inserting one built by `init` first when
    /// absent.
    ///
    /// # Panics
    /// Does not panic: each entry is keyed by the type it stores.
    #[expect(
        clippy::expect_used,
        reason = "entries are keyed by the TypeId of the value they hold"
    )]
    pub fn get_or_insert_with<T: Any>(&mut self, init: impl FnOnce() -> T) -> &mut T {
        self.values
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(init()))
            .downcast_mut::<T>()
            .expect("context entry holds a value of its key type")
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
