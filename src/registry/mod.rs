//! The system registry: a directory of live actors addressable by id.
//!
//! The registry is the only channel for cross-actor coordination. Producers
//! of events never hold direct references to consumers; they resolve a
//! stable id at send time. The handle is constructor-injected rather than
//! ambient, so independent application instances (and tests) never share
//! state.

pub mod error;

pub use error::RegistryError;

use crate::actor::{Actor, ActorInner};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use tracing::debug;

/// Clonable handle to one application's registry.
///
/// Cloning the handle shares the underlying table. Entries hold weak
/// references: a dropped actor never outlives itself through the registry,
/// and its id becomes reusable.
///
/// # Example
///
/// ```rust
/// use statewire::{Actor, MachineBuilder, RegistryHandle, StateBuilder};
/// use std::sync::Arc;
///
/// let registry = RegistryHandle::new();
/// let definition = Arc::new(
///     MachineBuilder::new("switch")
///         .initial("inactive")
///         .state("inactive", StateBuilder::new())
///         .build()
///         .unwrap(),
/// );
///
/// let actor = Actor::with_registration(definition, &registry, "switch");
/// actor.start().unwrap();
///
/// assert!(registry.lookup("switch").is_some());
/// assert!(registry.lookup("other").is_none());
/// ```
#[derive(Clone, Default)]
pub struct RegistryHandle {
    actors: Rc<RefCell<HashMap<String, Weak<ActorInner>>>>,
}

impl RegistryHandle {
    /// Create an empty registry, one per application root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish an actor under `id`.
    ///
    /// Registrations must be unique at any instant: if `id` already maps to
    /// a live actor this fails with [`RegistryError::DuplicateRegistration`].
    /// A stale entry whose actor has been dropped does not count.
    pub fn register(&self, id: impl Into<String>, actor: &Actor) -> Result<(), RegistryError> {
        let id = id.into();
        let mut actors = self.actors.borrow_mut();
        if let Some(existing) = actors.get(&id) {
            if existing.upgrade().is_some() {
                return Err(RegistryError::DuplicateRegistration { id });
            }
        }
        debug!(id = %id, machine = %actor.machine_id(), "actor registered");
        actors.insert(id, Rc::downgrade(actor.inner()));
        Ok(())
    }

    /// Remove the entry for `id`. No-op if absent.
    pub fn unregister(&self, id: &str) {
        if self.actors.borrow_mut().remove(id).is_some() {
            debug!(id = %id, "actor unregistered");
        }
    }

    /// Resolve `id` to a live actor, or `None`.
    pub fn lookup(&self, id: &str) -> Option<Actor> {
        self.actors
            .borrow()
            .get(id)
            .and_then(Weak::upgrade)
            .map(Actor::from_inner)
    }

    /// Resolve `id`, escalating absence to [`RegistryError::ActorNotFound`].
    ///
    /// For callers that have no sensible fallback when the target is
    /// missing, such as view glue forwarding user input.
    pub fn must_lookup(&self, id: &str) -> Result<Actor, RegistryError> {
        self.lookup(id).ok_or_else(|| RegistryError::ActorNotFound {
            id: id.to_string(),
        })
    }

    /// True if `id` maps to a live actor.
    pub fn contains(&self, id: &str) -> bool {
        self.lookup(id).is_some()
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.actors
            .borrow()
            .values()
            .filter(|weak| weak.upgrade().is_some())
            .count()
    }

    /// True if no live actor is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
