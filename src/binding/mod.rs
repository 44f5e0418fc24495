//! View binding: the thin adapter between actors and a rendering layer.
//!
//! The runtime knows nothing about rendering. A view implements [`View`] and
//! is bound to an actor's snapshot stream with [`bind`]; user input flows the
//! other way through [`dispatch`], which resolves the target actor by
//! registry id. Everything a view layer needs is a snapshot in and an event
//! out.

use crate::actor::{Actor, ActorError, Subscription};
use crate::core::{Event, Snapshot};
use crate::registry::RegistryHandle;

/// A renderer fed by an actor's snapshot stream.
pub trait View {
    /// Re-render from the given snapshot.
    fn render(&self, snapshot: &Snapshot);
}

/// Bind a view to an actor: paint once from the current snapshot, then
/// re-render on every processed event.
///
/// The initial paint happens before subscribing, so a view never waits for
/// the first event to show something.
pub fn bind<V>(actor: &Actor, view: V) -> Result<Subscription, ActorError>
where
    V: View + 'static,
{
    view.render(&actor.snapshot()?);
    actor.subscribe(move |snapshot| view.render(snapshot))
}

/// Forward an event to the actor registered under `target`.
///
/// Absence of the target is fatal here: view glue addressing a missing actor
/// is a wiring or ordering bug, not a condition to recover from.
pub fn dispatch(registry: &RegistryHandle, target: &str, event: Event) -> Result<(), ActorError> {
    let actor = registry.must_lookup(target)?;
    actor.send(event)
}
