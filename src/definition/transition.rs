//! Transition rules: target, guard, and ordered assign actions.

use crate::core::{Context, ContextPatch, Event, Guard};
use std::fmt;
use std::sync::Arc;

/// Pure function computing a partial context update from the current context
/// and the incoming event.
///
/// Stored as data and invoked by the runtime, so actions carry no hidden
/// mutable state of their own.
pub type AssignAction = Arc<dyn Fn(&Context, &Event) -> ContextPatch + Send + Sync>;

/// A `(state, event type) -> (optional target, ordered actions)` rule.
///
/// A transition without a target is internal: assign actions run but the
/// state value does not change and no exit/entry occurs. A transition whose
/// target is the current state is treated as a full exit/entry pair.
///
/// # Example
///
/// ```rust
/// use statewire::definition::Transition;
/// use statewire::core::Context;
/// use serde_json::json;
///
/// let next_page = Transition::internal().assign(|context, _event| {
///     let page = context.get("page").and_then(|v| v.as_i64()).unwrap_or(0);
///     Context::patch([("page", json!(page + 1))])
/// });
///
/// assert!(next_page.target().is_none());
/// ```
#[derive(Clone)]
pub struct Transition {
    target: Option<String>,
    guard: Option<Guard>,
    actions: Vec<AssignAction>,
}

impl Transition {
    /// External transition to the named state.
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            guard: None,
            actions: Vec::new(),
        }
    }

    /// Internal transition: context may change, state value does not.
    pub fn internal() -> Self {
        Self {
            target: None,
            guard: None,
            actions: Vec::new(),
        }
    }

    /// Append an assign action. Actions run in the order added; later
    /// actions observe the patches of earlier ones.
    pub fn assign<F>(mut self, action: F) -> Self
    where
        F: Fn(&Context, &Event) -> ContextPatch + Send + Sync + 'static,
    {
        self.actions.push(Arc::new(action));
        self
    }

    /// Attach a guard predicate. A vetoed transition is a silent no-op.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Context, &Event) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Destination state name, or `None` for an internal transition.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// The guard, if any.
    pub fn guard(&self) -> Option<&Guard> {
        self.guard.as_ref()
    }

    /// Ordered assign actions.
    pub fn actions(&self) -> &[AssignAction] {
        &self.actions
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("target", &self.target)
            .field("guarded", &self.guard.is_some())
            .field("actions", &self.actions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn to_sets_target() {
        let transition = Transition::to("active");
        assert_eq!(transition.target(), Some("active"));
        assert!(transition.actions().is_empty());
    }

    #[test]
    fn internal_has_no_target() {
        assert!(Transition::internal().target().is_none());
    }

    #[test]
    fn assign_preserves_order() {
        let transition = Transition::internal()
            .assign(|_, _| Context::patch([("n", json!(1))]))
            .assign(|context, _| {
                // Second action must see the first one's patch.
                let n = context.get("n").and_then(|v| v.as_i64()).unwrap_or(-1);
                Context::patch([("n", json!(n * 10))])
            });
        assert_eq!(transition.actions().len(), 2);
    }
}
