//! Guard predicates for controlling transitions.
//!
//! Guards are pure boolean functions over the current context and the
//! incoming event. A vetoed transition behaves exactly like an unmatched
//! event: the actor stays put and still notifies its subscribers.

use super::context::Context;
use super::event::Event;
use std::fmt;
use std::sync::Arc;

/// Pure predicate that decides whether a matched transition may run.
///
/// # Example
///
/// ```rust
/// use statewire::core::{Context, Event, Guard};
/// use serde_json::json;
///
/// let has_pages_left = Guard::new(|context: &Context, _event: &Event| {
///     context.get("page").and_then(|v| v.as_i64()).unwrap_or(0) > 1
/// });
///
/// let first_page: Context = [("page", json!(1))].into_iter().collect();
/// let later_page: Context = [("page", json!(3))].into_iter().collect();
///
/// assert!(!has_pages_left.check(&first_page, &Event::new("previous")));
/// assert!(has_pages_left.check(&later_page, &Event::new("previous")));
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Arc<dyn Fn(&Context, &Event) -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a pure predicate.
    ///
    /// The predicate must be deterministic and free of side effects.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Context, &Event) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the guard against the current context and event.
    pub fn check(&self, context: &Context, event: &Event) -> bool {
        (self.predicate)(context, event)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(<predicate>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn guard_sees_event_payload() {
        let guard = Guard::new(|_: &Context, event: &Event| {
            event.get("force").and_then(|v| v.as_bool()).unwrap_or(false)
        });

        let context = Context::new();
        assert!(!guard.check(&context, &Event::new("close")));
        assert!(guard.check(&context, &Event::new("close").with("force", json!(true))));
    }

    #[test]
    fn guard_is_deterministic() {
        let context: Context = [("page", json!(2))].into_iter().collect();
        let event = Event::new("previous");
        let guard = Guard::new(|c: &Context, _: &Event| {
            c.get("page").and_then(|v| v.as_i64()).unwrap_or(0) > 1
        });

        assert_eq!(guard.check(&context, &event), guard.check(&context, &event));
    }
}
