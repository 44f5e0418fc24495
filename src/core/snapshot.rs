//! Point-in-time views of an actor's observable state.

use super::context::Context;
use serde::{Deserialize, Serialize};

/// Immutable `{value, context}` pair broadcast to subscribers.
///
/// A snapshot is detached from the actor that produced it: holding one never
/// observes later transitions.
///
/// # Example
///
/// ```rust
/// use statewire::core::{Context, Snapshot};
///
/// let snapshot = Snapshot {
///     value: "inactive".to_string(),
///     context: Context::new(),
/// };
///
/// assert!(snapshot.matches("inactive"));
/// assert!(!snapshot.matches("active"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Name of the active state.
    pub value: String,
    /// Context record at the time of the snapshot.
    pub context: Context,
}

impl Snapshot {
    /// True if the active state has the given name.
    pub fn matches(&self, value: &str) -> bool {
        self.value == value
    }
}
