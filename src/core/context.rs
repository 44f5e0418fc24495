//! Machine context: the opaque data record carried by an actor.
//!
//! Context is only ever updated through assign actions, each producing a
//! partial patch that is merged into the current record. The runtime clones
//! the context, folds the patches, and stores the result, so observers never
//! see a half-applied update.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A partial context update produced by an assign action.
///
/// Entries are merged into the context in order, later writers winning.
pub type ContextPatch = Map<String, Value>;

/// Opaque, machine-specific data record.
///
/// Keys are strings, values are arbitrary JSON. An empty context is valid;
/// machines that carry no data simply never touch it.
///
/// # Example
///
/// ```rust
/// use statewire::core::Context;
/// use serde_json::json;
///
/// let mut context = Context::new();
/// context.set("page", json!(1));
///
/// context.merge(Context::patch([("page", json!(2)), ("query", json!("rust"))]));
///
/// assert_eq!(context.get("page"), Some(&json!(2)));
/// assert_eq!(context.get("query"), Some(&json!("rust")));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(Map<String, Value>);

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a patch from key/value entries.
    ///
    /// Convenience for assign actions, which return a [`ContextPatch`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use statewire::core::Context;
    /// use serde_json::json;
    ///
    /// let patch = Context::patch([("postID", json!("42"))]);
    /// assert_eq!(patch.get("postID"), Some(&json!("42")));
    /// ```
    pub fn patch<K, I>(entries: I) -> ContextPatch
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        entries.into_iter().map(|(k, v)| (k.into(), v)).collect()
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert or replace a single entry.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Merge a patch into this context, entry by entry.
    ///
    /// Existing keys are overwritten; keys absent from the patch are kept.
    pub fn merge(&mut self, patch: ContextPatch) {
        for (key, value) in patch {
            self.0.insert(key, value);
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the context carries no data.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map.
    pub fn entries(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
