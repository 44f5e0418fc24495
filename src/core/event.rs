//! Event objects delivered to actors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An event sent to an actor: a type string plus arbitrary payload fields.
///
/// The serialized form matches the wire shape `{"type": ..., ...payload}`,
/// with payload fields flattened alongside the type tag.
///
/// # Example
///
/// ```rust
/// use statewire::core::Event;
/// use serde_json::json;
///
/// let event = Event::new("post").with("postID", json!("42"));
///
/// assert_eq!(event.event_type(), "post");
/// assert_eq!(event.get("postID"), Some(&json!("42")));
/// assert_eq!(
///     serde_json::to_value(&event).unwrap(),
///     json!({"type": "post", "postID": "42"}),
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(flatten)]
    payload: Map<String, Value>,
}

impl Event {
    /// Create an event with an empty payload.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            payload: Map::new(),
        }
    }

    /// Attach a payload field, consuming and returning the event.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }

    /// The event type string used for transition lookup.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Look up a payload field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Borrow the full payload.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }
}
