//! Transition history tracking.
//!
//! Every external transition an actor takes is recorded in an immutable log.
//! The log is diagnostic state only: nothing in the runtime reads it back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single external transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// State that was exited.
    pub from: String,
    /// State that was entered.
    pub to: String,
    /// Event type that triggered the transition.
    pub event: String,
    /// When the transition occurred.
    pub timestamp: DateTime<Utc>,
}

/// Ordered, immutable log of transitions.
///
/// `record` returns a new log rather than mutating in place.
///
/// # Example
///
/// ```rust
/// use statewire::core::{TransitionLog, TransitionRecord};
/// use chrono::Utc;
///
/// let log = TransitionLog::new();
/// let log = log.record(TransitionRecord {
///     from: "inactive".to_string(),
///     to: "active".to_string(),
///     event: "toggle".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(log.path(), vec!["inactive", "active"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionLog {
    records: Vec<TransitionRecord>,
}

impl TransitionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record, returning a new log. The original is unchanged.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// All records in order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// The most recent transition, if any.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.last()
    }

    /// The sequence of states traversed: the first record's origin followed
    /// by each destination. Empty if no transition was ever taken.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.first() {
            path.push(first.from.as_str());
        }
        for record in &self.records {
            path.push(record.to.as_str());
        }
        path
    }
}
