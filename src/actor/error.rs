//! Actor lifecycle error types.

use super::Phase;
use crate::registry::RegistryError;
use thiserror::Error;

/// Failures raised by actor operations.
///
/// All are programmer errors surfaced immediately; the runtime never retries
/// or recovers speculatively. Unmatched events are deliberately not errors.
#[derive(Debug, Error)]
pub enum ActorError {
    /// `start` called on an actor that already left the `Created` phase.
    /// Restarting a stopped actor is rejected as well.
    #[error("actor for machine '{machine}' has already been started")]
    AlreadyStarted { machine: String },

    /// `send`, `snapshot`, or `subscribe` outside the `Running` phase.
    #[error("actor for machine '{machine}' is not running (phase: {phase:?})")]
    NotRunning { machine: String, phase: Phase },

    /// Registration failed while starting this actor or one of its invoked
    /// children.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
