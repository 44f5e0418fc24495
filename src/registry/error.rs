//! Registry error types.

use thiserror::Error;

/// Failures in cross-actor addressing.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two live actors claimed the same id. Silent overwrite would corrupt
    /// addressing, so the second registration is rejected outright.
    #[error("an actor is already registered under id '{id}'")]
    DuplicateRegistration { id: String },

    /// `must_lookup` on an id with no live actor behind it. Addressing
    /// failures indicate a wiring or ordering bug at the call site.
    #[error("no actor registered under id '{id}'")]
    ActorNotFound { id: String },
}
