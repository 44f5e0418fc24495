//! Structural errors in machine definitions.

use thiserror::Error;

/// Problems detected while building or validating a machine definition.
///
/// All of these are fatal to the construction call that raised them and have
/// no effect on other machines.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("machine '{machine}': no initial state declared")]
    MissingInitial { machine: String },

    #[error("machine '{machine}': initial state '{initial}' is not a declared state")]
    UnknownInitial { machine: String, initial: String },

    #[error(
        "machine '{machine}': transition on '{event}' in state '{state}' \
         targets undeclared state '{target}'"
    )]
    UnknownTarget {
        machine: String,
        state: String,
        event: String,
        target: String,
    },

    #[error("machine '{machine}': state '{state}' declared more than once")]
    DuplicateState { machine: String, state: String },

    #[error("machine '{machine}': state '{state}' declares multiple handlers for event '{event}'")]
    DuplicateEvent {
        machine: String,
        state: String,
        event: String,
    },

    #[error("machine '{machine}': state '{state}' declares more than one invoke")]
    DuplicateInvoke { machine: String, state: String },

    #[error("machine '{machine}': machine invoked from state '{state}' is invalid")]
    InvalidChild {
        machine: String,
        state: String,
        #[source]
        source: Box<DefinitionError>,
    },
}
