//! Builder for individual state nodes.

use crate::definition::{DefinitionError, Invoke, MachineDefinition, StateNode, Transition};
use std::collections::HashMap;
use std::sync::Arc;

/// Builder for one state's event handlers and optional invocation.
///
/// Handlers keep their declaration order until build time; duplicates are
/// detected there so the machine id can appear in the error.
#[derive(Default)]
pub struct StateBuilder {
    on: Vec<(String, Transition)>,
    invokes: Vec<Invoke>,
}

impl StateBuilder {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle an event type with the given transition. One handler per event
    /// type; a second declaration is a build error.
    pub fn on(mut self, event: impl Into<String>, transition: Transition) -> Self {
        self.on.push((event.into(), transition));
        self
    }

    /// Invoke a child machine while this state is active, registered under
    /// `id`. At most one invoke per state.
    pub fn invoke(mut self, id: impl Into<String>, src: Arc<MachineDefinition>) -> Self {
        self.invokes.push(Invoke::new(id, src));
        self
    }

    pub(crate) fn build(self, machine: &str, state: &str) -> Result<StateNode, DefinitionError> {
        let mut on = HashMap::with_capacity(self.on.len());
        for (event, transition) in self.on {
            if on.contains_key(&event) {
                return Err(DefinitionError::DuplicateEvent {
                    machine: machine.to_string(),
                    state: state.to_string(),
                    event,
                });
            }
            on.insert(event, transition);
        }

        let mut invokes = self.invokes;
        if invokes.len() > 1 {
            return Err(DefinitionError::DuplicateInvoke {
                machine: machine.to_string(),
                state: state.to_string(),
            });
        }
        Ok(StateNode::new(on, invokes.pop()))
    }
}
