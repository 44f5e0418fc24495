//! Builder for machine definitions.

use crate::builder::state::StateBuilder;
use crate::core::Context;
use crate::definition::{DefinitionError, MachineDefinition};
use serde_json::Value;
use std::collections::HashMap;

/// Builder assembling a [`MachineDefinition`] with a fluent API.
///
/// `build` validates the assembled definition, so every error the validator
/// can raise surfaces here as well.
///
/// # Example
///
/// ```rust
/// use statewire::{MachineBuilder, StateBuilder, Transition};
///
/// let definition = MachineBuilder::new("switch")
///     .initial("inactive")
///     .state("inactive", StateBuilder::new().on("toggle", Transition::to("active")))
///     .state("active", StateBuilder::new().on("toggle", Transition::to("inactive")))
///     .build()
///     .unwrap();
///
/// assert_eq!(definition.id(), "switch");
/// assert_eq!(definition.initial(), "inactive");
/// ```
pub struct MachineBuilder {
    id: String,
    initial: Option<String>,
    context: Context,
    states: Vec<(String, StateBuilder)>,
}

impl MachineBuilder {
    /// Create a builder for a machine with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            initial: None,
            context: Context::new(),
            states: Vec::new(),
        }
    }

    /// Set the starting state (required).
    pub fn initial(mut self, state: impl Into<String>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Replace the initial context wholesale.
    pub fn context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Add a single entry to the initial context.
    pub fn context_entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.set(key, value);
        self
    }

    /// Declare a state. Declaring the same name twice is a build error.
    pub fn state(mut self, name: impl Into<String>, state: StateBuilder) -> Self {
        self.states.push((name.into(), state));
        self
    }

    /// Assemble and validate the definition.
    pub fn build(self) -> Result<MachineDefinition, DefinitionError> {
        let initial = self.initial.ok_or(DefinitionError::MissingInitial {
            machine: self.id.clone(),
        })?;

        let mut states = HashMap::with_capacity(self.states.len());
        for (name, state) in self.states {
            if states.contains_key(&name) {
                return Err(DefinitionError::DuplicateState {
                    machine: self.id,
                    state: name,
                });
            }
            let node = state.build(&self.id, &name)?;
            states.insert(name, node);
        }

        let definition = MachineDefinition::new(self.id, initial, states, self.context);
        definition.validate()?;
        Ok(definition)
    }
}
