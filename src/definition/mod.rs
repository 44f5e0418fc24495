//! Immutable machine definitions and their validation.
//!
//! A [`MachineDefinition`] is a pure description: states, transitions, an
//! initial state, and an initial context. Definitions are validated once at
//! construction and shared between actors via `Arc`; running instances live
//! in [`crate::actor`].

pub mod error;
pub mod transition;

pub use error::DefinitionError;
pub use transition::{AssignAction, Transition};

use crate::builder::MachineBuilder;
use crate::core::Context;
use std::collections::HashMap;
use std::sync::Arc;

/// Declarative description of a state machine.
///
/// Construct via [`MachineDefinition::builder`]; the builder validates on
/// `build`, so a held definition is always structurally sound.
#[derive(Clone, Debug)]
pub struct MachineDefinition {
    id: String,
    initial: String,
    states: HashMap<String, StateNode>,
    context: Context,
}

impl MachineDefinition {
    /// Start a fluent builder for a machine with the given id.
    pub fn builder(id: impl Into<String>) -> MachineBuilder {
        MachineBuilder::new(id)
    }

    pub(crate) fn new(
        id: String,
        initial: String,
        states: HashMap<String, StateNode>,
        context: Context,
    ) -> Self {
        Self {
            id,
            initial,
            states,
            context,
        }
    }

    /// Unique name of this machine type.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name of the starting state.
    pub fn initial(&self) -> &str {
        &self.initial
    }

    /// Look up a state node by name.
    pub fn state(&self, name: &str) -> Option<&StateNode> {
        self.states.get(name)
    }

    /// All declared states.
    pub fn states(&self) -> &HashMap<String, StateNode> {
        &self.states
    }

    /// Initial context record.
    pub fn initial_context(&self) -> &Context {
        &self.context
    }

    /// Check structural soundness.
    ///
    /// Fails iff `initial` is undeclared, a transition target is undeclared,
    /// or an invoked child machine is itself invalid (checked recursively).
    /// A machine with no states at all is the degenerate single-state machine
    /// and passes: its initial state is implicit and nothing can reference a
    /// missing target.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.states.is_empty() {
            return Ok(());
        }
        if !self.states.contains_key(&self.initial) {
            return Err(DefinitionError::UnknownInitial {
                machine: self.id.clone(),
                initial: self.initial.clone(),
            });
        }
        for (state, node) in &self.states {
            for (event, transition) in &node.on {
                if let Some(target) = transition.target() {
                    if !self.states.contains_key(target) {
                        return Err(DefinitionError::UnknownTarget {
                            machine: self.id.clone(),
                            state: state.clone(),
                            event: event.clone(),
                            target: target.to_string(),
                        });
                    }
                }
            }
            if let Some(invoke) = &node.invoke {
                invoke
                    .src()
                    .validate()
                    .map_err(|source| DefinitionError::InvalidChild {
                        machine: self.id.clone(),
                        state: state.clone(),
                        source: Box::new(source),
                    })?;
            }
        }
        Ok(())
    }
}

/// A single state: its event handlers and optional child invocation.
#[derive(Clone, Debug, Default)]
pub struct StateNode {
    on: HashMap<String, Transition>,
    invoke: Option<Invoke>,
}

impl StateNode {
    pub(crate) fn new(on: HashMap<String, Transition>, invoke: Option<Invoke>) -> Self {
        Self { on, invoke }
    }

    /// The transition handling the given event type, if declared.
    pub fn transition(&self, event_type: &str) -> Option<&Transition> {
        self.on.get(event_type)
    }

    /// All event handlers.
    pub fn on(&self) -> &HashMap<String, Transition> {
        &self.on
    }

    /// Child-spawn descriptor, if this state invokes a machine.
    pub fn invoke(&self) -> Option<&Invoke> {
        self.invoke.as_ref()
    }
}

/// Child-spawn descriptor: which machine to run while the owning state is
/// active, and the registry id the child is published under.
///
/// The id is caller-declared, not generated, so collisions across unrelated
/// hierarchies are possible; they surface as registration failures when the
/// child starts.
#[derive(Clone, Debug)]
pub struct Invoke {
    id: String,
    src: Arc<MachineDefinition>,
}

impl Invoke {
    /// Describe a child machine registered under `id` while the state is
    /// active.
    pub fn new(id: impl Into<String>, src: Arc<MachineDefinition>) -> Self {
        Self {
            id: id.into(),
            src,
        }
    }

    /// Registration id for the spawned child.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Definition of the child machine.
    pub fn src(&self) -> &Arc<MachineDefinition> {
        &self.src
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(on: &[(&str, Transition)]) -> StateNode {
        StateNode::new(
            on.iter()
                .map(|(event, t)| (event.to_string(), t.clone()))
                .collect(),
            None,
        )
    }

    fn toggle_machine() -> MachineDefinition {
        MachineDefinition::new(
            "switch".to_string(),
            "inactive".to_string(),
            [
                ("inactive".to_string(), node(&[("toggle", Transition::to("active"))])),
                ("active".to_string(), node(&[("toggle", Transition::to("inactive"))])),
            ]
            .into_iter()
            .collect(),
            Context::new(),
        )
    }

    #[test]
    fn valid_machine_passes() {
        assert!(toggle_machine().validate().is_ok());
    }

    #[test]
    fn undeclared_initial_fails() {
        let def = MachineDefinition::new(
            "switch".to_string(),
            "missing".to_string(),
            [("inactive".to_string(), StateNode::default())]
                .into_iter()
                .collect(),
            Context::new(),
        );
        assert!(matches!(
            def.validate(),
            Err(DefinitionError::UnknownInitial { initial, .. }) if initial == "missing"
        ));
    }

    #[test]
    fn undeclared_target_fails() {
        let def = MachineDefinition::new(
            "switch".to_string(),
            "inactive".to_string(),
            [(
                "inactive".to_string(),
                node(&[("toggle", Transition::to("nowhere"))]),
            )]
            .into_iter()
            .collect(),
            Context::new(),
        );
        assert!(matches!(
            def.validate(),
            Err(DefinitionError::UnknownTarget { target, .. }) if target == "nowhere"
        ));
    }

    #[test]
    fn internal_transition_needs_no_target() {
        let def = MachineDefinition::new(
            "counter".to_string(),
            "counting".to_string(),
            [(
                "counting".to_string(),
                node(&[("tick", Transition::internal())]),
            )]
            .into_iter()
            .collect(),
            Context::new(),
        );
        assert!(def.validate().is_ok());
    }

    #[test]
    fn stateless_machine_is_degenerate_but_valid() {
        let def = MachineDefinition::new(
            "inert".to_string(),
            "only".to_string(),
            HashMap::new(),
            Context::new(),
        );
        assert!(def.validate().is_ok());
    }

    #[test]
    fn invalid_invoked_child_fails_recursively() {
        let bad_child = Arc::new(MachineDefinition::new(
            "child".to_string(),
            "missing".to_string(),
            [("present".to_string(), StateNode::default())]
                .into_iter()
                .collect(),
            Context::new(),
        ));
        let def = MachineDefinition::new(
            "parent".to_string(),
            "hosting".to_string(),
            [(
                "hosting".to_string(),
                StateNode::new(HashMap::new(), Some(Invoke::new("kid", bad_child))),
            )]
            .into_iter()
            .collect(),
            Context::new(),
        );
        match def.validate() {
            Err(DefinitionError::InvalidChild { state, source, .. }) => {
                assert_eq!(state, "hosting");
                assert!(matches!(*source, DefinitionError::UnknownInitial { .. }));
            }
            other => panic!("expected InvalidChild, got {other:?}"),
        }
    }

    #[test]
    fn valid_invoked_child_passes() {
        let child = Arc::new(toggle_machine());
        let def = MachineDefinition::new(
            "parent".to_string(),
            "hosting".to_string(),
            [(
                "hosting".to_string(),
                StateNode::new(HashMap::new(), Some(Invoke::new("kid", child))),
            )]
            .into_iter()
            .collect(),
            Context::new(),
        );
        assert!(def.validate().is_ok());
    }
}
