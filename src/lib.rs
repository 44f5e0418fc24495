//! Statewire: an event-driven state machine actor runtime.
//!
//! Statewire binds visual components to hierarchical state machines and lets
//! independently-created components talk to each other without holding
//! references. Three pieces make that work:
//!
//! - **Definitions** ([`definition`], [`builder`]): immutable, validated
//!   descriptions of states, transitions, guarded/assigned context, and
//!   invoked child machines.
//! - **Actors** ([`actor`]): running instances with a `Created -> Running ->
//!   Stopped` lifecycle. Events go in through `send`; snapshots come out
//!   through a synchronous subscriber broadcast. Control flow per actor is
//!   strictly unidirectional.
//! - **The registry** ([`registry`]): a constructor-injected directory
//!   mapping stable ids to live actors, populated as actors start and
//!   emptied as they stop. It is the only channel for cross-actor
//!   coordination.
//!
//! Execution is single-threaded and cooperative: `send` runs the whole
//! pipeline (transition lookup, context assignment, child spawn/stop,
//! subscriber broadcast) to completion before returning. A child invoked
//! during a transition is registered and started before the parent's `send`
//! returns, so subscribers reacting to the parent can immediately resolve it.
//!
//! # Example
//!
//! ```rust
//! use statewire::{Actor, Event, MachineBuilder, RegistryHandle, StateBuilder, Transition};
//! use std::sync::Arc;
//!
//! let definition = Arc::new(
//!     MachineBuilder::new("switch")
//!         .initial("inactive")
//!         .state("inactive", StateBuilder::new().on("toggle", Transition::to("active")))
//!         .state("active", StateBuilder::new().on("toggle", Transition::to("inactive")))
//!         .build()
//!         .unwrap(),
//! );
//!
//! let registry = RegistryHandle::new();
//! let actor = Actor::with_registration(definition, &registry, "light-switch");
//! actor.start().unwrap();
//!
//! // Any component can now address the actor by id.
//! let switch = registry.must_lookup("light-switch").unwrap();
//! switch.send(Event::new("toggle")).unwrap();
//!
//! assert!(actor.snapshot().unwrap().matches("active"));
//! ```

pub mod actor;
pub mod binding;
pub mod builder;
pub mod core;
pub mod definition;
pub mod registry;

pub use self::actor::{Actor, ActorError, Phase, Subscription};
pub use self::binding::View;
pub use self::builder::{MachineBuilder, StateBuilder};
pub use self::core::{Context, ContextPatch, Event, Guard, Snapshot, TransitionLog, TransitionRecord};
pub use self::definition::{DefinitionError, Invoke, MachineDefinition, StateNode, Transition};
pub use self::registry::{RegistryError, RegistryHandle};
