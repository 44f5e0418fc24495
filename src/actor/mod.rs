//! Running machine instances.
//!
//! An [`Actor`] owns the mutable half of the system: current state value,
//! context, invoked children, and subscribers. Processing is single-threaded
//! and synchronous end to end: `send` runs transition lookup, context
//! assignment, child stop/spawn, and subscriber broadcast to completion
//! before returning, so a child spawned during a transition is resolvable
//! through the registry by any code running later in the same call chain.
//!
//! The actor itself moves through `Created -> Running -> Stopped`, distinct
//! from the domain machine it runs. `send`, `snapshot`, and `subscribe` are
//! only valid while `Running`.

pub mod error;
pub mod subscription;

pub use error::ActorError;
pub use subscription::Subscription;

use crate::core::{Context, Event, Snapshot, TransitionLog, TransitionRecord};
use crate::definition::{MachineDefinition, Transition};
use crate::registry::RegistryHandle;
use chrono::Utc;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use subscription::Subscribers;
use tracing::{debug, trace};
use uuid::Uuid;

/// Lifecycle phase of an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Constructed but not yet started.
    Created,
    /// Accepting events.
    Running,
    /// Terminated; all operations except `stop` are rejected.
    Stopped,
}

/// A running instance of a machine definition.
///
/// `Actor` is a cheap clonable handle; clones address the same instance.
/// Construct with [`Actor::new`] or [`Actor::with_registration`], then call
/// [`Actor::start`].
///
/// # Example
///
/// ```rust
/// use statewire::{Actor, Event, MachineBuilder, RegistryHandle, StateBuilder, Transition};
/// use std::sync::Arc;
///
/// let definition = Arc::new(
///     MachineBuilder::new("switch")
///         .initial("inactive")
///         .state("inactive", StateBuilder::new().on("toggle", Transition::to("active")))
///         .state("active", StateBuilder::new().on("toggle", Transition::to("inactive")))
///         .build()
///         .unwrap(),
/// );
///
/// let registry = RegistryHandle::new();
/// let actor = Actor::new(definition, &registry);
/// actor.start().unwrap();
///
/// actor.send(Event::new("toggle")).unwrap();
/// assert!(actor.snapshot().unwrap().matches("active"));
/// ```
#[derive(Clone)]
pub struct Actor {
    inner: Rc<ActorInner>,
}

pub(crate) struct ActorInner {
    definition: Arc<MachineDefinition>,
    registry: RegistryHandle,
    registration_id: Option<String>,
    instance: Uuid,
    phase: Cell<Phase>,
    state: RefCell<String>,
    context: RefCell<Context>,
    children: RefCell<HashMap<String, Actor>>,
    subscribers: Subscribers,
    log: RefCell<TransitionLog>,
}

impl Actor {
    /// Create an unstarted, unaddressable (private) actor.
    pub fn new(definition: Arc<MachineDefinition>, registry: &RegistryHandle) -> Self {
        Self::build(definition, registry, None)
    }

    /// Create an unstarted actor that will publish itself under `id` when
    /// started.
    pub fn with_registration(
        definition: Arc<MachineDefinition>,
        registry: &RegistryHandle,
        id: impl Into<String>,
    ) -> Self {
        Self::build(definition, registry, Some(id.into()))
    }

    fn build(
        definition: Arc<MachineDefinition>,
        registry: &RegistryHandle,
        registration_id: Option<String>,
    ) -> Self {
        let state = definition.initial().to_string();
        let context = definition.initial_context().clone();
        Self {
            inner: Rc::new(ActorInner {
                definition,
                registry: registry.clone(),
                registration_id,
                instance: Uuid::new_v4(),
                phase: Cell::new(Phase::Created),
                state: RefCell::new(state),
                context: RefCell::new(context),
                children: RefCell::new(HashMap::new()),
                subscribers: Subscribers::default(),
                log: RefCell::new(TransitionLog::new()),
            }),
        }
    }

    /// Begin accepting events.
    ///
    /// Publishes the actor to the registry (if it has a registration id)
    /// before any entry logic runs, then enters the initial state, spawning
    /// and starting its invoked child if it declares one. Fails with
    /// [`ActorError::AlreadyStarted`] on a second call and propagates
    /// registration collisions from this actor or any transitively spawned
    /// child.
    pub fn start(&self) -> Result<(), ActorError> {
        ActorInner::start(&self.inner)
    }

    /// Deliver an event.
    ///
    /// If the current state declares a transition for the event type (and
    /// its guard, if any, passes), assign actions run left to right, then an
    /// external transition exits the current state (stopping its invoked
    /// child) strictly before entering the target (spawning its child). An
    /// unmatched event is a deliberate no-op, never an error. Either way,
    /// every subscriber is notified synchronously, in subscription order,
    /// before `send` returns.
    pub fn send(&self, event: Event) -> Result<(), ActorError> {
        self.inner.send(&event)
    }

    /// The actor's observable state: `{value, context}`.
    pub fn snapshot(&self) -> Result<Snapshot, ActorError> {
        self.inner.ensure_running()?;
        Ok(self.inner.snapshot_now())
    }

    /// Register a callback invoked after every processed event, including
    /// no-op events that changed nothing.
    ///
    /// Subscribing the same callback twice yields two independent
    /// registrations.
    pub fn subscribe<F>(&self, callback: F) -> Result<Subscription, ActorError>
    where
        F: Fn(&Snapshot) + 'static,
    {
        self.inner.ensure_running()?;
        Ok(self.inner.subscribers.add(callback))
    }

    /// Stop this actor and its whole subtree.
    ///
    /// Children are stopped depth-first before the actor unregisters itself
    /// and clears its subscribers. Idempotent: stopping an already-stopped
    /// actor is a no-op.
    pub fn stop(&self) {
        self.inner.stop();
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.inner.phase.get()
    }

    /// Id of the machine definition this actor runs.
    pub fn machine_id(&self) -> &str {
        self.inner.definition.id()
    }

    /// The id this actor registers under, if any.
    pub fn registration_id(&self) -> Option<&str> {
        self.inner.registration_id.as_deref()
    }

    /// Unique id of this running instance.
    pub fn instance_id(&self) -> Uuid {
        self.inner.instance
    }

    /// Copy of the external-transition log, usable in any phase.
    pub fn transition_log(&self) -> TransitionLog {
        self.inner.log.borrow().clone()
    }

    pub(crate) fn inner(&self) -> &Rc<ActorInner> {
        &self.inner
    }

    pub(crate) fn from_inner(inner: Rc<ActorInner>) -> Self {
        Self { inner }
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("machine", &self.inner.definition.id())
            .field("instance", &self.inner.instance)
            .field("phase", &self.inner.phase.get())
            .field("state", &*self.inner.state.borrow())
            .finish()
    }
}

impl ActorInner {
    fn start(this: &Rc<Self>) -> Result<(), ActorError> {
        match this.phase.get() {
            Phase::Created => {}
            Phase::Running | Phase::Stopped => {
                return Err(ActorError::AlreadyStarted {
                    machine: this.definition.id().to_string(),
                });
            }
        }
        // Publish before any entry logic so code triggered by entering the
        // initial state (including children) can already resolve this actor.
        if let Some(id) = &this.registration_id {
            this.registry
                .register(id.clone(), &Actor::from_inner(Rc::clone(this)))?;
        }
        this.phase.set(Phase::Running);
        debug!(
            machine = %this.definition.id(),
            instance = %this.instance,
            state = %this.state.borrow(),
            "actor started"
        );
        let initial = this.state.borrow().clone();
        this.enter_state(&initial)
    }

    fn send(&self, event: &Event) -> Result<(), ActorError> {
        self.ensure_running()?;
        let matched = {
            let state = self.state.borrow();
            self.definition
                .state(&state)
                .and_then(|node| node.transition(event.event_type()))
                .cloned()
        };
        match matched {
            Some(transition) if self.guard_allows(&transition, event) => {
                self.apply_actions(&transition, event);
                if let Some(target) = transition.target() {
                    self.take_transition(target, event)?;
                }
            }
            Some(_) => {
                trace!(
                    machine = %self.definition.id(),
                    event = %event.event_type(),
                    "guard vetoed transition"
                );
            }
            None => {
                trace!(
                    machine = %self.definition.id(),
                    event = %event.event_type(),
                    state = %self.state.borrow(),
                    "no transition for event"
                );
            }
        }
        // Subscribers hear about every processed event, match or not.
        self.subscribers.notify(&self.snapshot_now());
        Ok(())
    }

    fn guard_allows(&self, transition: &Transition, event: &Event) -> bool {
        match transition.guard() {
            Some(guard) => guard.check(&self.context.borrow(), event),
            None => true,
        }
    }

    /// Fold assign actions left to right; later actions observe the patches
    /// of earlier ones. The stored context is replaced in one step.
    fn apply_actions(&self, transition: &Transition, event: &Event) {
        if transition.actions().is_empty() {
            return;
        }
        let mut context = self.context.borrow().clone();
        for action in transition.actions() {
            let patch = action(&context, event);
            context.merge(patch);
        }
        self.context.replace(context);
    }

    /// Exit the current state, then enter `target`. A self-transition is a
    /// full exit/entry pair: the invoked child is stopped and respawned.
    fn take_transition(&self, target: &str, event: &Event) -> Result<(), ActorError> {
        let from = self.state.borrow().clone();
        self.exit_state(&from);
        *self.state.borrow_mut() = target.to_string();
        let record = TransitionRecord {
            from: from.clone(),
            to: target.to_string(),
            event: event.event_type().to_string(),
            timestamp: Utc::now(),
        };
        self.log.replace_with(|log| log.record(record));
        debug!(
            machine = %self.definition.id(),
            from = %from,
            to = %target,
            event = %event.event_type(),
            "transition"
        );
        self.enter_state(target)
    }

    fn exit_state(&self, state: &str) {
        let Some(invoke) = self.definition.state(state).and_then(|node| node.invoke()) else {
            return;
        };
        // Remove before stopping: the child's stop may run arbitrary
        // callbacks and must not observe a half-torn-down children map.
        let child = self.children.borrow_mut().remove(invoke.id());
        if let Some(child) = child {
            child.stop();
        }
    }

    fn enter_state(&self, state: &str) -> Result<(), ActorError> {
        let Some(invoke) = self.definition.state(state).and_then(|node| node.invoke()) else {
            return Ok(());
        };
        let child =
            Actor::with_registration(Arc::clone(invoke.src()), &self.registry, invoke.id());
        self.children
            .borrow_mut()
            .insert(invoke.id().to_string(), child.clone());
        child.start()
    }

    fn stop(&self) {
        if self.phase.get() == Phase::Stopped {
            return;
        }
        let was_running = self.phase.get() == Phase::Running;
        // Children first, depth-first, so descendants release their
        // registrations before this actor releases its own.
        let children: Vec<Actor> = self
            .children
            .borrow_mut()
            .drain()
            .map(|(_, child)| child)
            .collect();
        for child in children {
            child.stop();
        }
        if was_running {
            if let Some(id) = &self.registration_id {
                self.registry.unregister(id);
            }
        }
        self.subscribers.clear();
        self.phase.set(Phase::Stopped);
        debug!(
            machine = %self.definition.id(),
            instance = %self.instance,
            "actor stopped"
        );
    }

    fn ensure_running(&self) -> Result<(), ActorError> {
        match self.phase.get() {
            Phase::Running => Ok(()),
            phase => Err(ActorError::NotRunning {
                machine: self.definition.id().to_string(),
                phase,
            }),
        }
    }

    fn snapshot_now(&self) -> Snapshot {
        Snapshot {
            value: self.state.borrow().clone(),
            context: self.context.borrow().clone(),
        }
    }
}


#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::builder::{MachineBuilder, StateBuilder};
    use serde_json::{json, Value};

    #[test]
    fn toggle_scenario_round_trips() {
        let registry = RegistryHandle::new();
        let definition = Arc::new(
            MachineBuilder::new("switch")
                .initial("inactive")
                .state(
                    "inactive",
                    StateBuilder::new().on("toggle", Transition::to("active")),
                )
                .state(
                    "active",
                    StateBuilder::new().on("toggle", Transition::to("inactive")),
                )
                .build()
                .unwrap(),
        );
        let actor = Actor::new(definition, &registry);
        actor.start().unwrap();
        assert!(actor.snapshot().unwrap().matches("inactive"));

        let count = Rc::new(Cell::new(0));
        {
            let count = Rc::clone(&count);
            actor.subscribe(move |_| count.set(count.get() + 1)).unwrap();
        }

        actor.send(Event::new("toggle")).unwrap();
        actor.send(Event::new("toggle")).unwrap();

        assert!(actor.snapshot().unwrap().matches("inactive"));
        assert_eq!(count.get(), 2);
        assert_eq!(
            actor.transition_log().path(),
            vec!["inactive", "active", "inactive"]
        );
    }

    fn pager() -> Arc<MachineDefinition> {
        Arc::new(
            MachineBuilder::new("pager")
                .initial("viewing")
                .context_entry("page", json!(1))
                .state(
                    "viewing",
                    StateBuilder::new()
                        .on(
                            "next",
                            Transition::internal().assign(|context, _| {
                                let page =
                                    context.get("page").and_then(|v| v.as_i64()).unwrap();
                                Context::patch([("page", json!(page + 1))])
                            }),
                        )
                        .on(
                            "previous",
                            Transition::internal().assign(|context, _| {
                                let page =
                                    context.get("page").and_then(|v| v.as_i64()).unwrap();
                                Context::patch([("page", json!(page - 1))])
                            }),
                        ),
                )
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn context_accumulates_across_events() {
        let registry = RegistryHandle::new();
        let actor = Actor::new(pager(), &registry);
        actor.start().unwrap();

        for _ in 0..3 {
            actor.send(Event::new("next")).unwrap();
        }
        assert_eq!(
            actor.snapshot().unwrap().context.get("page"),
            Some(&json!(4))
        );

        actor.send(Event::new("previous")).unwrap();
        assert_eq!(
            actor.snapshot().unwrap().context.get("page"),
            Some(&json!(3))
        );
    }

    #[test]
    fn hierarchical_addressing_reaches_invoked_children() {
        let registry = RegistryHandle::new();
        let blog_page = Arc::new(
            MachineBuilder::new("blog-page")
                .initial("index")
                .state(
                    "index",
                    StateBuilder::new().on(
                        "post",
                        Transition::to("post").assign(|_, event| {
                            Context::patch([(
                                "postID",
                                event.get("postID").cloned().unwrap_or(Value::Null),
                            )])
                        }),
                    ),
                )
                .state(
                    "post",
                    StateBuilder::new().on("back", Transition::to("index")),
                )
                .build()
                .unwrap(),
        );
        let root = Arc::new(
            MachineBuilder::new("site")
                .initial("blog")
                .state("blog", StateBuilder::new().invoke("blog-page", blog_page))
                .build()
                .unwrap(),
        );
        let site = Actor::new(root, &registry);
        site.start().unwrap();

        // A sibling with no reference to the child addresses it by id.
        let page = registry.must_lookup("blog-page").unwrap();
        page.send(Event::new("post").with("postID", json!("42")))
            .unwrap();

        let snapshot = page.snapshot().unwrap();
        assert!(snapshot.matches("post"));
        assert_eq!(snapshot.context.get("postID"), Some(&json!("42")));
    }

    #[test]
    fn missing_actor_is_fatal_at_the_lookup_site() {
        let registry = RegistryHandle::new();
        assert!(registry.must_lookup("nonexistent").is_err());
    }
}
