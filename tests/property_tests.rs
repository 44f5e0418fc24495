//! Property-based tests for the actor runtime.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use proptest::prelude::*;
use serde_json::json;
use statewire::{
    Actor, Context, Event, MachineBuilder, RegistryHandle, StateBuilder, Transition,
};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

fn toggle_machine() -> Arc<statewire::MachineDefinition> {
    Arc::new(
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
    )
}

fn counter_machine() -> Arc<statewire::MachineDefinition> {
    Arc::new(
        MachineBuilder::new("counter")
            .initial("counting")
            .context_entry("count", json!(0))
            .state(
                "counting",
                StateBuilder::new()
                    .on(
                        "up",
                        Transition::internal().assign(|context, _| {
                            let count = context.get("count").and_then(|v| v.as_i64()).unwrap();
                            Context::patch([("count", json!(count + 1))])
                        }),
                    )
                    .on(
                        "down",
                        Transition::internal().assign(|context, _| {
                            let count = context.get("count").and_then(|v| v.as_i64()).unwrap();
                            Context::patch([("count", json!(count - 1))])
                        }),
                    ),
            )
            .build()
            .unwrap(),
    )
}

prop_compose! {
    fn unmatched_event()(name in "[a-z]{1,8}") -> Event {
        // Anything except the one event type the toggle machine handles.
        let name = if name == "toggle" { "tog-gle".to_string() } else { name };
        Event::new(name)
    }
}

proptest! {
    #[test]
    fn unmatched_events_never_change_the_snapshot(events in prop::collection::vec(unmatched_event(), 1..20)) {
        let registry = RegistryHandle::new();
        let actor = Actor::new(toggle_machine(), &registry);
        actor.start().unwrap();
        let before = actor.snapshot().unwrap();

        for event in events {
            actor.send(event).unwrap();
            prop_assert_eq!(actor.snapshot().unwrap(), before.clone());
        }
        prop_assert!(actor.transition_log().records().is_empty());
    }

    #[test]
    fn every_send_notifies_exactly_once(events in prop::collection::vec(unmatched_event(), 0..20)) {
        let registry = RegistryHandle::new();
        let actor = Actor::new(toggle_machine(), &registry);
        actor.start().unwrap();

        let count = Rc::new(Cell::new(0u32));
        {
            let count = Rc::clone(&count);
            actor.subscribe(move |_| count.set(count.get() + 1)).unwrap();
        }

        let sent = events.len() as u32;
        for event in events {
            actor.send(event).unwrap();
        }
        prop_assert_eq!(count.get(), sent);
    }

    #[test]
    fn toggle_parity_determines_the_state(toggles in 0usize..30) {
        let registry = RegistryHandle::new();
        let actor = Actor::new(toggle_machine(), &registry);
        actor.start().unwrap();

        for _ in 0..toggles {
            actor.send(Event::new("toggle")).unwrap();
        }

        let expected = if toggles % 2 == 0 { "inactive" } else { "active" };
        prop_assert!(actor.snapshot().unwrap().matches(expected));
        prop_assert_eq!(actor.transition_log().records().len(), toggles);
    }

    #[test]
    fn context_accumulation_matches_the_event_sum(steps in prop::collection::vec(prop::bool::ANY, 0..30)) {
        let registry = RegistryHandle::new();
        let actor = Actor::new(counter_machine(), &registry);
        actor.start().unwrap();

        let mut expected = 0i64;
        for up in steps {
            if up {
                actor.send(Event::new("up")).unwrap();
                expected += 1;
            } else {
                actor.send(Event::new("down")).unwrap();
                expected -= 1;
            }
        }

        let snapshot = actor.snapshot().unwrap();
        prop_assert_eq!(
            snapshot.context.get("count"),
            Some(&json!(expected))
        );
    }

    #[test]
    fn registration_round_trips_for_any_id(id in "[a-z][a-z0-9-]{0,15}") {
        let registry = RegistryHandle::new();
        let actor = Actor::with_registration(toggle_machine(), &registry, id.clone());
        actor.start().unwrap();

        prop_assert!(registry.contains(&id));

        // A second claim on the id must fail while the first actor lives.
        let rival = Actor::with_registration(toggle_machine(), &registry, id.clone());
        prop_assert!(rival.start().is_err());

        actor.stop();
        prop_assert!(!registry.contains(&id));
    }
}
