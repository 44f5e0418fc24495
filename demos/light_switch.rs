//! A light switch and a light bulb: two independent views bound to one
//! actor. The switch view forwards clicks through the registry; the bulb
//! view only renders. Neither holds a reference to the other.

use serde_json::json;
use statewire::binding::{bind, dispatch, View};
use statewire::{Actor, Event, MachineBuilder, RegistryHandle, Snapshot, StateBuilder, Transition};
use std::sync::Arc;

struct SwitchView;

impl View for SwitchView {
    fn render(&self, snapshot: &Snapshot) {
        let position = if snapshot.matches("active") { "on" } else { "off" };
        println!("[switch] flipped {position}");
    }
}

struct BulbView;

impl View for BulbView {
    fn render(&self, snapshot: &Snapshot) {
        if snapshot.matches("active") {
            println!("[bulb]   lit ({:?})", snapshot.context.get("bulb"));
        } else {
            println!("[bulb]   dark");
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let definition = Arc::new(
        MachineBuilder::new("light-switch")
            .initial("inactive")
            .context_entry("bulb", json!("off"))
            .state(
                "inactive",
                StateBuilder::new().on(
                    "toggle",
                    Transition::to("active")
                        .assign(|_, _| statewire::Context::patch([("bulb", json!("on"))])),
                ),
            )
            .state(
                "active",
                StateBuilder::new().on(
                    "toggle",
                    Transition::to("inactive")
                        .assign(|_, _| statewire::Context::patch([("bulb", json!("off"))])),
                ),
            )
            .build()?,
    );

    let registry = RegistryHandle::new();
    let actor = Actor::with_registration(definition, &registry, "light-switch");
    actor.start()?;

    bind(&actor, SwitchView)?;
    bind(&actor, BulbView)?;

    // Simulated user input: the view layer only knows the registration id.
    dispatch(&registry, "light-switch", Event::new("toggle"))?;
    dispatch(&registry, "light-switch", Event::new("toggle"))?;

    actor.stop();
    Ok(())
}
