//! Pure data types shared across the runtime.
//!
//! Everything here is side-effect free: contexts, events, snapshots, guards,
//! and the transition log are plain values the actor runtime moves around.

pub mod context;
pub mod event;
pub mod guard;
pub mod history;
pub mod snapshot;

pub use context::{Context, ContextPatch};
pub use event::Event;
pub use guard::Guard;
pub use history::{TransitionLog, TransitionRecord};
pub use snapshot::Snapshot;
