//! Fluent builders for machine definitions.
//!
//! Builders are the public construction path: they collect declarations in
//! order, fail fast on duplicates, and run full validation on `build`.

pub mod machine;
pub mod state;

pub use machine::MachineBuilder;
pub use state::StateBuilder;
