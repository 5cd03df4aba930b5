//! Runtime orchestration and lifecycle management.
//!
//! - [`RestaurantSystem`] — wires the shared context, spawns every actor,
//!   runs the simulation to completion, and shuts the staff down.
//! - [`SimContext`] — the shared state handed to each actor.
//! - [`setup_tracing`] — initializes the tracing/logging infrastructure.

pub mod context;
pub mod system;
pub mod tracing;

pub use context::SimContext;
pub use system::RestaurantSystem;
pub use tracing::setup_tracing;
