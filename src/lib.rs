//! # Brigade
//!
//! A concurrent restaurant-service simulation. Customers, chefs, and waiters
//! each run on their own tokio task and coordinate only through shared,
//! capacity-limited resources: a pool of tables, a shortest-job-first order
//! queue, a first-in-first-out cooked-meal queue, and a per-customer meal
//! handoff. A single driver task advances a simulated minute counter that
//! every participant reads.
//!
//! ## Module Tour
//!
//! - [`sync`] — the blocking building blocks: an identity-carrying
//!   semaphore ([`sync::ResourcePool`]), the two mediating queues, and the
//!   one-shot delivery rendezvous.
//! - [`clock`] — the simulated clock, its sole-writer driver, and the
//!   `HH:MM` conversions.
//! - [`domain`] — the pure data types: orders, meals, transition events.
//! - [`actors`] — the customer, chef, and waiter lifecycles behind a common
//!   [`actors::Actor`] seam.
//! - [`coordinator`] — completion accounting and the end-of-run summary.
//! - [`config`] — scenario-file parsing and runtime settings.
//! - [`runtime`] — wiring, spawning, transcript events, and shutdown.
//!
//! ## Running
//!
//! ```bash
//! # One simulated minute per wall second, transcript on stdout
//! cargo run -- scenarios/dinner.txt
//!
//! # With lifecycle logs
//! RUST_LOG=info cargo run -- scenarios/dinner.txt
//! ```

pub mod actors;
pub mod clock;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod runtime;
pub mod sync;
