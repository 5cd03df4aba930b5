//! The three kinds of simulated participants.
//!
//! Each actor is a plain struct whose whole lifecycle is one `async fn run`
//! on its own tokio task. Customers run a six-state lifecycle to completion;
//! chefs and waiters loop until the runtime closes their queue.

pub mod chef;
pub mod customer;
pub mod error;
pub mod waiter;

pub use chef::Chef;
pub use customer::Customer;
pub use error::ActorError;
pub use waiter::Waiter;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::runtime::SimContext;

/// Behavior common to every simulated participant.
///
/// The runtime is generic over this seam: it spawns [`Actor::run`] and, if
/// the actor fails, logs the failure under [`Actor::label`].
#[async_trait]
pub trait Actor: Send + 'static {
    /// Identity used in logs, e.g. `"Customer 3"`.
    fn label(&self) -> String;

    /// The actor's whole lifecycle.
    async fn run(self, ctx: Arc<SimContext>) -> Result<(), ActorError>;
}

/// Spawns `actor` on its own task.
///
/// A failing actor is logged and dropped; the error never reaches the clock,
/// the coordinator, or any other actor. A customer that fails while holding
/// a table strands that table: the pool has no recovery path for it.
pub fn spawn_actor<A: Actor>(actor: A, ctx: Arc<SimContext>) -> JoinHandle<()> {
    let label = actor.label();
    tokio::spawn(async move {
        match actor.run(ctx).await {
            Ok(()) => debug!(actor = %label, "finished"),
            Err(err) => error!(actor = %label, error = %err, "aborted"),
        }
    })
}
