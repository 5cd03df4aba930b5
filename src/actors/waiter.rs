//! The waiter worker loop.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::actors::{Actor, ActorError};
use crate::domain::{Action, Role};
use crate::runtime::SimContext;
use crate::sync::QueueClosed;

/// Takes the oldest cooked meal and wakes the customer it belongs to. Any
/// number of waiters run this loop concurrently.
pub struct Waiter {
    id: u32,
}

impl Waiter {
    pub fn new(id: u32) -> Self {
        Self { id }
    }
}

#[async_trait]
impl Actor for Waiter {
    fn label(&self) -> String {
        format!("Waiter {}", self.id)
    }

    async fn run(self, ctx: Arc<SimContext>) -> Result<(), ActorError> {
        loop {
            let meal = match ctx.meals.take_next().await {
                Ok(meal) => meal,
                // The runtime closed the queue: every meal is delivered.
                Err(QueueClosed) => {
                    debug!(waiter = self.id, "dining room closed, going home");
                    return Ok(());
                }
            };

            let customer = meal.order.customer_id;
            let item = meal.order.item.clone();
            match ctx.deliveries.deliver(meal) {
                Ok(table) => {
                    ctx.emit(Role::Waiter, self.id, Action::MealServed { item, customer, table });
                }
                // An undeliverable meal is dropped, loudly; one bad roster
                // entry must not take the waiter down with it.
                Err(err) => error!(waiter = self.id, error = %err, "undeliverable meal"),
            }
        }
    }
}
