//! The chef worker loop.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::actors::{Actor, ActorError};
use crate::domain::{Action, CookedMeal, Role};
use crate::runtime::SimContext;
use crate::sync::QueueClosed;

/// Takes the quickest pending order, cooks it, publishes the meal. Any
/// number of chefs run this loop concurrently, competing for orders.
pub struct Chef {
    id: u32,
}

impl Chef {
    pub fn new(id: u32) -> Self {
        Self { id }
    }
}

#[async_trait]
impl Actor for Chef {
    fn label(&self) -> String {
        format!("Chef {}", self.id)
    }

    async fn run(self, ctx: Arc<SimContext>) -> Result<(), ActorError> {
        loop {
            let order = match ctx.orders.take_next().await {
                Ok(order) => order,
                // The runtime closed the queue: every order is served.
                Err(QueueClosed) => {
                    debug!(chef = self.id, "kitchen closed, going home");
                    return Ok(());
                }
            };

            ctx.emit(
                Role::Chef,
                self.id,
                Action::PrepStarted { item: order.item.clone(), customer: order.customer_id },
            );

            let started = ctx.clock.now();
            ctx.clock.hold_for(order.prep_ticks).await;
            ctx.stats.record_prep(ctx.clock.now().saturating_sub(started));

            ctx.emit(
                Role::Chef,
                self.id,
                Action::PrepFinished { item: order.item.clone(), customer: order.customer_id },
            );
            ctx.meals.publish(CookedMeal { order });
        }
    }
}
