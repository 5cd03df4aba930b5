//! The customer lifecycle.

use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;

use crate::actors::{Actor, ActorError};
use crate::clock::Tick;
use crate::domain::{Action, CustomerId, Order, Role};
use crate::runtime::SimContext;

/// One diner: arrives, takes a table, orders, waits to be served, eats,
/// leaves.
///
/// The lifecycle runs Waiting-to-arrive → Waiting-for-table →
/// Seated-ordering → Waiting-for-meal → Eating → Done, with exactly three
/// resource-blocking points: the clock, the table pool, and the meal slot.
pub struct Customer {
    id: CustomerId,
    item: String,
    prep_ticks: Tick,
    arrival: Tick,
}

impl Customer {
    pub fn new(id: CustomerId, item: impl Into<String>, prep_ticks: Tick, arrival: Tick) -> Self {
        Self { id, item: item.into(), prep_ticks, arrival }
    }
}

#[async_trait]
impl Actor for Customer {
    fn label(&self) -> String {
        format!("Customer {}", self.id)
    }

    async fn run(self, ctx: Arc<SimContext>) -> Result<(), ActorError> {
        ctx.clock.wait_until(self.arrival).await?;
        ctx.emit(Role::Customer, self.id, Action::Arrived);

        let table = ctx.tables.acquire().await?;
        ctx.emit(Role::Customer, self.id, Action::Seated { table });
        let waited = ctx.clock.now().saturating_sub(self.arrival);
        ctx.stats.record_wait(waited);

        // Open the meal slot before the order exists, so the kitchen can
        // never finish a meal that has nowhere to go.
        let meal_slot = ctx.deliveries.register(self.id, table);
        ctx.orders.submit(Order {
            customer_id: self.id,
            item: self.item.clone(),
            prep_ticks: self.prep_ticks,
        });
        ctx.emit(Role::Customer, self.id, Action::OrderPlaced { item: self.item.clone() });

        let _meal = meal_slot.await.map_err(|_| ActorError::MealLost(self.id))?;

        let dining = rand::thread_rng().gen_range(ctx.eating_ticks.clone());
        ctx.clock.hold_for(dining).await;

        ctx.tables.release(table);
        ctx.emit(Role::Customer, self.id, Action::Left { table });
        ctx.emit(Role::Table, table, Action::TableFreed);

        ctx.stats.customer_finished(ctx.clock.now());
        Ok(())
    }
}
