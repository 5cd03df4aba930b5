//! One-shot meal handoff between a waiter and one specific customer.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;
use tokio::sync::oneshot;

use crate::domain::{CookedMeal, CustomerId, TableId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeliveryError {
    /// A meal names a customer nobody registered — a roster bug, reported
    /// loudly instead of dropping the meal silently.
    #[error("no customer {0} is waiting for a meal")]
    UnknownCustomer(CustomerId),
    /// The customer's task ended before its meal arrived.
    #[error("customer {0} left before the meal arrived")]
    CustomerGone(CustomerId),
}

struct Slot {
    table: TableId,
    handoff: oneshot::Sender<CookedMeal>,
}

/// Per-customer rendezvous slots.
///
/// Each slot is a single-producer single-consumer one-shot channel owned by
/// one customer; delivery consumes the slot, so a customer is woken at most
/// once and two waiters can never serve the same meal twice.
pub struct DeliveryDesk {
    slots: Mutex<HashMap<CustomerId, Slot>>,
}

impl DeliveryDesk {
    pub fn new() -> Self {
        Self { slots: Mutex::new(HashMap::new()) }
    }

    /// Opens `customer`'s slot and returns the receiving half.
    ///
    /// Customers call this before submitting their order, so a finished meal
    /// can never arrive ahead of the slot it resolves.
    pub fn register(&self, customer: CustomerId, table: TableId) -> oneshot::Receiver<CookedMeal> {
        let (handoff, meal) = oneshot::channel();
        let previous = self
            .slots
            .lock()
            .expect("delivery lock poisoned")
            .insert(customer, Slot { table, handoff });
        debug_assert!(previous.is_none(), "customer registered twice");
        meal
    }

    /// Wakes the customer named in `meal` with the meal itself, returning the
    /// table the customer sits at.
    pub fn deliver(&self, meal: CookedMeal) -> Result<TableId, DeliveryError> {
        let customer = meal.order.customer_id;
        let slot = self
            .slots
            .lock()
            .expect("delivery lock poisoned")
            .remove(&customer)
            .ok_or(DeliveryError::UnknownCustomer(customer))?;
        slot.handoff
            .send(meal)
            .map_err(|_| DeliveryError::CustomerGone(customer))?;
        Ok(slot.table)
    }
}

impl Default for DeliveryDesk {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Order;

    fn meal(customer_id: CustomerId) -> CookedMeal {
        CookedMeal {
            order: Order { customer_id, item: "Pasta".into(), prep_ticks: 12 },
        }
    }

    #[tokio::test]
    async fn delivery_wakes_the_registered_customer() {
        let desk = DeliveryDesk::new();
        let slot = desk.register(5, 2);

        assert_eq!(desk.deliver(meal(5)), Ok(2));
        let received = slot.await.expect("meal delivered");
        assert_eq!(received.order.customer_id, 5);

        // The slot is consumed: a second meal for the same customer is now
        // a lookup failure, not a double wakeup.
        assert_eq!(desk.deliver(meal(5)), Err(DeliveryError::UnknownCustomer(5)));
    }

    #[tokio::test]
    async fn meal_for_an_unregistered_customer_fails_loudly() {
        let desk = DeliveryDesk::new();
        assert_eq!(desk.deliver(meal(42)), Err(DeliveryError::UnknownCustomer(42)));
    }

    #[tokio::test]
    async fn meal_for_a_departed_customer_is_reported() {
        let desk = DeliveryDesk::new();
        let slot = desk.register(7, 1);
        drop(slot);

        assert_eq!(desk.deliver(meal(7)), Err(DeliveryError::CustomerGone(7)));
    }
}
