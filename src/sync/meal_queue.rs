//! Finished meals waiting for a waiter, strictly first-in first-out.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::{CookedMeal, CustomerId};
use crate::sync::order_queue::QueueClosed;
use crate::sync::pool::ResourcePool;

/// Meals chefs have finished but no waiter has picked up yet.
///
/// Delivery preserves chef-completion order regardless of which customer a
/// meal belongs to — the counterpart of the order queue's deliberate
/// shortest-first reordering.
pub struct CookedMealQueue {
    store: Mutex<VecDeque<CookedMeal>>,
    ready: ResourcePool<CustomerId>,
}

impl CookedMealQueue {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(VecDeque::new()),
            ready: ResourcePool::signal(),
        }
    }

    /// Appends `meal` and signals one waiting waiter.
    pub fn publish(&self, meal: CookedMeal) {
        let owner = meal.order.customer_id;
        self.store
            .lock()
            .expect("meal queue lock poisoned")
            .push_back(meal);
        self.ready.release(owner);
    }

    /// Blocks until a meal is available, then removes and returns the oldest
    /// published one.
    pub async fn take_next(&self) -> Result<CookedMeal, QueueClosed> {
        let _owner = self.ready.acquire().await?;
        let meal = self
            .store
            .lock()
            .expect("meal queue lock poisoned")
            .pop_front()
            .expect("signal permit without a queued meal");
        Ok(meal)
    }

    pub fn len(&self) -> usize {
        self.store.lock().expect("meal queue lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fails every pending and future take with [`QueueClosed`].
    pub fn close(&self) {
        self.ready.close();
    }
}

impl Default for CookedMealQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Order;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::sleep;

    fn meal(customer_id: CustomerId) -> CookedMeal {
        CookedMeal {
            order: Order { customer_id, item: "Soup".into(), prep_ticks: 2 },
        }
    }

    #[tokio::test]
    async fn delivers_in_publish_order() {
        let queue = CookedMealQueue::new();
        for customer in [4, 1, 3] {
            queue.publish(meal(customer));
        }

        assert_eq!(queue.take_next().await.unwrap().order.customer_id, 4);
        assert_eq!(queue.take_next().await.unwrap().order.customer_id, 1);
        assert_eq!(queue.take_next().await.unwrap().order.customer_id, 3);
        assert!(queue.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn take_blocks_until_a_meal_is_published() {
        let queue = Arc::new(CookedMealQueue::new());
        let blocked = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.take_next().await })
        };
        sleep(Duration::from_millis(5)).await;
        assert!(!blocked.is_finished(), "kitchen has produced nothing");

        queue.publish(meal(6));
        assert_eq!(blocked.await.unwrap().unwrap().order.customer_id, 6);
    }

    #[tokio::test(start_paused = true)]
    async fn close_turns_blocked_takes_into_errors() {
        let queue: Arc<CookedMealQueue> = Arc::new(CookedMealQueue::new());
        let blocked = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.take_next().await })
        };
        sleep(Duration::from_millis(5)).await;

        queue.close();
        assert_eq!(blocked.await.unwrap(), Err(QueueClosed));
    }
}
