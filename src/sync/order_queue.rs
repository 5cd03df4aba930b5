//! Orders waiting for a chef, shortest preparation time first.

use std::sync::Mutex;

use thiserror::Error;

use crate::domain::{CustomerId, Order};
use crate::sync::pool::{PoolClosed, ResourcePool};

/// The queue was closed while a caller was blocked on a take.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("queue closed")]
pub struct QueueClosed;

impl From<PoolClosed> for QueueClosed {
    fn from(_: PoolClosed) -> Self {
        QueueClosed
    }
}

/// Submitted orders not yet picked up by a chef.
///
/// The store is kept sorted ascending by preparation time at all times, so a
/// take always returns the quickest order to cook. Equal durations keep
/// their submission order. Shortest-job-first keeps chefs busy on quick wins
/// but can starve a long order under sustained load; that is the intended
/// policy, not a defect.
pub struct PendingOrderQueue {
    store: Mutex<Vec<Order>>,
    ready: ResourcePool<CustomerId>,
}

impl PendingOrderQueue {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Vec::new()),
            ready: ResourcePool::signal(),
        }
    }

    /// Inserts `order` before the first queued order with a strictly longer
    /// preparation time, then signals one waiting chef.
    pub fn submit(&self, order: Order) {
        let owner = order.customer_id;
        let mut store = self.store.lock().expect("order queue lock poisoned");
        let position = store
            .iter()
            .position(|queued| order.prep_ticks < queued.prep_ticks)
            .unwrap_or(store.len());
        store.insert(position, order);
        drop(store);
        self.ready.release(owner);
    }

    /// Blocks until an order is available, then removes and returns the one
    /// with the shortest preparation time.
    pub async fn take_next(&self) -> Result<Order, QueueClosed> {
        let _owner = self.ready.acquire().await?;
        let mut store = self.store.lock().expect("order queue lock poisoned");
        debug_assert!(!store.is_empty(), "signal permit without a queued order");
        Ok(store.remove(0))
    }

    pub fn len(&self) -> usize {
        self.store.lock().expect("order queue lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fails every pending and future take with [`QueueClosed`].
    pub fn close(&self) {
        self.ready.close();
    }
}

impl Default for PendingOrderQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::sleep;

    fn order(customer_id: CustomerId, prep_ticks: u32) -> Order {
        Order { customer_id, item: format!("dish-{prep_ticks}"), prep_ticks }
    }

    #[tokio::test]
    async fn takes_shortest_first_with_stable_ties() {
        let queue = PendingOrderQueue::new();
        for (customer, prep) in [(1, 5), (2, 2), (3, 8), (4, 2)] {
            queue.submit(order(customer, prep));
        }

        // Durations come back non-decreasing; the two 2-tick orders keep
        // their submission order.
        let customers: Vec<CustomerId> = [
            queue.take_next().await.unwrap(),
            queue.take_next().await.unwrap(),
            queue.take_next().await.unwrap(),
            queue.take_next().await.unwrap(),
        ]
        .iter()
        .map(|o| o.customer_id)
        .collect();
        assert_eq!(customers, vec![2, 4, 1, 3]);
        assert!(queue.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn take_blocks_until_a_submission_lands() {
        let queue = Arc::new(PendingOrderQueue::new());
        let blocked = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.take_next().await })
        };
        sleep(Duration::from_millis(5)).await;
        assert!(!blocked.is_finished(), "nothing submitted yet");

        queue.submit(order(9, 3));
        let taken = blocked.await.unwrap().unwrap();
        assert_eq!(taken.customer_id, 9);
    }

    #[tokio::test(start_paused = true)]
    async fn close_turns_blocked_takes_into_errors() {
        let queue = Arc::new(PendingOrderQueue::new());
        let blocked = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.take_next().await })
        };
        sleep(Duration::from_millis(5)).await;

        queue.close();
        assert_eq!(blocked.await.unwrap(), Err(QueueClosed));
    }
}
