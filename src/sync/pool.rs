//! Counting semaphore whose permits carry unit identities.

use std::collections::VecDeque;
use std::sync::Mutex;

use thiserror::Error;
use tokio::sync::Semaphore;

/// The pool was closed while a caller was blocked on [`ResourcePool::acquire`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("resource pool closed")]
pub struct PoolClosed;

/// A blocking pool of identified units.
///
/// Two modes share the implementation:
///
/// - **Seeded** ([`ResourcePool::with_units`]): a fixed set of units (the
///   tables) cycling between free and held. The multiset of free plus held
///   units always equals the seeded set.
/// - **Signal** ([`ResourcePool::signal`]): zero initial permits. `release`
///   both counts one available item and records a caller-chosen tag — the
///   id of the customer whose item became available. The order and meal
///   queues use this mode as their blocking-count mechanism, keeping their
///   actual payloads in a separately ordered store.
///
/// Waiters are queued by the underlying tokio semaphore, so a release wakes
/// exactly one of them and nobody starves.
pub struct ResourcePool<T> {
    permits: Semaphore,
    free: Mutex<VecDeque<T>>,
    capacity: Option<usize>,
}

impl<T> ResourcePool<T> {
    /// A pool seeded with a fixed set of units, all initially free.
    pub fn with_units(units: Vec<T>) -> Self {
        Self {
            permits: Semaphore::new(units.len()),
            capacity: Some(units.len()),
            free: Mutex::new(units.into()),
        }
    }

    /// An initially empty pool used as a payload-carrying counter.
    pub fn signal() -> Self {
        Self {
            permits: Semaphore::new(0),
            capacity: None,
            free: Mutex::new(VecDeque::new()),
        }
    }

    /// Blocks until a unit is free, then removes and returns it.
    pub async fn acquire(&self) -> Result<T, PoolClosed> {
        let permit = self.permits.acquire().await.map_err(|_| PoolClosed)?;
        permit.forget();
        // A permit is only ever granted after a matching unit was pushed.
        let unit = self
            .free
            .lock()
            .expect("pool lock poisoned")
            .pop_front()
            .expect("permit granted without a matching unit");
        Ok(unit)
    }

    /// Returns `unit` to the pool and wakes one blocked waiter, if any.
    ///
    /// Precondition for seeded pools: `unit` must currently be held. Releasing
    /// a unit that is already free would grow the free set past the seeded
    /// capacity, which trips an assertion in debug builds.
    pub fn release(&self, unit: T) {
        let mut free = self.free.lock().expect("pool lock poisoned");
        if let Some(capacity) = self.capacity {
            debug_assert!(free.len() < capacity, "release of a unit that is already free");
        }
        free.push_back(unit);
        drop(free);
        self.permits.add_permits(1);
    }

    /// How many units are free right now. Non-blocking.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Whether at least one unit is free right now. Non-blocking.
    pub fn has_available(&self) -> bool {
        self.available() > 0
    }

    /// Fails every pending and future [`ResourcePool::acquire`] with
    /// [`PoolClosed`]. Releases still land, so conservation holds across a
    /// close.
    pub fn close(&self) {
        self.permits.close();
    }
}
