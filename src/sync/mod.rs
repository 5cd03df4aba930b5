//! Blocking coordination primitives shared by the actors.
//!
//! Everything here follows one locking rule: each component owns exactly one
//! lock, never holds it across an await, and never takes another component's
//! lock while holding its own. Deadlock is impossible by construction.

pub mod delivery;
pub mod meal_queue;
pub mod order_queue;
pub mod pool;

pub use delivery::{DeliveryDesk, DeliveryError};
pub use meal_queue::CookedMealQueue;
pub use order_queue::{PendingOrderQueue, QueueClosed};
pub use pool::{PoolClosed, ResourcePool};
