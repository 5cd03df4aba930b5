//! The shared state every actor is constructed with.

use std::ops::RangeInclusive;

use tokio::sync::mpsc;
use tracing::debug;

use crate::clock::{SimClock, Tick};
use crate::coordinator::Coordinator;
use crate::domain::{Action, Role, TableId, Transition};
use crate::sync::{CookedMealQueue, DeliveryDesk, PendingOrderQueue, ResourcePool};

/// Everything the actors share, one field per synchronization domain.
///
/// There are no process-wide singletons: the runtime builds one `SimContext`
/// and hands an `Arc` of it to every actor. Each field carries its own
/// internal synchronization, so no caller ever holds two components' locks
/// at once.
pub struct SimContext {
    pub clock: SimClock,
    pub tables: ResourcePool<TableId>,
    pub orders: PendingOrderQueue,
    pub meals: CookedMealQueue,
    pub deliveries: DeliveryDesk,
    pub stats: Coordinator,
    /// How long customers linger over a meal, in ticks.
    pub eating_ticks: RangeInclusive<Tick>,
    pub events: mpsc::UnboundedSender<Transition>,
}

impl SimContext {
    /// Reports a state transition, stamped with the current tick.
    ///
    /// The send is allowed to fail: once the transcript side has shut down
    /// there is nobody left to tell.
    pub fn emit(&self, role: Role, id: u32, action: Action) {
        let event = Transition { tick: self.clock.now(), role, id, action };
        debug!(?event, "transition");
        let _ = self.events.send(event);
    }
}
