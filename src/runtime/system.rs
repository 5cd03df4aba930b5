//! Wiring, spawning, and orderly shutdown of a whole simulation run.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, instrument};

use crate::actors::{spawn_actor, Chef, Customer, Waiter};
use crate::clock::SimClock;
use crate::config::{Scenario, SimSettings};
use crate::coordinator::{Coordinator, Summary};
use crate::domain::Transition;
use crate::runtime::SimContext;
use crate::sync::{CookedMealQueue, DeliveryDesk, PendingOrderQueue, ResourcePool};

/// One complete simulation: the shared context plus every spawned task.
///
/// Construction starts everything; [`RestaurantSystem::run`] waits for the
/// natural end of the run (the last customer leaving) and then tears the
/// staff down. There is no other way to stop a run — actors are never
/// cancelled mid-step.
pub struct RestaurantSystem {
    ctx: Arc<SimContext>,
    events: Option<mpsc::UnboundedReceiver<Transition>>,
    clock_driver: JoinHandle<()>,
    staff: Vec<JoinHandle<()>>,
    customers: Vec<JoinHandle<()>>,
}

impl RestaurantSystem {
    /// Builds the shared context and spawns the clock driver, the staff, and
    /// every customer on the roster.
    ///
    /// The clock is pinned to the earliest roster arrival before any actor
    /// task exists, so no actor can ever read an uninitialized time.
    pub fn new(scenario: Scenario, settings: SimSettings) -> Self {
        let start = scenario.earliest_arrival();
        let (clock, driver) = SimClock::new(start, settings.tick_period);
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let ctx = Arc::new(SimContext {
            clock,
            tables: ResourcePool::with_units((1..=scenario.tables).collect()),
            orders: PendingOrderQueue::new(),
            meals: CookedMealQueue::new(),
            deliveries: DeliveryDesk::new(),
            stats: Coordinator::new(scenario.roster.len(), start),
            eating_ticks: settings.eating_ticks,
            events: events_tx,
        });

        let clock_driver = tokio::spawn(driver.run());

        info!(
            chefs = scenario.chefs,
            waiters = scenario.waiters,
            tables = scenario.tables,
            customers = scenario.roster.len(),
            "simulation starting"
        );

        let mut staff = Vec::new();
        for id in 1..=scenario.chefs {
            staff.push(spawn_actor(Chef::new(id), Arc::clone(&ctx)));
        }
        for id in 1..=scenario.waiters {
            staff.push(spawn_actor(Waiter::new(id), Arc::clone(&ctx)));
        }

        let mut customers = Vec::new();
        for spec in &scenario.roster {
            // Roster items are validated against the menu at parse time.
            let prep_ticks = scenario.menu[&spec.item];
            customers.push(spawn_actor(
                Customer::new(spec.id, spec.item.clone(), prep_ticks, spec.arrival),
                Arc::clone(&ctx),
            ));
        }

        Self { ctx, events: Some(events_rx), clock_driver, staff, customers }
    }

    /// The stream of state transitions, for rendering or assertions.
    /// Yields `Some` only on the first call.
    pub fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<Transition>> {
        self.events.take()
    }

    /// Read access to the shared context, mainly for inspection in tests.
    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    /// Runs to the natural end: waits for the last customer, closes the
    /// kitchen so the staff loops exit, joins every task, and returns the
    /// summary.
    #[instrument(skip(self))]
    pub async fn run(self) -> Summary {
        let summary = self.ctx.stats.wait_done().await;

        // Every customer is done, so nothing will ever be queued again.
        // Closing the queues turns the staff's blocking takes into exits.
        self.ctx.orders.close();
        self.ctx.meals.close();

        for customer in self.customers {
            let _ = customer.await;
        }
        for staff in self.staff {
            let _ = staff.await;
        }
        self.clock_driver.abort();
        let _ = self.clock_driver.await;

        info!(served = summary.served, "simulation complete");
        summary
    }
}
