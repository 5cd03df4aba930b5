//! Global completion accounting and the end-of-run summary.

use std::fmt;
use std::sync::Mutex;

use serde::Serialize;
use tokio::sync::watch;
use tracing::info;

use crate::clock::Tick;

/// Aggregate counters, all behind the coordinator's single lock so no update
/// can be lost between concurrent customers and chefs.
#[derive(Debug, Default)]
struct Totals {
    active: usize,
    served: usize,
    total_wait_ticks: u64,
    total_prep_ticks: u64,
}

/// End-of-run statistics, published exactly once when the last customer
/// leaves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub served: usize,
    pub avg_wait_ticks: f64,
    pub avg_prep_ticks: f64,
    pub elapsed_ticks: Tick,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "Total Customers Served: {}", self.served)?;
        writeln!(f, "Average Wait Time for Table: {} Minutes", self.avg_wait_ticks)?;
        writeln!(f, "Average Order Preparation Time: {} Minutes", self.avg_prep_ticks)?;
        write!(f, "Total Simulation Time: {} Minutes", self.elapsed_ticks)
    }
}

/// Tracks how many customers are still in play and aggregates the timing
/// totals they and the chefs report.
///
/// Detecting the active count's zero crossing is the simulation's only
/// termination trigger; there is no cancellation channel into the actors.
pub struct Coordinator {
    totals: Mutex<Totals>,
    start_tick: Tick,
    done: watch::Sender<Option<Summary>>,
}

impl Coordinator {
    /// `customers` is the number of [`Coordinator::customer_finished`] calls
    /// that will complete the run. With zero customers the summary publishes
    /// immediately instead of never.
    pub fn new(customers: usize, start_tick: Tick) -> Self {
        let initial = (customers == 0).then(|| Summary {
            served: 0,
            avg_wait_ticks: 0.0,
            avg_prep_ticks: 0.0,
            elapsed_ticks: 0,
        });
        let (done, _) = watch::channel(initial);
        Self {
            totals: Mutex::new(Totals { active: customers, ..Totals::default() }),
            start_tick,
            done,
        }
    }

    /// Adds one customer's table-wait duration to the running total.
    pub fn record_wait(&self, ticks: Tick) {
        let mut totals = self.totals.lock().expect("coordinator lock poisoned");
        totals.total_wait_ticks += u64::from(ticks);
    }

    /// Adds one order's observed preparation duration to the running total.
    pub fn record_prep(&self, ticks: Tick) {
        let mut totals = self.totals.lock().expect("coordinator lock poisoned");
        totals.total_prep_ticks += u64::from(ticks);
    }

    /// Called by each customer exactly once, at the end of its lifecycle.
    /// The call that brings the active count to zero computes and publishes
    /// the summary.
    pub fn customer_finished(&self, now: Tick) {
        let mut totals = self.totals.lock().expect("coordinator lock poisoned");
        debug_assert!(totals.active > 0, "more completions than customers");
        totals.active -= 1;
        totals.served += 1;
        if totals.active == 0 {
            let served = totals.served as f64;
            let summary = Summary {
                served: totals.served,
                avg_wait_ticks: totals.total_wait_ticks as f64 / served,
                avg_prep_ticks: totals.total_prep_ticks as f64 / served,
                elapsed_ticks: now.saturating_sub(self.start_tick),
            };
            info!(served = summary.served, elapsed = summary.elapsed_ticks, "last customer left");
            self.done.send_replace(Some(summary));
        }
    }

    /// How many customers have not finished yet.
    pub fn active(&self) -> usize {
        self.totals.lock().expect("coordinator lock poisoned").active
    }

    /// Whether the summary has been published.
    pub fn is_done(&self) -> bool {
        self.done.borrow().is_some()
    }

    /// Resolves once the last customer has finished.
    pub async fn wait_done(&self) -> Summary {
        let mut done = self.done.subscribe();
        let published = done
            .wait_for(|published| published.is_some())
            .await
            .expect("summary sender lives as long as the coordinator");
        published.as_ref().expect("checked Some above").clone()
    }
}
