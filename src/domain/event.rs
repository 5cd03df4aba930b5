//! Typed state-transition events.
//!
//! Actors report every lifecycle step as a [`Transition`] on the system's
//! event channel. The core only produces these values; rendering them as
//! human-readable transcript lines is left to whoever holds the receiver
//! (the binary prints them, tests assert on them).

use std::fmt;

use serde::Serialize;

use crate::clock::{minutes_to_time, Tick};
use crate::domain::{CustomerId, TableId};

/// What kind of participant a [`Transition`] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Customer,
    Chef,
    Waiter,
    Table,
}

/// The step a participant just took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Action {
    Arrived,
    Seated { table: TableId },
    OrderPlaced { item: String },
    PrepStarted { item: String, customer: CustomerId },
    PrepFinished { item: String, customer: CustomerId },
    MealServed { item: String, customer: CustomerId, table: TableId },
    Left { table: TableId },
    TableFreed,
}

/// One state transition: who did what, and at which simulated minute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub tick: Tick,
    pub role: Role,
    pub id: u32,
    pub action: Action,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", minutes_to_time(self.tick))?;
        match &self.action {
            Action::Arrived => write!(f, "Customer {} arrives.", self.id),
            Action::Seated { table } => {
                write!(f, "Customer {} is seated at Table {}", self.id, table)
            }
            Action::OrderPlaced { item } => {
                write!(f, "Customer {} places an order: {}", self.id, item)
            }
            Action::PrepStarted { item, customer } => {
                write!(f, "Chef {} starts preparing {} for Customer {}", self.id, item, customer)
            }
            Action::PrepFinished { item, customer } => {
                write!(f, "Chef {} finishes preparing {} for Customer {}", self.id, item, customer)
            }
            Action::MealServed { item, customer, table } => {
                write!(f, "Waiter {} serves {} to Customer {} at Table {}", self.id, item, customer, table)
            }
            Action::Left { .. } => {
                write!(f, "Customer {} finishes eating and leaves the restaurant.", self.id)
            }
            Action::TableFreed => write!(f, "Table {} is now available.", self.id),
        }
    }
}
