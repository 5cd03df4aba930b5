use serde::{Deserialize, Serialize};

use crate::clock::Tick;

/// Identity of a customer, as given by the scenario roster.
pub type CustomerId = u32;

/// Identity of a table. Drawn from a fixed pool; at any instant a table is
/// either free or held by exactly one customer.
pub type TableId = u32;

/// A submitted order: who wants what, and how many ticks it takes to cook.
///
/// Orders are immutable. One is created when a seated customer orders and it
/// is consumed exactly once, by exactly one chef.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub customer_id: CustomerId,
    pub item: String,
    pub prep_ticks: Tick,
}

/// An order once preparation has finished.
///
/// Ownership moves chef → cooked-meal queue → waiter → the customer named in
/// the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookedMeal {
    pub order: Order,
}
