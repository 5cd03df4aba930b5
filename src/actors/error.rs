//! Why an actor's task can end before its natural completion.

use thiserror::Error;

use crate::clock::ClockStopped;
use crate::domain::CustomerId;
use crate::sync::PoolClosed;

/// Terminal failure of one actor.
///
/// An error ends only the actor that hit it; the spawn wrapper logs it with
/// the actor's identity and the rest of the simulation carries on.
#[derive(Debug, Error)]
pub enum ActorError {
    #[error(transparent)]
    ClockStopped(#[from] ClockStopped),
    #[error("table pool closed while waiting to be seated")]
    SeatingClosed(#[from] PoolClosed),
    #[error("customer {0}'s meal was dropped before delivery")]
    MealLost(CustomerId),
}
