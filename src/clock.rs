//! The shared simulated clock.
//!
//! Simulated time is a single monotonically increasing minute counter. A
//! [`ClockDriver`] task is the sole writer, advancing one tick per wall-clock
//! period; every actor holds a cheap [`SimClock`] read handle. The handle also
//! carries the tick period so simulated durations (cooking, eating) can be
//! slept as wall time.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

/// Simulated time, in minutes since midnight.
pub type Tick = u32;

/// The clock's writer went away while someone was still waiting on it.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("simulation clock stopped")]
pub struct ClockStopped;

/// Read handle on the simulated clock. Cloned into every actor.
#[derive(Debug, Clone)]
pub struct SimClock {
    rx: watch::Receiver<Tick>,
    period: Duration,
}

impl SimClock {
    /// Creates a clock pinned at `initial` together with its driver.
    ///
    /// `initial` must be the earliest customer arrival, and the driver must
    /// not start ticking before actors can read the pinned value — both are
    /// guaranteed by constructing the channel with the value in place.
    pub fn new(initial: Tick, period: Duration) -> (Self, ClockDriver) {
        let (tx, rx) = watch::channel(initial);
        (Self { rx, period }, ClockDriver { tx, period })
    }

    /// The current simulated minute.
    pub fn now(&self) -> Tick {
        *self.rx.borrow()
    }

    /// Wall-clock length of one simulated minute.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Suspends until the clock reaches `tick`. Returns immediately if it
    /// already has. No polling: wakes only on actual clock updates.
    pub async fn wait_until(&self, tick: Tick) -> Result<(), ClockStopped> {
        let mut rx = self.rx.clone();
        rx.wait_for(|now| *now >= tick)
            .await
            .map(|_| ())
            .map_err(|_| ClockStopped)
    }

    /// Timed suspension of `ticks` simulated minutes. Used for cooking and
    /// eating; holds no shared resource logic of its own.
    pub async fn hold_for(&self, ticks: Tick) {
        time::sleep(self.period * ticks).await;
    }
}

/// The sole writer of simulated time.
///
/// Runs until aborted or until every [`SimClock`] handle is gone.
pub struct ClockDriver {
    tx: watch::Sender<Tick>,
    period: Duration,
}

impl ClockDriver {
    pub async fn run(self) {
        let mut interval = time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first interval tick fires immediately; consume it so the
        // pinned initial value stands for a full period.
        interval.tick().await;
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.tx.send_modify(|now| *now += 1);
                }
                _ = self.tx.closed() => break,
            }
        }
    }
}

/// Parses `"HH:MM"` into minutes since midnight.
pub fn time_to_minutes(text: &str) -> Result<Tick, TimeParseError> {
    let malformed = || TimeParseError::Malformed(text.to_string());
    let (hours, minutes) = text.split_once(':').ok_or_else(malformed)?;
    let hours: Tick = hours.parse().map_err(|_| malformed())?;
    let minutes: Tick = minutes.parse().map_err(|_| malformed())?;
    if hours > 23 || minutes > 59 {
        return Err(TimeParseError::OutOfRange(text.to_string()));
    }
    Ok(hours * 60 + minutes)
}

/// Formats minutes since midnight as zero-padded `"HH:MM"`.
pub fn minutes_to_time(minutes: Tick) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("expected HH:MM, got {0:?}")]
    Malformed(String),
    #[error("time {0:?} is outside 00:00..=23:59")]
    OutOfRange(String),
}
