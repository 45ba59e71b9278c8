//! Clock source driving countdowns.

use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};

/// Default tick cadence.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Periodic ticker with a fixed cadence.
///
/// The first tick arrives one period after creation or after [`Ticker::reset`].
#[derive(Debug)]
pub struct Ticker {
    interval: Interval,
    period: Duration,
}

impl Ticker {
    /// Creates a ticker. Must be called within a tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval, period }
    }

    /// Restarts the cadence so the next tick is a full period away.
    pub fn reset(&mut self) {
        self.interval.reset();
    }

    /// Waits for the next tick.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }

    /// Returns the tick period.
    pub fn period(&self) -> Duration {
        self.period
    }
}
