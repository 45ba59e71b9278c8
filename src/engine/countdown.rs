//! Countdown worker.
//!
//! A worker owns the clock and the control receiver. The engine moves it
//! into a spawned task for each countdown and gets it back, together with
//! the outcome, when the task ends. Only one countdown can therefore run
//! at a time, and the worker never touches engine state: everything it
//! needs arrives in the starting [`Frame`].

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::time::Duration;

use super::clock::Ticker;
use super::input::Control;
use crate::types::{Frame, TimerEvent};

/// How a countdown ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    /// Remaining time reached zero
    Finished,
    /// A pause request arrived first
    Interrupted {
        /// Time left when the request arrived
        remaining: Duration,
    },
}

/// Counts down one interval at a time.
#[derive(Debug)]
pub struct CountdownWorker {
    ticker: Ticker,
    control_rx: mpsc::Receiver<Control>,
    input_closed: bool,
}

impl CountdownWorker {
    /// Creates a worker from a clock and the engine's control receiver.
    pub fn new(ticker: Ticker, control_rx: mpsc::Receiver<Control>) -> Self {
        Self {
            ticker,
            control_rx,
            input_closed: false,
        }
    }

    /// Returns true once every control sender has been dropped.
    pub fn input_closed(&self) -> bool {
        self.input_closed
    }

    /// Waits for the next control message outside a countdown.
    ///
    /// Returns `None` once the control channel is closed.
    pub async fn next_control(&mut self) -> Option<Control> {
        if self.input_closed {
            return None;
        }
        let control = self.control_rx.recv().await;
        if control.is_none() {
            self.input_closed = true;
        }
        control
    }

    /// Counts down from `frame.remaining`, publishing a tick frame after
    /// every decrement, and hands the worker back with the outcome.
    pub async fn run(
        mut self,
        frame: Frame,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> (Self, Result<CountdownOutcome>) {
        let outcome = self.count_down(frame, &event_tx).await;
        (self, outcome)
    }

    async fn count_down(
        &mut self,
        frame: Frame,
        event_tx: &mpsc::UnboundedSender<TimerEvent>,
    ) -> Result<CountdownOutcome> {
        self.ticker.reset();

        let mut remaining = frame.remaining;
        if remaining.is_zero() {
            return Ok(CountdownOutcome::Finished);
        }

        loop {
            tokio::select! {
                control = self.control_rx.recv(), if !self.input_closed => match control {
                    Some(control) if control.pauses() => {
                        return Ok(CountdownOutcome::Interrupted { remaining });
                    }
                    Some(control) => {
                        tracing::debug!(?control, "ignoring control message while counting");
                    }
                    None => {
                        tracing::debug!("control channel closed");
                        self.input_closed = true;
                    }
                },
                () = self.ticker.tick() => {
                    remaining = remaining.saturating_sub(self.ticker.period());
                    event_tx
                        .send(TimerEvent::Tick(frame.with_remaining(remaining)))
                        .context("Failed to send tick event")?;

                    if remaining.is_zero() {
                        return Ok(CountdownOutcome::Finished);
                    }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
