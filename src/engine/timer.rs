//! Timer engine for the interval timer.
//!
//! This module provides the work/rest/pause state machine:
//! - WORK → REST → WORK cycling on natural completion
//! - Pausing a running countdown and resuming from the exact remaining time
//! - Counting completed work intervals
//! - Publishing events for the display

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::time::Duration;

use super::clock::{Ticker, TICK_INTERVAL};
use super::countdown::{CountdownOutcome, CountdownWorker};
use super::input::Control;
use crate::types::{Config, EngineState, Phase, TimerEvent};

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that owns the cycle state and drives countdown workers.
pub struct TimerEngine {
    /// Interval lengths
    config: Config,
    /// Cycle state; written only by this engine
    state: EngineState,
    /// Worker, absent while a countdown task holds it
    worker: Option<CountdownWorker>,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates an engine ticking every [`TICK_INTERVAL`].
    ///
    /// Must be called within a tokio runtime.
    pub fn new(
        config: Config,
        control_rx: mpsc::Receiver<Control>,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        Self::with_tick(config, control_rx, event_tx, TICK_INTERVAL)
    }

    /// Creates an engine with a custom tick period.
    ///
    /// # Panics
    ///
    /// Panics if `tick` is zero.
    pub fn with_tick(
        config: Config,
        control_rx: mpsc::Receiver<Control>,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
        tick: Duration,
    ) -> Self {
        Self {
            config,
            state: EngineState::new(),
            worker: Some(CountdownWorker::new(Ticker::new(tick), control_rx)),
            event_tx,
        }
    }

    /// Runs the control loop.
    ///
    /// Never returns under normal operation; an error means the display
    /// went away or a countdown task panicked.
    pub async fn start(mut self) -> Result<()> {
        tracing::info!(
            work = ?self.config.work,
            rest = ?self.config.rest,
            "timer engine started"
        );

        loop {
            if self.state.is_paused() {
                self.wait_for_resume().await?;
            } else {
                self.count_down().await?;
            }
        }
    }

    /// Runs one countdown for the current phase and applies its outcome.
    async fn count_down(&mut self) -> Result<()> {
        let worker = self
            .worker
            .take()
            .context("Countdown worker is already running")?;

        let phase = self.state.phase;
        let remaining = self.state.begin_countdown(&self.config);
        self.emit(TimerEvent::CountdownStarted { phase, remaining })?;

        let handle = tokio::spawn(worker.run(self.state.frame(), self.event_tx.clone()));
        let (worker, outcome) = handle.await.context("Countdown worker panicked")?;
        self.worker = Some(worker);

        match outcome? {
            CountdownOutcome::Finished => self.handle_interval_complete(),
            CountdownOutcome::Interrupted { remaining } => self.handle_pause(remaining),
        }
    }

    /// Blocks until a resume request arrives, then leaves the pause.
    async fn wait_for_resume(&mut self) -> Result<()> {
        let worker = self
            .worker
            .as_mut()
            .context("Countdown worker is missing")?;

        loop {
            match worker.next_control().await {
                Some(control) if control.resumes() => break,
                Some(control) => {
                    tracing::debug!(?control, "already paused; ignoring control message");
                }
                None => {
                    tracing::warn!("control input closed while paused; resuming");
                    break;
                }
            }
        }

        if let Some(phase) = self.state.resume() {
            self.emit(TimerEvent::Resumed {
                phase,
                remaining: self.state.remaining,
            })?;
        }
        Ok(())
    }

    /// Handles a countdown that ran to zero (phase transitions).
    fn handle_interval_complete(&mut self) -> Result<()> {
        match self.state.complete_interval() {
            Some(Phase::Work) => self.emit(TimerEvent::WorkCompleted {
                interval_count: self.state.interval_count,
            }),
            Some(Phase::Rest) => self.emit(TimerEvent::RestCompleted),
            _ => Ok(()),
        }
    }

    /// Handles a countdown interrupted by a pause request.
    fn handle_pause(&mut self, remaining: Duration) -> Result<()> {
        if !self.state.pause(remaining) {
            return Ok(());
        }
        self.emit(TimerEvent::Paused {
            resume_phase: self.state.prior_phase(),
            remaining,
        })
    }

    fn emit(&self, event: TimerEvent) -> Result<()> {
        tracing::debug!(?event, "timer event");
        self.event_tx
            .send(event)
            .context("Failed to send timer event")
    }

    /// Returns a reference to the current engine state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a mutable reference to the engine state (for testing).
    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut EngineState {
        &mut self.state
    }
}

// ============================================================================
// Tests
// ============================================================================
