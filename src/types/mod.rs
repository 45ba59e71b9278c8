//! Core data types for the interval timer.
//!
//! This module defines the data structures used for:
//! - The work/rest/pause phase cycle
//! - Timer configuration built from functional options
//! - Engine state owned by the engine's control loop
//! - Render frames handed to the display
//! - Events published by the timer engine

use std::fmt;
use std::time::Duration;

pub mod error;

pub use error::ConfigError;

// ============================================================================
// Phase
// ============================================================================

/// Represents the current phase of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Counting down a work interval
    #[default]
    Work,
    /// Counting down a rest interval
    Rest,
    /// Suspended; the engine remembers which phase to resume into
    Pausing,
}

impl Phase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Rest => "rest",
            Phase::Pausing => "pausing",
        }
    }

    /// Returns true if a countdown runs in this phase.
    pub fn is_counting(&self) -> bool {
        matches!(self, Phase::Work | Phase::Rest)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Config
// ============================================================================

/// Default work interval.
pub const DEFAULT_WORK: Duration = Duration::from_secs(25 * 60);

/// Default rest interval.
pub const DEFAULT_REST: Duration = Duration::from_secs(5 * 60);

/// Immutable timer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Whether the display shows hundredths of a second
    pub show_sub_second: bool,
    /// Length of a work interval
    pub work: Duration,
    /// Length of a rest interval
    pub rest: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self::new([ConfigOption::Defaults])
    }
}

impl Config {
    /// Builds a configuration by applying `options` in order to an empty one.
    ///
    /// An empty configuration has sub-second display off and zero-length
    /// intervals, so callers usually start with [`ConfigOption::Defaults`].
    pub fn new<I>(options: I) -> Self
    where
        I: IntoIterator<Item = ConfigOption>,
    {
        let mut config = Self {
            show_sub_second: false,
            work: Duration::ZERO,
            rest: Duration::ZERO,
        };
        for option in options {
            option.apply(&mut config);
        }
        config
    }

    /// Returns the configured length of `phase`.
    ///
    /// `Pausing` has no length of its own.
    pub fn interval_for(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Work => self.work,
            Phase::Rest => self.rest,
            Phase::Pausing => Duration::ZERO,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.work.is_zero() && self.rest.is_zero() {
            return Err(ConfigError::EmptyCycle);
        }
        Ok(())
    }
}

/// A single configuration override. Later options win over earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOption {
    /// 25 minutes of work, 5 minutes of rest, sub-second display on
    Defaults,
    /// Toggle the hundredths field in the display
    SubSecond(bool),
    /// Set both interval lengths at once
    WorkRest(Duration, Duration),
    /// Set the work interval length
    Work(Duration),
    /// Set the rest interval length
    Rest(Duration),
}

impl ConfigOption {
    /// Applies this option to `config`.
    pub fn apply(self, config: &mut Config) {
        match self {
            ConfigOption::Defaults => {
                config.show_sub_second = true;
                config.work = DEFAULT_WORK;
                config.rest = DEFAULT_REST;
            }
            ConfigOption::SubSecond(enabled) => config.show_sub_second = enabled,
            ConfigOption::WorkRest(work, rest) => {
                config.work = work;
                config.rest = rest;
            }
            ConfigOption::Work(work) => config.work = work,
            ConfigOption::Rest(rest) => config.rest = rest,
        }
    }
}

// ============================================================================
// Frame
// ============================================================================

/// Snapshot handed to the display after every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Phase being counted
    pub phase: Phase,
    /// Time left in the countdown
    pub remaining: Duration,
    /// Completed work intervals
    pub interval_count: u32,
}

impl Frame {
    /// Creates a new frame.
    pub fn new(phase: Phase, remaining: Duration, interval_count: u32) -> Self {
        Self {
            phase,
            remaining,
            interval_count,
        }
    }

    /// Returns a copy with a different remaining time.
    pub fn with_remaining(self, remaining: Duration) -> Self {
        Self { remaining, ..self }
    }
}

// ============================================================================
// TimerEvent
// ============================================================================

/// Events published by the timer engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// A countdown began
    CountdownStarted {
        /// Phase being counted
        phase: Phase,
        /// Starting value of the countdown
        remaining: Duration,
    },
    /// One tick elapsed
    Tick(Frame),
    /// A work interval ran to zero
    WorkCompleted {
        /// Total completed work intervals
        interval_count: u32,
    },
    /// A rest interval ran to zero
    RestCompleted,
    /// A countdown was suspended
    Paused {
        /// Phase that will continue on resume
        resume_phase: Phase,
        /// Time retained for the resumed countdown
        remaining: Duration,
    },
    /// A pause ended
    Resumed {
        /// Phase now active again
        phase: Phase,
        /// Time the next countdown starts from
        remaining: Duration,
    },
}

// ============================================================================
// EngineState
// ============================================================================

/// Engine state, mutated only by the engine's control loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineState {
    /// Current phase
    pub phase: Phase,
    /// Time left in the current (or suspended) countdown
    pub remaining: Duration,
    /// Number of completed work intervals
    pub interval_count: u32,
    /// Phase to return to when a pause ends
    prior_phase: Phase,
    /// Set by `resume`; the next countdown starts from `remaining`
    resume_pending: bool,
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineState {
    /// Creates the initial state: `Work`, nothing remaining, no intervals.
    pub fn new() -> Self {
        Self {
            phase: Phase::Work,
            remaining: Duration::ZERO,
            interval_count: 0,
            prior_phase: Phase::Work,
            resume_pending: false,
        }
    }

    /// Returns the starting value for the next countdown and records it.
    ///
    /// After a resume this is the retained remaining time, otherwise the
    /// configured length of the current phase.
    pub fn begin_countdown(&mut self, config: &Config) -> Duration {
        if self.resume_pending {
            self.resume_pending = false;
        } else {
            self.remaining = config.interval_for(self.phase);
        }
        self.remaining
    }

    /// Advances the cycle after a countdown ran to zero.
    ///
    /// Returns the phase that was completed, or `None` when not counting.
    pub fn complete_interval(&mut self) -> Option<Phase> {
        let completed = self.phase;
        match completed {
            Phase::Work => {
                self.interval_count += 1;
                self.phase = Phase::Rest;
            }
            Phase::Rest => self.phase = Phase::Work,
            Phase::Pausing => return None,
        }
        self.prior_phase = completed;
        self.remaining = Duration::ZERO;
        Some(completed)
    }

    /// Suspends the current countdown, retaining `remaining` verbatim.
    ///
    /// Returns false if the timer was already paused.
    pub fn pause(&mut self, remaining: Duration) -> bool {
        if !self.phase.is_counting() {
            return false;
        }
        self.prior_phase = self.phase;
        self.phase = Phase::Pausing;
        self.remaining = remaining;
        true
    }

    /// Ends a pause, returning the phase that is now active again.
    pub fn resume(&mut self) -> Option<Phase> {
        if self.phase != Phase::Pausing {
            return None;
        }
        self.phase = self.prior_phase;
        self.resume_pending = true;
        Some(self.phase)
    }

    /// Returns the phase a pause would resume into.
    pub fn prior_phase(&self) -> Phase {
        self.prior_phase
    }

    /// Returns true if the timer is paused.
    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Pausing
    }

    /// Returns the display frame for the current state.
    pub fn frame(&self) -> Frame {
        Frame::new(self.phase, self.remaining, self.interval_count)
    }
}

// ============================================================================
// Tests
// ============================================================================
