//! Azathoth Interval Timer Library
//!
//! This library provides the core functionality for the terminal timer.
//! It includes:
//! - Timer engine cycling through work, rest and pause
//! - Countdown worker driven by a fixed-cadence clock
//! - Terminal input listener for pause/resume
//! - CLI parsing and frame rendering
//! - Configuration built from functional options

pub mod cli;
pub mod engine;
pub mod terminal;
pub mod types;

// Re-export commonly used types for convenience
pub use engine::{Control, TimerEngine, TICK_INTERVAL};
pub use types::{Config, ConfigError, ConfigOption, EngineState, Frame, Phase, TimerEvent};
