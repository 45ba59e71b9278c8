//! Engine module for the interval timer.
//!
//! This module contains the timer core:
//! - `clock`: Fixed-cadence ticker
//! - `countdown`: Countdown worker driven by the ticker
//! - `input`: Terminal input listener and control messages
//! - `timer`: Work/rest/pause state machine

pub mod clock;
pub mod countdown;
pub mod input;
pub mod timer;

pub use clock::{Ticker, TICK_INTERVAL};
pub use countdown::{CountdownOutcome, CountdownWorker};
pub use input::{control_channel, listen, listen_stdin, Control};
pub use timer::TimerEngine;
