//! CLI module for the interval timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Frame rendering for the terminal

pub mod commands;
pub mod display;

pub use commands::{parse_duration, Cli, Commands, TimerArgs};
pub use display::{Display, Palette};
