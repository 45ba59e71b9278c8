//! Command definitions for the interval timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::types::{Config, ConfigError, ConfigOption};

// ============================================================================
// CLI Structure
// ============================================================================

/// Azathoth - a terminal work/rest interval timer
#[derive(Parser, Debug)]
#[command(
    name = "azathoth",
    version,
    about = "A terminal work/rest interval timer",
    long_about = "Counts down alternating work and rest intervals in the terminal.\n\
                  Press Enter on an empty line to pause, and again to resume.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute; runs the timer when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Timer options
    #[command(flatten)]
    pub timer: TimerArgs,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Timer Arguments
// ============================================================================

/// Arguments controlling the timer
#[derive(Args, Debug, Clone)]
pub struct TimerArgs {
    /// Work interval (e.g. 25m, 90s, 1h30m; a bare number means minutes)
    #[arg(short, long, default_value = "25m", value_parser = parse_duration)]
    pub work: Duration,

    /// Rest interval (e.g. 5m, 300s; a bare number means minutes)
    #[arg(short, long, default_value = "5m", value_parser = parse_duration)]
    pub rest: Duration,

    /// Hide the hundredths-of-a-second field
    #[arg(long)]
    pub no_sub_second: bool,
}

impl TimerArgs {
    /// Builds the timer configuration from these arguments.
    pub fn to_config(&self) -> Config {
        Config::new([
            ConfigOption::Defaults,
            ConfigOption::WorkRest(self.work, self.rest),
            ConfigOption::SubSecond(!self.no_sub_second),
        ])
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Parses a duration such as `25m`, `90s`, `1h30m` or `1m30s`.
///
/// A bare number is read as minutes.
pub fn parse_duration(input: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDuration(input.to_string());
    let text = input.trim();
    if text.is_empty() {
        return Err(invalid());
    }

    if let Ok(minutes) = text.parse::<u64>() {
        let seconds = minutes.checked_mul(60).ok_or_else(invalid)?;
        return Ok(Duration::from_secs(seconds));
    }

    let mut total: u64 = 0;
    let mut digits = String::new();
    for ch in text.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }

        let unit = match ch {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return Err(invalid()),
        };
        let value: u64 = digits.parse().map_err(|_| invalid())?;
        digits.clear();

        total = value
            .checked_mul(unit)
            .and_then(|seconds| total.checked_add(seconds))
            .ok_or_else(invalid)?;
    }

    // Trailing digits without a unit, e.g. "1m30"
    if !digits.is_empty() {
        return Err(invalid());
    }
    Ok(Duration::from_secs(total))
}

// ============================================================================
// Tests
// ============================================================================
