//! Configuration error types.

use thiserror::Error;

/// Errors raised while validating a [`Config`](super::Config).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Both intervals are zero, so the cycle would never wait on the clock.
    #[error("work and rest durations cannot both be zero")]
    EmptyCycle,

    /// A duration argument could not be parsed.
    #[error("invalid duration '{0}': expected e.g. 25m, 90s, 1h30m or a number of minutes")]
    InvalidDuration(String),
}

impl ConfigError {
    /// Returns a short hint for fixing the configuration.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::EmptyCycle => "pass a non-zero --work or --rest duration",
            Self::InvalidDuration(_) => "use a unit suffix such as s, m or h",
        }
    }
}
