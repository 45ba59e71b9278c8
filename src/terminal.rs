//! Terminal session handling.
//!
//! Hides the cursor for the lifetime of the timer and waits for the OS
//! signals that end it.

use std::io::Write;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::style::Print;

/// Hides the cursor until [`CursorGuard::restore`] is called or the guard drops.
pub struct CursorGuard<W: Write> {
    out: W,
    restored: bool,
}

impl<W: Write> CursorGuard<W> {
    /// Hides the cursor on `out`.
    pub fn hide(mut out: W) -> Result<Self> {
        execute!(out, Hide).context("Failed to hide cursor")?;
        Ok(Self {
            out,
            restored: false,
        })
    }

    /// Shows the cursor again and ends the current line. Runs at most once.
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        execute!(self.out, Show, Print("\n")).context("Failed to restore cursor")
    }

    /// Returns the underlying writer (for testing).
    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Drop for CursorGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::warn!("{:#}", e);
        }
    }
}

/// Waits for SIGINT or, on unix, SIGTERM.
pub async fn shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate =
            signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result.context("Failed to listen for Ctrl-C")?,
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for Ctrl-C")?;
    }

    tracing::info!("shutdown signal received");
    Ok(())
}
