//! Terminal input listener and control messages.
//!
//! An empty line on stdin is the only recognised command. It is forwarded
//! to the engine as [`Control::Toggle`]; every other line is ignored.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

/// Capacity of the control channel. One slot keeps senders in lockstep with
/// the engine: a second signal waits until the first has been taken.
pub const CONTROL_CAPACITY: usize = 1;

/// Control messages accepted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Pause when counting, resume when paused
    Toggle,
    /// Pause; ignored while already paused
    Pause,
    /// Resume; ignored while counting
    Resume,
}

impl Control {
    /// Returns true if this message suspends a running countdown.
    pub fn pauses(&self) -> bool {
        matches!(self, Control::Toggle | Control::Pause)
    }

    /// Returns true if this message ends a pause.
    pub fn resumes(&self) -> bool {
        matches!(self, Control::Toggle | Control::Resume)
    }
}

/// Creates the engine's control channel.
pub fn control_channel() -> (mpsc::Sender<Control>, mpsc::Receiver<Control>) {
    mpsc::channel(CONTROL_CAPACITY)
}

/// Reads `reader` line by line, sending [`Control::Toggle`] for empty lines.
///
/// Lines are compared as raw bytes, so input that is not valid UTF-8 is
/// ignored like any other non-empty line. Returns `Ok(())` on end of input
/// or once the engine has gone away.
pub async fn listen<R>(mut reader: R, control_tx: mpsc::Sender<Control>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .await
            .context("Failed to read terminal input")?;
        if read == 0 {
            break;
        }

        if !strip_line_ending(&line).is_empty() {
            continue;
        }
        tracing::debug!("pause toggle requested");
        if control_tx.send(Control::Toggle).await.is_err() {
            tracing::debug!("engine stopped; input listener exiting");
            return Ok(());
        }
    }

    tracing::warn!("end of input reached; pausing from the keyboard is no longer possible");
    Ok(())
}

/// Drops a trailing `\n` and then a trailing `\r`.
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Runs [`listen`] on the process's standard input.
pub async fn listen_stdin(control_tx: mpsc::Sender<Control>) -> Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    listen(stdin, control_tx).await
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn collect(input: &'static str) -> Vec<Control> {
        collect_bytes(input.as_bytes()).await
    }

    async fn collect_bytes(input: &'static [u8]) -> Vec<Control> {
        let (tx, mut rx) = mpsc::channel(16);
        listen(input, tx).await.unwrap();

        let mut received = Vec::new();
        while let Ok(control) = rx.try_recv() {
            received.push(control);
        }
        received
    }

    #[test]
    fn test_control_guards() {
        assert!(Control::Toggle.pauses());
        assert!(Control::Toggle.resumes());
        assert!(Control::Pause.pauses());
        assert!(!Control::Pause.resumes());
        assert!(Control::Resume.resumes());
        assert!(!Control::Resume.pauses());
    }

    #[tokio::test]
    async fn test_empty_line_sends_toggle() {
        assert_eq!(collect("\n").await, vec![Control::Toggle]);
    }

    #[tokio::test]
    async fn test_crlf_empty_line_sends_toggle() {
        assert_eq!(collect("\r\n").await, vec![Control::Toggle]);
    }

    #[tokio::test]
    async fn test_non_empty_lines_are_ignored() {
        assert!(collect("hello\n \nq\n").await.is_empty());
    }

    #[tokio::test]
    async fn test_one_toggle_per_empty_line() {
        assert_eq!(
            collect("\nskip\n\n").await,
            vec![Control::Toggle, Control::Toggle]
        );
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_ignored() {
        assert_eq!(collect_bytes(b"caf\xe9\n\n").await, vec![Control::Toggle]);
    }

    #[tokio::test]
    async fn test_listener_survives_binary_noise() {
        assert_eq!(
            collect_bytes(b"\xff\xfe\r\n\r\n\x80\n\n").await,
            vec![Control::Toggle, Control::Toggle]
        );
    }

    #[tokio::test]
    async fn test_unterminated_last_line_is_ignored() {
        assert_eq!(collect("\nabc").await, vec![Control::Toggle]);
    }

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending(b"\r\n"), b"");
        assert_eq!(strip_line_ending(b"\n"), b"");
        assert_eq!(strip_line_ending(b"x\r\n"), b"x");
        assert_eq!(strip_line_ending(b"\r"), b"");
        assert_eq!(strip_line_ending(b"\n\n"), b"\n");
    }

    #[tokio::test]
    async fn test_eof_ends_listener() {
        assert!(collect("").await.is_empty());
    }

    #[tokio::test]
    async fn test_engine_gone_ends_listener() {
        let (tx, rx) = control_channel();
        drop(rx);

        let result = listen("\n\n".as_bytes(), tx).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_send_waits_for_receiver() {
        let (tx, mut rx) = control_channel();
        let handle = tokio::spawn(listen("\n\n\n".as_bytes(), tx));

        // Only one slot: the listener cannot finish until all three are taken
        for _ in 0..3 {
            assert_eq!(rx.recv().await, Some(Control::Toggle));
        }
        handle.await.unwrap().unwrap();
        assert_eq!(rx.recv().await, None);
    }
}
