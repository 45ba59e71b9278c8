//! Display utilities for the interval timer.
//!
//! This module renders one frame per tick:
//! - Title line
//! - Tally of completed work intervals
//! - Remaining time, colored by phase with a low-time alert

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use tokio::sync::mpsc;
use tokio::time::Duration;

use crate::types::{Frame, Phase, TimerEvent};

/// Title printed at the top of every frame.
pub const TITLE: &str = " - - - azathoth - - - \n";

/// Below this much remaining work time the time line is highlighted.
pub const ALERT_THRESHOLD: Duration = Duration::from_secs(5);

/// Marker printed once per completed work interval.
const TALLY_MARKER: &str = "• ";

// ============================================================================
// Palette
// ============================================================================

/// Foreground and background colors of the time line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Text color
    pub foreground: Color,
    /// Background color
    pub background: Color,
}

impl Palette {
    /// Picks the colors for `frame`.
    pub fn for_frame(frame: &Frame) -> Self {
        if is_alert(frame) {
            return Self {
                foreground: Color::Reset,
                background: Color::DarkRed,
            };
        }

        let foreground = match frame.phase {
            Phase::Work => Color::DarkGreen,
            Phase::Rest => Color::DarkRed,
            Phase::Pausing => Color::Reset,
        };
        Self {
            foreground,
            background: Color::Reset,
        }
    }
}

/// Returns true when a work countdown is about to end.
fn is_alert(frame: &Frame) -> bool {
    frame.phase == Phase::Work && frame.remaining < ALERT_THRESHOLD
}

// ============================================================================
// Display
// ============================================================================

/// Renders timer frames to a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Display {
    show_sub_second: bool,
}

impl Display {
    /// Creates a display; `show_sub_second` adds a hundredths field.
    pub fn new(show_sub_second: bool) -> Self {
        Self { show_sub_second }
    }

    /// Renders tick frames to stdout until the engine drops its sender.
    pub async fn run(self, mut event_rx: mpsc::UnboundedReceiver<TimerEvent>) {
        let mut stdout = io::stdout();

        while let Some(event) = event_rx.recv().await {
            if let TimerEvent::Tick(frame) = event {
                if let Err(e) = self.render(&mut stdout, &frame) {
                    tracing::warn!("Failed to render frame: {}", e);
                }
            }
        }
    }

    /// Clears the screen and writes one complete frame to `out`.
    pub fn render<W: Write>(&self, out: &mut W, frame: &Frame) -> io::Result<()> {
        let palette = Palette::for_frame(frame);

        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        queue!(
            out,
            SetForegroundColor(Color::DarkGreen),
            Print(TITLE),
            ResetColor
        )?;
        queue!(
            out,
            SetForegroundColor(Color::DarkRed),
            Print(Self::format_tally(frame.interval_count)),
            ResetColor
        )?;
        queue!(
            out,
            SetForegroundColor(palette.foreground),
            SetBackgroundColor(palette.background),
            Print(self.format_time(frame.remaining)),
            ResetColor
        )?;
        out.flush()
    }

    /// Formats remaining time as `~ M:SS ~`, or `~ M:SS:CC ~` with hundredths.
    pub fn format_time(&self, remaining: Duration) -> String {
        let total_seconds = remaining.as_secs();
        let (minutes, seconds) = (total_seconds / 60, total_seconds % 60);

        if self.show_sub_second {
            let hundredths = remaining.subsec_millis() / 10;
            format!("~ {}:{:02}:{:02} ~", minutes, seconds, hundredths)
        } else {
            format!("~ {}:{:02} ~", minutes, seconds)
        }
    }

    /// Formats the completed-interval tally, e.g. `: • • :`.
    pub fn format_tally(interval_count: u32) -> String {
        let markers = TALLY_MARKER.repeat(interval_count as usize);
        format!(": {} :\n", markers)
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(display: Display, frame: Frame) -> String {
        let mut out = Vec::new();
        display.render(&mut out, &frame).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn ansi<C: crossterm::Command>(command: C) -> String {
        let mut out = Vec::new();
        queue!(out, command).unwrap();
        String::from_utf8(out).unwrap()
    }

    // ------------------------------------------------------------------------
    // Format Tests
    // ------------------------------------------------------------------------

    mod format_tests {
        use super::*;

        #[test]
        fn test_format_time_zero() {
            assert_eq!(Display::new(false).format_time(Duration::ZERO), "~ 0:00 ~");
            assert_eq!(
                Display::new(true).format_time(Duration::ZERO),
                "~ 0:00:00 ~"
            );
        }

        #[test]
        fn test_format_time_minutes_and_seconds() {
            let display = Display::new(false);
            assert_eq!(display.format_time(Duration::from_secs(90)), "~ 1:30 ~");
            assert_eq!(
                display.format_time(Duration::from_secs(25 * 60)),
                "~ 25:00 ~"
            );
        }

        #[test]
        fn test_format_time_hundredths() {
            let display = Display::new(true);
            assert_eq!(
                display.format_time(Duration::from_millis(4_900)),
                "~ 0:04:90 ~"
            );
            assert_eq!(
                display.format_time(Duration::from_millis(61_050)),
                "~ 1:01:05 ~"
            );
        }

        #[test]
        fn test_format_time_does_not_wrap_hours() {
            let display = Display::new(false);
            assert_eq!(
                display.format_time(Duration::from_secs(2 * 3600 + 5)),
                "~ 120:05 ~"
            );
        }

        #[test]
        fn test_format_tally() {
            assert_eq!(Display::format_tally(0), ":  :\n");
            assert_eq!(Display::format_tally(3), ": • • •  :\n");
        }
    }

    // ------------------------------------------------------------------------
    // Palette Tests
    // ------------------------------------------------------------------------

    mod palette_tests {
        use super::*;

        #[test]
        fn test_work_is_green() {
            let frame = Frame::new(Phase::Work, Duration::from_secs(600), 0);
            let palette = Palette::for_frame(&frame);
            assert_eq!(palette.foreground, Color::DarkGreen);
            assert_eq!(palette.background, Color::Reset);
        }

        #[test]
        fn test_rest_is_red() {
            let frame = Frame::new(Phase::Rest, Duration::from_secs(600), 1);
            let palette = Palette::for_frame(&frame);
            assert_eq!(palette.foreground, Color::DarkRed);
            assert_eq!(palette.background, Color::Reset);
        }

        #[test]
        fn test_alert_below_threshold_in_work() {
            let frame = Frame::new(Phase::Work, Duration::from_secs(4), 0);
            assert_eq!(Palette::for_frame(&frame).background, Color::DarkRed);

            let frame = Frame::new(Phase::Work, Duration::from_secs(6), 0);
            assert_eq!(Palette::for_frame(&frame).background, Color::Reset);
        }

        #[test]
        fn test_alert_threshold_is_exclusive() {
            let frame = Frame::new(Phase::Work, ALERT_THRESHOLD, 0);
            assert!(!is_alert(&frame));
        }

        #[test]
        fn test_no_alert_during_rest() {
            let frame = Frame::new(Phase::Rest, Duration::from_secs(4), 0);
            assert_eq!(Palette::for_frame(&frame).background, Color::Reset);
        }
    }

    // ------------------------------------------------------------------------
    // Render Tests
    // ------------------------------------------------------------------------

    mod render_tests {
        use super::*;

        #[test]
        fn test_render_frame_layout() {
            let frame = Frame::new(Phase::Work, Duration::from_secs(600), 2);
            let output = render_to_string(Display::new(false), frame);

            assert!(output.starts_with(&ansi(Clear(ClearType::All))));
            let title = output.find(TITLE).unwrap();
            let tally = output.find(": • •  :").unwrap();
            let time = output.find("~ 10:00 ~").unwrap();
            assert!(title < tally && tally < time);
        }

        #[test]
        fn test_render_alert_background() {
            let frame = Frame::new(Phase::Work, Duration::from_secs(4), 0);
            let output = render_to_string(Display::new(true), frame);

            assert!(output.contains(&ansi(SetBackgroundColor(Color::DarkRed))));
            assert!(output.contains("~ 0:04:00 ~"));
        }

        #[test]
        fn test_render_without_alert() {
            let frame = Frame::new(Phase::Work, Duration::from_secs(6), 0);
            let output = render_to_string(Display::new(true), frame);

            assert!(!output.contains(&ansi(SetBackgroundColor(Color::DarkRed))));
            assert!(output.contains(&ansi(SetForegroundColor(Color::DarkGreen))));
        }

        #[test]
        fn test_render_zero_remaining() {
            let frame = Frame::new(Phase::Rest, Duration::ZERO, 0);
            let output = render_to_string(Display::new(true), frame);
            assert!(output.contains("~ 0:00:00 ~"));
        }

        #[test]
        fn test_show_error() {
            Display::show_error("Test error message");
        }
    }
}
