//! Render-target contracts for the timer controller.
//!
//! The controller pushes every visual update through these two traits
//! rather than touching a concrete surface, which keeps the state machine
//! headless: tests plug in recording sinks, the bundled app plugs in
//! [`TerminalDisplay`] and [`crate::ring::Model`].

use std::io;

use crossterm::{execute, terminal::SetTitle};

/// Receives the formatted clock text and the window title.
pub trait DisplaySink {
    /// Replaces the displayed time text.
    fn set_text(&mut self, text: &str);
    /// Replaces the window/tab title.
    fn set_title(&mut self, title: &str);
}

/// Receives progress updates expressed as stroke-dash geometry.
///
/// The controller computes the ring circumference once at construction
/// (`2 * PI * radius`), announces it through `set_stroke_dasharray`, and
/// afterwards only moves the dash offset: an offset of `0` is a full ring,
/// an offset equal to the circumference is an empty one.
pub trait ProgressSink {
    /// The ring radius the circumference is derived from.
    fn radius(&self) -> f64;
    /// Fixes the dash pattern length. Called once, before any offset.
    fn set_stroke_dasharray(&mut self, circumference: f64);
    /// Moves the dash offset to reveal the current completion fraction.
    fn set_stroke_dashoffset(&mut self, offset: f64);
}

/// A [`DisplaySink`] backed by the terminal emulator.
///
/// The time text is stored for the application's `view` to pick up; the
/// title is forwarded to the terminal via the OSC title escape. Terminals
/// without title support simply ignore the escape, and write failures are
/// swallowed; the title is cosmetic.
#[derive(Debug, Clone, Default)]
pub struct TerminalDisplay {
    text: String,
}

impl TerminalDisplay {
    /// Creates an empty terminal display.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently set time text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl DisplaySink for TerminalDisplay {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_title(&mut self, title: &str) {
        let _ = execute!(io::stdout(), SetTitle(title));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_display_stores_text() {
        let mut d = TerminalDisplay::new();
        assert_eq!(d.text(), "");
        d.set_text("25:00");
        assert_eq!(d.text(), "25:00");
        d.set_text("24:59");
        assert_eq!(d.text(), "24:59");
    }
}
