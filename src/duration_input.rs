//! Duration input component: a digits-only minute field.
//!
//! A trimmed-down single-line input specialized for entering a countdown
//! length in minutes. Non-digit keystrokes are dropped as they arrive
//! (continuous sanitization, not commit-time cleanup), the field is capped
//! at three characters, and committing with Enter clamps the value to
//! `[1, 180]` minutes, rewrites the field to the clamped number, and emits
//! a [`DurationChangedMsg`] for the application to route to the timer.
//!
//! The controller disables the field while the timer runs; a disabled
//! field ignores every key and renders dimmed.
//!
//! # Examples
//!
//! ```rust
//! use focus_timer::duration_input::{new, clamp_minutes};
//! use focus_timer::Component;
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let mut input = new();
//! input.focus();
//!
//! // Letters are stripped as they are typed; digits land.
//! for ch in ['4', 'x', '2'] {
//!     input.update(Box::new(KeyMsg {
//!         key: KeyCode::Char(ch),
//!         modifiers: KeyModifiers::NONE,
//!     }));
//! }
//! assert_eq!(input.value(), "42");
//!
//! // Out-of-range values clamp on commit.
//! assert_eq!(clamp_minutes(200), 180);
//! assert_eq!(clamp_minutes(0), 1);
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use std::time::Duration;

use crate::Component;

/// Smallest accepted duration in minutes.
pub const MIN_MINUTES: u64 = 1;
/// Largest accepted duration in minutes (three hours).
pub const MAX_MINUTES: u64 = 180;

// Three digits cover the whole accepted range.
const CHAR_LIMIT: usize = 3;

/// Clamps a requested duration to the accepted `[1, 180]` minute range.
pub fn clamp_minutes(minutes: i64) -> u64 {
    minutes.clamp(MIN_MINUTES as i64, MAX_MINUTES as i64) as u64
}

/// Message emitted when a new duration is committed.
///
/// The carried value is already clamped to `[MIN_MINUTES, MAX_MINUTES]`.
#[derive(Debug, Clone)]
pub struct DurationChangedMsg {
    /// The committed countdown length in minutes.
    pub minutes: u64,
}

/// The duration input model.
pub struct Model {
    /// Digits only, at most `CHAR_LIMIT` of them.
    value: Vec<char>,
    focus: bool,
    enabled: bool,

    /// Prompt rendered before the value.
    pub prompt: String,
    /// Placeholder shown while the field is empty.
    pub placeholder: String,
    /// Style for the prompt.
    pub prompt_style: Style,
    /// Style for the typed value.
    pub text_style: Style,
    /// Style for the placeholder text.
    pub placeholder_style: Style,
    /// Style applied to the whole field while disabled.
    pub disabled_style: Style,
}

/// Creates a new duration input with default settings.
///
/// The field starts enabled but unfocused; call `focus()` to accept keys.
pub fn new() -> Model {
    Model {
        value: Vec::new(),
        focus: false,
        enabled: true,
        prompt: "minutes> ".to_string(),
        placeholder: String::new(),
        prompt_style: Style::new(),
        text_style: Style::new(),
        placeholder_style: Style::new().foreground(Color::from("240")),
        disabled_style: Style::new().foreground(Color::from("240")),
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl Model {
    /// The current raw text of the field.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replaces the field text, stripping non-digits and truncating to the
    /// character limit, the same sanitization typing goes through.
    pub fn set_value(&mut self, value: &str) {
        self.value = value
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(CHAR_LIMIT)
            .collect();
    }

    /// The committed interpretation of the current text: parsed as an
    /// integer and clamped to `[MIN_MINUTES, MAX_MINUTES]`. Empty or
    /// unparseable text clamps to the minimum.
    pub fn minutes(&self) -> u64 {
        match self.value().parse::<i64>() {
            Ok(m) => clamp_minutes(m),
            Err(_) => MIN_MINUTES,
        }
    }

    /// Whether the field currently accepts input.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the field. Disabling also drops focus.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.focus = false;
        }
    }

    /// Commits the current text: clamps it, rewrites the field to the
    /// clamped number, and returns a command emitting
    /// [`DurationChangedMsg`].
    pub fn commit(&mut self) -> Cmd {
        let minutes = self.minutes();
        self.set_value(&minutes.to_string());
        duration_changed(minutes)
    }

    /// Processes key messages while focused and enabled.
    ///
    /// Digits are inserted (up to the character limit), backspace deletes,
    /// Enter commits. Everything else, including non-digit characters,
    /// is dropped.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if !self.enabled || !self.focus {
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if key_msg.modifiers.contains(KeyModifiers::CONTROL)
                || key_msg.modifiers.contains(KeyModifiers::ALT)
            {
                return None;
            }
            match key_msg.key {
                KeyCode::Char(ch) if ch.is_ascii_digit() => {
                    if self.value.len() < CHAR_LIMIT {
                        self.value.push(ch);
                    }
                }
                KeyCode::Backspace => {
                    self.value.pop();
                }
                KeyCode::Enter => {
                    return Some(self.commit());
                }
                _ => {}
            }
        }

        None
    }

    /// Renders the field: prompt plus value or placeholder.
    pub fn view(&self) -> String {
        if !self.enabled {
            return self
                .disabled_style
                .render(&format!("{}{}", self.prompt, self.value()));
        }

        let prompt = self.prompt_style.render(&self.prompt);
        let body = if self.value.is_empty() {
            self.placeholder_style.render(&self.placeholder)
        } else {
            self.text_style.render(&self.value())
        };
        format!("{}{}", prompt, body)
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        if self.enabled {
            self.focus = true;
        }
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

fn duration_changed(minutes: u64) -> Cmd {
    bubbletea_tick(Duration::from_nanos(1), move |_| {
        Box::new(DurationChangedMsg { minutes }) as Msg
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn focused_input() -> Model {
        let mut input = new();
        input.focus();
        input
    }

    fn type_str(input: &mut Model, s: &str) {
        for ch in s.chars() {
            input.update(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn test_digits_accepted() {
        let mut input = focused_input();
        type_str(&mut input, "25");
        assert_eq!(input.value(), "25");
        assert_eq!(input.minutes(), 25);
    }

    #[test]
    fn test_non_digits_stripped_as_typed() {
        let mut input = focused_input();
        type_str(&mut input, "a1b2c");
        assert_eq!(input.value(), "12");
    }

    #[test]
    fn test_char_limit() {
        let mut input = focused_input();
        type_str(&mut input, "12345");
        assert_eq!(input.value(), "123");
    }

    #[test]
    fn test_backspace() {
        let mut input = focused_input();
        type_str(&mut input, "90");
        input.update(key(KeyCode::Backspace));
        assert_eq!(input.value(), "9");
        input.update(key(KeyCode::Backspace));
        assert_eq!(input.value(), "");
        // Backspace on an empty field is harmless.
        input.update(key(KeyCode::Backspace));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_clamp_minutes_bounds() {
        // setDuration(m) must land on clamp(m, 1, 180).
        assert_eq!(clamp_minutes(7), 7);
        assert_eq!(clamp_minutes(1), 1);
        assert_eq!(clamp_minutes(180), 180);
        assert_eq!(clamp_minutes(181), 180);
        assert_eq!(clamp_minutes(200), 180);
        assert_eq!(clamp_minutes(0), 1);
        assert_eq!(clamp_minutes(-3), 1);
    }

    #[test]
    fn test_minutes_for_malformed_text() {
        let input = focused_input();
        // Empty field clamps to the minimum.
        assert_eq!(input.minutes(), MIN_MINUTES);
    }

    #[test]
    fn test_commit_normalizes_value() {
        let mut input = focused_input();
        type_str(&mut input, "200");
        let _cmd = input.commit();
        assert_eq!(input.value(), "180");
        assert_eq!(input.minutes(), 180);
    }

    #[test]
    fn test_commit_of_empty_field() {
        let mut input = focused_input();
        let _cmd = input.commit();
        assert_eq!(input.value(), "1");
        assert_eq!(input.minutes(), 1);
    }

    #[test]
    fn test_enter_returns_commit_command() {
        let mut input = focused_input();
        type_str(&mut input, "7");
        let cmd = input.update(key(KeyCode::Enter));
        assert!(cmd.is_some());
        assert_eq!(input.value(), "7");
    }

    #[test]
    fn test_disabled_field_ignores_keys() {
        let mut input = focused_input();
        input.set_enabled(false);
        type_str(&mut input, "42");
        assert_eq!(input.value(), "");
        assert!(!input.focused());
    }

    #[test]
    fn test_unfocused_field_ignores_keys() {
        let mut input = new();
        type_str(&mut input, "42");
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_refocus_after_enable() {
        let mut input = focused_input();
        input.set_enabled(false);
        input.set_enabled(true);
        // Enabling does not focus by itself.
        assert!(!input.focused());
        input.focus();
        assert!(input.focused());
    }

    #[test]
    fn test_set_value_sanitizes() {
        let mut input = new();
        input.set_value("1a2b3c4");
        assert_eq!(input.value(), "123");
    }
}
