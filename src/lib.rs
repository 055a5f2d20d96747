#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/focus-timer/")]

//! # focus-timer
//!
//! A circular Pomodoro focus timer for the terminal, built with
//! [bubbletea-rs](https://github.com/whit3rabbit/bubbletea-rs).
//!
//! ## Overview
//!
//! The crate is a small set of Elm-architecture components around one core:
//! the timer controller, a four-phase state machine (idle, running, paused,
//! completed) that counts a configurable duration down once per second,
//! renders the remaining time as an `MM:SS` clock and a draining progress
//! ring, and plays a short descending chime when it reaches zero. Each
//! component follows the usual `init()`, `update()`, `view()` pattern and
//! is driven entirely by messages, so everything is testable without a
//! terminal or a clock.
//!
//! The controller never touches a concrete surface. It renders through the
//! [`sink::DisplaySink`] and [`sink::ProgressSink`] capability traits and
//! sounds the alarm through [`alarm::AlarmEmitter`]; the bundled
//! [`FocusTimer`](app::FocusTimer) application model wires in the terminal
//! display, the ring, and the audio chime, while tests plug in recording
//! fakes.
//!
//! ## Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | `TimerController` | The countdown state machine and its tick chain |
//! | `Ring` | Circular progress indicator driven by stroke-dash geometry |
//! | `DurationInput` | Digits-only minute field with silent clamping |
//! | `Chime` / `Silent` | Completion tone, gated behind a user gesture |
//! | `FocusTimer` | The assembled application model |
//!
//! ## Quick Start
//!
//! ```rust
//! use focus_timer::prelude::*;
//! use bubbletea_rs::{KeyMsg, Model};
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! // The assembled app is a regular bubbletea model.
//! let (mut app, _cmd) = FocusTimer::init();
//!
//! // Press 's' to start the countdown.
//! let start = KeyMsg { key: KeyCode::Char('s'), modifiers: KeyModifiers::NONE };
//! let tick_cmd = app.update(Box::new(start));
//! assert!(tick_cmd.is_some());
//! ```
//!
//! ## Audio
//!
//! The completion chime needs a platform audio stack and sits behind the
//! default-on `audio` cargo feature. Builds without it (and platforms
//! where no output device exists at runtime) complete silently; a
//! missing chime is never an error.

pub mod alarm;
pub mod app;
pub mod controller;
pub mod duration_input;
pub mod key;
pub mod ring;
pub mod sink;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// Focused components receive keyboard input; blurred ones ignore it. The
/// duration input implements this so the application can steer typing
/// toward or away from the field as the timer's phase changes.
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// May return a command for initialization work (starting a blink
    /// timer, forcing a redraw); `None` when there is nothing to do.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use alarm::{AlarmEmitter, Silent};
#[cfg(feature = "audio")]
pub use alarm::Chime;
pub use app::{default_key_map, AppKeyMap, FocusTimer};
pub use controller::{
    new as controller_new, with_duration as controller_with_duration, Model as TimerController,
    Phase, TickMsg, DEFAULT_MINUTES,
};
pub use duration_input::{
    clamp_minutes, new as duration_input_new, DurationChangedMsg, Model as DurationInput,
    MAX_MINUTES, MIN_MINUTES,
};
pub use key::{
    matches_binding, new_binding, with_disabled, with_help, with_keys, with_keys_str, Binding,
    Help as KeyHelp, KeyPress,
};
pub use ring::{
    new as ring_new, with_fill_characters, with_radius, with_solid_fill, with_width,
    without_percentage, Model as Ring, RingOption,
};
pub use sink::{DisplaySink, ProgressSink, TerminalDisplay};

/// Prelude module for convenient imports.
///
/// ```rust
/// use focus_timer::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "audio")]
    pub use crate::alarm::Chime;
    pub use crate::alarm::{AlarmEmitter, Silent};
    pub use crate::app::{default_key_map, AppKeyMap, FocusTimer};
    pub use crate::controller::{
        new as controller_new, with_duration as controller_with_duration,
        Model as TimerController, Phase, TickMsg, DEFAULT_MINUTES,
    };
    pub use crate::duration_input::{
        clamp_minutes, new as duration_input_new, DurationChangedMsg, Model as DurationInput,
        MAX_MINUTES, MIN_MINUTES,
    };
    pub use crate::key::{
        matches_binding, new_binding, with_disabled, with_help, with_keys, with_keys_str, Binding,
        Help as KeyHelp, KeyPress,
    };
    pub use crate::ring::{
        new as ring_new, with_fill_characters, with_radius, with_solid_fill, with_width,
        without_percentage, Model as Ring, RingOption,
    };
    pub use crate::sink::{DisplaySink, ProgressSink, TerminalDisplay};
    pub use crate::Component;
}
