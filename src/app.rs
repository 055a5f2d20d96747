//! The assembled focus timer application.
//!
//! [`FocusTimer`] wires the timer controller to its concrete
//! collaborators (the terminal display, the progress ring, the audio
//! chime, the duration input, and the key bindings standing in for the
//! start/pause/reset buttons) and implements `bubbletea_rs::Model` so it
//! can be handed straight to the bubbletea runtime.
//!
//! Message routing is thin on purpose: key presses are dispatched against
//! the bindings first (disabled bindings never match), everything else
//! falls through to the duration input; committed durations and tick
//! messages go to the controller. After every command the enabled state of
//! the bindings and the input is re-synced from the controller, which is
//! the single source of truth for what the user may do next.

use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use lipgloss_extras::prelude::*;

use crate::alarm;
use crate::controller::{self, TickMsg};
use crate::duration_input::{self, DurationChangedMsg};
use crate::key::{matches_binding, new_binding, with_disabled, with_help, with_keys_str, Binding};
use crate::ring;
use crate::sink::TerminalDisplay;
use crate::Component;

// The test suite drives timers to completion; keep it silent.
#[cfg(all(feature = "audio", not(test)))]
type DefaultAlarm = alarm::Chime;
#[cfg(any(not(feature = "audio"), test))]
type DefaultAlarm = alarm::Silent;

const CLOCK_COLOR: &str = "#7571F9";
const HELP_KEY_COLOR: &str = "240";
const HELP_DESC_COLOR: &str = "244";

/// Key bindings for the timer controls.
///
/// Each binding is a button: it exposes an enabled flag the controller
/// drives and "clicks" when its key matches. `apply` is handled by the
/// duration input itself and lives here for the help line and its enabled
/// state.
pub struct AppKeyMap {
    /// Starts or resumes the countdown.
    pub start: Binding,
    /// Pauses the running countdown.
    pub pause: Binding,
    /// Resets to the full duration.
    pub reset: Binding,
    /// Commits the duration field.
    pub apply: Binding,
}

/// The default control keys: `s` start, `p` pause, `r` reset, enter apply.
pub fn default_key_map() -> AppKeyMap {
    AppKeyMap {
        start: new_binding(vec![with_keys_str(&["s"]), with_help("s", "start")]),
        // Nothing to pause on a fresh timer.
        pause: new_binding(vec![
            with_keys_str(&["p"]),
            with_help("p", "pause"),
            with_disabled(),
        ]),
        reset: new_binding(vec![with_keys_str(&["r"]), with_help("r", "reset")]),
        apply: new_binding(vec![with_keys_str(&["enter"]), with_help("enter", "set minutes")]),
    }
}

/// The composite application model.
pub struct FocusTimer {
    timer: controller::Model<TerminalDisplay, ring::Model, DefaultAlarm>,
    input: duration_input::Model,
    keys: AppKeyMap,
}

impl FocusTimer {
    /// Creates the application with the default 25-minute countdown.
    pub fn new() -> Self {
        let timer = controller::new(
            TerminalDisplay::new(),
            ring::new(&[]),
            DefaultAlarm::default(),
        );

        let mut input = duration_input::new();
        input.placeholder = controller::DEFAULT_MINUTES.to_string();
        input.focus();

        let mut app = Self {
            timer,
            input,
            keys: default_key_map(),
        };
        app.sync_controls();
        app
    }

    /// Read access to the controller, for embedding applications.
    pub fn timer(&self) -> &controller::Model<TerminalDisplay, ring::Model, DefaultAlarm> {
        &self.timer
    }

    // Mirrors the controller's derived enabled flags into the bindings and
    // the input. Called after every command so the controls can never get
    // out of step with the phase.
    fn sync_controls(&mut self) {
        self.keys.start.set_enabled(self.timer.start_enabled());
        self.keys.pause.set_enabled(self.timer.pause_enabled());
        self.keys.apply.set_enabled(self.timer.input_enabled());
        self.input.set_enabled(self.timer.input_enabled());
        if self.input.enabled() && !self.input.focused() {
            self.input.focus();
        }
    }

    fn help_view(&self) -> String {
        let key_style = Style::new().foreground(Color::from(HELP_KEY_COLOR));
        let desc_style = Style::new().foreground(Color::from(HELP_DESC_COLOR));

        let entries: Vec<String> = [
            &self.keys.start,
            &self.keys.pause,
            &self.keys.reset,
            &self.keys.apply,
        ]
        .iter()
        .filter(|b| b.enabled())
        .map(|b| {
            format!(
                "{} {}",
                key_style.render(&b.help().key),
                desc_style.render(&b.help().desc)
            )
        })
        .collect();

        entries.join(&desc_style.render(" • "))
    }
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl BubbleTeaModel for FocusTimer {
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if matches_binding(key_msg, &self.keys.start) {
                let cmd = self.timer.start();
                self.sync_controls();
                return cmd;
            }
            if matches_binding(key_msg, &self.keys.pause) {
                self.timer.pause();
                self.sync_controls();
                return None;
            }
            if matches_binding(key_msg, &self.keys.reset) {
                self.timer.reset();
                self.sync_controls();
                return None;
            }
            // Everything else belongs to the duration field, which drops
            // non-digit keys on its own.
            return self.input.update(msg);
        }

        if let Some(changed) = msg.downcast_ref::<DurationChangedMsg>() {
            self.timer.set_duration_minutes(changed.minutes);
            self.sync_controls();
            return None;
        }

        if msg.downcast_ref::<TickMsg>().is_some() {
            let cmd = self.timer.update(msg);
            // Completion flips the buttons and re-enables the input.
            self.sync_controls();
            return cmd;
        }

        None
    }

    fn view(&self) -> String {
        let clock_style = Style::new().bold(true).foreground(Color::from(CLOCK_COLOR));

        format!(
            "\n  {}\n\n  {}\n\n  {}\n\n  {}\n",
            self.timer.progress().view(),
            clock_style.render(self.timer.display().text()),
            self.input.view(),
            self.help_view()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Phase;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn tick(app: &mut FocusTimer) -> Option<Cmd> {
        let msg = TickMsg {
            id: app.timer.id(),
            tag: app.timer.tick_tag().expect("timer should be running"),
        };
        app.update(Box::new(msg))
    }

    #[test]
    fn test_fresh_app_state() {
        let app = FocusTimer::new();
        assert_eq!(app.timer.phase(), Phase::Idle);
        assert_eq!(app.timer.display().text(), "25:00");
        assert!(app.keys.start.enabled());
        assert!(!app.keys.pause.enabled());
        assert!(app.keys.reset.enabled());
        assert!(app.input.enabled());
        assert!(app.input.focused());
    }

    #[test]
    fn test_start_key_runs_timer() {
        let mut app = FocusTimer::new();
        let cmd = app.update(key(KeyCode::Char('s')));
        assert!(cmd.is_some());
        assert_eq!(app.timer.phase(), Phase::Running);
        assert!(!app.keys.start.enabled());
        assert!(app.keys.pause.enabled());
        assert!(!app.input.enabled());
    }

    #[test]
    fn test_pause_key_ignored_when_idle() {
        let mut app = FocusTimer::new();
        // The pause binding is disabled at idle, so 'p' falls through to
        // the input, which drops it as a non-digit.
        let cmd = app.update(key(KeyCode::Char('p')));
        assert!(cmd.is_none());
        assert_eq!(app.timer.phase(), Phase::Idle);
        assert_eq!(app.input.value(), "");
    }

    #[test]
    fn test_pause_key_pauses_running_timer() {
        let mut app = FocusTimer::new();
        app.update(key(KeyCode::Char('s')));
        app.update(key(KeyCode::Char('p')));
        assert_eq!(app.timer.phase(), Phase::Paused);
        assert!(app.keys.start.enabled());
        assert!(!app.keys.pause.enabled());
        assert!(app.input.enabled());
        assert!(app.input.focused());
    }

    #[test]
    fn test_digits_reach_input_when_idle() {
        let mut app = FocusTimer::new();
        app.update(key(KeyCode::Char('4')));
        app.update(key(KeyCode::Char('2')));
        assert_eq!(app.input.value(), "42");
    }

    #[test]
    fn test_digits_dropped_while_running() {
        let mut app = FocusTimer::new();
        app.update(key(KeyCode::Char('s')));
        app.update(key(KeyCode::Char('4')));
        assert_eq!(app.input.value(), "");
    }

    #[test]
    fn test_enter_commits_duration() {
        let mut app = FocusTimer::new();
        app.update(key(KeyCode::Char('7')));
        let cmd = app.update(key(KeyCode::Enter));
        // The commit command carries the DurationChangedMsg; routing it is
        // the runtime's job, so deliver it by hand here.
        assert!(cmd.is_some());
        app.update(Box::new(DurationChangedMsg { minutes: 7 }));
        assert_eq!(app.timer.total_seconds(), 420);
        assert_eq!(app.timer.display().text(), "07:00");
    }

    #[test]
    fn test_duration_change_mid_run_pauses() {
        let mut app = FocusTimer::new();
        app.update(key(KeyCode::Char('s')));
        assert_eq!(app.timer.phase(), Phase::Running);

        app.update(Box::new(DurationChangedMsg { minutes: 10 }));
        assert_eq!(app.timer.phase(), Phase::Paused);
        assert_eq!(app.timer.total_seconds(), 600);
        assert_eq!(app.timer.remaining_seconds(), 600);
        assert!(app.keys.start.enabled());
        assert!(!app.keys.pause.enabled());
        assert!(app.input.enabled());
    }

    #[test]
    fn test_tick_routing_and_completion_sync() {
        let mut app = FocusTimer::new();
        app.update(Box::new(DurationChangedMsg { minutes: 1 }));
        app.update(key(KeyCode::Char('s')));

        for _ in 0..59 {
            assert!(tick(&mut app).is_some());
        }
        assert_eq!(app.timer.remaining_seconds(), 1);

        // Final tick completes and re-enables the controls.
        assert!(tick(&mut app).is_none());
        assert_eq!(app.timer.phase(), Phase::Completed);
        assert_eq!(app.timer.display().text(), "Done!");
        assert!(!app.keys.pause.enabled());
        assert!(app.input.enabled());
    }

    #[test]
    fn test_reset_key() {
        let mut app = FocusTimer::new();
        app.update(key(KeyCode::Char('s')));
        tick(&mut app);
        app.update(key(KeyCode::Char('r')));
        assert_eq!(app.timer.phase(), Phase::Idle);
        assert_eq!(app.timer.remaining_seconds(), 1500);
        assert_eq!(app.timer.display().text(), "25:00");
    }

    #[test]
    fn test_view_contains_clock_and_help() {
        let app = FocusTimer::new();
        let view = app.view();
        assert!(view.contains("25:00"));
        assert!(view.contains("start"));
        assert!(!view.contains("pause")); // disabled at idle
    }

    #[test]
    fn test_view_while_running() {
        let mut app = FocusTimer::new();
        app.update(key(KeyCode::Char('s')));
        let view = app.view();
        assert!(view.contains("pause"));
        assert!(!view.contains("set minutes")); // input disabled
    }
}
