//! The countdown state machine at the heart of the focus timer.
//!
//! The controller owns the countdown (total and remaining seconds, the
//! current [`Phase`]) and orchestrates three injected capabilities: a
//! [`DisplaySink`] for the formatted clock and window title, a
//! [`ProgressSink`] for the ring's stroke-dash geometry, and an
//! [`AlarmEmitter`] for the completion chime. Every user command mutates
//! state and immediately re-renders through the sinks.
//!
//! The per-second countdown is a command chain in the bubbletea style:
//! `start` returns a command that delivers a [`TickMsg`] after one second,
//! and `update` answers each accepted tick with the next one. Ticks carry
//! the controller's id and a tag; pausing or resetting bumps the tag, so a
//! tick already in flight arrives stale and is rejected: once cancelled,
//! no tick from the old run can ever land. Tests drive the machine by
//! constructing tick messages directly, no clock required.
//!
//! # Basic Usage
//!
//! ```rust
//! use focus_timer::controller;
//! use focus_timer::alarm::Silent;
//! use focus_timer::ring;
//! use focus_timer::sink::TerminalDisplay;
//!
//! let timer = controller::new(TerminalDisplay::new(), ring::new(&[]), Silent::new());
//! assert_eq!(timer.remaining_seconds(), 25 * 60);
//! assert_eq!(timer.display().text(), "25:00");
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::f64::consts::PI;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use crate::alarm::AlarmEmitter;
use crate::duration_input::clamp_minutes;
use crate::sink::{DisplaySink, ProgressSink};

// Internal ID management for controller instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Default countdown length in minutes.
pub const DEFAULT_MINUTES: u64 = 25;

const TICK_INTERVAL: Duration = Duration::from_secs(1);
const TITLE_SUFFIX: &str = " - Focus";
const DONE_TEXT: &str = "Done!";

/// The discrete states of the timer.
///
/// `Idle` and `Paused` behave identically (both accept `start`) and
/// differ only in framing: `Idle` means a fresh countdown, `Paused` an
/// interrupted one. `Completed` is terminal until `reset` or a duration
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fresh countdown, not yet started.
    Idle,
    /// Counting down; a tick is scheduled.
    Running,
    /// Interrupted mid-countdown.
    Paused,
    /// The countdown reached zero.
    Completed,
}

/// Message delivered once per second while the timer runs.
///
/// Carries the owning controller's id plus a tag identifying the current
/// run; messages from a cancelled run fail the tag check and are dropped.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The unique identifier of the controller this tick targets.
    pub id: i64,
    pub(crate) tag: i64,
}

/// The timer controller model.
///
/// Generic over its capability set so the state machine stays decoupled
/// from any concrete surface: the bundled app instantiates it with the
/// terminal display, the ring, and the audio chime; tests use recording
/// fakes.
#[derive(Debug)]
pub struct Model<D: DisplaySink, P: ProgressSink, A: AlarmEmitter> {
    total_seconds: u64,
    remaining_seconds: u64,
    phase: Phase,

    id: i64,
    /// Tag of the current tick chain; bumped to cancel in-flight ticks.
    tag: i64,

    /// Ring circumference, computed once from the sink's radius.
    circumference: f64,

    display: D,
    progress: P,
    alarm: A,
}

/// Creates a controller with the default 25-minute countdown.
pub fn new<D, P, A>(display: D, progress: P, alarm: A) -> Model<D, P, A>
where
    D: DisplaySink,
    P: ProgressSink,
    A: AlarmEmitter,
{
    with_duration(DEFAULT_MINUTES, display, progress, alarm)
}

/// Creates a controller with a specific countdown length in minutes.
///
/// The duration is clamped to the accepted `[1, 180]` minute range. The
/// fresh controller announces the dash pattern to the progress sink once
/// and renders the initial state: full ring, formatted clock, titled
/// window.
pub fn with_duration<D, P, A>(minutes: u64, display: D, mut progress: P, alarm: A) -> Model<D, P, A>
where
    D: DisplaySink,
    P: ProgressSink,
    A: AlarmEmitter,
{
    let total = clamp_minutes(minutes as i64) * 60;
    let circumference = 2.0 * PI * progress.radius();
    progress.set_stroke_dasharray(circumference);

    let mut m = Model {
        total_seconds: total,
        remaining_seconds: total,
        phase: Phase::Idle,
        id: next_id(),
        tag: 0,
        circumference,
        display,
        progress,
        alarm,
    };
    m.render();
    m
}

impl<D, P, A> Model<D, P, A>
where
    D: DisplaySink,
    P: ProgressSink,
    A: AlarmEmitter,
{
    /// Returns the unique identifier of this controller instance.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The current phase of the state machine.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seconds left on the countdown.
    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    /// The configured countdown length in seconds.
    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    /// The tag of the live tick chain, `Some` exactly while `Running`.
    pub fn tick_tag(&self) -> Option<i64> {
        if self.phase == Phase::Running {
            Some(self.tag)
        } else {
            None
        }
    }

    /// Read access to the display sink, for rendering and assertions.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Read access to the progress sink, for rendering and assertions.
    pub fn progress(&self) -> &P {
        &self.progress
    }

    /// Read access to the alarm emitter.
    pub fn alarm(&self) -> &A {
        &self.alarm
    }

    /// Whether the start control should be enabled.
    pub fn start_enabled(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Paused)
    }

    /// Whether the pause control should be enabled.
    pub fn pause_enabled(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Whether the duration input should accept edits.
    pub fn input_enabled(&self) -> bool {
        self.phase != Phase::Running
    }

    /// Starts (or resumes) the countdown.
    ///
    /// Accepted from `Idle` and `Paused`; a no-op returning `None` in any
    /// other phase, so a redundant start never arms a second tick chain.
    /// Starting activates the alarm emitter (the user gesture audio
    /// playback is gated on) and returns the command that delivers the
    /// first tick.
    pub fn start(&mut self) -> Option<Cmd> {
        match self.phase {
            Phase::Idle | Phase::Paused => {}
            Phase::Running | Phase::Completed => return None,
        }

        self.alarm.activate();
        self.tag += 1;
        self.phase = Phase::Running;
        Some(self.tick())
    }

    /// Pauses a running countdown, keeping the remaining time.
    ///
    /// A no-op unless `Running`; a redundant pause never double-cancels.
    pub fn pause(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.cancel_tick();
        self.phase = Phase::Paused;
    }

    /// Stops the countdown and restores the full duration.
    ///
    /// Valid from every phase; renders the clock and a full ring.
    pub fn reset(&mut self) {
        if self.phase == Phase::Running {
            self.cancel_tick();
        }
        self.phase = Phase::Idle;
        self.remaining_seconds = self.total_seconds;
        self.render();
    }

    /// Applies a new countdown length in minutes.
    ///
    /// The value is clamped to `[1, 180]`. A running timer is paused first
    /// (tick cancelled), leaving the machine `Paused` and ready to start
    /// from the new full duration; the old remaining time is discarded. A
    /// completed timer returns to `Idle`. Renders the clock and a full
    /// ring.
    pub fn set_duration_minutes(&mut self, minutes: u64) {
        match self.phase {
            Phase::Running => {
                self.cancel_tick();
                self.phase = Phase::Paused;
            }
            Phase::Completed => self.phase = Phase::Idle,
            Phase::Idle | Phase::Paused => {}
        }

        self.total_seconds = clamp_minutes(minutes as i64) * 60;
        self.remaining_seconds = self.total_seconds;
        self.render();
    }

    /// Processes tick messages.
    ///
    /// A tick is accepted only while `Running` and only when both its id
    /// and tag match the live chain; everything else is dropped. An
    /// accepted tick decrements the countdown by one second. While time
    /// remains it re-renders and returns the next tick command; the tick
    /// that lands on zero completes instead: it cancels the chain, drains
    /// the ring, replaces the text with the terminal string, leaves the
    /// title untouched, and plays the chime if it was ever activated.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if self.phase != Phase::Running {
                return None;
            }
            if tick_msg.id != self.id || tick_msg.tag != self.tag {
                return None;
            }

            self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
            if self.remaining_seconds == 0 {
                self.set_progress(0.0);
                self.complete();
                return None;
            }

            self.render();
            return Some(self.tick());
        }

        None
    }

    /// The live completion percentage, `100 * remaining / total`.
    pub fn percent(&self) -> f64 {
        100.0 * self.remaining_seconds as f64 / self.total_seconds as f64
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(TICK_INTERVAL, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    // Invalidates the live chain; any in-flight tick now fails the tag
    // check.
    fn cancel_tick(&mut self) {
        self.tag += 1;
    }

    fn complete(&mut self) {
        self.cancel_tick();
        self.phase = Phase::Completed;
        self.alarm.play_descending_tone();
        self.display.set_text(DONE_TEXT);
    }

    fn render(&mut self) {
        let clock = format_clock(self.remaining_seconds);
        self.display.set_title(&format!("{}{}", clock, TITLE_SUFFIX));
        self.display.set_text(&clock);
        self.set_progress(self.percent());
    }

    fn set_progress(&mut self, percent: f64) {
        let offset = self.circumference - (percent / 100.0) * self.circumference;
        self.progress.set_stroke_dashoffset(offset);
    }
}

/// Formats seconds as `MM:SS`, both fields zero-padded to two digits.
///
/// Minutes are not clamped to 59; long countdowns render as `180:00`.
fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
