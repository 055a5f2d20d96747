//! Alarm emitter: the completion chime.
//!
//! Audio playback on most platforms may only begin after an explicit user
//! gesture, so the emitter is dormant until [`AlarmEmitter::activate`] is
//! called from a gesture handler; the controller does this on the first
//! start. An emitter that was never activated, or that found no audio
//! device, skips playback silently; a missing chime is never an error.

#[cfg(feature = "audio")]
use std::sync::mpsc::{self, Receiver, Sender};
#[cfg(feature = "audio")]
use std::thread;

/// Capability to play the completion tone.
pub trait AlarmEmitter {
    /// Unlocks audio playback. Must be called from a user-gesture handler;
    /// calling it again is a no-op.
    fn activate(&mut self);

    /// Returns whether playback has been unlocked.
    fn activated(&self) -> bool;

    /// Plays the descending completion tone once, fire-and-forget.
    /// A no-op if the emitter was never activated.
    fn play_descending_tone(&mut self);
}

/// An emitter that never makes a sound.
///
/// Used for headless runs, tests, and builds without the `audio` feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent {
    activated: bool,
}

impl Silent {
    /// Creates a silent emitter.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AlarmEmitter for Silent {
    fn activate(&mut self) {
        self.activated = true;
    }

    fn activated(&self) -> bool {
        self.activated
    }

    fn play_descending_tone(&mut self) {}
}

// Tone shape, matching the original alarm: a sine sweep from A5 down to
// A4 over half a second while the gain decays from 0.5 to near silence.
const SAMPLE_RATE: u32 = 44_100;
const TONE_SECONDS: f32 = 0.5;
const START_HZ: f32 = 880.0;
const END_HZ: f32 = 440.0;
const START_GAIN: f32 = 0.5;
const END_GAIN: f32 = 0.01;

/// Synthesizes the descending completion tone as mono `f32` samples.
#[cfg_attr(not(feature = "audio"), allow(dead_code))]
pub(crate) fn descending_tone() -> Vec<f32> {
    let total = (SAMPLE_RATE as f32 * TONE_SECONDS) as usize;
    let mut samples = Vec::with_capacity(total);
    let mut phase = 0.0f32;

    for i in 0..total {
        let t = i as f32 / total as f32;
        // Exponential ramps for both pitch and gain.
        let freq = START_HZ * (END_HZ / START_HZ).powf(t);
        let gain = START_GAIN * (END_GAIN / START_GAIN).powf(t);
        phase += 2.0 * std::f32::consts::PI * freq / SAMPLE_RATE as f32;
        samples.push(phase.sin() * gain);
    }

    samples
}

#[cfg(feature = "audio")]
enum ChimeRequest {
    DescendingTone,
}

/// The audio-backed alarm emitter.
///
/// `activate` spawns a dedicated audio thread that owns the output stream;
/// playback requests travel over a channel and return immediately. If the
/// platform has no usable audio device the thread exits and every later
/// request is dropped on the closed channel. Completion is then silent,
/// exactly as for a never-activated emitter.
#[cfg(feature = "audio")]
#[derive(Debug, Default)]
pub struct Chime {
    tx: Option<Sender<ChimeRequest>>,
}

#[cfg(feature = "audio")]
impl Chime {
    /// Creates a dormant chime. Nothing is allocated until `activate`.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "audio")]
impl AlarmEmitter for Chime {
    fn activate(&mut self) {
        if self.tx.is_some() {
            return;
        }
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || audio_loop(rx));
        self.tx = Some(tx);
    }

    fn activated(&self) -> bool {
        self.tx.is_some()
    }

    fn play_descending_tone(&mut self) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(ChimeRequest::DescendingTone);
        }
    }
}

#[cfg(feature = "audio")]
fn audio_loop(rx: Receiver<ChimeRequest>) {
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, Sink};

    // The stream must outlive the sink; dropping it stops playback.
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(s) => s,
        Err(_) => return,
    };
    let sink = match Sink::try_new(&handle) {
        Ok(s) => s,
        Err(_) => return,
    };

    while let Ok(request) = rx.recv() {
        match request {
            ChimeRequest::DescendingTone => {
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, descending_tone()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_emitter_tracks_activation() {
        let mut alarm = Silent::new();
        assert!(!alarm.activated());

        alarm.activate();
        assert!(alarm.activated());

        // Repeated activation and playback are harmless no-ops.
        alarm.activate();
        alarm.play_descending_tone();
        assert!(alarm.activated());
    }

    #[test]
    fn test_tone_length() {
        let samples = descending_tone();
        assert_eq!(samples.len(), (SAMPLE_RATE as f32 * TONE_SECONDS) as usize);
    }

    #[test]
    fn test_tone_decays_to_silence() {
        let samples = descending_tone();
        let head_peak = samples[..2_000]
            .iter()
            .fold(0.0f32, |acc, s| acc.max(s.abs()));
        let tail_peak = samples[samples.len() - 2_000..]
            .iter()
            .fold(0.0f32, |acc, s| acc.max(s.abs()));

        assert!(head_peak > 0.2, "tone should start audible: {}", head_peak);
        assert!(tail_peak < 0.05, "tone should end quiet: {}", tail_peak);
        assert!(head_peak <= START_GAIN + 1e-3);
    }

    #[test]
    fn test_tone_amplitude_bounded() {
        for s in descending_tone() {
            assert!(s.abs() <= START_GAIN + 1e-3);
        }
    }

    #[cfg(feature = "audio")]
    #[test]
    fn test_chime_play_before_activation_is_noop() {
        let mut chime = Chime::new();
        assert!(!chime.activated());
        // Must not panic or block without an audio thread.
        chime.play_descending_tone();
        assert!(!chime.activated());
    }
}
