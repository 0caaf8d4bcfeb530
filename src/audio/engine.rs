//! Audio feedback behind a capability trait.
//!
//! The engine owns the cue vocabulary (which notes, how long, how scroll speed maps to wind)
//! and the enable/mute lifecycle. Synthesis itself is the backend's business. Nothing here
//! returns an error: a backend that fails to start leaves the engine disabled.

use crate::foundation::rng::Rng64;

/// Note in scientific pitch notation, stored as a MIDI number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Note {
    pub name: &'static str,
    pub midi: u8,
}

impl Note {
    pub const C2: Self = Self::new("C2", 36);
    pub const C4: Self = Self::new("C4", 60);
    pub const E4: Self = Self::new("E4", 64);
    pub const G4: Self = Self::new("G4", 67);
    pub const B4: Self = Self::new("B4", 71);
    pub const C5: Self = Self::new("C5", 72);
    pub const E5: Self = Self::new("E5", 76);
    pub const G5: Self = Self::new("G5", 79);
    pub const B5: Self = Self::new("B5", 83);
    pub const D6: Self = Self::new("D6", 86);

    const fn new(name: &'static str, midi: u8) -> Self {
        Self { name, midi }
    }

    /// Equal-tempered frequency, A4 = 440 Hz.
    pub fn frequency_hz(self) -> f64 {
        440.0 * 2f64.powf((f64::from(self.midi) - 69.0) / 12.0)
    }
}

pub const HOVER_NOTES: [Note; 5] = [Note::C5, Note::E5, Note::G5, Note::B5, Note::D6];
pub const CLICK_NOTE: Note = Note::C2;
pub const SUCCESS_CHORD: [Note; 4] = [Note::C4, Note::E4, Note::G4, Note::B4];
/// Low drone started with the graph.
pub const DRONE_NOTE: Note = Note::C2;

/// Musical note value at the backend's tempo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum NoteLength {
    Sixteenth,
    Eighth,
    Quarter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Cue {
    Hover,
    Click,
    Success,
}

/// Wind-noise parameters derived from scroll speed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Wind {
    pub gain: f64,
    pub band_hz: f64,
    pub ramp_s: f64,
}

impl Wind {
    pub const RAMP_S: f64 = 0.1;

    /// `speed` is the scroll speed in pixels per frame; its sign is ignored.
    pub fn from_scroll_speed(speed: f64) -> Self {
        let n = if speed.is_finite() {
            (speed.abs() / 50.0).min(1.0)
        } else {
            0.0
        };
        Self {
            gain: n * 0.5,
            band_hz: 400.0 + n * 1200.0,
            ramp_s: Self::RAMP_S,
        }
    }
}

/// Synthesis graph owned by the host.
pub trait AudioBackend {
    type Error: std::fmt::Display;

    /// Start the audio context and build the graph, including the drone.
    fn start(&mut self) -> Result<(), Self::Error>;
    fn play(&mut self, cue: Cue, notes: &[Note], length: NoteLength);
    fn set_wind(&mut self, wind: Wind);
    fn set_muted(&mut self, muted: bool);
    /// Dispose of every node built by `start`.
    fn release(&mut self);
}

pub struct AudioEngine<B: AudioBackend> {
    backend: B,
    enabled: bool,
    muted: bool,
    rng: Rng64,
}

impl<B: AudioBackend> AudioEngine<B> {
    pub fn new(backend: B, seed: u64) -> Self {
        Self {
            backend,
            enabled: false,
            muted: false,
            rng: Rng64::new(seed),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Start audio from a user gesture. Returns whether audio is now running.
    pub fn enable(&mut self) -> bool {
        if self.enabled {
            return true;
        }
        match self.backend.start() {
            Ok(()) => {
                self.enabled = true;
                if self.muted {
                    self.backend.set_muted(true);
                }
                tracing::debug!("audio enabled");
            }
            Err(err) => tracing::warn!(%err, "audio start failed; staying silent"),
        }
        self.enabled
    }

    pub fn mute(&mut self, muted: bool) {
        self.muted = muted;
        if self.enabled {
            self.backend.set_muted(muted);
        }
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.mute(!self.muted);
        self.muted
    }

    /// Play a cue. A no-op before `enable` and while muted.
    pub fn trigger(&mut self, cue: Cue) {
        if !self.enabled || self.muted {
            return;
        }
        match cue {
            Cue::Hover => {
                let i = (self.rng.next_f64_01() * HOVER_NOTES.len() as f64) as usize;
                let note = HOVER_NOTES[i.min(HOVER_NOTES.len() - 1)];
                self.backend.play(cue, &[note], NoteLength::Sixteenth);
            }
            Cue::Click => self.backend.play(cue, &[CLICK_NOTE], NoteLength::Eighth),
            Cue::Success => self.backend.play(cue, &SUCCESS_CHORD, NoteLength::Quarter),
        }
    }

    /// Drive the wind layer. Applies while muted so unmuting resumes at the right level.
    pub fn set_scroll_speed(&mut self, speed: f64) {
        if self.enabled {
            self.backend.set_wind(Wind::from_scroll_speed(speed));
        }
    }

    /// Tear the graph down. A later `enable` builds a fresh one.
    pub fn disable(&mut self) {
        if self.enabled {
            self.enabled = false;
            self.backend.release();
        }
    }
}

impl<B: AudioBackend> Drop for AudioEngine<B> {
    fn drop(&mut self) {
        self.disable();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/engine.rs"]
mod tests;
