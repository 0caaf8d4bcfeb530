use std::{cell::RefCell, rc::Rc};

use super::*;

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Start,
    Play(Cue, Vec<&'static str>, NoteLength),
    Wind(Wind),
    Muted(bool),
    Release,
}

#[derive(Clone, Default)]
struct Recorder {
    calls: Rc<RefCell<Vec<Call>>>,
    fail_start: bool,
}

impl Recorder {
    fn failing() -> Self {
        Self {
            fail_start: true,
            ..Self::default()
        }
    }

    fn log(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn releases(&self) -> usize {
        self.log().iter().filter(|c| **c == Call::Release).count()
    }
}

impl AudioBackend for Recorder {
    type Error = String;

    fn start(&mut self) -> Result<(), String> {
        if self.fail_start {
            return Err("not allowed".to_string());
        }
        self.calls.borrow_mut().push(Call::Start);
        Ok(())
    }

    fn play(&mut self, cue: Cue, notes: &[Note], length: NoteLength) {
        let names = notes.iter().map(|n| n.name).collect();
        self.calls.borrow_mut().push(Call::Play(cue, names, length));
    }

    fn set_wind(&mut self, wind: Wind) {
        self.calls.borrow_mut().push(Call::Wind(wind));
    }

    fn set_muted(&mut self, muted: bool) {
        self.calls.borrow_mut().push(Call::Muted(muted));
    }

    fn release(&mut self) {
        self.calls.borrow_mut().push(Call::Release);
    }
}

#[test]
fn triggers_before_enable_are_silent() {
    let rec = Recorder::default();
    let mut e = AudioEngine::new(rec.clone(), 1);
    e.trigger(Cue::Click);
    e.set_scroll_speed(30.0);
    assert!(rec.log().is_empty());
}

#[test]
fn cues_play_their_notes() {
    let rec = Recorder::default();
    let mut e = AudioEngine::new(rec.clone(), 1);
    assert!(e.enable());
    e.trigger(Cue::Click);
    e.trigger(Cue::Success);
    e.trigger(Cue::Hover);

    let log = rec.log();
    assert_eq!(log[0], Call::Start);
    assert_eq!(log[1], Call::Play(Cue::Click, vec!["C2"], NoteLength::Eighth));
    assert_eq!(
        log[2],
        Call::Play(Cue::Success, vec!["C4", "E4", "G4", "B4"], NoteLength::Quarter)
    );
    let Call::Play(Cue::Hover, notes, NoteLength::Sixteenth) = &log[3] else {
        panic!("unexpected {:?}", log[3]);
    };
    assert!(HOVER_NOTES.iter().any(|n| n.name == notes[0]));
}

#[test]
fn hover_notes_come_from_the_scale() {
    let rec = Recorder::default();
    let mut e = AudioEngine::new(rec.clone(), 9);
    e.enable();
    for _ in 0..50 {
        e.trigger(Cue::Hover);
    }
    let distinct: std::collections::BTreeSet<_> = rec
        .log()
        .into_iter()
        .filter_map(|c| match c {
            Call::Play(Cue::Hover, n, _) => Some(n[0]),
            _ => None,
        })
        .collect();
    assert!(distinct.len() > 1);
    assert!(distinct.iter().all(|n| HOVER_NOTES.iter().any(|h| h.name == *n)));
}

#[test]
fn muted_engine_skips_cues_but_tracks_wind() {
    let rec = Recorder::default();
    let mut e = AudioEngine::new(rec.clone(), 1);
    e.enable();
    assert!(e.toggle_mute());
    e.trigger(Cue::Click);
    e.set_scroll_speed(100.0);
    assert!(!e.toggle_mute());

    let log = rec.log();
    assert_eq!(log[1], Call::Muted(true));
    assert!(matches!(log[2], Call::Wind(_)));
    assert_eq!(log[3], Call::Muted(false));
    assert_eq!(log.len(), 4);
}

#[test]
fn mute_before_enable_applies_on_start() {
    let rec = Recorder::default();
    let mut e = AudioEngine::new(rec.clone(), 1);
    e.mute(true);
    assert!(rec.log().is_empty());
    e.enable();
    assert_eq!(rec.log(), vec![Call::Start, Call::Muted(true)]);
}

#[test]
fn failed_start_is_swallowed() {
    let rec = Recorder::failing();
    let mut e = AudioEngine::new(rec.clone(), 1);
    assert!(!e.enable());
    assert!(!e.is_enabled());
    e.trigger(Cue::Success);
    drop(e);
    assert!(rec.log().is_empty());
}

#[test]
fn wind_mapping() {
    let still = Wind::from_scroll_speed(0.0);
    assert_eq!((still.gain, still.band_hz), (0.0, 400.0));
    let half = Wind::from_scroll_speed(-25.0);
    assert!((half.gain - 0.25).abs() < 1e-12);
    assert!((half.band_hz - 1000.0).abs() < 1e-9);
    let fast = Wind::from_scroll_speed(500.0);
    assert_eq!((fast.gain, fast.band_hz), (0.5, 1600.0));
    assert_eq!(Wind::from_scroll_speed(f64::NAN).gain, 0.0);
}

#[test]
fn release_happens_exactly_once() {
    let rec = Recorder::default();
    {
        let mut e = AudioEngine::new(rec.clone(), 1);
        e.enable();
        e.disable();
        e.disable();
    }
    assert_eq!(rec.releases(), 1);

    let rec = Recorder::default();
    {
        let mut e = AudioEngine::new(rec.clone(), 1);
        e.enable();
    }
    assert_eq!(rec.releases(), 1);
}

#[test]
fn note_frequencies() {
    assert!((Note::C4.frequency_hz() - 261.6256).abs() < 1e-3);
    assert!((Note::C2.frequency_hz() - 65.4064).abs() < 1e-3);
}
