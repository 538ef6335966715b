//! # Metronome Module
//!
//! Tempo bookkeeping and a beat clock. The clock only produces timed `Beat`
//! events on a channel; making a sound out of them is up to the receiver.
//!
//! ## Features
//! - Italian tempo names loaded from an embedded JSON table
//! - Beat length from tempo and note value
//! - Validated settings (tempo range, note value, beats per bar)
//! - A dedicated clock thread with explicit shutdown

use crate::error::{GuitarkitError, Result};
use crossbeam_channel::Sender;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Note values a beat may be counted in (half notes through 32nds).
pub const NOTE_FRACTIONS: [u32; 5] = [2, 4, 8, 16, 32];

/// Largest number of beats in one bar.
pub const MAX_BEATS_PER_BAR: u32 = 31;

/// Associates a tempo range in bpm with its conventional name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TempoName {
    pub name: String,
    pub lower: u32,
    pub upper: u32,
}

/// Parses a tempo-name table from JSON.
///
/// # Arguments
/// * `json` - A JSON array of `{"name", "lower", "upper"}` objects
///
/// # Returns
/// * `Ok(Vec<TempoName>)` - The ranges in file order
/// * `Err(GuitarkitError::Json)` - The text is not a valid table
pub fn parse_tempo_names(json: &str) -> Result<Vec<TempoName>> {
    Ok(serde_json::from_str(json)?)
}

static TEMPO_NAMES: Lazy<Vec<TempoName>> = Lazy::new(|| {
    parse_tempo_names(include_str!("../data/tempo_names.json")).unwrap_or_else(|err| {
        error!(%err, "embedded tempo name table is invalid");
        Vec::new()
    })
});

/// Looks up the conventional name for a tempo.
///
/// # Arguments
/// * `bpm` - Tempo in quarter notes per minute
///
/// # Returns
/// * `Some(name)` - The first range containing `bpm`, e.g. "Allegro" for 120
/// * `None` - No range covers `bpm`
pub fn tempo_name(bpm: u32) -> Option<&'static str> {
    TEMPO_NAMES
        .iter()
        .find(|tempo| tempo.lower <= bpm && bpm <= tempo.upper)
        .map(|tempo| tempo.name.as_str())
}

/// Calculates the length of one beat.
///
/// A beat is one `1/note_fraction` note; the tempo counts quarter notes, so
/// the length is (4 / note_fraction) * (60 / bpm) seconds.
///
/// # Arguments
/// * `bpm` - Tempo in quarter notes per minute
/// * `note_fraction` - Note value of one beat (4 for quarters, 8 for eighths)
///
/// # Returns
/// * `Some(Duration)` - The beat length
/// * `None` - Either argument is zero
pub fn beat_duration(bpm: u32, note_fraction: u32) -> Option<Duration> {
    if bpm == 0 || note_fraction == 0 {
        return None;
    }
    Some(Duration::from_secs_f64((4.0 / note_fraction as f64) * (60.0 / bpm as f64)))
}

/// Tempo and meter of the metronome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetronomeSettings {
    pub bpm: u32,
    pub note_fraction: u32,
    pub beats_per_bar: u32,
    pub max_bpm: u32,
}

impl Default for MetronomeSettings {
    fn default() -> Self {
        Self {
            bpm: 100,
            note_fraction: 4,
            beats_per_bar: 4,
            max_bpm: 240,
        }
    }
}

impl MetronomeSettings {
    /// Sets the tempo. Zero or anything above `max_bpm` is rejected and the
    /// current tempo is kept.
    pub fn set_bpm(&mut self, bpm: u32) -> Result<()> {
        if bpm == 0 || bpm > self.max_bpm {
            return Err(GuitarkitError::TempoOutOfRange {
                bpm,
                max: self.max_bpm,
            });
        }
        self.bpm = bpm;
        Ok(())
    }

    pub fn set_note_fraction(&mut self, note_fraction: u32) -> Result<()> {
        if !NOTE_FRACTIONS.contains(&note_fraction) {
            return Err(GuitarkitError::NoteFraction(note_fraction));
        }
        self.note_fraction = note_fraction;
        Ok(())
    }

    pub fn set_beats_per_bar(&mut self, beats_per_bar: u32) -> Result<()> {
        if !(1..=MAX_BEATS_PER_BAR).contains(&beats_per_bar) {
            return Err(GuitarkitError::BeatsPerBar(beats_per_bar));
        }
        self.beats_per_bar = beats_per_bar;
        Ok(())
    }

    /// Checks values that may have come straight from a config file.
    ///
    /// # Returns
    /// * `Ok(MetronomeSettings)` - A copy that passed every setter's check
    /// * `Err(GuitarkitError)` - The first value out of range
    pub fn validated(self) -> Result<Self> {
        let mut checked = Self {
            max_bpm: self.max_bpm,
            ..Self::default()
        };
        checked.set_bpm(self.bpm)?;
        checked.set_note_fraction(self.note_fraction)?;
        checked.set_beats_per_bar(self.beats_per_bar)?;
        Ok(checked)
    }

    /// Beat length for these settings. Fails instead of panicking when the
    /// fields were set directly to values the setters would reject.
    pub fn beat_duration(&self) -> Result<Duration> {
        let checked = self.validated()?;
        beat_duration(checked.bpm, checked.note_fraction)
            .ok_or(GuitarkitError::NoteFraction(checked.note_fraction))
    }

    pub fn tempo_name(&self) -> Option<&'static str> {
        tempo_name(self.bpm)
    }
}

/// One tick of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Beat {
    /// Beats since the clock started.
    pub count: u64,
    /// Position within the bar, 0-based.
    pub position: u32,
    /// The first beat of every bar is accented.
    pub accent: bool,
}

/// A running beat clock. Stops on `stop()` or when dropped.
#[derive(Debug)]
pub struct BeatClock {
    shutdown_tx: Sender<()>,
    thread_handle: Option<JoinHandle<()>>,
}

impl BeatClock {
    /// Spawns the clock thread. The first beat is sent immediately.
    ///
    /// The thread waits on the beat channel and the shutdown signal together,
    /// so a full bounded channel never keeps `stop()` from returning.
    ///
    /// # Arguments
    /// * `settings` - Tempo and meter; validated before anything is spawned
    /// * `beats` - Where beats are sent; the clock exits once its receiver is gone
    ///
    /// # Returns
    /// * `Ok(BeatClock)` - The running clock
    /// * `Err(GuitarkitError)` - `settings` is out of range
    pub fn start(settings: &MetronomeSettings, beats: Sender<Beat>) -> Result<Self> {
        let settings = settings.validated()?;
        let period = settings.beat_duration()?;
        let beats_per_bar = settings.beats_per_bar;
        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(1);

        info!(
            bpm = settings.bpm,
            note_fraction = settings.note_fraction,
            beats_per_bar,
            "starting beat clock"
        );

        let thread_handle = thread::spawn(move || {
            let mut next_beat = Instant::now();
            let mut count: u64 = 0;
            loop {
                let position = (count % beats_per_bar as u64) as u32;
                let beat = Beat {
                    count,
                    position,
                    accent: position == 0,
                };
                crossbeam_channel::select! {
                    send(beats, beat) -> sent => {
                        if sent.is_err() {
                            debug!("beat receiver closed");
                            break;
                        }
                    },
                    recv(shutdown_rx) -> _ => {
                        debug!("beat clock received shutdown signal");
                        break;
                    },
                }
                count += 1;
                next_beat += period;

                let wait = next_beat.saturating_duration_since(Instant::now());
                crossbeam_channel::select! {
                    recv(shutdown_rx) -> _ => {
                        debug!("beat clock received shutdown signal");
                        break;
                    },
                    default(wait) => {},
                }
            }
            info!(beats = count, "beat clock stopped");
        });

        Ok(Self {
            shutdown_tx,
            thread_handle: Some(thread_handle),
        })
    }

    /// Stops the clock and waits for its thread to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let _ = self.shutdown_tx.try_send(());
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                error!("beat clock thread panicked");
            }
        }
    }
}

impl Drop for BeatClock {
    fn drop(&mut self) {
        self.shutdown();
    }
}
