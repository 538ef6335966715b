//! # Tuning Module
//!
//! Matches an already measured frequency to the nearest named tone. No audio
//! is captured or analysed here; the caller hands in a frequency in Hz.
//!
//! ## Features
//! - 88-key note table (A0 to C8) for any reference pitch
//! - Nearest-note lookup
//! - Cent deviation calculation
//! - Flat / in tune / sharp classification within a cents window

use crate::pitch::{PitchClass, spellings_for};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Standard concert pitch for A4 in Hz.
pub const STANDARD_A4: f32 = 440.0;

/// Number of keys on a standard piano.
pub const KEY_COUNT: usize = 88;

/// Represents a single musical note with its name and frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Note name (e.g., "A4", "C#3")
    pub name: String,
    /// Frequency in Hz
    pub frequency: f32,
}

/// Where a measured tone sits relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TuningDirection {
    /// Below the target; tune up.
    Flat,
    InTune,
    /// Above the target; tune down.
    Sharp,
}

/// The nearest note to a measured frequency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteMatch {
    /// Piano key index (0-87, where 0 is A0)
    pub key_index: u8,
    pub name: String,
    pub target_frequency: f32,
    pub cents: f32,
    pub direction: TuningDirection,
}

/// The 88 piano keys tuned in equal temperament against a reference A4.
#[derive(Debug, Clone)]
pub struct NoteTable {
    reference_a4: f32,
    notes: Vec<Note>,
}

impl NoteTable {
    /// Builds the 88-key table in equal temperament.
    ///
    /// # Arguments
    /// * `reference_a4` - Frequency of A4 in Hz (440.0 for concert pitch)
    ///
    /// # Returns
    /// * `NoteTable` - Keys A0 to C8, named from the pitch-class table
    pub fn new(reference_a4: f32) -> Self {
        let mut notes = Vec::with_capacity(KEY_COUNT);

        for i in 0..KEY_COUNT {
            // A4 is the 49th key, index 48. f = f0 * 2^(n/12) with n semitones from A4.
            let frequency = reference_a4 * 2.0_f32.powf((i as f32 - 48.0) / 12.0);

            // A piano starts at A0; the octave number changes at C.
            let pitch_class = PitchClass::new(9 + i as i32);
            let octave = (i + 9) / 12;
            let name = format!("{}{}", spellings_for(pitch_class)[0], octave);

            notes.push(Note { name, frequency });
        }

        Self {
            reference_a4,
            notes,
        }
    }

    pub fn reference_a4(&self) -> f32 {
        self.reference_a4
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Finds a note by its 88-key index.
    pub fn by_index(&self, key_index: u8) -> Option<&Note> {
        self.notes.get(key_index as usize)
    }

    /// Finds a note's key index by name ("A4", "C#3").
    pub fn index_of(&self, name: &str) -> Option<u8> {
        self.notes
            .iter()
            .position(|note| note.name == name)
            .map(|i| i as u8)
    }

    /// Finds the closest musical note to a given frequency.
    ///
    /// Searches all 88 keys for the smallest frequency difference, then
    /// measures the deviation in cents and classifies it.
    ///
    /// # Arguments
    /// * `freq` - Measured frequency in Hz
    /// * `in_tune_cents` - Half-width of the in-tune window in cents
    ///
    /// # Returns
    /// * `Some(NoteMatch)` - Nearest key, its target frequency, cents and direction
    /// * `None` - `freq` is not a finite positive number
    pub fn nearest(&self, freq: f32, in_tune_cents: f32) -> Option<NoteMatch> {
        if !freq.is_finite() || freq <= 0.0 {
            return None;
        }

        let (key_index, closest) = self.notes.iter().enumerate().min_by(|(_, a), (_, b)| {
            let diff_a = (a.frequency - freq).abs();
            let diff_b = (b.frequency - freq).abs();
            diff_a.total_cmp(&diff_b)
        })?;

        let cents = cents_deviation(freq, closest.frequency);
        Some(NoteMatch {
            key_index: key_index as u8,
            name: closest.name.clone(),
            target_frequency: closest.frequency,
            cents,
            direction: direction(cents, in_tune_cents),
        })
    }
}

/// The table at standard pitch, computed once.
static STANDARD_NOTES: Lazy<NoteTable> = Lazy::new(|| NoteTable::new(STANDARD_A4));

/// The 88-key table at A4 = 440 Hz.
pub fn standard_notes() -> &'static NoteTable {
    &STANDARD_NOTES
}

/// Calculates the deviation from a target frequency in cents.
///
/// 100 cents = 1 semitone; positive values are sharp, negative flat.
///
/// # Arguments
/// * `freq` - Measured frequency in Hz
/// * `target_freq` - Target note frequency in Hz
///
/// # Returns
/// * `f32` - Deviation in cents (1200 per octave)
pub fn cents_deviation(freq: f32, target_freq: f32) -> f32 {
    1200.0 * (freq / target_freq).log2()
}

/// Classifies a deviation. Anything within `in_tune_cents` either side is in tune.
pub fn direction(cents: f32, in_tune_cents: f32) -> TuningDirection {
    if cents.abs() <= in_tune_cents {
        TuningDirection::InTune
    } else if cents < 0.0 {
        TuningDirection::Flat
    } else {
        TuningDirection::Sharp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_spans_a0_to_c8() {
        let table = standard_notes();
        assert_eq!(table.notes().len(), KEY_COUNT);
        assert_eq!(table.by_index(0).unwrap().name, "A0");
        assert_eq!(table.by_index(48).unwrap().name, "A4");
        assert_eq!(table.by_index(51).unwrap().name, "C5");
        assert_eq!(table.by_index(87).unwrap().name, "C8");
        assert_eq!(table.index_of("C#3"), Some(28));
        assert!((table.by_index(48).unwrap().frequency - 440.0).abs() < 1e-3);
    }

    #[test]
    fn matches_nearest_note_with_direction() {
        let m = standard_notes().nearest(445.0, 5.0).unwrap();
        assert_eq!(m.name, "A4");
        assert!(m.cents > 19.0 && m.cents < 20.0);
        assert_eq!(m.direction, TuningDirection::Sharp);

        let m = standard_notes().nearest(261.0, 5.0).unwrap();
        assert_eq!(m.name, "C4");
        assert_eq!(m.direction, TuningDirection::InTune);

        let m = standard_notes().nearest(435.0, 5.0).unwrap();
        assert_eq!(m.direction, TuningDirection::Flat);
    }

    #[test]
    fn rejects_invalid_frequencies() {
        assert!(standard_notes().nearest(0.0, 5.0).is_none());
        assert!(standard_notes().nearest(f32::NAN, 5.0).is_none());
        assert!(standard_notes().nearest(-3.0, 5.0).is_none());
    }

    #[test]
    fn reference_pitch_shifts_the_table() {
        let baroque = NoteTable::new(415.0);
        let m = baroque.nearest(415.0, 5.0).unwrap();
        assert_eq!(m.name, "A4");
        assert_eq!(m.direction, TuningDirection::InTune);
    }

    #[test]
    fn cents_are_symmetric_around_the_target() {
        assert!((cents_deviation(880.0, 440.0) - 1200.0).abs() < 1e-3);
        assert!((cents_deviation(220.0, 440.0) + 1200.0).abs() < 1e-3);
    }
}
