// guitarkit-core/src/lib.rs

//! The core logic for the guitar toolkit.
//! This crate is responsible for chord construction, scale spelling,
//! chord symbols, state persistence, the metronome clock and note matching
//! for the tuner. It is completely headless and contains no UI code.

pub mod chord;
pub mod config;
pub mod error;
pub mod metronome;
pub mod persistence;
pub mod pitch;
pub mod scale;
pub mod tuning;

pub use chord::{Chord, ChordEngine};
pub use config::GuitarkitConfig;
pub use error::{GuitarkitError, Result};
pub use pitch::PitchClass;

use serde::Serialize;

/// Everything displayed for one chord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordReport {
    /// The chord symbol, e.g. "Cmaj7".
    pub symbol: String,
    /// The root's major scale, space separated.
    pub scale: String,
    /// Interval labels from the root ("1", "b3", "#11").
    pub intervals: Vec<String>,
    /// Spelled note names, in the same order as `intervals`.
    pub notes: Vec<String>,
    /// Distinct semitone offsets from the root, ascending.
    pub semitones: Vec<u8>,
}
