//! Runtime configuration, loaded from a JSON file. Every field is optional;
//! anything missing takes its default.

use crate::chord::resolver::{AugDimRelease, ChordResolver};
use crate::error::Result;
use crate::metronome::MetronomeSettings;
use crate::tuning::{NoteTable, STANDARD_A4, standard_notes};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuitarkitConfig {
    pub chord: ChordConfig,
    pub metronome: MetronomeSettings,
    pub tuner: TunerConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChordConfig {
    pub aug_dim_release: AugDimRelease,
}

impl ChordConfig {
    pub fn resolver(&self) -> ChordResolver {
        ChordResolver::new(self.aug_dim_release)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunerConfig {
    /// Frequency of A4 in Hz.
    pub reference_a4: f32,
    /// Half-width of the in-tune window, in cents.
    pub in_tune_cents: f32,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            reference_a4: STANDARD_A4,
            in_tune_cents: 25.0,
        }
    }
}

impl TunerConfig {
    /// The note table for this reference pitch.
    ///
    /// # Returns
    /// * `Cow::Borrowed` - The shared A4 = 440 Hz table when the reference is standard
    /// * `Cow::Owned` - A freshly computed table for any other reference
    pub fn note_table(&self) -> Cow<'static, NoteTable> {
        if self.reference_a4 == STANDARD_A4 {
            Cow::Borrowed(standard_notes())
        } else {
            Cow::Owned(NoteTable::new(self.reference_a4))
        }
    }
}

impl GuitarkitConfig {
    /// Reads a config file. Metronome values are validated on the way in.
    pub fn load(path: &Path) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut data = String::new();
        file.read_to_string(&mut data)?;
        let mut config: GuitarkitConfig = serde_json::from_str(&data)?;
        config.metronome = config.metronome.validated()?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_fields_take_defaults() {
        let config: GuitarkitConfig =
            serde_json::from_str(r#"{"metronome": {"bpm": 120}}"#).unwrap();
        assert_eq!(config.metronome.bpm, 120);
        assert_eq!(config.metronome.beats_per_bar, 4);
        assert_eq!(config.tuner, TunerConfig::default());
        assert_eq!(config.chord.aug_dim_release, AugDimRelease::Reset);
    }

    #[test]
    fn standard_pitch_shares_the_cached_table() {
        let table = TunerConfig::default().note_table();
        assert!(matches!(table, Cow::Borrowed(_)));
        assert!(std::ptr::eq(&*table, standard_notes()));

        let baroque = TunerConfig {
            reference_a4: 415.0,
            ..Default::default()
        };
        assert!(matches!(baroque.note_table(), Cow::Owned(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"chord": {{"aug_dim_release": "keep_third"}}, "tuner": {{"reference_a4": 432.0}}}}"#
        )
        .unwrap();

        let config = GuitarkitConfig::load(file.path()).unwrap();
        assert_eq!(config.chord.resolver().release(), AugDimRelease::KeepThird);
        assert_eq!(config.tuner.note_table().reference_a4(), 432.0);
        assert_eq!(config.tuner.in_tune_cents, 25.0);
    }

    #[test]
    fn rejects_invalid_metronome_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"metronome": {{"bpm": 0}}}}"#).unwrap();
        assert!(GuitarkitConfig::load(file.path()).is_err());
    }
}
