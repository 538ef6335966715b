//! # Persistence Module
//!
//! Saves the chord screen's state as flat string key/value pairs: the root
//! and the raw value of every attribute category. Only raw selections are
//! stored; the chord is always recomputed after a restore.
//!
//! Restore is lenient. An option that is no longer recognized becomes "none"
//! for its category, and an unreadable root falls back to C.

use crate::chord::attributes::{AttributeSelection, ChordOption};
use crate::chord::resolver::ChordResolver;
use crate::chord::ChordEngine;
use crate::error::Result;
use crate::pitch::PitchClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, warn};

pub const KEY_ROOT: &str = "root";
pub const KEY_QUALITY: &str = "chord_type";
pub const KEY_SUS: &str = "chord_sus";
pub const KEY_AUG_DIM: &str = "chord_augdim";
pub const KEY_FIFTH: &str = "chord_fifth";
pub const KEY_SEVENTH: &str = "chord_seventh";
pub const KEY_NINTH: &str = "chord_ninth";
pub const KEY_ELEVENTH: &str = "chord_eleventh";
pub const KEY_THIRTEENTH: &str = "chord_thirteenth";
pub const KEY_ADD29: &str = "chord_add29";
pub const KEY_ADD411: &str = "chord_add411";
pub const KEY_ADD613: &str = "chord_add613";

/// A flat snapshot of the chord screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedState {
    values: BTreeMap<String, String>,
}

fn tag_of<T: ChordOption>(option: Option<T>) -> String {
    option.map(|o| o.tag().to_string()).unwrap_or_default()
}

impl SavedState {
    /// Captures a root and a raw selection.
    ///
    /// # Arguments
    /// * `root` - The selected root, stored by its key name ("Bb", "F#")
    /// * `selection` - Per-category options, stored as tags; none is stored as ""
    ///
    /// # Returns
    /// * `SavedState` - All twelve keys, always present
    pub fn capture(root: PitchClass, selection: &AttributeSelection) -> Self {
        let values = [
            (KEY_ROOT, root.name().to_string()),
            (KEY_QUALITY, tag_of(selection.quality)),
            (KEY_SUS, tag_of(selection.sus)),
            (KEY_AUG_DIM, tag_of(selection.aug_dim)),
            (KEY_FIFTH, tag_of(selection.fifth)),
            (KEY_SEVENTH, tag_of(selection.seventh)),
            (KEY_NINTH, tag_of(selection.ninth)),
            (KEY_ELEVENTH, tag_of(selection.eleventh)),
            (KEY_THIRTEENTH, tag_of(selection.thirteenth)),
            (KEY_ADD29, tag_of(selection.add29)),
            (KEY_ADD411, tag_of(selection.add411)),
            (KEY_ADD613, tag_of(selection.add613)),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();
        Self { values }
    }

    pub fn from_engine(engine: &ChordEngine) -> Self {
        Self::capture(engine.root(), &engine.selection())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn root(&self) -> PitchClass {
        match self.get(KEY_ROOT).map(PitchClass::parse) {
            Some(Ok(root)) => root,
            Some(Err(err)) => {
                warn!(%err, "unreadable saved root, falling back to C");
                PitchClass::C
            }
            None => PitchClass::C,
        }
    }

    fn option<T: ChordOption>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        match T::parse_optional(value) {
            Ok(option) => option,
            Err(err) => {
                warn!(key, %err, "unrecognized saved option, treating as none");
                None
            }
        }
    }

    /// The raw selection, with anything unreadable treated as none.
    pub fn selection(&self) -> AttributeSelection {
        AttributeSelection {
            quality: self.option(KEY_QUALITY),
            fifth: self.option(KEY_FIFTH),
            aug_dim: self.option(KEY_AUG_DIM),
            seventh: self.option(KEY_SEVENTH),
            sus: self.option(KEY_SUS),
            ninth: self.option(KEY_NINTH),
            eleventh: self.option(KEY_ELEVENTH),
            thirteenth: self.option(KEY_THIRTEENTH),
            add29: self.option(KEY_ADD29),
            add411: self.option(KEY_ADD411),
            add613: self.option(KEY_ADD613),
        }
    }

    /// Rebuilds a chord engine, re-running normalization on the raw selection.
    ///
    /// # Arguments
    /// * `resolver` - The resolver the restored engine will use for later changes
    ///
    /// # Returns
    /// * `ChordEngine` - Never fails; unreadable values fall back as documented above
    pub fn restore(&self, resolver: ChordResolver) -> ChordEngine {
        ChordEngine::from_selection(resolver, self.root(), &self.selection())
    }

    /// Saves the state to a JSON file.
    ///
    /// Writes a flat JSON object of key/value strings, pretty-printed.
    ///
    /// # Arguments
    /// * `path` - File path where the state should be saved (e.g., "chord_state.json")
    ///
    /// # Returns
    /// * `Ok(())` - State saved successfully
    /// * `Err(GuitarkitError)` - File I/O error or JSON serialization error
    pub fn save(&self, path: &Path) -> Result<()> {
        let json_string = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json_string.as_bytes())?;
        info!(path = %path.display(), "saved chord state");
        Ok(())
    }

    /// Loads a state previously written by `save`.
    ///
    /// # Arguments
    /// * `path` - File path to load the state from
    ///
    /// # Returns
    /// * `Ok(SavedState)` - The stored pairs, not yet checked; see `restore`
    /// * `Err(GuitarkitError)` - File I/O error or JSON deserialization error
    pub fn load(path: &Path) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut data = String::new();
        file.read_to_string(&mut data)?;
        let state: SavedState = serde_json::from_str(&data)?;
        info!(path = %path.display(), "loaded chord state");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::attributes::{AugDim, Ninth, Quality, Seventh, Sus};

    #[test]
    fn capture_writes_every_key() {
        let state = SavedState::capture(
            PitchClass::new(10),
            &AttributeSelection {
                quality: Some(Quality::Minor),
                seventh: Some(Seventh::Dominant7),
                ..Default::default()
            },
        );
        assert_eq!(state.get(KEY_ROOT), Some("Bb"));
        assert_eq!(state.get(KEY_QUALITY), Some("minor"));
        assert_eq!(state.get(KEY_SEVENTH), Some("dom7"));
        assert_eq!(state.get(KEY_SUS), Some(""));
        assert_eq!(state.values.len(), 12);
    }

    #[test]
    fn unknown_options_restore_as_none() {
        let mut state = SavedState::capture(
            PitchClass::C,
            &AttributeSelection {
                sus: Some(Sus::Sus4),
                ninth: Some(Ninth::Natural9),
                ..Default::default()
            },
        );
        state.insert(KEY_SUS, "sus3");
        state.insert(KEY_AUG_DIM, "half-dim");

        let selection = state.selection();
        assert_eq!(selection.sus, None);
        assert_eq!(selection.aug_dim, None);
        assert_eq!(selection.ninth, Some(Ninth::Natural9));
    }

    #[test]
    fn missing_keys_and_bad_root_fall_back() {
        let mut state = SavedState::default();
        assert_eq!(state.root(), PitchClass::C);
        assert_eq!(state.selection(), AttributeSelection::default());

        state.insert(KEY_ROOT, "H#");
        state.insert(KEY_AUG_DIM, AugDim::Augmented.tag());
        assert_eq!(state.root(), PitchClass::C);
        assert_eq!(state.selection().aug_dim, Some(AugDim::Augmented));
    }

    #[test]
    fn serializes_as_a_flat_object() {
        let mut state = SavedState::default();
        state.insert(KEY_ROOT, "A");
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"root":"A"}"#);
    }
}
