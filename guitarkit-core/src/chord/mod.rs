//! # Chord Module
//!
//! The chord reference pipeline: a selection event goes through the resolver
//! (normalize), the synthesizer (tones) and the formatter (text). Each pass is
//! synchronous and rebuilds the chord from scratch.

pub mod attributes;
pub mod intervals;
pub mod resolver;
pub mod specification;
pub mod symbol;

use crate::pitch::PitchClass;
use crate::ChordReport;
use attributes::{AttributeSelection, Change};
use intervals::{Voicing, synthesize};
use resolver::ChordResolver;
use specification::ChordSpecification;
use tracing::debug;

/// A fully derived chord: root, normalized spec, tones and symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    root: PitchClass,
    spec: ChordSpecification,
    voicing: Voicing,
    symbol: String,
}

impl Chord {
    pub fn new(root: PitchClass, spec: ChordSpecification) -> Self {
        let voicing = synthesize(&spec);
        let symbol = symbol::chord_symbol(root, &spec);
        Self {
            root,
            spec,
            voicing,
            symbol,
        }
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn spec(&self) -> &ChordSpecification {
        &self.spec
    }

    pub fn voicing(&self) -> &Voicing {
        &self.voicing
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn scale_display(&self) -> String {
        symbol::scale_display(self.root)
    }

    /// Spelled note names of every tone, root first.
    pub fn note_names(&self) -> Vec<String> {
        self.voicing
            .tones()
            .iter()
            .map(|tone| tone.spelling(self.root).to_string())
            .collect()
    }

    pub fn report(&self) -> ChordReport {
        ChordReport {
            symbol: self.symbol.clone(),
            scale: self.scale_display(),
            intervals: self.voicing.labels(),
            notes: self.note_names(),
            semitones: self.voicing.semitones(),
        }
    }
}

/// The single owner of the currently displayed chord.
///
/// Every change runs one full resolve, synthesize, format pass before
/// returning. Nothing derived is cached between passes.
#[derive(Debug, Clone)]
pub struct ChordEngine {
    resolver: ChordResolver,
    root: PitchClass,
    spec: ChordSpecification,
}

impl ChordEngine {
    pub fn new(resolver: ChordResolver) -> Self {
        Self {
            resolver,
            root: PitchClass::C,
            spec: ChordSpecification::default(),
        }
    }

    /// Rebuilds the engine from a raw root and selection, e.g. after restore.
    pub fn from_selection(
        resolver: ChordResolver,
        root: PitchClass,
        selection: &AttributeSelection,
    ) -> Self {
        Self {
            resolver,
            root,
            spec: resolver.normalize(selection),
        }
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn spec(&self) -> &ChordSpecification {
        &self.spec
    }

    pub fn selection(&self) -> AttributeSelection {
        self.spec.to_selection()
    }

    pub fn set_root(&mut self, root: PitchClass) -> Chord {
        debug!(%root, "root changed");
        self.root = root;
        self.chord()
    }

    pub fn change(&mut self, change: Change) -> Chord {
        self.spec = self.resolver.apply(&self.spec, change);
        self.chord()
    }

    pub fn chord(&self) -> Chord {
        Chord::new(self.root, self.spec)
    }
}

impl Default for ChordEngine {
    fn default() -> Self {
        Self::new(ChordResolver::default())
    }
}
