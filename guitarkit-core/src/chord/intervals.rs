//! # Interval Synthesizer
//!
//! Maps a `ChordSpecification` to the tones it sounds, as semitone offsets
//! from the root. Every tone remembers which degree it stands for, so a 9th
//! and a 2nd on the same pitch class stay distinguishable for the formatter.

use super::attributes::{Add29, Add411, Add613, Eleventh, Fifth, Ninth, Seventh, Thirteenth};
use super::specification::{ChordSpecification, Third};
use crate::pitch::{PitchClass, Spelling};
use crate::scale::{degree_spelling, preferred_spelling};
use std::collections::BTreeSet;
use std::fmt;

/// A chord degree. Compound degrees (9, 11, 13) are kept apart from their
/// simple counterparts (2, 4, 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Degree {
    Root,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Ninth,
    Eleventh,
    Thirteenth,
}

impl Degree {
    pub fn number(self) -> u8 {
        match self {
            Degree::Root => 1,
            Degree::Second => 2,
            Degree::Third => 3,
            Degree::Fourth => 4,
            Degree::Fifth => 5,
            Degree::Sixth => 6,
            Degree::Seventh => 7,
            Degree::Ninth => 9,
            Degree::Eleventh => 11,
            Degree::Thirteenth => 13,
        }
    }

    /// Position of the degree's letter in the scale, 0-based.
    pub fn scale_index(self) -> usize {
        match self {
            Degree::Root => 0,
            Degree::Second | Degree::Ninth => 1,
            Degree::Third => 2,
            Degree::Fourth | Degree::Eleventh => 3,
            Degree::Fifth => 4,
            Degree::Sixth | Degree::Thirteenth => 5,
            Degree::Seventh => 6,
        }
    }

    /// Offset of the unaltered degree in a major scale.
    fn major_offset(self) -> u8 {
        const MAJOR: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];
        MAJOR[self.scale_index()]
    }
}

/// One sounded tone: its offset from the root (0-11) and the degree it plays.
///
/// Ordered by offset, then degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChordTone {
    pub semitones: u8,
    pub degree: Degree,
}

impl ChordTone {
    pub fn new(degree: Degree, semitones: u8) -> Self {
        Self {
            semitones: semitones % 12,
            degree,
        }
    }

    /// Semitones away from the unaltered degree, in -6..=6.
    pub fn alteration(self) -> i32 {
        let diff = (self.semitones as i32 - self.degree.major_offset() as i32).rem_euclid(12);
        if diff > 6 { diff - 12 } else { diff }
    }

    pub fn pitch_class(self, root: PitchClass) -> PitchClass {
        root.transpose(self.semitones as i32)
    }

    /// The tone's written name in the key of `root`, e.g. "Bb" for the
    /// dominant seventh of C.
    pub fn spelling(self, root: PitchClass) -> Spelling {
        let pc = self.pitch_class(root);
        degree_spelling(root, self.degree.scale_index(), pc)
            .unwrap_or_else(|| preferred_spelling(pc, root))
    }
}

impl fmt::Display for ChordTone {
    /// Interval label such as "1", "b3", "#5", "bb7" or "#11".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alteration = self.alteration();
        let prefix = if alteration < 0 { "b" } else { "#" };
        for _ in 0..alteration.unsigned_abs() {
            f.write_str(prefix)?;
        }
        write!(f, "{}", self.degree.number())
    }
}

/// The full set of tones a chord sounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voicing {
    tones: Vec<ChordTone>,
}

impl Voicing {
    /// All tones, ordered; same degree on the same offset appears once.
    pub fn tones(&self) -> &[ChordTone] {
        &self.tones
    }

    /// Distinct sounded offsets, ascending. A 2nd and a 9th count once here.
    pub fn semitones(&self) -> Vec<u8> {
        self.tones
            .iter()
            .map(|tone| tone.semitones)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.tones.iter().map(ChordTone::to_string).collect()
    }
}

impl Fifth {
    pub fn semitones(self) -> u8 {
        match self {
            Fifth::Perfect => 7,
            Fifth::Sharp => 8,
            Fifth::Flat => 6,
        }
    }
}

impl Seventh {
    pub fn semitones(self) -> u8 {
        match self {
            Seventh::Major7 => 11,
            Seventh::Dominant7 => 10,
            Seventh::Diminished7 => 9,
        }
    }
}

impl Ninth {
    pub fn semitones(self) -> u8 {
        match self {
            Ninth::Natural9 => 2,
            Ninth::Flat9 => 1,
            Ninth::Sharp9 => 3,
        }
    }
}

impl Eleventh {
    pub fn semitones(self) -> u8 {
        match self {
            Eleventh::Natural11 => 5,
            Eleventh::Sharp11 => 6,
        }
    }
}

impl Thirteenth {
    pub fn semitones(self) -> u8 {
        match self {
            Thirteenth::Natural13 => 9,
            Thirteenth::Flat13 => 8,
        }
    }
}

impl Add29 {
    pub fn tone(self) -> ChordTone {
        match self {
            Add29::Add2 => ChordTone::new(Degree::Second, 2),
            Add29::Add9 => ChordTone::new(Degree::Ninth, 2),
        }
    }
}

impl Add411 {
    pub fn tone(self) -> ChordTone {
        match self {
            Add411::Add4 => ChordTone::new(Degree::Fourth, 5),
            Add411::Add11 => ChordTone::new(Degree::Eleventh, 5),
        }
    }
}

impl Add613 {
    pub fn tone(self) -> ChordTone {
        match self {
            Add613::Add6 => ChordTone::new(Degree::Sixth, 9),
            Add613::Add13 => ChordTone::new(Degree::Thirteenth, 9),
        }
    }
}

/// The tone that fills the third's slot.
pub fn third_tone(third: Third) -> ChordTone {
    match third {
        Third::Major | Third::Unset => ChordTone::new(Degree::Third, 4),
        Third::Minor => ChordTone::new(Degree::Third, 3),
        Third::Sus2 => ChordTone::new(Degree::Second, 2),
        Third::Sus4 => ChordTone::new(Degree::Fourth, 5),
    }
}

/// Computes every tone of the chord described by `spec`.
pub fn synthesize(spec: &ChordSpecification) -> Voicing {
    let (third, fifth) = spec.triad().parts();
    let mut tones = BTreeSet::new();
    tones.insert(ChordTone::new(Degree::Root, 0));
    tones.insert(third_tone(third));
    tones.insert(ChordTone::new(Degree::Fifth, fifth.semitones()));

    if let Some(seventh) = spec.seventh() {
        tones.insert(ChordTone::new(Degree::Seventh, seventh.semitones()));
    }
    if let Some(ninth) = spec.ninth() {
        tones.insert(ChordTone::new(Degree::Ninth, ninth.semitones()));
    }
    if let Some(eleventh) = spec.eleventh() {
        tones.insert(ChordTone::new(Degree::Eleventh, eleventh.semitones()));
    }
    if let Some(thirteenth) = spec.thirteenth() {
        tones.insert(ChordTone::new(Degree::Thirteenth, thirteenth.semitones()));
    }

    let added = spec.added();
    tones.extend(added.add29.map(Add29::tone));
    tones.extend(added.add411.map(Add411::tone));
    tones.extend(added.add613.map(Add613::tone));

    Voicing {
        tones: tones.into_iter().collect(),
    }
}
