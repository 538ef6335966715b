//! # Pitch Class Module
//!
//! This module holds the static pitch data every other part of the toolkit
//! builds on: the 12 pitch classes, their enharmonic spellings, and the key
//! table that decides which spelling a given key prefers.
//!
//! ## Features
//! - `PitchClass` arithmetic modulo 12
//! - Letter / accidental spellings with parsing and display
//! - Table-driven enharmonic spellings (`SPELLINGS`)
//! - Table-driven key context (`KEYS`): tonic name and accidental direction

use crate::error::{GuitarkitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the 12 pitch classes, counted in semitones above C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);

    /// Builds a pitch class from any semitone count, wrapping modulo 12.
    pub fn new(semitones: i32) -> Self {
        PitchClass(semitones.rem_euclid(12) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn transpose(self, semitones: i32) -> Self {
        Self::new(self.0 as i32 + semitones)
    }

    /// Semitones from `self` up to `other`, in 0..12.
    pub fn interval_to(self, other: PitchClass) -> u8 {
        (other.0 as i32 - self.0 as i32).rem_euclid(12) as u8
    }

    /// All 12 pitch classes, starting at C.
    pub fn all() -> impl Iterator<Item = PitchClass> {
        (0..12).map(PitchClass)
    }

    /// Parses any spelling ("C#", "Db", "B#", "E♭") into its pitch class.
    pub fn parse(name: &str) -> Result<PitchClass> {
        Ok(name.parse::<Spelling>()?.pitch_class())
    }

    /// The name this pitch class carries as a key tonic ("Db", "F#", ...).
    pub fn name(self) -> Spelling {
        key_for(self).tonic
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The seven natural note letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// The pitch class of the unaltered letter.
    pub fn natural(self) -> PitchClass {
        const NATURALS: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];
        PitchClass(NATURALS[self.index()])
    }

    /// The letter `steps` positions further up the letter cycle.
    pub fn offset(self, steps: usize) -> Letter {
        Letter::ALL[(self.index() + steps) % 7]
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }

    fn from_char(c: char) -> Option<Letter> {
        Letter::ALL
            .into_iter()
            .find(|letter| letter.as_char() == c.to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accidental {
    DoubleFlat,
    Flat,
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    pub fn semitones(self) -> i32 {
        match self {
            Accidental::DoubleFlat => -2,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
        }
    }

    pub fn from_semitones(semitones: i32) -> Option<Accidental> {
        match semitones {
            -2 => Some(Accidental::DoubleFlat),
            -1 => Some(Accidental::Flat),
            0 => Some(Accidental::Natural),
            1 => Some(Accidental::Sharp),
            2 => Some(Accidental::DoubleSharp),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "bb",
            Accidental::Flat => "b",
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::DoubleSharp => "##",
        }
    }
}

/// A written note name: letter plus accidental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spelling {
    pub letter: Letter,
    pub accidental: Accidental,
}

impl Spelling {
    pub const fn new(letter: Letter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    pub fn pitch_class(self) -> PitchClass {
        self.letter.natural().transpose(self.accidental.semitones())
    }

    /// Spells `pc` on `letter`, or `None` if that needs more than a double accidental.
    pub fn on_letter(letter: Letter, pc: PitchClass) -> Option<Spelling> {
        let mut diff = letter.natural().interval_to(pc) as i32;
        if diff > 6 {
            diff -= 12;
        }
        Accidental::from_semitones(diff).map(|accidental| Spelling::new(letter, accidental))
    }
}

impl fmt::Display for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter.as_char(), self.accidental.symbol())
    }
}

impl FromStr for Spelling {
    type Err = GuitarkitError;

    fn from_str(name: &str) -> Result<Self> {
        let unknown = || GuitarkitError::UnknownTone(name.to_string());
        let mut chars = name.trim().chars();
        let letter = chars.next().and_then(Letter::from_char).ok_or_else(unknown)?;

        let mut shift = 0;
        for c in chars {
            shift += match c {
                '#' | '♯' => 1,
                'b' | '♭' => -1,
                _ => return Err(unknown()),
            };
        }

        let accidental = Accidental::from_semitones(shift).ok_or_else(unknown)?;
        Ok(Spelling::new(letter, accidental))
    }
}

/// Which accidental a key uses for tones outside its scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDirection {
    Sharps,
    Flats,
}

/// The key context for one root: how its tonic is written and which way it leans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub tonic: Spelling,
    pub direction: KeyDirection,
}

use Accidental::{Flat, Natural, Sharp};
use Letter::*;

const fn sp(letter: Letter, accidental: Accidental) -> Spelling {
    Spelling::new(letter, accidental)
}

const fn key(tonic: Spelling, direction: KeyDirection) -> Key {
    Key { tonic, direction }
}

/// Valid single-accidental spellings per pitch class: natural, then sharp, then flat.
static SPELLINGS: [&[Spelling]; 12] = [
    &[sp(C, Natural), sp(B, Sharp)],
    &[sp(C, Sharp), sp(D, Flat)],
    &[sp(D, Natural)],
    &[sp(D, Sharp), sp(E, Flat)],
    &[sp(E, Natural), sp(F, Flat)],
    &[sp(F, Natural), sp(E, Sharp)],
    &[sp(F, Sharp), sp(G, Flat)],
    &[sp(G, Natural)],
    &[sp(G, Sharp), sp(A, Flat)],
    &[sp(A, Natural)],
    &[sp(A, Sharp), sp(B, Flat)],
    &[sp(B, Natural), sp(C, Flat)],
];

/// Major key per root pitch class. Every tonic here spells its scale with
/// single accidentals only.
static KEYS: [Key; 12] = [
    key(sp(C, Natural), KeyDirection::Sharps),
    key(sp(D, Flat), KeyDirection::Flats),
    key(sp(D, Natural), KeyDirection::Sharps),
    key(sp(E, Flat), KeyDirection::Flats),
    key(sp(E, Natural), KeyDirection::Sharps),
    key(sp(F, Natural), KeyDirection::Flats),
    key(sp(F, Sharp), KeyDirection::Sharps),
    key(sp(G, Natural), KeyDirection::Sharps),
    key(sp(A, Flat), KeyDirection::Flats),
    key(sp(A, Natural), KeyDirection::Sharps),
    key(sp(B, Flat), KeyDirection::Flats),
    key(sp(B, Natural), KeyDirection::Sharps),
];

/// Returns the valid spellings of a pitch class. Never empty.
pub fn spellings_for(pc: PitchClass) -> &'static [Spelling] {
    SPELLINGS[pc.value() as usize]
}

/// Returns the key context used when `root` is the tonic.
pub fn key_for(root: PitchClass) -> &'static Key {
    &KEYS[root.value() as usize]
}
