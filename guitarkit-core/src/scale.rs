//! # Scale Module
//!
//! Builds the diatonic major scale for a root and spells it so that the seven
//! degrees use seven distinct letters. Also owns the key-context spelling rule
//! used for any tone, diatonic or not.

use crate::pitch::{Accidental, KeyDirection, PitchClass, Spelling, key_for, spellings_for};

/// Whole, whole, half, whole, whole, whole, half.
pub const MAJOR_STEPS: [u8; 7] = [2, 2, 1, 2, 2, 2, 1];

/// The seven pitch classes of the major scale on `root`.
pub fn scale_for(root: PitchClass) -> [PitchClass; 7] {
    let mut scale = [root; 7];
    let mut current = root;
    for (degree, step) in MAJOR_STEPS.iter().take(6).enumerate() {
        current = current.transpose(*step as i32);
        scale[degree + 1] = current;
    }
    scale
}

/// The major scale on `root`, one letter per degree starting at the key's tonic.
pub fn spelled_scale(root: PitchClass) -> [Spelling; 7] {
    let tonic = key_for(root).tonic;
    let mut spelled = [tonic; 7];
    for (degree, pc) in scale_for(root).into_iter().enumerate() {
        spelled[degree] = degree_spelling(root, degree, pc).unwrap_or(tonic);
    }
    spelled
}

/// Spells `pc` as scale degree `degree` (0-based) of the key on `root`.
///
/// The letter is fixed by the degree, so the accidental absorbs any alteration.
/// Returns `None` only if the alteration would need more than a double accidental.
pub fn degree_spelling(root: PitchClass, degree: usize, pc: PitchClass) -> Option<Spelling> {
    let letter = key_for(root).tonic.letter.offset(degree);
    Spelling::on_letter(letter, pc)
}

/// Picks how `pc` should be written in the key of `root`.
///
/// Diatonic tones take the scale's spelling. Anything else prefers its
/// natural name, then the spelling leaning the same way as the key.
pub fn preferred_spelling(pc: PitchClass, root: PitchClass) -> Spelling {
    let scale = scale_for(root);
    if let Some(degree) = scale.iter().position(|&tone| tone == pc) {
        if let Some(spelling) = degree_spelling(root, degree, pc) {
            return spelling;
        }
    }

    let spellings = spellings_for(pc);
    let wanted = match key_for(root).direction {
        KeyDirection::Sharps => Accidental::Sharp,
        KeyDirection::Flats => Accidental::Flat,
    };
    spellings
        .iter()
        .find(|s| s.accidental == Accidental::Natural)
        .or_else(|| spellings.iter().find(|s| s.accidental == wanted))
        .copied()
        .unwrap_or(spellings[0])
}

/// The scale as display text, e.g. `"Eb F G Ab Bb C D"`.
pub fn scale_display(root: PitchClass) -> String {
    spelled_scale(root)
        .iter()
        .map(|spelling| spelling.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
