//! # Symbol Formatter
//!
//! Renders the canonical chord symbol. Components always appear in this
//! order: root, quality, altered fifth, seventh/extension, added tones, sus.
//! Inactive categories emit nothing, so an all-none chord is just its root.

use super::attributes::{Fifth, Seventh};
use super::intervals::{ChordTone, Degree};
use super::specification::{ChordSpecification, Third, Triad};
use crate::pitch::PitchClass;

pub use crate::scale::scale_display;

/// The full chord symbol, e.g. `"C13"`, `"Adim7"` or `"Fmaj7(#11)"`.
pub fn chord_symbol(root: PitchClass, spec: &ChordSpecification) -> String {
    let mut symbol = root.name().to_string();
    symbol.push_str(quality_marker(spec));
    symbol.push_str(fifth_marker(spec));
    symbol.push_str(&stack_marker(spec));
    for marker in add_markers(spec) {
        symbol.push_str(&marker);
    }
    symbol.push_str(sus_marker(spec));
    symbol
}

fn quality_marker(spec: &ChordSpecification) -> &'static str {
    match (spec.triad(), spec.seventh()) {
        (Triad::Augmented, _) => "aug",
        (Triad::Diminished, Some(Seventh::Dominant7)) => "ø",
        (Triad::Diminished, _) => "dim",
        (Triad::Open { third: Third::Minor, .. }, _) => "m",
        (Triad::Open { .. }, _) => "",
    }
}

/// Aug/dim already imply their fifth, so only an open triad shows one.
fn fifth_marker(spec: &ChordSpecification) -> &'static str {
    match spec.triad() {
        Triad::Open { fifth: Fifth::Sharp, .. } => "(#5)",
        Triad::Open { fifth: Fifth::Flat, .. } => "(b5)",
        _ => "",
    }
}

/// The seventh, merged with the highest extension. A natural extension takes
/// over the seventh's number; an altered one is appended in parentheses.
fn stack_marker(spec: &ChordSpecification) -> String {
    let Some(seventh) = spec.seventh() else {
        return String::new();
    };

    let prefix = match (seventh, spec.triad()) {
        (Seventh::Major7, _) => "maj",
        (Seventh::Dominant7, _) => "",
        (Seventh::Diminished7, Triad::Diminished) => "",
        (Seventh::Diminished7, _) => "°",
    };

    let highest = spec
        .thirteenth()
        .map(|t| ChordTone::new(Degree::Thirteenth, t.semitones()))
        .or_else(|| spec.eleventh().map(|e| ChordTone::new(Degree::Eleventh, e.semitones())))
        .or_else(|| spec.ninth().map(|n| ChordTone::new(Degree::Ninth, n.semitones())));

    match highest {
        None => format!("{prefix}7"),
        Some(tone) if tone.alteration() == 0 => format!("{prefix}{tone}"),
        Some(tone) => format!("{prefix}7({tone})"),
    }
}

fn add_markers(spec: &ChordSpecification) -> Vec<String> {
    let stacked: Vec<ChordTone> = [
        spec.ninth().map(|n| ChordTone::new(Degree::Ninth, n.semitones())),
        spec.eleventh().map(|e| ChordTone::new(Degree::Eleventh, e.semitones())),
        spec.thirteenth().map(|t| ChordTone::new(Degree::Thirteenth, t.semitones())),
    ]
    .into_iter()
    .flatten()
    .collect();

    let added = spec.added();
    [
        added.add29.map(|a| a.tone()),
        added.add411.map(|a| a.tone()),
        added.add613.map(|a| a.tone()),
    ]
    .into_iter()
    .flatten()
    .filter(|tone| !stacked.contains(tone))
    .map(|tone| format!("add{}", tone.degree.number()))
    .collect()
}

fn sus_marker(spec: &ChordSpecification) -> &'static str {
    match spec.triad() {
        Triad::Open { third: Third::Sus2, .. } => "sus2",
        Triad::Open { third: Third::Sus4, .. } => "sus4",
        _ => "",
    }
}
