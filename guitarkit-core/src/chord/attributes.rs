//! Raw chord attribute options as the caller selects them.
//!
//! Each category is an independent enum. A selection may be inconsistent;
//! the resolver turns it into a `ChordSpecification`.

use crate::error::{GuitarkitError, Result};
use std::fmt;
use std::str::FromStr;

/// An option of one chord category, with the short tag used on the command
/// line and in saved state.
pub trait ChordOption: Copy + PartialEq + fmt::Debug + Sized + 'static {
    const CATEGORY: &'static str;
    const ALL: &'static [Self];

    fn tag(self) -> &'static str;

    fn parse_tag(value: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|option| option.tag() == value)
            .ok_or_else(|| GuitarkitError::UnknownOption {
                category: Self::CATEGORY,
                value: value.to_string(),
            })
    }

    /// Parses an optional tag where `""` and `"none"` both mean no choice.
    fn parse_optional(value: &str) -> Result<Option<Self>> {
        match value.trim() {
            "" | "none" => Ok(None),
            tag => Self::parse_tag(tag).map(Some),
        }
    }
}

macro_rules! chord_option {
    ($(#[$meta:meta])* $name:ident, $category:literal { $($variant:ident => $tag:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl ChordOption for $name {
            const CATEGORY: &'static str = $category;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn tag(self) -> &'static str {
                match self {
                    $($name::$variant => $tag),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.tag())
            }
        }
    };
}

chord_option!(
    /// Major or minor third.
    Quality, "quality" { Major => "major", Minor => "minor" }
);
chord_option!(Fifth, "fifth" { Perfect => "perfect", Sharp => "sharp", Flat => "flat" });
chord_option!(
    /// Augmented or diminished triad; dominates quality and fifth.
    AugDim, "augdim" { Augmented => "aug", Diminished => "dim" }
);
chord_option!(Seventh, "seventh" { Major7 => "maj7", Dominant7 => "dom7", Diminished7 => "dim7" });
chord_option!(
    /// Replaces the third with a second or a fourth.
    Sus, "sus" { Sus2 => "sus2", Sus4 => "sus4" }
);
chord_option!(Ninth, "ninth" { Natural9 => "natural", Flat9 => "flat", Sharp9 => "sharp" });
chord_option!(Eleventh, "eleventh" { Natural11 => "natural", Sharp11 => "sharp" });
chord_option!(Thirteenth, "thirteenth" { Natural13 => "natural", Flat13 => "flat" });
chord_option!(Add29, "add29" { Add2 => "add2", Add9 => "add9" });
chord_option!(Add411, "add411" { Add4 => "add4", Add11 => "add11" });
chord_option!(Add613, "add613" { Add6 => "add6", Add13 => "add13" });

/// The raw, possibly inconsistent state of every category. `None` means the
/// category has nothing selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AttributeSelection {
    pub quality: Option<Quality>,
    pub fifth: Option<Fifth>,
    pub aug_dim: Option<AugDim>,
    pub seventh: Option<Seventh>,
    pub sus: Option<Sus>,
    pub ninth: Option<Ninth>,
    pub eleventh: Option<Eleventh>,
    pub thirteenth: Option<Thirteenth>,
    pub add29: Option<Add29>,
    pub add411: Option<Add411>,
    pub add613: Option<Add613>,
}

/// A single category changing to a new option (or to nothing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Quality(Option<Quality>),
    Fifth(Option<Fifth>),
    AugDim(Option<AugDim>),
    Seventh(Option<Seventh>),
    Sus(Option<Sus>),
    Ninth(Option<Ninth>),
    Eleventh(Option<Eleventh>),
    Thirteenth(Option<Thirteenth>),
    Add29(Option<Add29>),
    Add411(Option<Add411>),
    Add613(Option<Add613>),
}

impl Change {
    /// Category names accepted by `Change::from_str`.
    pub const CATEGORIES: [&'static str; 11] = [
        Quality::CATEGORY,
        Fifth::CATEGORY,
        AugDim::CATEGORY,
        Seventh::CATEGORY,
        Sus::CATEGORY,
        Ninth::CATEGORY,
        Eleventh::CATEGORY,
        Thirteenth::CATEGORY,
        Add29::CATEGORY,
        Add411::CATEGORY,
        Add613::CATEGORY,
    ];

    fn parse(category: &str, value: &str) -> Result<Change> {
        Ok(match category {
            "quality" => Change::Quality(Quality::parse_optional(value)?),
            "fifth" => Change::Fifth(Fifth::parse_optional(value)?),
            "augdim" => Change::AugDim(AugDim::parse_optional(value)?),
            "seventh" => Change::Seventh(Seventh::parse_optional(value)?),
            "sus" => Change::Sus(Sus::parse_optional(value)?),
            "ninth" => Change::Ninth(Ninth::parse_optional(value)?),
            "eleventh" => Change::Eleventh(Eleventh::parse_optional(value)?),
            "thirteenth" => Change::Thirteenth(Thirteenth::parse_optional(value)?),
            "add29" => Change::Add29(Add29::parse_optional(value)?),
            "add411" => Change::Add411(Add411::parse_optional(value)?),
            "add613" => Change::Add613(Add613::parse_optional(value)?),
            _ => {
                return Err(GuitarkitError::UnknownOption {
                    category: "category",
                    value: category.to_string(),
                });
            }
        })
    }
}

impl FromStr for Change {
    type Err = GuitarkitError;

    /// Parses `category=option`, e.g. `thirteenth=natural` or `sus=none`.
    fn from_str(s: &str) -> Result<Self> {
        let (category, value) = s.split_once('=').unwrap_or((s, ""));
        Change::parse(category.trim(), value)
    }
}
