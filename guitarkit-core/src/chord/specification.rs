//! The normalized chord description.
//!
//! `ChordSpecification` can only be built by the resolver. Its shape makes the
//! invalid combinations unrepresentable: the third is a single slot (so a
//! quality and a suspension never coexist), aug/dim carry their own third and
//! fifth, and the extension stack cannot skip a tier.

use super::attributes::{
    Add29, Add411, Add613, AttributeSelection, AugDim, Eleventh, Fifth, Ninth, Quality, Seventh,
    Sus, Thirteenth,
};

/// What sits in the third's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Third {
    Major,
    Minor,
    Sus2,
    Sus4,
    /// Nothing chosen; sounds as a major third.
    Unset,
}

impl From<Quality> for Third {
    fn from(quality: Quality) -> Self {
        match quality {
            Quality::Major => Third::Major,
            Quality::Minor => Third::Minor,
        }
    }
}

impl From<Sus> for Third {
    fn from(sus: Sus) -> Self {
        match sus {
            Sus::Sus2 => Third::Sus2,
            Sus::Sus4 => Third::Sus4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Triad {
    /// Major third, sharp fifth.
    Augmented,
    /// Minor third, flat fifth.
    Diminished,
    Open { third: Third, fifth: Fifth },
}

impl Triad {
    /// The third and fifth this triad sounds.
    pub fn parts(self) -> (Third, Fifth) {
        match self {
            Triad::Augmented => (Third::Major, Fifth::Sharp),
            Triad::Diminished => (Third::Minor, Fifth::Flat),
            Triad::Open { third, fifth } => (third, fifth),
        }
    }
}

/// Seventh and upper extensions. Each tier requires every tier below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stack {
    Triad,
    Seventh(Seventh),
    Ninth(Seventh, Ninth),
    Eleventh(Seventh, Ninth, Eleventh),
    Thirteenth(Seventh, Ninth, Eleventh, Thirteenth),
}

/// The flat, per-category view of a stack.
pub type StackParts = (
    Option<Seventh>,
    Option<Ninth>,
    Option<Eleventh>,
    Option<Thirteenth>,
);

impl Stack {
    pub fn parts(self) -> StackParts {
        match self {
            Stack::Triad => (None, None, None, None),
            Stack::Seventh(s) => (Some(s), None, None, None),
            Stack::Ninth(s, n) => (Some(s), Some(n), None, None),
            Stack::Eleventh(s, n, e) => (Some(s), Some(n), Some(e), None),
            Stack::Thirteenth(s, n, e, t) => (Some(s), Some(n), Some(e), Some(t)),
        }
    }
}

/// Added color tones; independent of everything else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AddedTones {
    pub add29: Option<Add29>,
    pub add411: Option<Add411>,
    pub add613: Option<Add613>,
}

/// A chord description that satisfies every consistency rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChordSpecification {
    triad: Triad,
    stack: Stack,
    added: AddedTones,
}

impl Default for ChordSpecification {
    /// The bare triad: no quality, perfect fifth, nothing stacked.
    fn default() -> Self {
        Self {
            triad: Triad::Open {
                third: Third::Unset,
                fifth: Fifth::Perfect,
            },
            stack: Stack::Triad,
            added: AddedTones::default(),
        }
    }
}

impl ChordSpecification {
    pub(super) fn from_parts(triad: Triad, stack: Stack, added: AddedTones) -> Self {
        Self {
            triad,
            stack,
            added,
        }
    }

    pub fn triad(&self) -> Triad {
        self.triad
    }

    pub fn stack(&self) -> Stack {
        self.stack
    }

    pub fn added(&self) -> AddedTones {
        self.added
    }

    pub fn aug_dim(&self) -> Option<AugDim> {
        match self.triad {
            Triad::Augmented => Some(AugDim::Augmented),
            Triad::Diminished => Some(AugDim::Diminished),
            Triad::Open { .. } => None,
        }
    }

    pub fn quality(&self) -> Option<Quality> {
        match self.triad.parts().0 {
            Third::Major => Some(Quality::Major),
            Third::Minor => Some(Quality::Minor),
            Third::Sus2 | Third::Sus4 | Third::Unset => None,
        }
    }

    pub fn sus(&self) -> Option<Sus> {
        match self.triad.parts().0 {
            Third::Sus2 => Some(Sus::Sus2),
            Third::Sus4 => Some(Sus::Sus4),
            Third::Major | Third::Minor | Third::Unset => None,
        }
    }

    pub fn fifth(&self) -> Fifth {
        self.triad.parts().1
    }

    pub fn seventh(&self) -> Option<Seventh> {
        self.stack.parts().0
    }

    pub fn ninth(&self) -> Option<Ninth> {
        self.stack.parts().1
    }

    pub fn eleventh(&self) -> Option<Eleventh> {
        self.stack.parts().2
    }

    pub fn thirteenth(&self) -> Option<Thirteenth> {
        self.stack.parts().3
    }

    /// Flattens back into per-category form. Normalizing the result gives
    /// back `self`.
    pub fn to_selection(&self) -> AttributeSelection {
        let (seventh, ninth, eleventh, thirteenth) = self.stack.parts();
        AttributeSelection {
            quality: self.quality(),
            fifth: Some(self.fifth()),
            aug_dim: self.aug_dim(),
            seventh,
            sus: self.sus(),
            ninth,
            eleventh,
            thirteenth,
            add29: self.added.add29,
            add411: self.added.add411,
            add613: self.added.add613,
        }
    }
}
