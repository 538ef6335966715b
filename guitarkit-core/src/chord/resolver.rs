//! # Chord Attribute Resolver
//!
//! Turns raw attribute selections into a consistent `ChordSpecification`.
//!
//! Rules, highest priority first:
//! 1. Augmented forces a major third and sharp fifth; diminished forces a
//!    minor third and flat fifth. Clearing aug/dim follows `AugDimRelease`.
//! 2. A suspension and a quality share the third's slot, so choosing one
//!    clears the other.
//! 3. Extensions cascade downward: 13 implies 11, 11 implies 9, 9 implies a
//!    seventh. Clearing a tier drops the tiers above it but never the ones
//!    below.
//! 4. Added tones never affect any other category.
//!
//! Both entry points are pure. `normalize` handles a whole selection with no
//! event context (restore, start-up); `apply` handles one category changing.

use super::attributes::{AttributeSelection, AugDim, Change, Eleventh, Fifth, Ninth, Seventh};
use super::specification::{AddedTones, ChordSpecification, Stack, StackParts, Third, Triad};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What happens to the triad when aug/dim is cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AugDimRelease {
    /// Back to a major third and perfect fifth, whatever came before.
    #[default]
    Reset,
    /// Keep the third the released triad implied (minor after diminished)
    /// and restore the perfect fifth.
    KeepThird,
}

/// The constraint engine. Holds only policy, never chord state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChordResolver {
    release: AugDimRelease,
}

impl ChordResolver {
    pub fn new(release: AugDimRelease) -> Self {
        Self { release }
    }

    pub fn release(&self) -> AugDimRelease {
        self.release
    }

    /// Normalizes a full selection. Aug/dim beats quality and sus, a quality
    /// beats a sus, and the extension cascade fills in missing lower tiers.
    pub fn normalize(&self, selection: &AttributeSelection) -> ChordSpecification {
        let triad = match selection.aug_dim {
            Some(AugDim::Augmented) => Triad::Augmented,
            Some(AugDim::Diminished) => Triad::Diminished,
            None => {
                let third = match (selection.quality, selection.sus) {
                    (Some(quality), _) => quality.into(),
                    (None, Some(sus)) => sus.into(),
                    (None, None) => Third::Unset,
                };
                Triad::Open {
                    third,
                    fifth: selection.fifth.unwrap_or(Fifth::Perfect),
                }
            }
        };

        let stack = cascade((
            selection.seventh,
            selection.ninth,
            selection.eleventh,
            selection.thirteenth,
        ));

        let added = AddedTones {
            add29: selection.add29,
            add411: selection.add411,
            add613: selection.add613,
        };

        let spec = ChordSpecification::from_parts(triad, stack, added);
        debug!(?selection, ?spec, "normalized selection");
        spec
    }

    /// Applies one category change to an already consistent specification.
    pub fn apply(&self, spec: &ChordSpecification, change: Change) -> ChordSpecification {
        let mut triad = spec.triad();
        let (seventh, ninth, eleventh, thirteenth) = spec.stack().parts();
        let mut stack = spec.stack();
        let mut added = spec.added();

        match change {
            Change::AugDim(Some(AugDim::Augmented)) => triad = Triad::Augmented,
            Change::AugDim(Some(AugDim::Diminished)) => triad = Triad::Diminished,
            Change::AugDim(None) => triad = self.release_aug_dim(triad),
            Change::Quality(Some(quality)) => {
                triad = match (triad, Third::from(quality)) {
                    (Triad::Augmented, Third::Major) | (Triad::Diminished, Third::Minor) => triad,
                    (_, third) => Triad::Open {
                        third,
                        fifth: triad.parts().1,
                    },
                }
            }
            Change::Quality(None) => {
                let (third, fifth) = triad.parts();
                if matches!(third, Third::Major | Third::Minor) {
                    triad = Triad::Open {
                        third: Third::Unset,
                        fifth,
                    };
                }
            }
            Change::Sus(Some(sus)) => {
                triad = Triad::Open {
                    third: sus.into(),
                    fifth: triad.parts().1,
                }
            }
            Change::Sus(None) => {
                if let Triad::Open {
                    third: Third::Sus2 | Third::Sus4,
                    fifth,
                } = triad
                {
                    triad = Triad::Open {
                        third: Third::Unset,
                        fifth,
                    };
                }
            }
            Change::Fifth(fifth) => {
                let fifth = fifth.unwrap_or(Fifth::Perfect);
                triad = match (triad, fifth) {
                    (Triad::Augmented, Fifth::Sharp) | (Triad::Diminished, Fifth::Flat) => triad,
                    _ => Triad::Open {
                        third: triad.parts().0,
                        fifth,
                    },
                }
            }
            Change::Seventh(Some(s)) => stack = cascade((Some(s), ninth, eleventh, thirteenth)),
            Change::Seventh(None) => stack = Stack::Triad,
            Change::Ninth(Some(n)) => stack = cascade((seventh, Some(n), eleventh, thirteenth)),
            Change::Ninth(None) => stack = cascade((seventh, None, None, None)),
            Change::Eleventh(Some(e)) => stack = cascade((seventh, ninth, Some(e), thirteenth)),
            Change::Eleventh(None) => stack = cascade((seventh, ninth, None, None)),
            Change::Thirteenth(Some(t)) => stack = cascade((seventh, ninth, eleventh, Some(t))),
            Change::Thirteenth(None) => stack = cascade((seventh, ninth, eleventh, None)),
            Change::Add29(tone) => added.add29 = tone,
            Change::Add411(tone) => added.add411 = tone,
            Change::Add613(tone) => added.add613 = tone,
        }

        let next = ChordSpecification::from_parts(triad, stack, added);
        debug!(?change, before = ?spec, after = ?next, "applied change");
        next
    }

    /// Applies a sequence of changes in order.
    pub fn apply_all(
        &self,
        spec: &ChordSpecification,
        changes: impl IntoIterator<Item = Change>,
    ) -> ChordSpecification {
        changes
            .into_iter()
            .fold(*spec, |current, change| self.apply(&current, change))
    }

    fn release_aug_dim(&self, triad: Triad) -> Triad {
        match self.release {
            AugDimRelease::Reset => Triad::Open {
                third: Third::Major,
                fifth: Fifth::Perfect,
            },
            AugDimRelease::KeepThird => match triad {
                Triad::Augmented => Triad::Open {
                    third: Third::Major,
                    fifth: Fifth::Perfect,
                },
                Triad::Diminished => Triad::Open {
                    third: Third::Minor,
                    fifth: Fifth::Perfect,
                },
                open @ Triad::Open { .. } => open,
            },
        }
    }
}

/// Builds a stack from per-category choices, filling every tier below the
/// highest chosen one with its default.
fn cascade((seventh, ninth, eleventh, thirteenth): StackParts) -> Stack {
    let seventh_or_default = || {
        seventh.unwrap_or_else(|| {
            debug!("extension implies a seventh, defaulting to dominant 7");
            Seventh::Dominant7
        })
    };
    let ninth_or_default = || {
        ninth.unwrap_or_else(|| {
            debug!("extension implies a ninth, defaulting to natural 9");
            Ninth::Natural9
        })
    };

    match (seventh, ninth, eleventh, thirteenth) {
        (_, _, _, Some(t)) => Stack::Thirteenth(
            seventh_or_default(),
            ninth_or_default(),
            eleventh.unwrap_or_else(|| {
                debug!("13th implies an 11th, defaulting to natural 11");
                Eleventh::Natural11
            }),
            t,
        ),
        (_, _, Some(e), None) => Stack::Eleventh(seventh_or_default(), ninth_or_default(), e),
        (_, Some(n), None, None) => Stack::Ninth(seventh_or_default(), n),
        (Some(s), None, None, None) => Stack::Seventh(s),
        (None, None, None, None) => Stack::Triad,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::attributes::{Add29, Quality, Sus, Thirteenth};

    fn resolver() -> ChordResolver {
        ChordResolver::default()
    }

    fn spec_of(selection: AttributeSelection) -> ChordSpecification {
        resolver().normalize(&selection)
    }

    #[test]
    fn thirteenth_cascades_down_to_the_ninth() {
        let r = resolver();
        let start = spec_of(AttributeSelection {
            quality: Some(Quality::Major),
            seventh: Some(Seventh::Dominant7),
            ..Default::default()
        });
        let spec = r.apply(&start, Change::Thirteenth(Some(Thirteenth::Natural13)));
        assert_eq!(spec.eleventh(), Some(Eleventh::Natural11));
        assert_eq!(spec.ninth(), Some(Ninth::Natural9));
        assert_eq!(spec.seventh(), Some(Seventh::Dominant7));
    }

    #[test]
    fn cascade_keeps_explicit_lower_tiers() {
        let spec = spec_of(AttributeSelection {
            seventh: Some(Seventh::Major7),
            ninth: Some(Ninth::Sharp9),
            thirteenth: Some(Thirteenth::Flat13),
            ..Default::default()
        });
        assert_eq!(
            spec.stack(),
            Stack::Thirteenth(
                Seventh::Major7,
                Ninth::Sharp9,
                Eleventh::Natural11,
                Thirteenth::Flat13
            )
        );
    }

    #[test]
    fn any_ninth_brings_a_seventh() {
        let r = resolver();
        let spec = r.apply(&ChordSpecification::default(), Change::Ninth(Some(Ninth::Flat9)));
        assert_eq!(spec.seventh(), Some(Seventh::Dominant7));
    }

    #[test]
    fn clearing_a_higher_tier_keeps_the_lower_ones() {
        let r = resolver();
        let full = r.apply(
            &ChordSpecification::default(),
            Change::Thirteenth(Some(Thirteenth::Natural13)),
        );
        let spec = r.apply(&full, Change::Thirteenth(None));
        assert_eq!(spec.eleventh(), Some(Eleventh::Natural11));
        assert_eq!(spec.ninth(), Some(Ninth::Natural9));
        assert_eq!(spec.thirteenth(), None);
    }

    #[test]
    fn clearing_a_lower_tier_drops_what_depends_on_it() {
        let r = resolver();
        let full = r.apply(
            &ChordSpecification::default(),
            Change::Thirteenth(Some(Thirteenth::Natural13)),
        );
        let spec = r.apply(&full, Change::Ninth(None));
        assert_eq!(spec.stack(), Stack::Seventh(Seventh::Dominant7));
        assert_eq!(r.apply(&full, Change::Seventh(None)).stack(), Stack::Triad);
    }

    #[test]
    fn diminished_overrides_previous_major_and_sus() {
        let r = resolver();
        for prior in [Change::Quality(Some(Quality::Major)), Change::Sus(Some(Sus::Sus4))] {
            let before = r.apply(&ChordSpecification::default(), prior);
            let spec = r.apply(&before, Change::AugDim(Some(AugDim::Diminished)));
            assert_eq!(spec.quality(), Some(Quality::Minor));
            assert_eq!(spec.fifth(), Fifth::Flat);
            assert_eq!(spec.sus(), None);
        }
    }

    #[test]
    fn sus_and_quality_clear_each_other() {
        let r = resolver();
        let minor = r.apply(&ChordSpecification::default(), Change::Quality(Some(Quality::Minor)));
        let sus = r.apply(&minor, Change::Sus(Some(Sus::Sus4)));
        assert_eq!(sus.quality(), None);
        assert_eq!(sus.sus(), Some(Sus::Sus4));

        let back = r.apply(&sus, Change::Quality(Some(Quality::Major)));
        assert_eq!(back.quality(), Some(Quality::Major));
        assert_eq!(back.sus(), None);
    }

    #[test]
    fn sus_releases_aug_but_keeps_its_fifth() {
        let r = resolver();
        let aug = r.apply(&ChordSpecification::default(), Change::AugDim(Some(AugDim::Augmented)));
        let spec = r.apply(&aug, Change::Sus(Some(Sus::Sus2)));
        assert_eq!(spec.aug_dim(), None);
        assert_eq!(spec.fifth(), Fifth::Sharp);
        assert_eq!(spec.sus(), Some(Sus::Sus2));
    }

    #[test]
    fn conflicting_quality_or_fifth_releases_aug_dim() {
        let r = resolver();
        let dim = r.apply(&ChordSpecification::default(), Change::AugDim(Some(AugDim::Diminished)));

        let major = r.apply(&dim, Change::Quality(Some(Quality::Major)));
        assert_eq!(major.aug_dim(), None);
        assert_eq!(major.fifth(), Fifth::Flat);

        let natural = r.apply(&dim, Change::Fifth(Some(Fifth::Perfect)));
        assert_eq!(natural.aug_dim(), None);
        assert_eq!(natural.quality(), Some(Quality::Minor));

        // Agreeing choices leave it alone.
        assert_eq!(r.apply(&dim, Change::Quality(Some(Quality::Minor))), dim);
        assert_eq!(r.apply(&dim, Change::Fifth(Some(Fifth::Flat))), dim);
    }

    #[test]
    fn clearing_aug_dim_resets_to_major_by_default() {
        let r = ChordResolver::new(AugDimRelease::Reset);
        let minor = r.apply(&ChordSpecification::default(), Change::Quality(Some(Quality::Minor)));
        let dim = r.apply(&minor, Change::AugDim(Some(AugDim::Diminished)));
        let released = r.apply(&dim, Change::AugDim(None));
        assert_eq!(released.quality(), Some(Quality::Major));
        assert_eq!(released.fifth(), Fifth::Perfect);

        // The reset also hits a plain minor chord that never had aug/dim.
        let reset = r.apply(&minor, Change::AugDim(None));
        assert_eq!(reset.quality(), Some(Quality::Major));
    }

    #[test]
    fn keep_third_release_preserves_minor() {
        let r = ChordResolver::new(AugDimRelease::KeepThird);
        let dim = r.apply(&ChordSpecification::default(), Change::AugDim(Some(AugDim::Diminished)));
        let released = r.apply(&dim, Change::AugDim(None));
        assert_eq!(released.quality(), Some(Quality::Minor));
        assert_eq!(released.fifth(), Fifth::Perfect);

        let minor = r.apply(&ChordSpecification::default(), Change::Quality(Some(Quality::Minor)));
        assert_eq!(r.apply(&minor, Change::AugDim(None)), minor);
    }

    #[test]
    fn added_tones_touch_nothing_else() {
        let r = resolver();
        let start = spec_of(AttributeSelection {
            sus: Some(Sus::Sus2),
            ..Default::default()
        });
        let spec = r.apply(&start, Change::Add29(Some(Add29::Add9)));
        assert_eq!(spec.triad(), start.triad());
        assert_eq!(spec.stack(), Stack::Triad);
        assert_eq!(spec.added().add29, Some(Add29::Add9));
    }

    #[test]
    fn normalize_lets_aug_dim_win_then_quality_over_sus() {
        let aug = spec_of(AttributeSelection {
            quality: Some(Quality::Minor),
            sus: Some(Sus::Sus4),
            aug_dim: Some(AugDim::Augmented),
            fifth: Some(Fifth::Flat),
            ..Default::default()
        });
        assert_eq!(aug.triad(), Triad::Augmented);

        let both = spec_of(AttributeSelection {
            quality: Some(Quality::Minor),
            sus: Some(Sus::Sus4),
            ..Default::default()
        });
        assert_eq!(both.quality(), Some(Quality::Minor));
        assert_eq!(both.sus(), None);
    }

    #[test]
    fn apply_all_replays_in_order() {
        let r = resolver();
        let spec = r.apply_all(
            &ChordSpecification::default(),
            [
                Change::Sus(Some(Sus::Sus4)),
                Change::Quality(Some(Quality::Minor)),
                Change::Seventh(Some(Seventh::Dominant7)),
            ],
        );
        assert_eq!(spec.quality(), Some(Quality::Minor));
        assert_eq!(spec.sus(), None);
        assert_eq!(spec.seventh(), Some(Seventh::Dominant7));
    }
}
