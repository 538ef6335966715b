//! Exhaustive checks of the resolver's guarantees over every selection.

use guitarkit_core::chord::attributes::{
    Add29, Add411, Add613, AttributeSelection, AugDim, Change, ChordOption, Eleventh, Fifth,
    Ninth, Quality, Seventh, Sus, Thirteenth,
};
use guitarkit_core::chord::resolver::{AugDimRelease, ChordResolver};
use guitarkit_core::chord::specification::ChordSpecification;
use guitarkit_core::chord::symbol::chord_symbol;
use guitarkit_core::PitchClass;
use std::collections::HashSet;

fn with_none<T: ChordOption>() -> Vec<Option<T>> {
    std::iter::once(None)
        .chain(T::ALL.iter().copied().map(Some))
        .collect()
}

fn expand<T: ChordOption>(
    selections: Vec<AttributeSelection>,
    set: impl Fn(&mut AttributeSelection, Option<T>),
) -> Vec<AttributeSelection> {
    let options = with_none::<T>();
    let set = &set;
    selections
        .into_iter()
        .flat_map(|selection| {
            options.iter().map(move |&option| {
                let mut next = selection;
                set(&mut next, option);
                next
            })
        })
        .collect::<Vec<_>>()
}

fn triad_and_stack_selections() -> Vec<AttributeSelection> {
    let all = vec![AttributeSelection::default()];
    let all = expand::<Quality>(all, |s, o| s.quality = o);
    let all = expand::<Fifth>(all, |s, o| s.fifth = o);
    let all = expand::<AugDim>(all, |s, o| s.aug_dim = o);
    let all = expand::<Sus>(all, |s, o| s.sus = o);
    let all = expand::<Seventh>(all, |s, o| s.seventh = o);
    let all = expand::<Ninth>(all, |s, o| s.ninth = o);
    let all = expand::<Eleventh>(all, |s, o| s.eleventh = o);
    expand::<Thirteenth>(all, |s, o| s.thirteenth = o)
}

fn all_selections() -> Vec<AttributeSelection> {
    let all = triad_and_stack_selections();
    let all = expand::<Add29>(all, |s, o| s.add29 = o);
    let all = expand::<Add411>(all, |s, o| s.add411 = o);
    expand::<Add613>(all, |s, o| s.add613 = o)
}

fn all_changes() -> Vec<Change> {
    let mut changes = Vec::new();
    changes.extend(with_none::<Quality>().into_iter().map(Change::Quality));
    changes.extend(with_none::<Fifth>().into_iter().map(Change::Fifth));
    changes.extend(with_none::<AugDim>().into_iter().map(Change::AugDim));
    changes.extend(with_none::<Seventh>().into_iter().map(Change::Seventh));
    changes.extend(with_none::<Sus>().into_iter().map(Change::Sus));
    changes.extend(with_none::<Ninth>().into_iter().map(Change::Ninth));
    changes.extend(with_none::<Eleventh>().into_iter().map(Change::Eleventh));
    changes.extend(with_none::<Thirteenth>().into_iter().map(Change::Thirteenth));
    changes.extend(with_none::<Add29>().into_iter().map(Change::Add29));
    changes.extend(with_none::<Add411>().into_iter().map(Change::Add411));
    changes.extend(with_none::<Add613>().into_iter().map(Change::Add613));
    changes
}

fn assert_consistent(spec: &ChordSpecification) {
    if spec.thirteenth().is_some() {
        assert!(spec.eleventh().is_some(), "13 without 11: {spec:?}");
    }
    if spec.eleventh().is_some() {
        assert!(spec.ninth().is_some(), "11 without 9: {spec:?}");
    }
    if spec.ninth().is_some() {
        assert!(spec.seventh().is_some(), "9 without 7: {spec:?}");
    }
    assert!(
        spec.quality().is_none() || spec.sus().is_none(),
        "quality and sus both active: {spec:?}"
    );
    match spec.aug_dim() {
        Some(AugDim::Augmented) => {
            assert_eq!(spec.quality(), Some(Quality::Major));
            assert_eq!(spec.fifth(), Fifth::Sharp);
        }
        Some(AugDim::Diminished) => {
            assert_eq!(spec.quality(), Some(Quality::Minor));
            assert_eq!(spec.fifth(), Fifth::Flat);
        }
        None => {}
    }
}

#[test]
fn normalize_is_idempotent_for_every_selection() {
    let root = PitchClass::new(7);
    for release in [AugDimRelease::Reset, AugDimRelease::KeepThird] {
        let resolver = ChordResolver::new(release);
        for selection in all_selections() {
            let spec = resolver.normalize(&selection);
            assert_consistent(&spec);
            assert_eq!(
                resolver.normalize(&spec.to_selection()),
                spec,
                "not idempotent for {selection:?}"
            );
            assert!(chord_symbol(root, &spec).starts_with('G'));
        }
    }
}

#[test]
fn every_change_keeps_specs_consistent() {
    let resolver = ChordResolver::default();
    let specs: HashSet<ChordSpecification> = triad_and_stack_selections()
        .iter()
        .map(|selection| resolver.normalize(selection))
        .collect();
    let changes = all_changes();

    for spec in &specs {
        for &change in &changes {
            let next = resolver.apply(spec, change);
            assert_consistent(&next);
            assert_eq!(resolver.normalize(&next.to_selection()), next);

            match change {
                Change::Quality(Some(quality)) => {
                    assert_eq!(next.quality(), Some(quality));
                    assert_eq!(next.sus(), None);
                }
                Change::Sus(Some(sus)) => {
                    assert_eq!(next.sus(), Some(sus));
                    assert_eq!(next.quality(), None);
                    assert_eq!(next.aug_dim(), None);
                }
                Change::Fifth(Some(fifth)) => assert_eq!(next.fifth(), fifth),
                Change::AugDim(Some(aug_dim)) => assert_eq!(next.aug_dim(), Some(aug_dim)),
                Change::Seventh(Some(seventh)) => {
                    assert_eq!(next.seventh(), Some(seventh));
                    assert_eq!(next.ninth(), spec.ninth());
                }
                Change::Seventh(None) => assert_eq!(next.ninth(), None),
                Change::Ninth(Some(ninth)) => {
                    assert_eq!(next.ninth(), Some(ninth));
                    assert!(next.seventh().is_some());
                }
                Change::Thirteenth(None) => {
                    assert_eq!(next.eleventh(), spec.eleventh());
                    assert_eq!(next.ninth(), spec.ninth());
                }
                Change::Eleventh(None) => {
                    assert_eq!(next.thirteenth(), None);
                    assert_eq!(next.ninth(), spec.ninth());
                }
                _ => {}
            }

            let touches_stack = matches!(
                change,
                Change::Seventh(_) | Change::Ninth(_) | Change::Eleventh(_) | Change::Thirteenth(_)
            );
            if touches_stack {
                assert_eq!(next.triad(), spec.triad());
            } else {
                assert_eq!(next.stack(), spec.stack());
            }
            if !matches!(change, Change::Add29(_) | Change::Add411(_) | Change::Add613(_)) {
                assert_eq!(next.added(), spec.added());
            }
        }
    }
}
