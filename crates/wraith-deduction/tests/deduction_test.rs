use proptest::prelude::*;

use test_fixtures::{decoy_catalog, hid, three_hypothesis_catalog, E1, E2, E3};
use wraith_core::catalog::{Catalog, Clue};
use wraith_core::models::{ClueBoard, ClueMark, HypothesisBoard, HypothesisMark};
use wraith_deduction::{consistent_hypotheses, deduce, resolve_hypothesis};

// ── Concrete scenarios ────────────────────────────────────────────────────

#[test]
fn affirm_then_exclude_narrows_to_one() {
    let catalog = three_hypothesis_catalog();
    let hyps = HypothesisBoard::for_catalog(&catalog);
    let mut clues = ClueBoard::new();

    clues.set(E1, ClueMark::Affirmed);
    assert_eq!(consistent_hypotheses(&clues, &catalog), vec![hid("H1"), hid("H2")]);
    assert_eq!(resolve_hypothesis(&hyps, &clues, &catalog), None);

    clues.set(E3, ClueMark::Excluded);
    assert_eq!(consistent_hypotheses(&clues, &catalog), vec![hid("H1")]);
    assert_eq!(resolve_hypothesis(&hyps, &clues, &catalog), Some(hid("H1")));
}

#[test]
fn empty_board_keeps_whole_catalog_and_resolves_nothing() {
    let catalog = three_hypothesis_catalog();
    let hyps = HypothesisBoard::for_catalog(&catalog);
    let clues = ClueBoard::new();

    let d = deduce(&hyps, &clues, &catalog);
    assert_eq!(d.consistent.len(), 3);
    assert_eq!(d.resolved, None);
}

#[test]
fn contradictory_marks_yield_empty_set_not_error() {
    let catalog = three_hypothesis_catalog();
    let hyps = HypothesisBoard::for_catalog(&catalog);
    let mut clues = ClueBoard::new();
    // No hypothesis requires Fingerprints.
    clues.set(Clue::Fingerprints, ClueMark::Affirmed);

    let d = deduce(&hyps, &clues, &catalog);
    assert!(d.consistent.is_empty());
    assert_eq!(d.resolved, None);
}

#[test]
fn explicit_selection_beats_inference() {
    let catalog = three_hypothesis_catalog();
    let mut hyps = HypothesisBoard::for_catalog(&catalog);
    let mut clues = ClueBoard::new();
    clues.set(E1, ClueMark::Affirmed);
    clues.set(E3, ClueMark::Excluded);
    hyps.set(&hid("H3"), HypothesisMark::Selected);

    // H3 is inconsistent, but it was picked explicitly.
    assert_eq!(resolve_hypothesis(&hyps, &clues, &catalog), Some(hid("H3")));
    assert_eq!(deduce(&hyps, &clues, &catalog).consistent, vec![hid("H1")]);
}

#[test]
fn decoy_is_ignored_for_its_owner_only() {
    let catalog = decoy_catalog();
    let mut clues = ClueBoard::new();
    clues.set(E3, ClueMark::Affirmed);

    // H1 has E3 as decoy so it stays; H2 and H3 require E3.
    assert_eq!(
        consistent_hypotheses(&clues, &catalog),
        vec![hid("H1"), hid("H2"), hid("H3")]
    );

    clues.set(E3, ClueMark::Excluded);
    assert_eq!(consistent_hypotheses(&clues, &catalog), vec![hid("H1")]);
}

#[test]
fn standard_catalog_identifies_a_spirit() {
    let catalog = Catalog::standard();
    let hyps = HypothesisBoard::for_catalog(&catalog);
    let mut clues = ClueBoard::new();
    clues.set(Clue::EmfLevel5, ClueMark::Affirmed);
    clues.set(Clue::SpiritBox, ClueMark::Affirmed);
    clues.set(Clue::GhostWriting, ClueMark::Affirmed);

    assert_eq!(resolve_hypothesis(&hyps, &clues, &catalog), Some(hid("Spirit")));
}

#[test]
fn standard_mimic_survives_orbs_either_way() {
    let catalog = Catalog::standard();
    let mut clues = ClueBoard::new();
    clues.set(Clue::SpiritBox, ClueMark::Affirmed);
    clues.set(Clue::Fingerprints, ClueMark::Affirmed);
    clues.set(Clue::FreezingTemperatures, ClueMark::Affirmed);
    clues.set(Clue::GhostOrbs, ClueMark::Affirmed);

    assert_eq!(consistent_hypotheses(&clues, &catalog), vec![hid("Mimic")]);
}

// ── Properties ────────────────────────────────────────────────────────────

fn clue_mark() -> impl Strategy<Value = ClueMark> {
    prop_oneof![
        Just(ClueMark::Unset),
        Just(ClueMark::Affirmed),
        Just(ClueMark::Excluded),
    ]
}

fn board() -> impl Strategy<Value = ClueBoard> {
    prop::collection::vec(clue_mark(), Clue::ALL.len()).prop_map(|marks| {
        let mut board = ClueBoard::new();
        for (clue, mark) in Clue::ALL.iter().zip(marks) {
            board.set(*clue, mark);
        }
        board
    })
}

proptest! {
    /// H is consistent iff every affirmed clue is required and no excluded
    /// clue is required, ignoring H's decoys.
    #[test]
    fn consistency_matches_definition(clues in board(), use_decoys in any::<bool>()) {
        let catalog = if use_decoys { decoy_catalog() } else { Catalog::standard() };
        let consistent = consistent_hypotheses(&clues, &catalog);

        for h in catalog.hypotheses() {
            let expected = clues.affirmed().filter(|c| !h.is_decoy(*c)).all(|c| h.requires(c))
                && !clues.excluded().filter(|c| !h.is_decoy(*c)).any(|c| h.requires(c));
            prop_assert_eq!(consistent.contains(&h.id), expected, "hypothesis {}", h.id);
        }
    }

    /// Without a selection, resolution is exactly "the only consistent one".
    #[test]
    fn resolution_without_selection_is_unique_consistent(clues in board()) {
        let catalog = Catalog::standard();
        let hyps = HypothesisBoard::for_catalog(&catalog);
        let consistent = consistent_hypotheses(&clues, &catalog);
        let resolved = resolve_hypothesis(&hyps, &clues, &catalog);
        if consistent.len() == 1 {
            prop_assert_eq!(resolved, Some(consistent[0].clone()));
        } else {
            prop_assert_eq!(resolved, None);
        }
    }

    /// Same inputs, same answer.
    #[test]
    fn deduction_is_deterministic(clues in board()) {
        let catalog = Catalog::standard();
        let hyps = HypothesisBoard::for_catalog(&catalog);
        prop_assert_eq!(deduce(&hyps, &clues, &catalog), deduce(&hyps, &clues, &catalog));
    }
}

#[test]
fn e2_alone_keeps_h1_and_h3() {
    let catalog = three_hypothesis_catalog();
    let mut clues = ClueBoard::new();
    clues.set(E2, ClueMark::Affirmed);
    assert_eq!(consistent_hypotheses(&clues, &catalog), vec![hid("H1"), hid("H3")]);
}
