use wraith_core::catalog::{Catalog, Clue, Hypothesis, HypothesisId};
use wraith_core::errors::CatalogError;

// ── Standard catalog ──────────────────────────────────────────────────────

#[test]
fn standard_catalog_passes_validation() {
    let standard = Catalog::standard();
    let rebuilt = Catalog::new(standard.hypotheses().to_vec()).expect("standard catalog is valid");
    assert_eq!(rebuilt.len(), 24);
}

#[test]
fn every_standard_hypothesis_has_three_evidences() {
    for h in Catalog::standard().hypotheses() {
        assert_eq!(h.evidences.len(), 3, "{} should list three clues", h.id);
    }
}

#[test]
fn mimic_carries_orbs_as_decoy() {
    let catalog = Catalog::standard();
    let mimic = catalog.get(&HypothesisId::from("Mimic")).unwrap();
    assert!(mimic.is_decoy(Clue::GhostOrbs));
    assert!(!mimic.requires(Clue::GhostOrbs));
}

// ── Validation ────────────────────────────────────────────────────────────

#[test]
fn rejects_empty_catalog() {
    assert!(matches!(Catalog::new(vec![]), Err(CatalogError::Empty)));
}

#[test]
fn rejects_duplicate_ids() {
    let err = Catalog::new(vec![
        Hypothesis::new("A", [Clue::SpiritBox]),
        Hypothesis::new("A", [Clue::GhostOrbs]),
    ])
    .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateHypothesis { id } if id == "A"));
}

#[test]
fn rejects_decoy_overlapping_evidence() {
    let err = Catalog::new(vec![
        Hypothesis::new("A", [Clue::SpiritBox]).with_decoys([Clue::SpiritBox])
    ])
    .unwrap_err();
    assert!(matches!(err, CatalogError::DecoyOverlapsEvidence { .. }));
}

// ── TOML loading ──────────────────────────────────────────────────────────

#[test]
fn loads_catalog_from_toml() {
    let catalog = Catalog::from_toml(
        r#"
        [[hypothesis]]
        id = "H1"
        evidences = ["emf_level_5", "spirit_box"]

        [[hypothesis]]
        id = "H2"
        evidences = ["emf_level_5", "ghost_writing"]
        decoys = ["ghost_orbs"]
        "#,
    )
    .unwrap();

    assert_eq!(catalog.len(), 2);
    let ids: Vec<_> = catalog.ids().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["H1", "H2"]);
    assert!(catalog
        .get(&"H2".into())
        .unwrap()
        .is_decoy(Clue::GhostOrbs));
}

#[test]
fn unknown_clue_in_toml_is_a_parse_error() {
    let err = Catalog::from_toml(
        r#"
        [[hypothesis]]
        id = "H1"
        evidences = ["ectoplasm"]
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::Parse { .. }));
}
