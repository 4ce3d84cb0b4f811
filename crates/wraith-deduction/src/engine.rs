//! Consistency and resolution.
//!
//! A hypothesis is consistent with a board iff every affirmed clue is in its
//! required set and no excluded clue is. Decoy clues of a hypothesis are
//! skipped by both checks. No combination of marks is an error: an
//! over-constrained board simply yields an empty consistent set.

use serde::{Deserialize, Serialize};

use wraith_core::catalog::{Catalog, Hypothesis, HypothesisId};
use wraith_core::models::{ClueBoard, ClueMark, HypothesisBoard};

/// Derived deduction state for one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    /// Hypotheses still consistent with the clue marks, in catalog order.
    pub consistent: Vec<HypothesisId>,
    /// The explicitly selected hypothesis, else the unique consistent one.
    pub resolved: Option<HypothesisId>,
}

/// Whether `hypothesis` survives the marks on `clues`.
pub fn is_consistent(hypothesis: &Hypothesis, clues: &ClueBoard) -> bool {
    clues.iter().all(|(clue, mark)| {
        if hypothesis.is_decoy(clue) {
            return true;
        }
        match mark {
            ClueMark::Unset => true,
            ClueMark::Affirmed => hypothesis.requires(clue),
            ClueMark::Excluded => !hypothesis.requires(clue),
        }
    })
}

/// Every catalog hypothesis consistent with `clues`, in catalog order.
pub fn consistent_hypotheses(clues: &ClueBoard, catalog: &Catalog) -> Vec<HypothesisId> {
    catalog
        .hypotheses()
        .iter()
        .filter(|h| is_consistent(h, clues))
        .map(|h| h.id.clone())
        .collect()
}

/// The explicit selection if there is one, otherwise the single consistent
/// hypothesis, otherwise `None`.
pub fn resolve_hypothesis(
    hypotheses: &HypothesisBoard,
    clues: &ClueBoard,
    catalog: &Catalog,
) -> Option<HypothesisId> {
    if let Some(selected) = hypotheses.selected().next() {
        return Some(selected.clone());
    }
    single(consistent_hypotheses(clues, catalog))
}

/// Compute the consistent set and the resolution in one pass.
pub fn deduce(hypotheses: &HypothesisBoard, clues: &ClueBoard, catalog: &Catalog) -> Deduction {
    let consistent = consistent_hypotheses(clues, catalog);
    let resolved = match hypotheses.selected().next() {
        Some(selected) => Some(selected.clone()),
        None => single(consistent.clone()),
    };
    Deduction {
        consistent,
        resolved,
    }
}

fn single(mut ids: Vec<HypothesisId>) -> Option<HypothesisId> {
    if ids.len() == 1 {
        ids.pop()
    } else {
        None
    }
}
