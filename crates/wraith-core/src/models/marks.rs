//! Per-field marks and the boards that hold them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Clue, HypothesisId};

/// Tri-state mark on a clue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClueMark {
    #[default]
    Unset,
    Affirmed,
    Excluded,
}

/// Mark on a hypothesis. At most one hypothesis per board is `Selected`;
/// the action processor, not this type, enforces that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HypothesisMark {
    #[default]
    Unset,
    Selected,
}

/// Current mark for every clue. Always holds exactly one entry per
/// [`Clue`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClueBoard {
    marks: BTreeMap<Clue, ClueMark>,
}

impl ClueBoard {
    /// A board with every clue unset.
    pub fn new() -> Self {
        Self {
            marks: Clue::ALL.iter().map(|c| (*c, ClueMark::Unset)).collect(),
        }
    }

    pub fn get(&self, clue: Clue) -> ClueMark {
        self.marks.get(&clue).copied().unwrap_or_default()
    }

    /// Overwrite the mark for `clue`, returning the previous one.
    pub fn set(&mut self, clue: Clue, mark: ClueMark) -> ClueMark {
        self.marks.insert(clue, mark).unwrap_or_default()
    }

    pub fn affirmed(&self) -> impl Iterator<Item = Clue> + '_ {
        self.with_mark(ClueMark::Affirmed)
    }

    pub fn excluded(&self) -> impl Iterator<Item = Clue> + '_ {
        self.with_mark(ClueMark::Excluded)
    }

    fn with_mark(&self, mark: ClueMark) -> impl Iterator<Item = Clue> + '_ {
        self.marks
            .iter()
            .filter(move |(_, m)| **m == mark)
            .map(|(c, _)| *c)
    }

    /// Number of clues carrying a mark other than `Unset`.
    pub fn marked_count(&self) -> usize {
        self.marks.values().filter(|m| **m != ClueMark::Unset).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Clue, ClueMark)> + '_ {
        self.marks.iter().map(|(c, m)| (*c, *m))
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ClueBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Current mark for every hypothesis of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HypothesisBoard {
    marks: BTreeMap<HypothesisId, HypothesisMark>,
}

impl HypothesisBoard {
    /// A board with every hypothesis of `catalog` unset.
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self {
            marks: catalog
                .ids()
                .map(|id| (id.clone(), HypothesisMark::Unset))
                .collect(),
        }
    }

    /// `None` when `id` is not on this board.
    pub fn get(&self, id: &HypothesisId) -> Option<HypothesisMark> {
        self.marks.get(id).copied()
    }

    /// Overwrite the mark for a known hypothesis, returning the previous one.
    /// Unknown ids are left alone and yield `None`.
    pub fn set(&mut self, id: &HypothesisId, mark: HypothesisMark) -> Option<HypothesisMark> {
        self.marks
            .get_mut(id)
            .map(|slot| std::mem::replace(slot, mark))
    }

    /// Every hypothesis currently marked `Selected`, in id order.
    pub fn selected(&self) -> impl Iterator<Item = &HypothesisId> {
        self.marks
            .iter()
            .filter(|(_, m)| **m == HypothesisMark::Selected)
            .map(|(id, _)| id)
    }

    pub fn marked_count(&self) -> usize {
        self.marks
            .values()
            .filter(|m| **m != HypothesisMark::Unset)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HypothesisId, HypothesisMark)> {
        self.marks.iter().map(|(id, m)| (id, *m))
    }

    pub fn reset(&mut self) {
        for mark in self.marks.values_mut() {
            *mark = HypothesisMark::Unset;
        }
    }
}
