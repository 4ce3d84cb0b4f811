//! Static hypothesis catalog.
//!
//! Loaded once at startup and shared by every session behind an `Arc`.
//! Each hypothesis names the clues it is consistent with and, optionally,
//! decoy clues that must never be used to include or exclude it.

mod clue;
mod standard;

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::CatalogConfig;
use crate::errors::CatalogError;

pub use clue::Clue;

/// Identifier of a hypothesis, unique within its catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HypothesisId(pub String);

impl HypothesisId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HypothesisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HypothesisId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub id: HypothesisId,
    /// Clues this hypothesis is consistent with.
    pub evidences: BTreeSet<Clue>,
    /// Clues that can show up for this hypothesis but carry no signal.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub decoys: BTreeSet<Clue>,
}

impl Hypothesis {
    /// Create a hypothesis with no decoy clues.
    pub fn new(id: impl Into<String>, evidences: impl IntoIterator<Item = Clue>) -> Self {
        Self {
            id: HypothesisId::new(id),
            evidences: evidences.into_iter().collect(),
            decoys: BTreeSet::new(),
        }
    }

    /// Attach decoy clues.
    pub fn with_decoys(mut self, decoys: impl IntoIterator<Item = Clue>) -> Self {
        self.decoys = decoys.into_iter().collect();
        self
    }

    /// Whether `clue` is part of the required-evidence set.
    pub fn requires(&self, clue: Clue) -> bool {
        self.evidences.contains(&clue)
    }

    pub fn is_decoy(&self, clue: Clue) -> bool {
        self.decoys.contains(&clue)
    }
}

/// On-disk catalog layout: a list of `[[hypothesis]]` tables.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "hypothesis", default)]
    hypotheses: Vec<Hypothesis>,
}

/// Immutable, validated set of hypotheses. Order is preserved and is the
/// order in which consistent hypotheses are reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    hypotheses: Vec<Hypothesis>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicates, empty input, and decoys that
    /// overlap a hypothesis' own evidence.
    pub fn new(hypotheses: Vec<Hypothesis>) -> Result<Self, CatalogError> {
        if hypotheses.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(hypotheses.len());
        for h in &hypotheses {
            if !seen.insert(h.id.clone()) {
                return Err(CatalogError::DuplicateHypothesis {
                    id: h.id.to_string(),
                });
            }
            if let Some(clue) = h.decoys.intersection(&h.evidences).next() {
                return Err(CatalogError::DecoyOverlapsEvidence {
                    id: h.id.to_string(),
                    clue: clue.to_string(),
                });
            }
        }
        Ok(Self { hypotheses })
    }

    /// The built-in ghost catalog.
    pub fn standard() -> Self {
        Self {
            hypotheses: standard::hypotheses(),
        }
    }

    /// Parse a catalog from TOML text.
    pub fn from_toml(toml_str: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(toml_str).map_err(|e| CatalogError::Parse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::new(file.hypotheses)
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let file: CatalogFile = toml::from_str(&content).map_err(|e| CatalogError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::new(file.hypotheses)
    }

    /// The configured catalog file, or the standard catalog when none is set.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        match &config.path {
            Some(path) => Self::load(path),
            None => Ok(Self::standard()),
        }
    }

    pub fn hypotheses(&self) -> &[Hypothesis] {
        &self.hypotheses
    }

    pub fn get(&self, id: &HypothesisId) -> Option<&Hypothesis> {
        self.hypotheses.iter().find(|h| &h.id == id)
    }

    pub fn contains(&self, id: &HypothesisId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &HypothesisId> {
        self.hypotheses.iter().map(|h| &h.id)
    }

    pub fn len(&self) -> usize {
        self.hypotheses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }
}
