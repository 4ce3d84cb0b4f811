//! The fixed clue set.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One piece of evidence that can be affirmed or excluded on the board.
///
/// The set is closed: a board always carries exactly one mark per variant,
/// so no dynamic keys can ever appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clue {
    #[serde(rename = "emf_level_5")]
    EmfLevel5,
    SpiritBox,
    GhostWriting,
    DotsProjector,
    GhostOrbs,
    Fingerprints,
    FreezingTemperatures,
}

impl Clue {
    /// Every clue, in board order.
    pub const ALL: [Clue; 7] = [
        Clue::EmfLevel5,
        Clue::SpiritBox,
        Clue::GhostWriting,
        Clue::DotsProjector,
        Clue::GhostOrbs,
        Clue::Fingerprints,
        Clue::FreezingTemperatures,
    ];

    /// Human-readable label.
    pub fn display_name(self) -> &'static str {
        match self {
            Clue::EmfLevel5 => "EMF Level 5",
            Clue::SpiritBox => "Spirit Box",
            Clue::GhostWriting => "Ghost Writing",
            Clue::DotsProjector => "D.O.T.S Projector",
            Clue::GhostOrbs => "Ghost Orbs",
            Clue::Fingerprints => "Fingerprints",
            Clue::FreezingTemperatures => "Freezing Temperatures",
        }
    }
}

impl fmt::Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
