//! # wraith-core
//!
//! Foundation crate for the wraith shared evidence board.
//! Defines the clue and hypothesis catalog, the per-field marks, participant
//! identities, the closed set of actions, the append-only activity log,
//! errors, and configuration. Every other crate in the workspace depends on this.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod models;

// Re-export the most commonly used types at the crate root.
pub use catalog::{Catalog, Clue, Hypothesis, HypothesisId};
pub use config::WraithConfig;
pub use errors::{ActionError, SessionError, WraithError, WraithResult};
pub use models::{
    Action, ActivityLog, ClueBoard, ClueMark, CursedPossession, DedupToken, FlagId, FlagValue,
    Flags, HypothesisBoard, HypothesisMark, Identity, IdentityKey, LogEntry, LogKind,
};
