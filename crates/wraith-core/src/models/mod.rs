//! Session data model: marks, flags, identities, actions, and the activity log.

mod action;
mod activity;
mod flags;
mod identity;
mod marks;

pub use action::{Action, DedupToken};
pub use activity::{ActivityLog, LogEntry, LogKind};
pub use flags::{CursedPossession, FlagId, FlagValue, Flags};
pub use identity::{Identity, IdentityKey};
pub use marks::{ClueBoard, ClueMark, HypothesisBoard, HypothesisMark};
