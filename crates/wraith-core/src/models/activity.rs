//! Append-only activity log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Clue, HypothesisId};

use super::flags::{FlagId, FlagValue};
use super::identity::Identity;
use super::marks::{ClueMark, HypothesisMark};

/// What happened, with the parameters needed to render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LogKind {
    ClueMarked {
        clue: Clue,
        mark: ClueMark,
    },
    HypothesisMarked {
        hypothesis: HypothesisId,
        mark: HypothesisMark,
        /// Set when the change is a side effect of selecting another hypothesis.
        #[serde(default)]
        implicit: bool,
    },
    FlagSet {
        flag: FlagId,
        value: FlagValue,
        previous: FlagValue,
    },
    SessionReset,
}

/// One log line. `seq` is the arrival order within the session and is the
/// only ordering guarantee; `recorded_at` is for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub seq: u64,
    pub actor: Identity,
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: LogKind,
}

/// Ordered log of everything applied to a session. Entries can only be
/// appended; there is no way to edit or remove one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return it.
    pub fn append(&mut self, actor: Identity, kind: LogKind) -> &LogEntry {
        let seq = self.entries.len() as u64;
        self.entries.push(LogEntry {
            seq,
            actor,
            recorded_at: Utc::now(),
            kind,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries with `seq >= from`.
    pub fn since(&self, from: u64) -> &[LogEntry] {
        let start = (from as usize).min(self.entries.len());
        &self.entries[start..]
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
