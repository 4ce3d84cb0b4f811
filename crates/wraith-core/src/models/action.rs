//! The closed set of mutations a participant can submit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{Clue, HypothesisId};
use crate::errors::ActionError;

use super::flags::{FlagId, FlagValue};
use super::marks::{ClueMark, HypothesisMark};

/// A typed mutation. Tagged by `"type"` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    MarkClue {
        clue: Clue,
        mark: ClueMark,
    },
    MarkHypothesis {
        hypothesis: HypothesisId,
        mark: HypothesisMark,
    },
    SetFlag {
        flag: FlagId,
        value: FlagValue,
    },
    ResetSession,
}

impl Action {
    /// Decode an action from JSON. Unknown tags and malformed fields are
    /// reported as [`ActionError::InvalidAction`].
    pub fn from_json(json: &str) -> Result<Self, ActionError> {
        serde_json::from_str(json).map_err(|e| ActionError::invalid(e.to_string()))
    }

    /// Decode an action from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ActionError> {
        serde_json::from_value(value).map_err(|e| ActionError::invalid(e.to_string()))
    }

    /// Short tag used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::MarkClue { .. } => "mark_clue",
            Action::MarkHypothesis { .. } => "mark_hypothesis",
            Action::SetFlag { .. } => "set_flag",
            Action::ResetSession => "reset_session",
        }
    }
}

/// Caller-chosen token identifying one logical action across retries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DedupToken(pub String);

impl DedupToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Display for DedupToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
