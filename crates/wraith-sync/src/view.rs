//! The full derived view served to clients.

use serde::{Deserialize, Serialize};

use wraith_core::catalog::{Catalog, HypothesisId};
use wraith_core::models::{ClueBoard, Flags, HypothesisBoard, IdentityKey, LogEntry};
use wraith_deduction::deduce;
use wraith_session::Session;

/// One participant as shown to a requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantView {
    pub display_name: String,
    pub identity_key: IdentityKey,
    /// Whether this entry is the identity the view was built for.
    pub is_requester: bool,
}

/// Complete snapshot of a session plus everything derived from it. Always
/// the whole thing; clients diff against their previous copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: String,
    /// Increases with every observable change. Receivers ignore a view
    /// older than one they already hold.
    pub version: u64,
    pub clues: ClueBoard,
    pub hypotheses: HypothesisBoard,
    pub flags: Flags,
    pub consistent: Vec<HypothesisId>,
    pub resolved: Option<HypothesisId>,
    pub activity_log: Vec<LogEntry>,
    pub participants: Vec<ParticipantView>,
}

impl SessionView {
    /// Build a view of `session` for `requester`. Call with the session
    /// locked so the snapshot is consistent.
    pub fn build(session: &Session, catalog: &Catalog, requester: Option<&IdentityKey>) -> Self {
        let deduction = deduce(&session.hypotheses, &session.clues, catalog);
        Self {
            session_id: session.id().to_string(),
            version: session.version(),
            clues: session.clues.clone(),
            hypotheses: session.hypotheses.clone(),
            flags: session.flags.clone(),
            consistent: deduction.consistent,
            resolved: deduction.resolved,
            activity_log: session.log.entries().to_vec(),
            participants: session
                .participants()
                .map(|p| ParticipantView {
                    display_name: p.identity.display_name.clone(),
                    identity_key: p.identity.key.clone(),
                    is_requester: requester == Some(&p.identity.key),
                })
                .collect(),
        }
    }

    /// Same view, re-targeted at another requester.
    pub fn for_requester(&self, requester: &IdentityKey) -> Self {
        let mut view = self.clone();
        for p in &mut view.participants {
            p.is_requester = &p.identity_key == requester;
        }
        view
    }

    /// Whether this view supersedes `other`.
    pub fn is_newer_than(&self, other: &SessionView) -> bool {
        self.version > other.version
    }
}
