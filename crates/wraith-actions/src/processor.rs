//! ActionProcessor: validate, then mutate under the session lock.
//!
//! Validation only needs the static catalog, so it runs before the lock is
//! taken. Once an action is valid, applying it cannot fail.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::instrument;

use wraith_core::catalog::{Catalog, HypothesisId};
use wraith_core::errors::ActionError;
use wraith_core::models::{
    Action, DedupToken, FlagId, FlagValue, Flags, HypothesisMark, Identity, LogKind,
};
use wraith_observability::events;
use wraith_session::{Session, SessionHandle};

use crate::errors::ApplyError;

/// What an accepted action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedResult {
    /// Log entries appended by this call.
    pub entries_appended: usize,
    /// Whether any clue, hypothesis or flag value actually changed.
    pub changed: bool,
    /// The dedup token was already seen; nothing was applied.
    pub replayed: bool,
    /// Session version after the call.
    pub version: u64,
}

pub struct ActionProcessor {
    catalog: Arc<Catalog>,
}

impl ActionProcessor {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Reject actions that reference things outside the catalog or carry a
    /// value of the wrong kind.
    pub fn validate(&self, action: &Action) -> Result<(), ActionError> {
        match action {
            Action::MarkClue { .. } | Action::ResetSession => Ok(()),
            Action::MarkHypothesis { hypothesis, .. } => {
                if self.catalog.contains(hypothesis) {
                    Ok(())
                } else {
                    Err(ActionError::invalid(format!(
                        "unknown hypothesis: {hypothesis}"
                    )))
                }
            }
            Action::SetFlag { flag, value } => Flags::validate(*flag, value),
        }
    }

    /// Apply `action` on behalf of `actor`.
    ///
    /// With a `dedup` token, a token already seen from the same actor in
    /// this session is reported as `replayed` and changes nothing.
    #[instrument(skip(self, handle, actor, action, dedup), fields(session_id = %handle.id(), kind = action.kind()))]
    pub fn apply(
        &self,
        handle: &SessionHandle,
        actor: &Identity,
        action: &Action,
        dedup: Option<&DedupToken>,
    ) -> Result<AppliedResult, ApplyError> {
        if let Err(e) = self.validate(action) {
            events::action_rejected(handle.id(), &e.to_string());
            return Err(e.into());
        }

        let result = handle.with_session(|session| {
            if let Some(token) = dedup {
                if !session.remember_token(&actor.key, token) {
                    events::action_replayed(handle.id(), &token.0);
                    return Ok(AppliedResult {
                        entries_appended: 0,
                        changed: false,
                        replayed: true,
                        version: session.version(),
                    });
                }
            }
            self.apply_to_session(session, actor, action)
        })??;

        if !result.replayed {
            events::action_applied(
                handle.id(),
                action.kind(),
                result.entries_appended,
                result.version,
            );
        }
        Ok(result)
    }

    /// Decode a JSON action and apply it.
    pub fn apply_json(
        &self,
        handle: &SessionHandle,
        actor: &Identity,
        json: &str,
        dedup: Option<&DedupToken>,
    ) -> Result<AppliedResult, ApplyError> {
        let action = Action::from_json(json).map_err(|e| {
            events::action_rejected(handle.id(), &e.to_string());
            e
        })?;
        self.apply(handle, actor, &action, dedup)
    }

    /// Apply to an already-locked session. Validates first, so on error
    /// the session is untouched.
    pub fn apply_to_session(
        &self,
        session: &mut Session,
        actor: &Identity,
        action: &Action,
    ) -> Result<AppliedResult, ActionError> {
        self.validate(action)?;
        let log_before = session.log.len();

        let changed = match action {
            Action::MarkClue { clue, mark } => {
                let previous = session.clues.set(*clue, *mark);
                session.log.append(
                    actor.clone(),
                    LogKind::ClueMarked {
                        clue: *clue,
                        mark: *mark,
                    },
                );
                previous != *mark
            }
            Action::MarkHypothesis { hypothesis, mark } => {
                mark_hypothesis(session, actor, hypothesis, *mark)
            }
            Action::SetFlag { flag, value } => set_flag(session, actor, *flag, *value)?,
            Action::ResetSession => {
                let had_marks = session.clues.marked_count() > 0
                    || session.hypotheses.marked_count() > 0
                    || session.flags != Flags::default();
                session.clues.reset();
                session.hypotheses.reset();
                session.flags.reset();
                session.log.append(actor.clone(), LogKind::SessionReset);
                had_marks
            }
        };

        let entries_appended = session.log.len() - log_before;
        session.touch(Instant::now());
        let version = if entries_appended > 0 {
            session.bump_version()
        } else {
            session.version()
        };
        Ok(AppliedResult {
            entries_appended,
            changed,
            replayed: false,
            version,
        })
    }
}

/// Selecting clears every other selection first, logging each implicit
/// de-selection. Only marks that actually change are logged.
fn mark_hypothesis(
    session: &mut Session,
    actor: &Identity,
    hypothesis: &HypothesisId,
    mark: HypothesisMark,
) -> bool {
    let mut changed = false;
    if mark == HypothesisMark::Selected {
        let others: Vec<HypothesisId> = session
            .hypotheses
            .selected()
            .filter(|id| *id != hypothesis)
            .cloned()
            .collect();
        for other in others {
            session.hypotheses.set(&other, HypothesisMark::Unset);
            session.log.append(
                actor.clone(),
                LogKind::HypothesisMarked {
                    hypothesis: other,
                    mark: HypothesisMark::Unset,
                    implicit: true,
                },
            );
            changed = true;
        }
    }
    if session.hypotheses.set(hypothesis, mark) != Some(mark) {
        session.log.append(
            actor.clone(),
            LogKind::HypothesisMarked {
                hypothesis: hypothesis.clone(),
                mark,
                implicit: false,
            },
        );
        changed = true;
    }
    changed
}

fn set_flag(
    session: &mut Session,
    actor: &Identity,
    flag: FlagId,
    value: FlagValue,
) -> Result<bool, ActionError> {
    let previous = session.flags.set(flag, value)?;
    session.log.append(
        actor.clone(),
        LogKind::FlagSet {
            flag,
            value,
            previous,
        },
    );
    Ok(previous != value)
}
