//! Session: the unit of shared state.

use std::collections::BTreeMap;
use std::time::Duration;

use tokio::time::Instant;

use wraith_core::catalog::Catalog;
use wraith_core::models::{
    ActivityLog, ClueBoard, DedupToken, Flags, HypothesisBoard, Identity, IdentityKey,
};

use crate::dedup::DedupWindow;

/// One participant currently considered "in" the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub identity: Identity,
    pub joined_at: Instant,
    pub last_seen: Instant,
}

/// Effect of a roster change on the participant count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    /// Count stayed on the same side of zero.
    Unchanged,
    /// Count went from 0 to >0.
    BecameOccupied,
    /// Count went from >0 to 0. `epoch` identifies this empty period.
    BecameEmpty { epoch: u64 },
}

/// Authoritative state of one session.
///
/// The boards, flags and log are mutated by the action processor; the
/// roster by the presence tracker. Everything else is lifecycle
/// bookkeeping owned by the store.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    pub clues: ClueBoard,
    pub hypotheses: HypothesisBoard,
    pub flags: Flags,
    pub log: ActivityLog,
    participants: BTreeMap<IdentityKey, Participant>,
    created_at: Instant,
    last_accessed_at: Instant,
    empty_since: Option<Instant>,
    grace_epoch: u64,
    dedup: DedupWindow,
    version: u64,
}

impl Session {
    /// A fresh session with every mark unset and nobody in it. It counts as
    /// empty from `now`.
    pub fn new(id: impl Into<String>, catalog: &Catalog, dedup_window: usize, now: Instant) -> Self {
        Self {
            id: id.into(),
            clues: ClueBoard::new(),
            hypotheses: HypothesisBoard::for_catalog(catalog),
            flags: Flags::default(),
            log: ActivityLog::new(),
            participants: BTreeMap::new(),
            created_at: now,
            last_accessed_at: now,
            empty_since: Some(now),
            grace_epoch: 0,
            dedup: DedupWindow::new(dedup_window),
            version: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn last_accessed_at(&self) -> Instant {
        self.last_accessed_at
    }

    pub fn touch(&mut self, now: Instant) {
        self.last_accessed_at = now;
    }

    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_accessed_at)
    }

    /// When the roster last dropped to zero, or `None` while occupied.
    pub fn empty_since(&self) -> Option<Instant> {
        self.empty_since
    }

    pub fn grace_epoch(&self) -> u64 {
        self.grace_epoch
    }

    /// Version of the observable state. Bumped on every change a view
    /// would show.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn bump_version(&mut self) -> u64 {
        self.version += 1;
        self.version
    }

    // ── Roster ──────────────────────────────────────────────────────────

    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    pub fn participant(&self, key: &IdentityKey) -> Option<&Participant> {
        self.participants.get(key)
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Add `identity` or refresh it if already present. Returns `None` when
    /// the identity was already in the roster.
    pub fn add_participant(&mut self, identity: Identity, now: Instant) -> Option<Occupancy> {
        if let Some(existing) = self.participants.get_mut(&identity.key) {
            existing.last_seen = now;
            if existing.identity.display_name != identity.display_name {
                existing.identity.display_name = identity.display_name;
                self.version += 1;
            }
            return None;
        }
        let was_empty = self.participants.is_empty();
        self.participants.insert(
            identity.key.clone(),
            Participant {
                identity,
                joined_at: now,
                last_seen: now,
            },
        );
        self.version += 1;
        Some(if was_empty {
            self.mark_occupied()
        } else {
            Occupancy::Unchanged
        })
    }

    /// Remove `key`. Returns `None` when it was not present.
    pub fn remove_participant(&mut self, key: &IdentityKey, now: Instant) -> Option<Occupancy> {
        self.participants.remove(key)?;
        self.version += 1;
        Some(if self.participants.is_empty() {
            self.mark_empty(now)
        } else {
            Occupancy::Unchanged
        })
    }

    /// Refresh `last_seen`. Returns `false` for unknown identities.
    pub fn heartbeat(&mut self, key: &IdentityKey, now: Instant) -> bool {
        match self.participants.get_mut(key) {
            Some(p) => {
                p.last_seen = now;
                true
            }
            None => false,
        }
    }

    /// Replace the roster wholesale. Known identities keep their join time.
    pub fn replace_participants(
        &mut self,
        roster: impl IntoIterator<Item = Identity>,
        now: Instant,
    ) -> Occupancy {
        let was_empty = self.participants.is_empty();
        let mut next = BTreeMap::new();
        for identity in roster {
            let joined_at = self
                .participants
                .get(&identity.key)
                .map_or(now, |p| p.joined_at);
            next.insert(
                identity.key.clone(),
                Participant {
                    identity,
                    joined_at,
                    last_seen: now,
                },
            );
        }
        let same_roster = next
            .values()
            .map(|p| &p.identity)
            .eq(self.participants.values().map(|p| &p.identity));
        if !same_roster {
            self.version += 1;
        }
        self.participants = next;
        match (was_empty, self.participants.is_empty()) {
            (true, false) => self.mark_occupied(),
            (false, true) => self.mark_empty(now),
            _ => Occupancy::Unchanged,
        }
    }

    /// Keys of participants whose last heartbeat is older than `max_silence`.
    pub fn silent_participants(&self, max_silence: Duration, now: Instant) -> Vec<IdentityKey> {
        self.participants
            .values()
            .filter(|p| now.saturating_duration_since(p.last_seen) > max_silence)
            .map(|p| p.identity.key.clone())
            .collect()
    }

    fn mark_occupied(&mut self) -> Occupancy {
        self.empty_since = None;
        self.grace_epoch += 1;
        Occupancy::BecameOccupied
    }

    fn mark_empty(&mut self, now: Instant) -> Occupancy {
        self.empty_since = Some(now);
        self.grace_epoch += 1;
        Occupancy::BecameEmpty {
            epoch: self.grace_epoch,
        }
    }

    // ── Replay detection ────────────────────────────────────────────────

    /// Record a dedup token for `key`. Returns `false` on a replay.
    pub fn remember_token(&mut self, key: &IdentityKey, token: &DedupToken) -> bool {
        self.dedup.remember(key, token)
    }
}
