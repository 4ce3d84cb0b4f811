//! Replay detection for retried actions.
//!
//! Tokens are scoped per participant, so two participants that happen to
//! pick the same token never collide. The window is a bounded FIFO: once
//! full, the oldest token is forgotten.

use std::collections::{HashSet, VecDeque};

use wraith_core::models::{DedupToken, IdentityKey};

type Scoped = (IdentityKey, DedupToken);

#[derive(Debug, Clone)]
pub struct DedupWindow {
    capacity: usize,
    order: VecDeque<Scoped>,
    seen: HashSet<Scoped>,
}

impl DedupWindow {
    /// A window remembering at most `capacity` tokens. Zero disables replay
    /// detection entirely.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity.min(1024)),
            seen: HashSet::with_capacity(capacity.min(1024)),
        }
    }

    pub fn contains(&self, key: &IdentityKey, token: &DedupToken) -> bool {
        self.seen.contains(&(key.clone(), token.clone()))
    }

    /// Record `token` for `key`. Returns `false` if it was already in the window.
    pub fn remember(&mut self, key: &IdentityKey, token: &DedupToken) -> bool {
        if self.capacity == 0 {
            return true;
        }
        let scoped = (key.clone(), token.clone());
        if self.seen.contains(&scoped) {
            return false;
        }
        if self.order.len() == self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }
        self.order.push_back(scoped.clone());
        self.seen.insert(scoped);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> IdentityKey {
        IdentityKey::from(k)
    }

    #[test]
    fn second_sighting_is_a_replay() {
        let mut w = DedupWindow::new(4);
        let t = DedupToken::new("t1");
        assert!(w.remember(&key("ana"), &t));
        assert!(!w.remember(&key("ana"), &t));
        assert!(w.contains(&key("ana"), &t));
    }

    #[test]
    fn tokens_are_scoped_per_identity() {
        let mut w = DedupWindow::new(4);
        let t = DedupToken::new("same");
        assert!(w.remember(&key("ana"), &t));
        assert!(w.remember(&key("ben"), &t));
        assert_eq!(w.len(), 2);
    }

    #[test]
    fn oldest_token_is_evicted_when_full() {
        let mut w = DedupWindow::new(2);
        let ana = key("ana");
        w.remember(&ana, &DedupToken::new("a"));
        w.remember(&ana, &DedupToken::new("b"));
        w.remember(&ana, &DedupToken::new("c"));
        assert!(!w.contains(&ana, &DedupToken::new("a")));
        assert!(w.contains(&ana, &DedupToken::new("c")));
        assert_eq!(w.len(), 2);
    }

    #[test]
    fn zero_capacity_never_reports_replay() {
        let mut w = DedupWindow::new(0);
        let t = DedupToken::new("t");
        assert!(w.remember(&key("ana"), &t));
        assert!(w.remember(&key("ana"), &t));
        assert!(w.is_empty());
    }
}
