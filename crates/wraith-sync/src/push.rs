//! Push fan-out: every subscriber of a session gets the full view after
//! each accepted action.
//!
//! Delivery is at-most-once per change. Each subscriber has a bounded
//! queue; if it is full the view is dropped for that subscriber only (the
//! next one supersedes it anyway). A closed receiver removes the
//! subscriber.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::debug;

use wraith_core::models::IdentityKey;
use wraith_observability::events;
use wraith_presence::PresenceTracker;

use crate::view::SessionView;

struct Subscriber {
    id: u64,
    key: IdentityKey,
    tx: mpsc::Sender<SessionView>,
}

/// Registry of push subscribers per session.
pub struct PushHub {
    subscribers: DashMap<String, Vec<Subscriber>>,
    buffer: usize,
    next_id: AtomicU64,
}

impl PushHub {
    /// `buffer` is the per-subscriber queue length.
    pub fn new(buffer: usize) -> Self {
        Self {
            subscribers: DashMap::new(),
            buffer: buffer.max(1),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a subscriber and return its id and receiving end.
    pub fn register(
        &self,
        session_id: &str,
        key: &IdentityKey,
    ) -> (u64, mpsc::Receiver<SessionView>) {
        let (tx, rx) = mpsc::channel(self.buffer);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers
            .entry(session_id.to_string())
            .or_default()
            .push(Subscriber {
                id,
                key: key.clone(),
                tx,
            });
        debug!(session_id, identity_key = %key, subscriber = id, "subscribed");
        (id, rx)
    }

    /// Remove one subscriber. Returns whether the same identity still has
    /// another subscription to this session.
    pub fn unsubscribe(&self, session_id: &str, id: u64) -> bool {
        let mut still_present = false;
        let mut now_empty = false;
        if let Some(mut subs) = self.subscribers.get_mut(session_id) {
            if let Some(pos) = subs.iter().position(|s| s.id == id) {
                let removed = subs.swap_remove(pos);
                still_present = subs.iter().any(|s| s.key == removed.key);
                debug!(session_id, identity_key = %removed.key, subscriber = id, "unsubscribed");
            }
            now_empty = subs.is_empty();
        }
        if now_empty {
            self.subscribers.remove_if(session_id, |_, subs| subs.is_empty());
        }
        still_present
    }

    /// Deliver `view` to every subscriber of its session, each with its own
    /// `is_requester` marking. Returns the identities that lost their last
    /// subscription because their receiver was gone.
    pub fn publish(&self, view: &SessionView) -> Vec<IdentityKey> {
        let session_id = view.session_id.as_str();
        let mut departed = Vec::new();
        let Some(mut subs) = self.subscribers.get_mut(session_id) else {
            return departed;
        };
        let mut closed = Vec::new();
        for sub in subs.iter() {
            match sub.tx.try_send(view.for_requester(&sub.key)) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    events::subscriber_dropped(session_id, sub.key.as_str(), "lagging");
                }
                Err(TrySendError::Closed(_)) => {
                    events::subscriber_dropped(session_id, sub.key.as_str(), "closed");
                    closed.push(sub.id);
                }
            }
        }
        if !closed.is_empty() {
            let (gone, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut *subs)
                .into_iter()
                .partition(|s| closed.contains(&s.id));
            *subs = kept;
            for sub in gone {
                if !subs.iter().any(|s| s.key == sub.key) && !departed.contains(&sub.key) {
                    departed.push(sub.key);
                }
            }
        }
        departed
    }

    /// Deliver `view` to one subscriber only.
    fn deliver_to(&self, session_id: &str, id: u64, view: &SessionView) {
        if let Some(subs) = self.subscribers.get(session_id) {
            if let Some(sub) = subs.iter().find(|s| s.id == id) {
                match sub.tx.try_send(view.for_requester(&sub.key)) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        events::subscriber_dropped(session_id, sub.key.as_str(), "lagging");
                    }
                    Err(TrySendError::Closed(_)) => {
                        events::subscriber_dropped(session_id, sub.key.as_str(), "closed");
                    }
                }
            }
        }
    }

    pub fn subscriber_count(&self, session_id: &str) -> usize {
        self.subscribers.get(session_id).map_or(0, |subs| subs.len())
    }
}

/// A live push subscription. Dropping it unsubscribes and, if it was the
/// identity's last subscription to the session, signals presence `leave`.
pub struct Subscription {
    session_id: String,
    key: IdentityKey,
    id: u64,
    rx: mpsc::Receiver<SessionView>,
    hub: Arc<PushHub>,
    presence: Arc<PresenceTracker>,
    latest_version: Option<u64>,
}

impl Subscription {
    pub(crate) fn new(
        session_id: &str,
        key: &IdentityKey,
        hub: Arc<PushHub>,
        presence: Arc<PresenceTracker>,
    ) -> Self {
        let (id, rx) = hub.register(session_id, key);
        Self {
            session_id: session_id.to_string(),
            key: key.clone(),
            id,
            rx,
            hub,
            presence,
            latest_version: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Queue the initial-sync view for this subscriber alone.
    pub(crate) fn seed(&self, view: &SessionView) {
        self.hub.deliver_to(&self.session_id, self.id, view);
    }

    /// Next view newer than the last one returned. `None` once the hub
    /// has dropped this subscriber.
    pub async fn recv(&mut self) -> Option<SessionView> {
        loop {
            let view = self.rx.recv().await?;
            if self.accept(&view) {
                return Some(view);
            }
        }
    }

    /// Non-blocking variant of [`Subscription::recv`].
    pub fn try_recv(&mut self) -> Option<SessionView> {
        while let Ok(view) = self.rx.try_recv() {
            if self.accept(&view) {
                return Some(view);
            }
        }
        None
    }

    fn accept(&mut self, view: &SessionView) -> bool {
        if self.latest_version.is_some_and(|v| view.version <= v) {
            return false;
        }
        self.latest_version = Some(view.version);
        true
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if !self.hub.unsubscribe(&self.session_id, self.id) {
            self.presence.leave(&self.session_id, &self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::{ana, three_hypothesis_catalog};
    use tokio::time::Instant;
    use wraith_session::Session;

    fn view(session_id: &str) -> SessionView {
        let catalog = three_hypothesis_catalog();
        let session = Session::new(session_id, &catalog, 0, Instant::now());
        SessionView::build(&session, &catalog, None)
    }

    #[test]
    fn direct_delivery_to_full_queue_keeps_the_queued_view() {
        let hub = PushHub::new(1);
        let (id, mut rx) = hub.register("room", &ana().key);
        let first = view("room");

        hub.deliver_to("room", id, &first);
        hub.deliver_to("room", id, &first);

        let received = rx.try_recv().unwrap();
        assert_eq!(received.session_id, "room");
        assert!(rx.try_recv().is_err());
        assert_eq!(hub.subscriber_count("room"), 1);
    }

    #[test]
    fn direct_delivery_to_closed_receiver_is_harmless() {
        let hub = PushHub::new(4);
        let (id, rx) = hub.register("room", &ana().key);
        drop(rx);
        hub.deliver_to("room", id, &view("room"));
        assert!(!hub.unsubscribe("room", id));
        assert_eq!(hub.subscriber_count("room"), 0);
    }
}
