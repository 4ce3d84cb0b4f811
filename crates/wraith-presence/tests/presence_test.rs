use std::sync::Arc;
use std::time::Duration;

use test_fixtures::{ana, ben, cleo, shared_catalog, E1};
use wraith_core::config::SessionConfig;
use wraith_core::models::ClueMark;
use wraith_presence::PresenceTracker;
use wraith_session::SessionStore;

const GRACE: Duration = Duration::from_secs(30);

fn tracker() -> PresenceTracker {
    let store = Arc::new(SessionStore::new(shared_catalog(), SessionConfig::default()));
    PresenceTracker::new(store, GRACE)
}

async fn sleep_secs(secs: u64) {
    tokio::time::sleep(Duration::from_secs(secs)).await;
}

// ── join / leave ──────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn join_is_idempotent() {
    let t = tracker();
    assert_eq!(t.join("s1", &ana()), 1);
    assert_eq!(t.join("s1", &ana()), 1);
    assert_eq!(t.join("s1", &ben()), 2);
    assert_eq!(t.count("s1"), 2);
}

#[tokio::test(start_paused = true)]
async fn join_creates_missing_session() {
    let t = tracker();
    assert!(!t.store().exists("fresh"));
    t.join("fresh", &ana());
    assert!(t.store().exists("fresh"));
}

#[tokio::test(start_paused = true)]
async fn leave_unknown_is_noop() {
    let t = tracker();
    assert_eq!(t.leave("nowhere", &ana().key), 0);
    t.join("s1", &ana());
    assert_eq!(t.leave("s1", &ben().key), 1);
    assert!(t.timers().is_empty());
}

#[tokio::test(start_paused = true)]
async fn active_identities_are_ordered_by_key() {
    let t = tracker();
    t.join("s1", &cleo());
    t.join("s1", &ana());
    t.join("s1", &ben());
    let keys: Vec<String> = t
        .active_identities("s1")
        .into_iter()
        .map(|i| i.key.0)
        .collect();
    assert_eq!(keys, vec!["ana-key", "ben-key", "cleo-key"]);
    assert!(t.active_identities("missing").is_empty());
}

// ── Grace period ──────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn rejoin_within_grace_keeps_marks() {
    let t = tracker();
    t.join("s1", &ana());
    t.store()
        .get_or_create("s1")
        .with_session(|s| s.clues.set(E1, ClueMark::Affirmed))
        .unwrap();

    t.leave("s1", &ana().key);
    assert!(t.timers().is_pending("s1"));
    sleep_secs(10).await;

    t.join("s1", &ana());
    assert!(!t.timers().is_pending("s1"));
    sleep_secs(60).await;

    assert!(t.store().exists("s1"));
    let mark = t
        .store()
        .get("s1")
        .unwrap()
        .with_session(|s| s.clues.get(E1))
        .unwrap();
    assert_eq!(mark, ClueMark::Affirmed);
}

#[tokio::test(start_paused = true)]
async fn empty_past_grace_destroys_session() {
    let t = tracker();
    t.join("s1", &ana());
    t.leave("s1", &ana().key);

    sleep_secs(29).await;
    assert!(t.store().exists("s1"));

    sleep_secs(2).await;
    assert!(!t.store().exists("s1"));
    assert!(t.timers().is_empty());
}

#[tokio::test(start_paused = true)]
async fn second_empty_period_gets_its_own_timer() {
    let t = tracker();
    t.join("s1", &ana());
    t.leave("s1", &ana().key); // t=0, would fire at 30
    sleep_secs(10).await;
    t.join("s1", &ana());
    sleep_secs(10).await;
    t.leave("s1", &ana().key); // t=20, fires at 50

    sleep_secs(15).await; // t=35
    assert!(t.store().exists("s1"));

    sleep_secs(16).await; // t=51
    assert!(!t.store().exists("s1"));
}

#[tokio::test(start_paused = true)]
async fn timer_never_destroys_a_reoccupied_session_even_if_it_fires() {
    let t = tracker();
    let handle = t.store().get_or_create("s1");
    t.join("s1", &ana());
    t.leave("s1", &ana().key);

    // Re-occupy without going through the tracker, so the timer is not
    // cancelled and has to rely on its epoch check.
    let now = tokio::time::Instant::now();
    handle
        .with_session(|s| s.add_participant(ben(), now))
        .unwrap();

    sleep_secs(31).await;
    assert!(t.store().exists("s1"));
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_timers() {
    let t = tracker();
    t.join("s1", &ana());
    t.leave("s1", &ana().key);
    t.shutdown();
    sleep_secs(60).await;
    assert!(t.store().exists("s1"));
}

// ── Heartbeat / silent sweep ──────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn heartbeat_only_refreshes_known_participants() {
    let t = tracker();
    assert!(!t.heartbeat("s1", &ana().key));
    t.join("s1", &ana());
    assert!(t.heartbeat("s1", &ana().key));
    assert!(!t.heartbeat("s1", &ben().key));
}

#[tokio::test(start_paused = true)]
async fn sweep_silent_drops_quiet_participants_and_starts_grace() {
    let t = tracker();
    t.join("s1", &ana());
    t.join("s2", &ben());
    sleep_secs(100).await;
    t.heartbeat("s2", &ben().key);

    assert_eq!(t.sweep_silent(Duration::from_secs(60)), 1);
    assert_eq!(t.count("s1"), 0);
    assert_eq!(t.count("s2"), 1);
    assert!(t.timers().is_pending("s1"));

    sleep_secs(31).await;
    assert!(!t.store().exists("s1"));
    assert!(t.store().exists("s2"));
}

// ── Roster sync ───────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn sync_roster_replaces_and_debounces() {
    let t = tracker();
    assert_eq!(t.sync_roster("s1", &[ana(), ben()]), 2);
    assert_eq!(t.sync_roster("s1", &[cleo()]), 1);
    assert_eq!(t.active_identities("s1"), vec![cleo()]);

    assert_eq!(t.sync_roster("s1", &[]), 0);
    assert!(t.timers().is_pending("s1"));
    sleep_secs(5).await;
    t.sync_roster("s1", &[ana()]);
    assert!(!t.timers().is_pending("s1"));

    sleep_secs(60).await;
    assert!(t.store().exists("s1"));
}
