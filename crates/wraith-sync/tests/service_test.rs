use std::time::Duration;

use test_fixtures::{ana, ben, hid, mark_clue, select, shared_catalog, test_config, E1, E3};
use wraith_core::models::{Action, ClueMark, HypothesisMark};
use wraith_sync::{ClientMessage, ServerMessage, SessionStatus, SyncError, SyncService};

fn service() -> SyncService {
    SyncService::new(shared_catalog(), test_config())
}

// ── getView ───────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn get_view_synthesizes_default_session() {
    let svc = service();
    let view = svc.get_view("room", &ana());

    assert_eq!(view.session_id, "room");
    assert_eq!(view.consistent, vec![hid("H1"), hid("H2"), hid("H3")]);
    assert_eq!(view.resolved, None);
    assert!(view.activity_log.is_empty());
    assert_eq!(view.participants.len(), 1);
    assert!(view.participants[0].is_requester);
    assert!(svc.store().exists("room"));
}

#[tokio::test(start_paused = true)]
async fn views_mark_only_the_requester() {
    let svc = service();
    svc.get_view("room", &ana());
    let view = svc.get_view("room", &ben());
    let me: Vec<_> = view
        .participants
        .iter()
        .filter(|p| p.is_requester)
        .map(|p| p.display_name.as_str())
        .collect();
    assert_eq!(me, vec!["Ben"]);
}

// ── submitAction ──────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn deduction_follows_submitted_marks() {
    let svc = service();
    svc.get_view("room", &ana());

    svc.submit_action("room", &ana(), &mark_clue(E1, ClueMark::Affirmed), None)
        .unwrap();
    let view = svc.get_view("room", &ana());
    assert_eq!(view.consistent, vec![hid("H1"), hid("H2")]);
    assert_eq!(view.resolved, None);

    svc.submit_action("room", &ben(), &mark_clue(E3, ClueMark::Excluded), None)
        .unwrap();
    let view = svc.get_view("room", &ana());
    assert_eq!(view.consistent, vec![hid("H1")]);
    assert_eq!(view.resolved, Some(hid("H1")));
    assert_eq!(view.activity_log.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn selection_overrides_in_view() {
    let svc = service();
    svc.get_view("room", &ana());
    svc.submit_action("room", &ana(), &select("H1"), None).unwrap();
    svc.submit_action("room", &ana(), &select("H3"), None).unwrap();
    let view = svc.get_view("room", &ana());
    assert_eq!(view.resolved, Some(hid("H3")));
    let selected: Vec<_> = view
        .hypotheses
        .iter()
        .filter(|(_, m)| *m == HypothesisMark::Selected)
        .collect();
    assert_eq!(selected.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn action_on_missing_session_is_expired() {
    let svc = service();
    let err = svc
        .submit_action("gone", &ana(), &Action::ResetSession, None)
        .unwrap_err();
    assert_eq!(
        err,
        SyncError::SessionExpired {
            session_id: "gone".into()
        }
    );
    assert!(!svc.store().exists("gone"));
}

#[tokio::test(start_paused = true)]
async fn malformed_json_is_invalid_and_harmless() {
    let svc = service();
    svc.get_view("room", &ana());
    let err = svc
        .submit_json("room", &ana(), r#"{"type":"mark_clue","clue":"ectoplasm"}"#, None)
        .unwrap_err();
    assert!(matches!(err, SyncError::InvalidAction { .. }));
    assert_eq!(svc.session_info("room").unwrap().log_len, 0);
}

#[tokio::test(start_paused = true)]
async fn rejected_action_leaves_roster_and_grace_untouched() {
    let svc = service();
    svc.get_view("room", &ana());
    svc.notify_disconnect("room", &ana().key);
    let before = svc.session_info("room").unwrap();
    assert!(svc.presence().timers().is_pending("room"));

    let err = svc
        .submit_action("room", &ben(), &select("Nope"), None)
        .unwrap_err();
    assert!(matches!(err, SyncError::InvalidAction { .. }));

    let after = svc.session_info("room").unwrap();
    assert_eq!(after.participants, 0);
    assert_eq!(after.version, before.version);
    assert_eq!(after.log_len, 0);
    assert!(svc.presence().timers().is_pending("room"));

    tokio::time::sleep(Duration::from_secs(31)).await;
    assert!(!svc.store().exists("room"));
}

#[tokio::test(start_paused = true)]
async fn submit_counts_as_first_contact() {
    let svc = service();
    svc.get_view("room", &ana());
    svc.submit_action("room", &ben(), &mark_clue(E1, ClueMark::Affirmed), None)
        .unwrap();
    assert_eq!(svc.presence().count("room"), 2);
}

// ── Codes / join-existing / info ──────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn created_session_can_be_joined_by_code() {
    let svc = service();
    let created = svc.create_session();
    assert!(created.session_id.starts_with("session-"));
    assert_eq!(created.code.len(), 6);
    assert!(created
        .code
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));

    let view = svc
        .join_existing(&created.code.to_ascii_lowercase(), &ana())
        .unwrap();
    assert_eq!(view.session_id, created.session_id);

    let view = svc.join_existing(&created.session_id, &ben()).unwrap();
    assert_eq!(view.participants.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn join_existing_never_creates() {
    let svc = service();
    let err = svc.join_existing("ZZZZZZ", &ana()).unwrap_err();
    assert_eq!(
        err,
        SyncError::SessionNotFound {
            session_id: "session-ZZZZZZ".into()
        }
    );
    assert!(svc.store().is_empty());
}

#[tokio::test(start_paused = true)]
async fn session_info_summarizes() {
    let svc = service();
    svc.get_view("room", &ana());
    svc.submit_action("room", &ana(), &mark_clue(E1, ClueMark::Affirmed), None)
        .unwrap();
    svc.submit_action("room", &ana(), &select("H2"), None).unwrap();
    tokio::time::advance(Duration::from_secs(7)).await;

    let info = svc.session_info("room").unwrap();
    assert_eq!(info.log_len, 2);
    assert_eq!(info.marked_clues, 1);
    assert_eq!(info.marked_hypotheses, 1);
    assert_eq!(info.participants, 1);
    assert_eq!(info.idle_secs, 7);
    assert!(svc.session_info("nope").is_none());
}

// ── Status / disconnect ───────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn status_tracks_presence_and_grace() {
    let svc = service();
    assert_eq!(svc.status("room"), SessionStatus::Missing);

    svc.get_view("room", &ana());
    assert_eq!(svc.status("room"), SessionStatus::Active { participants: 1 });

    svc.notify_disconnect("room", &ana().key);
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(
        svc.status("room"),
        SessionStatus::Empty {
            idle_for: Duration::from_secs(10)
        }
    );

    tokio::time::sleep(Duration::from_secs(25)).await;
    assert_eq!(svc.status("room"), SessionStatus::Missing);
}

#[tokio::test(start_paused = true)]
async fn reconnect_inside_grace_keeps_marks() {
    let svc = service();
    svc.get_view("room", &ana());
    svc.submit_action("room", &ana(), &mark_clue(E1, ClueMark::Affirmed), None)
        .unwrap();
    svc.notify_disconnect("room", &ana().key);

    tokio::time::sleep(Duration::from_secs(5)).await;
    let view = svc.get_view("room", &ana());
    assert_eq!(view.clues.get(E1), ClueMark::Affirmed);

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(svc.store().exists("room"));
}

#[tokio::test(start_paused = true)]
async fn disconnect_is_best_effort() {
    let svc = service();
    svc.notify_disconnect("never-existed", &ana().key);
    svc.get_view("room", &ana());
    svc.notify_disconnect("room", &ben().key);
    assert_eq!(svc.presence().count("room"), 1);
}

// ── Wire dispatch ─────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn handle_message_round_trip() {
    let svc = service();
    let join = ClientMessage::decode(
        r#"{"type":"join","session_id":"room","identity":{"display_name":"Ana","key":"ana-key"}}"#,
    )
    .unwrap();
    let reply = svc.handle_message(join).unwrap();
    assert!(matches!(reply, ServerMessage::SyncState { .. }));

    let action = ClientMessage::Action {
        session_id: "room".into(),
        identity: ana(),
        action: select("Banshee"),
        dedup: None,
    };
    match svc.handle_message(action).unwrap() {
        ServerMessage::ActionRejected { error } => {
            assert!(matches!(error, SyncError::InvalidAction { .. }))
        }
        other => panic!("unexpected reply: {other:?}"),
    }

    let action = ClientMessage::Action {
        session_id: "room".into(),
        identity: ana(),
        action: select("H1"),
        dedup: None,
    };
    let reply = svc.handle_message(action).unwrap();
    let encoded = reply.encode().unwrap();
    assert_eq!(ServerMessage::decode(&encoded).unwrap(), reply);

    let leave = ClientMessage::Leave {
        session_id: "room".into(),
        identity_key: ana().key,
    };
    assert!(svc.handle_message(leave).is_none());
    assert_eq!(svc.presence().count("room"), 0);
}

#[tokio::test(start_paused = true)]
async fn from_config_uses_standard_catalog_by_default() {
    let svc = SyncService::from_config(test_config()).unwrap();
    assert_eq!(svc.catalog().len(), 24);
}
