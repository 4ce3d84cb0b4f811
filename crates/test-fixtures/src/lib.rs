//! Shared fixtures for wraith integration tests.
//!
//! Provides the small three-hypothesis catalog used throughout the test
//! suites, stock participant identities, and shorthand action builders.

use std::sync::Arc;

use wraith_core::catalog::{Catalog, Clue, Hypothesis, HypothesisId};
use wraith_core::config::WraithConfig;
use wraith_core::models::{Action, ClueMark, FlagId, FlagValue, HypothesisMark, Identity};

/// First clue of the small catalog.
pub const E1: Clue = Clue::EmfLevel5;
/// Second clue of the small catalog.
pub const E2: Clue = Clue::SpiritBox;
/// Third clue of the small catalog.
pub const E3: Clue = Clue::GhostWriting;

/// H1 requires {E1, E2}, H2 requires {E1, E3}, H3 requires {E2, E3}.
pub fn three_hypothesis_catalog() -> Catalog {
    Catalog::new(vec![
        Hypothesis::new("H1", [E1, E2]),
        Hypothesis::new("H2", [E1, E3]),
        Hypothesis::new("H3", [E2, E3]),
    ])
    .expect("fixture catalog is valid")
}

/// Same as [`three_hypothesis_catalog`], shared.
pub fn shared_catalog() -> Arc<Catalog> {
    Arc::new(three_hypothesis_catalog())
}

/// A catalog where H1 also carries `E3` as a decoy clue.
pub fn decoy_catalog() -> Catalog {
    Catalog::new(vec![
        Hypothesis::new("H1", [E1, E2]).with_decoys([E3]),
        Hypothesis::new("H2", [E1, E3]),
        Hypothesis::new("H3", [E2, E3]),
    ])
    .expect("fixture catalog is valid")
}

pub fn hid(id: &str) -> HypothesisId {
    HypothesisId::from(id)
}

pub fn ana() -> Identity {
    Identity::new("Ana", "ana-key")
}

pub fn ben() -> Identity {
    Identity::new("Ben", "ben-key")
}

pub fn cleo() -> Identity {
    Identity::new("Cleo", "cleo-key")
}

pub fn mark_clue(clue: Clue, mark: ClueMark) -> Action {
    Action::MarkClue { clue, mark }
}

pub fn select(id: &str) -> Action {
    Action::MarkHypothesis {
        hypothesis: hid(id),
        mark: HypothesisMark::Selected,
    }
}

pub fn unselect(id: &str) -> Action {
    Action::MarkHypothesis {
        hypothesis: hid(id),
        mark: HypothesisMark::Unset,
    }
}

pub fn bone_found(found: bool) -> Action {
    Action::SetFlag {
        flag: FlagId::BoneFound,
        value: FlagValue::Toggle(found),
    }
}

/// Configuration with short, round timings for paused-clock tests:
/// grace 30 s, heartbeat timeout 120 s, sweep every 60 s, idle 600 s.
pub fn test_config() -> WraithConfig {
    let mut config = WraithConfig::default();
    config.session.empty_grace_secs = 30;
    config.session.sweep_interval_secs = 60;
    config.session.idle_timeout_secs = 600;
    config.presence.heartbeat_timeout_secs = 120;
    config.sync.subscriber_buffer = 8;
    config
}
