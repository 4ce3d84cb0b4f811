//! # wraith-presence
//!
//! Who is currently in each session. Presence lives next to, not inside,
//! the substantive state: a reconnect never loses marks, only sustained
//! absence past the grace period does.

pub mod grace;
pub mod tracker;

pub use grace::GraceTimers;
pub use tracker::PresenceTracker;
