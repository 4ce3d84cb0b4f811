//! # wraith-session
//!
//! Session store: one authoritative [`Session`] per session id, each behind
//! its own lock so unrelated sessions never contend.

pub mod cleanup;
pub mod dedup;
pub mod session;
pub mod store;

pub use cleanup::SweepReport;
pub use dedup::DedupWindow;
pub use session::{Occupancy, Participant, Session};
pub use store::{SessionHandle, SessionStore};
