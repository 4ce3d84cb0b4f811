//! # wraith-sync
//!
//! The surface transports call into. [`SyncService`] ties the session
//! store, presence tracker and action processor together and serves full
//! derived views, either pushed to subscribers or pulled by pollers.

pub mod client;
pub mod errors;
pub mod janitor;
pub mod protocol;
pub mod push;
pub mod service;
pub mod view;

pub use client::{LocalEndpoint, PollEvent, PollingClient, SyncEndpoint};
pub use errors::{ClientError, SyncError, TransportError};
pub use janitor::{Janitor, JanitorPass};
pub use protocol::{ClientMessage, ServerMessage};
pub use push::{PushHub, Subscription};
pub use service::{SessionCode, SessionInfo, SessionStatus, SyncService};
pub use view::{ParticipantView, SessionView};
