//! # wraith-actions
//!
//! The action processor: the only way clue marks, hypothesis marks and
//! flags change. Every accepted action appends to the activity log.

pub mod errors;
pub mod processor;

pub use errors::ApplyError;
pub use processor::{ActionProcessor, AppliedResult};
