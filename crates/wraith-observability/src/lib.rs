//! # wraith-observability
//!
//! Tracing subscriber setup plus one structured event function per
//! lifecycle transition, so every crate logs the same field names.

pub mod tracing_setup;

pub use tracing_setup::{events, init_tracing, init_tracing_with_filter};
