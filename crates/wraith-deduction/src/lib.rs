//! # wraith-deduction
//!
//! Pure, side-effect-free deduction over a clue board.
//! Called on every read and every mutation, so nothing here allocates more
//! than the result it returns.
//!
//! ## Modules
//!
//! - `engine`: consistency filter, resolution, and the combined [`Deduction`]

pub mod engine;

pub use engine::{
    consistent_hypotheses, deduce, is_consistent, resolve_hypothesis, Deduction,
};
