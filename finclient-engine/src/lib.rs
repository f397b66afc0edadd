//! FinClient Engine Layer
//!
//! Pure decision logic, deterministic, no I/O.
//! Takes a snapshot of orders → returns the auction clearing price.

#![warn(clippy::all)]

pub mod clearing;

pub use clearing::{ClearingEngine, ClearingOutcome};
