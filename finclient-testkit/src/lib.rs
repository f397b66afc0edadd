//! Test fixtures for FinClient.
//!
//! Provides a `PartyBuilder` and a set of typical parties shared by the
//! unit and integration tests of every crate in the workspace.

mod builder;
pub mod typical;

pub use builder::PartyBuilder;
