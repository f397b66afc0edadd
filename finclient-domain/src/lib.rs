//! FinClient Domain Layer
//!
//! Pure domain logic with zero I/O dependencies.
//! Contains the party entity, order value objects, and domain rules.

#![warn(clippy::all)]

// Public modules
pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{same_identity, same_value, Party, PartyDetails, PartyView, SortCriterion};
pub use value_objects::{
    DomainError, Name, Networth, Order, OrderSide, Price, Quantity, Remark,
};
