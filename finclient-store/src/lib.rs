//! FinClient Storage Layer
//!
//! Holds the managed parties and persists them.
//!
//! # Architecture
//!
//! - **OrderSet**: the only mutation surface; keeps party names unique
//! - **EventBus**: change notifications after each successful mutation
//! - **Repository trait**: snapshot storage interface (port)
//! - **In-memory store**: fast implementation for testing
//! - **JSON file store**: on-disk implementation used by the binary
//!
//! # Usage
//!
//! ```rust
//! use finclient_domain::{Name, Order, Party, PartyDetails};
//! use finclient_store::{MemoryStore, OrderSet, SnapshotRepository};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MemoryStore::new();
//!     let mut set = OrderSet::new();
//!
//!     let buyer = Party::new(Name::new("Alice Pauline").unwrap(), PartyDetails::default())
//!         .with_order(Order::parse("BUY 10 @ $12").unwrap());
//!     let seller = Party::new(Name::new("Benson Meier").unwrap(), PartyDetails::default())
//!         .with_order(Order::parse("SELL 8 @ $10").unwrap());
//!     set.add(buyer).unwrap();
//!     set.add(seller).unwrap();
//!
//!     store.save(set.parties()).await.unwrap();
//!     println!("Clearing price: {:?}", set.clearing_price());
//! }
//! ```

#![warn(clippy::all)]

// Modules
mod error;
mod events;
mod file;
mod json;
mod memory;
mod order_set;
mod repository;

// Re-exports
pub use error::StoreError;
pub use events::{BookEvent, EventBus, EventReceiver, Notification};
pub use file::JsonFileStore;
pub use json::{JsonParty, JsonSnapshot, TIMESTAMP_FORMAT};
pub use memory::MemoryStore;
pub use order_set::OrderSet;
pub use repository::SnapshotRepository;
