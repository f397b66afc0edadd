//! Repository trait definitions (Ports)
//!
//! The order set is persisted as a whole snapshot. Implementations can be
//! in-memory, a JSON file, or a mock for testing.

use crate::error::StoreError;
use async_trait::async_trait;
use finclient_domain::Party;

/// Repository for order set snapshots
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Load the last saved snapshot
    ///
    /// Returns `None` if nothing has been saved yet.
    async fn load(&self) -> Result<Option<Vec<Party>>, StoreError>;

    /// Save a snapshot, replacing the previous one
    async fn save(&self, parties: &[Party]) -> Result<(), StoreError>;
}
