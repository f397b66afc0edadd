//! In-memory store implementation
//!
//! Used for testing and development without a data file.
//! Thread-safe using RwLock for concurrent access.

use crate::error::StoreError;
use crate::repository::SnapshotRepository;
use async_trait::async_trait;
use finclient_domain::Party;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory snapshot store for testing
pub struct MemoryStore {
    snapshot: RwLock<Option<Vec<Party>>>,
    saves: AtomicU64,
}

impl MemoryStore {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(None),
            saves: AtomicU64::new(0),
        }
    }

    /// Create a store that already holds `parties`
    pub fn with_parties(parties: Vec<Party>) -> Self {
        Self {
            snapshot: RwLock::new(Some(parties)),
            saves: AtomicU64::new(0),
        }
    }

    /// Get the number of saved parties
    pub fn party_count(&self) -> usize {
        self.read().as_ref().map_or(0, Vec::len)
    }

    /// Get the number of completed saves
    pub fn save_count(&self) -> u64 {
        self.saves.load(Ordering::SeqCst)
    }

    /// Clear all data (useful for test setup)
    pub fn clear(&self) {
        *self.write() = None;
        self.saves.store(0, Ordering::SeqCst);
    }

    // A poisoned lock still holds a whole snapshot; writes replace it atomically
    fn read(&self) -> RwLockReadGuard<'_, Option<Vec<Party>>> {
        self.snapshot.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Vec<Party>>> {
        self.snapshot.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Snapshot Repository Implementation
// =============================================================================

#[async_trait]
impl SnapshotRepository for MemoryStore {
    async fn load(&self) -> Result<Option<Vec<Party>>, StoreError> {
        Ok(self.read().clone())
    }

    async fn save(&self, parties: &[Party]) -> Result<(), StoreError> {
        *self.write() = Some(parties.to_vec());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use finclient_testkit::typical;

    #[tokio::test]
    async fn test_empty_store_loads_none() {
        let store = MemoryStore::new();
        assert!(store.load().await.unwrap().is_none());
        assert_eq!(store.party_count(), 0);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let store = MemoryStore::new();
        let parties = vec![typical::alice(), typical::benson()];

        store.save(&parties).await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some(parties));
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn test_save_replaces_previous_snapshot() {
        let store = MemoryStore::with_parties(vec![typical::alice(), typical::benson()]);

        store.save(&[typical::carl()]).await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some(vec![typical::carl()]));
        assert_eq!(store.party_count(), 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = MemoryStore::new();
        store.save(&[typical::alice()]).await.unwrap();

        store.clear();

        assert!(store.load().await.unwrap().is_none());
        assert_eq!(store.save_count(), 0);
    }
}
