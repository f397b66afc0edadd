//! JSON file store implementation
//!
//! Persists the order set as a single [`JsonSnapshot`] document. Saves write
//! a sibling temp file and rename it over the target, so a crash mid-save
//! leaves the previous snapshot intact.

use crate::error::StoreError;
use crate::json::JsonSnapshot;
use crate::repository::SnapshotRepository;
use async_trait::async_trait;
use finclient_domain::Party;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Snapshot store backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for `path`; the file need not exist yet
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SnapshotRepository for JsonFileStore {
    async fn load(&self) -> Result<Option<Vec<Party>>, StoreError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No snapshot file yet");
                return Ok(None);
            },
            Err(err) => return Err(err.into()),
        };

        let snapshot: JsonSnapshot = serde_json::from_str(&text)?;
        let parties = snapshot.to_models()?;
        info!(path = %self.path.display(), parties = parties.len(), "Snapshot loaded");
        Ok(Some(parties))
    }

    async fn save(&self, parties: &[Party]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let text = serde_json::to_string_pretty(&JsonSnapshot::from_parties(parties))?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, text).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        debug!(path = %self.path.display(), parties = parties.len(), "Snapshot saved");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
