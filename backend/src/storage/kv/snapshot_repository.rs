use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;

use shared::StoreSnapshot;

use super::connection::KvConnection;
use crate::storage::traits::SnapshotStorage;

/// JSON blob repository for the week-store snapshot
#[derive(Clone)]
pub struct SnapshotRepository {
    connection: KvConnection,
}

impl SnapshotRepository {
    /// Create a new snapshot repository
    pub fn new(connection: KvConnection) -> Self {
        Self { connection }
    }

    /// The underlying connection
    pub fn connection(&self) -> &KvConnection {
        &self.connection
    }
}

impl SnapshotStorage for SnapshotRepository {
    fn load_snapshot(&self) -> Result<Option<StoreSnapshot>> {
        let path = self.connection.snapshot_file_path();

        if !path.exists() {
            debug!("No saved state at {}", path.display());
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read saved state from {}", path.display()))?;

        match serde_json::from_str::<StoreSnapshot>(&contents) {
            Ok(snapshot) => {
                debug!("Loaded saved state from {}", path.display());
                Ok(Some(snapshot))
            }
            Err(e) => {
                // Malformed state must not prevent startup
                warn!(
                    "Ignoring malformed saved state in {}: {}",
                    path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    fn save_snapshot(&self, snapshot: &StoreSnapshot) -> Result<()> {
        let path = self.connection.snapshot_file_path();
        let contents =
            serde_json::to_string_pretty(snapshot).context("Failed to serialize state")?;

        // Atomic write using temp file
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!("Saved state to {}", path.display());
        Ok(())
    }
}
