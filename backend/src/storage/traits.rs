//! # Storage Traits
//!
//! This module defines the storage abstraction trait that allows different
//! persistence backends to be used interchangeably in the domain layer.

use anyhow::Result;
use shared::StoreSnapshot;

/// Trait defining the interface for snapshot persistence
///
/// The week store treats persistence as a best-effort side effect: the
/// snapshot is loaded once at startup and written back after every mutating
/// operation.
pub trait SnapshotStorage: Send + Sync {
    /// Load the persisted snapshot, if one exists
    ///
    /// A missing blob returns `Ok(None)`. A malformed blob also returns
    /// `Ok(None)` - stale or hand-edited state must never prevent startup.
    fn load_snapshot(&self) -> Result<Option<StoreSnapshot>>;

    /// Persist the snapshot, replacing any previous state
    fn save_snapshot(&self, snapshot: &StoreSnapshot) -> Result<()>;
}
