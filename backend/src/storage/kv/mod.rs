//! Key-value blob storage backed by a local data directory.

pub mod connection;
pub mod snapshot_repository;

pub use connection::KvConnection;
pub use snapshot_repository::SnapshotRepository;
