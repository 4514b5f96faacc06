//! # Storage Module
//!
//! Handles persistence for the week tracker.
//!
//! The entire application state is one JSON blob stored under a fixed name
//! in a local data directory. This module abstracts that detail behind the
//! [`SnapshotStorage`] trait so the domain layer never touches the
//! filesystem directly.
//!
//! ## Key Responsibilities
//!
//! - **Data Persistence**: Saving the week-store snapshot after mutations
//! - **Data Retrieval**: Loading the snapshot at startup
//! - **Resilience**: A missing or malformed blob loads as an empty store
//!   instead of failing startup
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: Clean separation between domain and data access
//! - **Best-Effort Writes**: Save failures are reported to the caller, which
//!   logs and continues with in-memory state as the source of truth

pub mod kv;
pub mod traits;

pub use kv::{KvConnection, SnapshotRepository};
pub use traits::SnapshotStorage;
