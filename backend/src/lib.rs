//! # Ticks and Tokens Backend
//!
//! Contains all non-UI logic for the weekly task tracker.
//!
//! This crate brings together:
//! - **Domain**: Week-keyed task lists, checkmark grids, scores, and the
//!   week-completion lock
//! - **Storage**: The single JSON state blob persisted in a local data
//!   directory
//! - **Config**: The fixed set of child profiles and their starting tasks
//!
//! The backend is UI-agnostic: the dashboard shell calls into
//! [`WeekService`] in response to user actions and decides what to
//! re-render from the returned results. No operation here reaches into a
//! presentation surface.
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (dashboard shell, dialogs, animations)
//!     |
//! Domain Layer (WeekService, calendar rules)
//!     |
//! Storage Layer (snapshot blob in the data directory)
//! ```

pub mod config;
pub mod domain;
pub mod storage;

pub use domain::*;
pub use storage::*;

use anyhow::Result;
use log::info;
use std::path::Path;
use std::sync::Arc;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub week_service: domain::WeekService,
}

/// Initialize the backend with all required services, using the given data
/// directory for persistence and configuration
pub fn initialize_backend<P: AsRef<Path>>(data_dir: P) -> Result<AppState> {
    info!("Setting up storage");
    let connection = storage::KvConnection::new(data_dir)?;
    build_app_state(connection)
}

/// Initialize the backend in the default data directory
/// (~/Documents/Ticks and Tokens)
pub fn initialize_backend_default() -> Result<AppState> {
    info!("Setting up storage in default data directory");
    let connection = storage::KvConnection::new_default()?;
    build_app_state(connection)
}

fn build_app_state(connection: storage::KvConnection) -> Result<AppState> {
    info!("Loading child configuration");
    let children = config::load_children(connection.base_directory())?;

    info!("Setting up domain model");
    let repository = storage::SnapshotRepository::new(connection);
    let week_service = domain::WeekService::new(children, Arc::new(repository));

    Ok(AppState { week_service })
}
