//! # Domain Module
//!
//! Contains all business logic for the weekly task tracker.
//!
//! This module encapsulates the core rules that define how weeks are
//! identified, how task lists carry forward between weeks, and how
//! checkmarks, scores, and the completion lock behave. It operates
//! independently of any UI framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **week_service**: The week store - task CRUD, checkmark toggling,
//!   scoring, the completion lock, and week navigation
//! - **calendar**: Week-id derivation (Monday-keyed weeks) and date math
//! - **commands**: Command/result structs consumed by the services
//!
//! ## Business Rules
//!
//! - A week is named by its Monday; Sunday belongs to the preceding Monday
//! - A new week inherits the task list of the nearest prior existing week
//! - Task names are trimmed and unique case-insensitively within a week
//! - A completed week rejects every edit until it is explicitly unlocked
//! - Bonus tasks score identically to regular tasks

pub mod calendar;
pub mod commands;
pub mod week_service;

pub use commands::*;
pub use week_service::*;
