//! The week store: per-child weekly task lists, checkmark grids, scores,
//! and the week-completion lock.

use anyhow::Result;
use chrono::Utc;
use log::{debug, info, warn};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use shared::{ChildProfile, StoreSnapshot, Task, WeekRecord, DAYS_PER_WEEK};

use crate::domain::calendar;
use crate::domain::commands::week::{
    AddTaskCommand, AddTaskResult, NavigateWeekCommand, NavigateWeekResult, RemoveTaskCommand,
    RemoveTaskResult, SetWeekCompletedCommand, ToggleCheckmarkCommand, ToggleCheckmarkResult,
    UpdateTaskCommand, UpdateTaskResult,
};
use crate::storage::traits::SnapshotStorage;

/// Failure reasons reported by mutating week-store operations
///
/// All variants are recoverable: the operation is rejected and the store is
/// left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeekStoreError {
    #[error("Task name is required")]
    EmptyName,
    #[error("A task with this name already exists")]
    DuplicateName,
    #[error("Task not found: {0}")]
    TaskNotFound(String),
    #[error("Week is marked complete and cannot be changed")]
    WeekLocked,
}

/// Service owning all week-keyed task data
///
/// Week records are created lazily on first access and never deleted. The
/// snapshot is loaded once at construction and written back after every
/// mutating operation; save failures are logged and swallowed, leaving the
/// in-memory state authoritative for the rest of the session.
#[derive(Clone)]
pub struct WeekService {
    /// Fixed set of children, in display order
    children: Vec<ChildProfile>,
    state: Arc<Mutex<StoreSnapshot>>,
    storage: Arc<dyn SnapshotStorage>,
}

impl WeekService {
    /// Create a new WeekService, restoring persisted state when available
    pub fn new(children: Vec<ChildProfile>, storage: Arc<dyn SnapshotStorage>) -> Self {
        let mut snapshot = match storage.load_snapshot() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => StoreSnapshot::default(),
            Err(e) => {
                warn!("Failed to load saved state, starting empty: {:#}", e);
                StoreSnapshot::default()
            }
        };

        if snapshot.current_week_id.is_empty() {
            snapshot.current_week_id = calendar::current_week_id();
        }
        Self::normalize_checks(&mut snapshot);

        info!(
            "Week store ready: {} children, current week {}",
            children.len(),
            snapshot.current_week_id
        );

        Self {
            children,
            state: Arc::new(Mutex::new(snapshot)),
            storage,
        }
    }

    /// The configured children, in display order
    pub fn children(&self) -> &[ChildProfile] {
        &self.children
    }

    /// The week currently displayed
    pub fn current_week_id(&self) -> String {
        self.state.lock().unwrap().current_week_id.clone()
    }

    /// Whether edit affordances are visible
    pub fn is_edit_mode(&self) -> bool {
        self.state.lock().unwrap().is_edit_mode
    }

    /// Show or hide edit affordances; the flag is persisted with the rest
    /// of the state
    pub fn set_edit_mode(&self, enabled: bool) {
        let mut state = self.state.lock().unwrap();
        state.is_edit_mode = enabled;
        self.persist(&state);
    }

    /// A copy of the full in-memory state
    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.lock().unwrap().clone()
    }

    /// Return the record for (child, week), creating it if needed
    ///
    /// A new week inherits the task list of the chronologically nearest
    /// existing week strictly before it for the same child; a child's very
    /// first week starts from their configured initial tasks. Checkmarks
    /// always start all-false and the new week is unlocked.
    pub fn get_or_create_week(&self, child_id: &str, week_id: &str) -> WeekRecord {
        let mut state = self.state.lock().unwrap();

        let existed = state
            .week_data
            .get(child_id)
            .map(|weeks| weeks.contains_key(week_id))
            .unwrap_or(false);

        let record = Self::ensure_week(&self.children, &mut state, child_id, week_id).clone();

        if !existed {
            self.persist(&state);
        }
        record
    }

    /// Record for the currently displayed week of one child
    pub fn current_week(&self, child_id: &str) -> WeekRecord {
        let week_id = self.current_week_id();
        self.get_or_create_week(child_id, &week_id)
    }

    /// Flip one checkmark cell
    ///
    /// A locked week is rejected with `WeekLocked`. An out-of-range day or
    /// an unknown task id is a silent no-op (`checked: None`).
    pub fn toggle_checkmark(
        &self,
        command: ToggleCheckmarkCommand,
    ) -> Result<ToggleCheckmarkResult, WeekStoreError> {
        let mut state = self.state.lock().unwrap();
        let existed = state
            .week_data
            .get(&command.child_id)
            .map(|weeks| weeks.contains_key(&command.week_id))
            .unwrap_or(false);
        let record = Self::ensure_week(&self.children, &mut state, &command.child_id, &command.week_id);

        // A completed week is never freshly created, so the lock check
        // cannot leave an unpersisted record behind
        if record.completed {
            return Err(WeekStoreError::WeekLocked);
        }
        if command.day_index >= DAYS_PER_WEEK {
            debug!(
                "Ignoring checkmark toggle for out-of-range day {}",
                command.day_index
            );
            if !existed {
                self.persist(&state);
            }
            return Ok(ToggleCheckmarkResult { checked: None });
        }
        if record.task(&command.task_id).is_none() {
            debug!("Ignoring checkmark toggle for unknown task {}", command.task_id);
            if !existed {
                self.persist(&state);
            }
            return Ok(ToggleCheckmarkResult { checked: None });
        }

        let row = record
            .checks
            .entry(command.task_id.clone())
            .or_insert_with(|| vec![false; DAYS_PER_WEEK]);
        row[command.day_index] = !row[command.day_index];
        let checked = row[command.day_index];

        self.persist(&state);
        Ok(ToggleCheckmarkResult {
            checked: Some(checked),
        })
    }

    /// Add a task to a week
    pub fn add_task(&self, command: AddTaskCommand) -> Result<AddTaskResult, WeekStoreError> {
        let name = command.name.trim();

        let mut state = self.state.lock().unwrap();
        let record = Self::ensure_week(&self.children, &mut state, &command.child_id, &command.week_id);

        if record.completed {
            return Err(WeekStoreError::WeekLocked);
        }
        if name.is_empty() {
            return Err(WeekStoreError::EmptyName);
        }
        let needle = name.to_lowercase();
        if record
            .tasks
            .iter()
            .any(|t| t.name.trim().to_lowercase() == needle)
        {
            return Err(WeekStoreError::DuplicateName);
        }

        let task = Task {
            id: Task::generate_id(Utc::now().timestamp_millis() as u64),
            name: name.to_string(),
            is_extra: command.is_extra,
        };
        record
            .checks
            .insert(task.id.clone(), vec![false; DAYS_PER_WEEK]);
        record.tasks.push(task.clone());

        info!(
            "Added task '{}' to week {} for {}",
            task.name, command.week_id, command.child_id
        );
        self.persist(&state);
        Ok(AddTaskResult { task })
    }

    /// Edit an existing task's name or bonus flag; checkmarks are untouched
    pub fn update_task(&self, command: UpdateTaskCommand) -> Result<UpdateTaskResult, WeekStoreError> {
        let name = command.name.trim();

        let mut state = self.state.lock().unwrap();
        let record = Self::ensure_week(&self.children, &mut state, &command.child_id, &command.week_id);

        if record.completed {
            return Err(WeekStoreError::WeekLocked);
        }
        if name.is_empty() {
            return Err(WeekStoreError::EmptyName);
        }
        // Duplicate check excludes the task being edited
        let needle = name.to_lowercase();
        if record
            .tasks
            .iter()
            .any(|t| t.id != command.task_id && t.name.trim().to_lowercase() == needle)
        {
            return Err(WeekStoreError::DuplicateName);
        }

        let task = record
            .tasks
            .iter_mut()
            .find(|t| t.id == command.task_id)
            .ok_or_else(|| WeekStoreError::TaskNotFound(command.task_id.clone()))?;
        task.name = name.to_string();
        task.is_extra = command.is_extra;
        let task = task.clone();

        info!(
            "Updated task {} in week {} for {}",
            task.id, command.week_id, command.child_id
        );
        self.persist(&state);
        Ok(UpdateTaskResult { task })
    }

    /// Remove a task and its checkmark row atomically
    pub fn remove_task(&self, command: RemoveTaskCommand) -> Result<RemoveTaskResult, WeekStoreError> {
        let mut state = self.state.lock().unwrap();
        let record = Self::ensure_week(&self.children, &mut state, &command.child_id, &command.week_id);

        if record.completed {
            return Err(WeekStoreError::WeekLocked);
        }

        let index = record
            .tasks
            .iter()
            .position(|t| t.id == command.task_id)
            .ok_or_else(|| WeekStoreError::TaskNotFound(command.task_id.clone()))?;

        let removed = record.tasks.remove(index);
        record.checks.remove(&removed.id);

        info!(
            "Removed task '{}' from week {} for {}",
            removed.name, command.week_id, command.child_id
        );
        self.persist(&state);
        Ok(RemoveTaskResult {
            removed_task: removed,
        })
    }

    /// Set or clear the completion lock
    ///
    /// Both directions are always permitted; unlocking is the escape hatch
    /// for correcting mistakes. The record is created if needed.
    pub fn set_week_completed(&self, command: SetWeekCompletedCommand) {
        let mut state = self.state.lock().unwrap();
        let record = Self::ensure_week(&self.children, &mut state, &command.child_id, &command.week_id);
        record.completed = command.completed;

        info!(
            "Week {} for {} marked {}",
            command.week_id,
            command.child_id,
            if command.completed { "complete" } else { "incomplete" }
        );
        self.persist(&state);
    }

    /// Total checkmarks for one child's week; a week that was never created
    /// scores zero
    pub fn compute_score(&self, child_id: &str, week_id: &str) -> u32 {
        let state = self.state.lock().unwrap();
        state
            .week_data
            .get(child_id)
            .and_then(|weeks| weeks.get(week_id))
            .map(|record| record.score())
            .unwrap_or(0)
    }

    /// Whether one child's week is locked
    pub fn is_week_completed(&self, child_id: &str, week_id: &str) -> bool {
        let state = self.state.lock().unwrap();
        state
            .week_data
            .get(child_id)
            .and_then(|weeks| weeks.get(week_id))
            .map(|record| record.completed)
            .unwrap_or(false)
    }

    /// Whether every configured child has completed the given week
    ///
    /// Completion is tracked per child; this aggregate exists for the UI's
    /// single "week done" banner.
    pub fn is_week_completed_for_all(&self, week_id: &str) -> bool {
        !self.children.is_empty()
            && self
                .children
                .iter()
                .all(|child| self.is_week_completed(&child.id, week_id))
    }

    /// Shift the displayed week by one week in either direction
    ///
    /// Backward navigation is unrestricted. Forward navigation is capped at
    /// one week beyond today's week; a refused move returns the unchanged
    /// week id. Records for every child are created at the destination so
    /// task continuity survives skipping over empty weeks.
    pub fn navigate(&self, command: NavigateWeekCommand) -> NavigateWeekResult {
        let mut state = self.state.lock().unwrap();
        let current = state.current_week_id.clone();

        let delta = command.direction.signum() as i64;
        if delta == 0 {
            return NavigateWeekResult { week_id: current };
        }

        let next = match calendar::shift_week_id(&current, delta) {
            Ok(week_id) => week_id,
            Err(e) => {
                warn!("Refusing navigation from malformed week id: {:#}", e);
                return NavigateWeekResult { week_id: current };
            }
        };

        // YYYY-MM-DD strings compare chronologically
        if delta > 0 && next > calendar::forward_navigation_limit() {
            debug!("Forward navigation capped; staying on {}", current);
            return NavigateWeekResult { week_id: current };
        }

        state.current_week_id = next.clone();
        let child_ids: Vec<String> = self.children.iter().map(|c| c.id.clone()).collect();
        for child_id in &child_ids {
            Self::ensure_week(&self.children, &mut state, child_id, &next);
        }

        info!("Navigated to week {}", next);
        self.persist(&state);
        NavigateWeekResult { week_id: next }
    }

    /// Pad or trim every checkmark row to the fixed week width
    ///
    /// Saved blobs are not guaranteed to carry well-formed rows (hand
    /// edits, older versions). Missing entries read as false; excess
    /// entries are dropped. Rows created by this service are always full
    /// width, so this only touches loaded state.
    fn normalize_checks(snapshot: &mut StoreSnapshot) {
        for weeks in snapshot.week_data.values_mut() {
            for record in weeks.values_mut() {
                for row in record.checks.values_mut() {
                    if row.len() != DAYS_PER_WEEK {
                        debug!(
                            "Normalizing checkmark row of length {} to {}",
                            row.len(),
                            DAYS_PER_WEEK
                        );
                        row.resize(DAYS_PER_WEEK, false);
                    }
                }
            }
        }
    }

    /// Look up or create a week record inside an already-locked snapshot
    fn ensure_week<'a>(
        children: &[ChildProfile],
        snapshot: &'a mut StoreSnapshot,
        child_id: &str,
        week_id: &str,
    ) -> &'a mut WeekRecord {
        let child_weeks = snapshot.week_data.entry(child_id.to_string()).or_default();

        if !child_weeks.contains_key(week_id) {
            // Seed from the nearest strictly-prior week, else the child's
            // configured starting tasks
            let tasks: Vec<Task> = match child_weeks.range(..week_id.to_string()).next_back() {
                Some((prior_id, prior)) => {
                    debug!("Seeding week {} for {} from week {}", week_id, child_id, prior_id);
                    prior.tasks.clone()
                }
                None => children
                    .iter()
                    .find(|c| c.id == child_id)
                    .map(|c| c.initial_tasks.clone())
                    .unwrap_or_default(),
            };

            let checks = tasks
                .iter()
                .map(|t| (t.id.clone(), vec![false; DAYS_PER_WEEK]))
                .collect();

            child_weeks.insert(
                week_id.to_string(),
                WeekRecord {
                    tasks,
                    checks,
                    completed: false,
                },
            );
        }

        child_weeks
            .get_mut(week_id)
            .expect("week record exists after ensure")
    }

    /// Write the snapshot back to storage, best effort
    fn persist(&self, snapshot: &StoreSnapshot) {
        if let Err(e) = self.storage.save_snapshot(snapshot) {
            warn!("Failed to persist week data: {:#}", e);
        }
    }
}
