use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Number of day slots in every checkmark row (Monday = 0 .. Sunday = 6)
pub const DAYS_PER_WEEK: usize = 7;

/// A single trackable task within a week
///
/// Task ID format: "task::<epoch_millis>::<random suffix>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    /// Display name (trimmed, unique case-insensitively within a week)
    pub name: String,
    /// Bonus task flag - rendered differently but scored identically
    #[serde(rename = "isExtra")]
    pub is_extra: bool,
}

/// Per-child, per-week record of tasks and their checkmarks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekRecord {
    /// Tasks valid for this week, in display order
    pub tasks: Vec<Task>,
    /// Task ID -> 7 booleans indexed Monday(0)..Sunday(6)
    pub checks: BTreeMap<String, Vec<bool>>,
    /// Completion lock: a completed week rejects all edits until unlocked
    pub completed: bool,
}

/// Static configuration for one child
///
/// The set of children is fixed at startup; `initial_tasks` seeds a child's
/// very first week only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildProfile {
    pub id: String,
    pub name: String,
    #[serde(rename = "initialTasks")]
    pub initial_tasks: Vec<Task>,
}

/// The persisted state blob, stored as a single JSON document
///
/// Field names match the historical on-disk format, so existing saved data
/// keeps loading across versions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Child ID -> week ID (Monday, YYYY-MM-DD) -> week record
    #[serde(rename = "weekData")]
    pub week_data: BTreeMap<String, BTreeMap<String, WeekRecord>>,
    /// Week currently displayed by the dashboard
    #[serde(rename = "currentWeekId")]
    pub current_week_id: String,
    /// Whether edit affordances are visible in the UI
    #[serde(rename = "isEditMode")]
    pub is_edit_mode: bool,
}

/// Short day labels in checkmark-row order
pub fn day_label(day_index: usize) -> &'static str {
    match day_index {
        0 => "Mon",
        1 => "Tue",
        2 => "Wed",
        3 => "Thu",
        4 => "Fri",
        5 => "Sat",
        6 => "Sun",
        _ => "Invalid",
    }
}

impl Task {
    /// Generate a task ID from a timestamp plus a random suffix
    ///
    /// Uniqueness only needs to hold within one child's task-id space, so a
    /// millisecond timestamp with a short random tail is sufficient.
    pub fn generate_id(epoch_millis: u64) -> String {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("task::{}::{}", epoch_millis, &suffix[..8])
    }

    /// Parse a generated task ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, TaskIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 3 || parts[0] != "task" || parts[2].is_empty() {
            return Err(TaskIdError::InvalidFormat);
        }

        parts[1]
            .parse::<u64>()
            .map_err(|_| TaskIdError::InvalidTimestamp)
    }

    /// Extract the creation timestamp from this task's ID
    pub fn extract_timestamp(&self) -> Result<u64, TaskIdError> {
        Self::parse_id(&self.id)
    }
}

impl WeekRecord {
    /// An empty, unlocked week with no tasks
    pub fn empty() -> Self {
        Self {
            tasks: Vec::new(),
            checks: BTreeMap::new(),
            completed: false,
        }
    }

    /// Find a task by ID
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Total checkmarks across all tasks; extra tasks count the same as
    /// regular ones
    pub fn score(&self) -> u32 {
        self.tasks
            .iter()
            .map(|task| {
                self.checks
                    .get(&task.id)
                    .map(|row| row.iter().filter(|&&checked| checked).count())
                    .unwrap_or(0)
            })
            .sum::<usize>() as u32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for TaskIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskIdError::InvalidFormat => write!(f, "Invalid task ID format"),
            TaskIdError::InvalidTimestamp => write!(f, "Invalid timestamp in task ID"),
        }
    }
}

impl std::error::Error for TaskIdError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, name: &str, is_extra: bool) -> Task {
        Task {
            id: id.to_string(),
            name: name.to_string(),
            is_extra,
        }
    }

    #[test]
    fn test_generate_task_id() {
        let id = Task::generate_id(1702516122000);
        assert!(id.starts_with("task::1702516122000::"));

        // Random suffix keeps back-to-back IDs distinct
        let other = Task::generate_id(1702516122000);
        assert_ne!(id, other);
    }

    #[test]
    fn test_parse_task_id() {
        let id = Task::generate_id(1702516122000);
        assert_eq!(Task::parse_id(&id).unwrap(), 1702516122000);

        // Invalid format
        assert!(Task::parse_id("invalid::format").is_err());
        assert!(Task::parse_id("task::123").is_err());
        assert!(Task::parse_id("not_task::123::abc").is_err());
        assert!(Task::parse_id("task::123::").is_err());

        // Invalid timestamp
        assert!(Task::parse_id("task::not_a_number::abc").is_err());
    }

    #[test]
    fn test_extract_timestamp() {
        let t = task("task::1702516122000::a1b2c3d4", "Make Bed", false);
        assert_eq!(t.extract_timestamp().unwrap(), 1702516122000);
    }

    #[test]
    fn test_week_record_score() {
        let mut record = WeekRecord::empty();
        record.tasks.push(task("t1", "Make Bed", false));
        record.tasks.push(task("t2", "Practice Piano", true));
        record.checks.insert(
            "t1".to_string(),
            vec![true, true, false, false, false, false, false],
        );
        record.checks.insert("t2".to_string(), vec![false; 7]);

        assert_eq!(record.score(), 2);

        // Extra tasks count at equal weight
        if let Some(row) = record.checks.get_mut("t2") {
            row[6] = true;
        }
        assert_eq!(record.score(), 3);
    }

    #[test]
    fn test_score_ignores_checks_without_task() {
        let mut record = WeekRecord::empty();
        record.tasks.push(task("t1", "Make Bed", false));
        record.checks.insert("t1".to_string(), vec![true; 7]);
        record.checks.insert("orphan".to_string(), vec![true; 7]);

        assert_eq!(record.score(), 7);
    }

    #[test]
    fn test_day_label() {
        assert_eq!(day_label(0), "Mon");
        assert_eq!(day_label(6), "Sun");
        assert_eq!(day_label(7), "Invalid");
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut record = WeekRecord::empty();
        record.tasks.push(task("t1", "Brush Teeth", false));
        record
            .checks
            .insert("t1".to_string(), vec![true, false, true, false, false, false, false]);
        record.completed = true;

        let mut weeks = BTreeMap::new();
        weeks.insert("2024-01-15".to_string(), record);
        let mut snapshot = StoreSnapshot::default();
        snapshot.week_data.insert("child1".to_string(), weeks);
        snapshot.current_week_id = "2024-01-15".to_string();
        snapshot.is_edit_mode = true;

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: StoreSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_snapshot_field_names_match_blob_format() {
        let snapshot = StoreSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();

        assert!(json.contains("\"weekData\""));
        assert!(json.contains("\"currentWeekId\""));
        assert!(json.contains("\"isEditMode\""));

        let t = task("t1", "Read Book", true);
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"isExtra\":true"));
    }
}
