//! Domain-level command and result types
//!
//! These structs are used by services inside the domain layer. The UI shell
//! is responsible for mapping user actions (button clicks, form submits) to
//! these commands and for presenting the structured failures they return.

pub mod week {
    use shared::Task;

    /// Input for toggling one checkmark cell.
    #[derive(Debug, Clone)]
    pub struct ToggleCheckmarkCommand {
        pub child_id: String,
        pub week_id: String,
        pub task_id: String,
        /// Monday = 0 .. Sunday = 6
        pub day_index: usize,
    }

    /// Result of toggling a checkmark.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ToggleCheckmarkResult {
        /// New state of the cell, or `None` if the toggle was ignored
        /// (out-of-range day or unknown task)
        pub checked: Option<bool>,
    }

    /// Input for adding a task to a week.
    #[derive(Debug, Clone)]
    pub struct AddTaskCommand {
        pub child_id: String,
        pub week_id: String,
        pub name: String,
        pub is_extra: bool,
    }

    /// Result of adding a task.
    #[derive(Debug, Clone, PartialEq)]
    pub struct AddTaskResult {
        pub task: Task,
    }

    /// Input for editing an existing task's name or bonus flag.
    #[derive(Debug, Clone)]
    pub struct UpdateTaskCommand {
        pub child_id: String,
        pub week_id: String,
        pub task_id: String,
        pub name: String,
        pub is_extra: bool,
    }

    /// Result of updating a task.
    #[derive(Debug, Clone, PartialEq)]
    pub struct UpdateTaskResult {
        pub task: Task,
    }

    /// Input for removing a task and its checkmarks.
    ///
    /// Confirming destructive intent is the UI's job; the store removes
    /// unconditionally (unless the week is locked).
    #[derive(Debug, Clone)]
    pub struct RemoveTaskCommand {
        pub child_id: String,
        pub week_id: String,
        pub task_id: String,
    }

    /// Result of removing a task.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RemoveTaskResult {
        pub removed_task: Task,
    }

    /// Input for setting or clearing a week's completion lock.
    #[derive(Debug, Clone)]
    pub struct SetWeekCompletedCommand {
        pub child_id: String,
        pub week_id: String,
        pub completed: bool,
    }

    /// Input for shifting the displayed week.
    #[derive(Debug, Clone)]
    pub struct NavigateWeekCommand {
        /// -1 for the previous week, +1 for the next
        pub direction: i8,
    }

    /// Result of a navigation attempt.
    #[derive(Debug, Clone, PartialEq)]
    pub struct NavigateWeekResult {
        /// The week now displayed; unchanged if the move was refused
        pub week_id: String,
    }
}
