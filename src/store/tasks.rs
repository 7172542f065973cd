//! Task store operations: Kanban moves, assignment and task filters.

use chrono::Utc;

use super::EntityStore;
use crate::errors::SyncError;
use crate::filter::Selection;
use crate::models::{Task, TaskPriority, TaskStatus};

impl EntityStore<Task> {
    /// Set a task's status and nothing else.
    ///
    /// No transition is refused: a task may go from any column to any other.
    pub async fn move_task(&self, id: &str, status: TaskStatus) -> Result<Option<Task>, SyncError> {
        self.mutate(
            id,
            "move",
            |task| task.status = status,
            || self.resource().update_status(id, status),
        )
        .await
    }

    /// Assign a task to a user, or unassign it with `None`.
    pub async fn assign(&self, id: &str, assignee_id: Option<&str>) -> Result<Option<Task>, SyncError> {
        let now = Utc::now();
        self.mutate(
            id,
            "assign",
            |task| {
                task.assignee_id = assignee_id.map(str::to_string);
                task.updated_at = now;
            },
            || self.resource().assign(id, assignee_id),
        )
        .await
    }

    /// Filtered tasks in one Kanban column.
    pub fn by_status(&self, status: TaskStatus) -> Vec<Task> {
        self.filtered()
            .into_iter()
            .filter(|task| task.status == status)
            .collect()
    }

    /// All tasks planned into a sprint, ignoring filters.
    pub fn for_sprint(&self, sprint_id: &str) -> Vec<Task> {
        self.items()
            .into_iter()
            .filter(|task| task.sprint_id.as_deref() == Some(sprint_id))
            .collect()
    }

    pub fn set_search(&self, search: impl Into<String>) {
        let search = search.into();
        self.update_filters(|f| f.search = search);
    }

    pub fn set_status(&self, status: Selection<TaskStatus>) {
        self.update_filters(|f| f.status = status);
    }

    pub fn set_priority(&self, priority: Selection<TaskPriority>) {
        self.update_filters(|f| f.priority = priority);
    }

    pub fn set_assignee(&self, assignee: Selection<String>) {
        self.update_filters(|f| f.assignee = assignee);
    }

    pub fn set_project(&self, project: Selection<String>) {
        self.update_filters(|f| f.project = project);
    }
}
