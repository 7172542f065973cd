//! Sprint store operations: lifecycle transitions and sprint filters.
//!
//! Reordering lives with the reorder engine.

use chrono::Utc;

use super::EntityStore;
use crate::errors::SyncError;
use crate::filter::Selection;
use crate::models::{Sprint, SprintStatus};

impl EntityStore<Sprint> {
    /// Mark a sprint active and tell the backend to start it.
    pub async fn start(&self, id: &str) -> Result<Option<Sprint>, SyncError> {
        let now = Utc::now();
        self.mutate(
            id,
            "start",
            |sprint| {
                sprint.status = SprintStatus::Active;
                sprint.updated_at = now;
            },
            || self.resource().start(id),
        )
        .await
    }

    /// Mark a sprint completed and tell the backend to close it.
    pub async fn complete(&self, id: &str) -> Result<Option<Sprint>, SyncError> {
        let now = Utc::now();
        self.mutate(
            id,
            "complete",
            |sprint| {
                sprint.status = SprintStatus::Completed;
                sprint.updated_at = now;
            },
            || self.resource().complete(id),
        )
        .await
    }

    /// Sprints by their `order` field.
    pub fn sorted(&self) -> Vec<Sprint> {
        let mut sprints = self.items();
        sprints.sort_by_key(|s| s.order);
        sprints
    }

    /// The filtered view by `order`, as the sprint list shows it.
    pub fn visible(&self) -> Vec<Sprint> {
        let mut sprints = self.filtered();
        sprints.sort_by_key(|s| s.order);
        sprints
    }

    /// The active sprint of a project, if one is running.
    pub fn active_for_project(&self, project_id: &str) -> Option<Sprint> {
        self.items()
            .into_iter()
            .find(|s| s.project_id == project_id && s.status == SprintStatus::Active)
    }

    pub fn set_search(&self, search: impl Into<String>) {
        let search = search.into();
        self.update_filters(|f| f.search = search);
    }

    pub fn set_status(&self, status: Selection<SprintStatus>) {
        self.update_filters(|f| f.status = status);
    }

    pub fn set_project(&self, project: Selection<String>) {
        self.update_filters(|f| f.project = project);
    }
}
