//! Task endpoints beyond plain CRUD.

use reqwest::Method;

use super::{EnvelopeShape, ListParams, Resource, RestClient};
use crate::errors::SyncError;
use crate::filter::{Selection, TaskFilters};
use crate::models::{Assignment, StatusChange, Task, TaskStatus};

impl Resource<Task> {
    /// `/tasks`, wrapped in the standard envelope.
    pub fn tasks(client: RestClient) -> Self {
        Self::new(client, "tasks", EnvelopeShape::Wrapped)
    }

    /// PATCH /tasks/{id}/status
    pub async fn update_status(&self, id: &str, status: TaskStatus) -> Result<Task, SyncError> {
        self.client()
            .send(
                Method::PATCH,
                &format!("{}/status", self.item_path(id)),
                &[],
                Some(&StatusChange { status }),
                self.shape(),
            )
            .await
    }

    /// PATCH /tasks/{id}/assign
    pub async fn assign(&self, id: &str, assignee_id: Option<&str>) -> Result<Task, SyncError> {
        self.client()
            .send(
                Method::PATCH,
                &format!("{}/assign", self.item_path(id)),
                &[],
                Some(&Assignment {
                    assignee_id: assignee_id.map(str::to_string),
                }),
                self.shape(),
            )
            .await
    }
}

/// Server-side equivalent of the active task filters. Free-text search stays
/// client-side.
impl From<&TaskFilters> for ListParams {
    fn from(filters: &TaskFilters) -> Self {
        let mut params = ListParams::new();
        if let Selection::Only(status) = &filters.status {
            params = params.with("status", status.as_str());
        }
        if let Selection::Only(priority) = &filters.priority {
            params = params.with("priority", priority.as_str());
        }
        if let Selection::Only(assignee) = &filters.assignee {
            params = params.with("assigneeId", assignee.as_str());
        }
        if let Selection::Only(project) = &filters.project {
            params = params.with("projectId", project.as_str());
        }
        params
    }
}
