//! Sprint endpoints beyond plain CRUD.

use reqwest::Method;

use super::{EnvelopeShape, ListParams, Resource, RestClient};
use crate::errors::SyncError;
use crate::filter::{Selection, SprintFilters};
use crate::models::{Sprint, SprintOrder};

impl Resource<Sprint> {
    /// `/sprints`, wrapped in the standard envelope.
    pub fn sprints(client: RestClient) -> Self {
        Self::new(client, "sprints", EnvelopeShape::Wrapped)
    }

    /// PUT /sprints/reorder with every `(id, newOrder)` pair.
    pub async fn reorder(&self, orders: &[SprintOrder]) -> Result<(), SyncError> {
        self.client()
            .send_unit(
                Method::PUT,
                &format!("{}/reorder", self.collection_path()),
                Some(orders),
                self.shape(),
            )
            .await
    }

    /// POST /sprints/{id}/start
    pub async fn start(&self, id: &str) -> Result<Sprint, SyncError> {
        self.client()
            .send::<(), _>(
                Method::POST,
                &format!("{}/start", self.item_path(id)),
                &[],
                None,
                self.shape(),
            )
            .await
    }

    /// POST /sprints/{id}/complete
    pub async fn complete(&self, id: &str) -> Result<Sprint, SyncError> {
        self.client()
            .send::<(), _>(
                Method::POST,
                &format!("{}/complete", self.item_path(id)),
                &[],
                None,
                self.shape(),
            )
            .await
    }
}

impl From<&SprintFilters> for ListParams {
    fn from(filters: &SprintFilters) -> Self {
        let mut params = ListParams::new();
        if let Selection::Only(project) = &filters.project {
            params = params.with("projectId", project.as_str());
        }
        if let Selection::Only(status) = &filters.status {
            params = params.with("status", status.as_str());
        }
        params
    }
}
