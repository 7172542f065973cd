//! Project endpoints.

use super::{EnvelopeShape, Resource, RestClient};
use crate::models::Project;

impl Resource<Project> {
    /// `/projects`, wrapped in the standard envelope.
    pub fn projects(client: RestClient) -> Self {
        Self::new(client, "projects", EnvelopeShape::Wrapped)
    }
}
