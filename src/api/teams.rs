//! Team endpoints. Teams answer with bare payloads, no envelope.

use reqwest::Method;

use super::{EnvelopeShape, Resource, RestClient};
use crate::errors::SyncError;
use crate::models::{MemberChange, Team};

impl Resource<Team> {
    /// `/teams`, bare payloads.
    pub fn teams(client: RestClient) -> Self {
        Self::new(client, "teams", EnvelopeShape::Bare)
    }

    /// POST /teams/{id}/add-member
    pub async fn add_member(&self, id: &str, user_id: &str) -> Result<Team, SyncError> {
        self.member_change(id, "add-member", user_id).await
    }

    /// POST /teams/{id}/remove-member
    pub async fn remove_member(&self, id: &str, user_id: &str) -> Result<Team, SyncError> {
        self.member_change(id, "remove-member", user_id).await
    }

    async fn member_change(&self, id: &str, action: &str, user_id: &str) -> Result<Team, SyncError> {
        self.client()
            .send(
                Method::POST,
                &format!("{}/{}", self.item_path(id), action),
                &[],
                Some(&MemberChange {
                    user_id: user_id.to_string(),
                }),
                self.shape(),
            )
            .await
    }
}
