//! Team membership and team filters.

use super::EntityStore;
use crate::errors::SyncError;
use crate::filter::Selection;
use crate::models::Team;

impl EntityStore<Team> {
    /// Add `user_id` to a team's members.
    pub async fn add_member(&self, team_id: &str, user_id: &str) -> Result<Option<Team>, SyncError> {
        self.mutate(
            team_id,
            "add member to",
            |team| {
                if !team.members.iter().any(|m| m == user_id) {
                    team.members.push(user_id.to_string());
                }
            },
            || self.resource().add_member(team_id, user_id),
        )
        .await
    }

    /// Remove `user_id` from a team's members.
    pub async fn remove_member(
        &self,
        team_id: &str,
        user_id: &str,
    ) -> Result<Option<Team>, SyncError> {
        self.mutate(
            team_id,
            "remove member from",
            |team| team.members.retain(|m| m != user_id),
            || self.resource().remove_member(team_id, user_id),
        )
        .await
    }

    pub fn set_search(&self, search: impl Into<String>) {
        let search = search.into();
        self.update_filters(|f| f.search = search);
    }

    pub fn set_active(&self, active: Selection<bool>) {
        self.update_filters(|f| f.active = active);
    }
}
