//! Team model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{require_text, Entity};
use crate::errors::SyncError;
use crate::filter::TeamFilters;

/// A team of users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub members: Vec<String>,
    pub creator: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Request body for creating a new team.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDraft {
    pub name: String,
    pub description: String,
    pub members: Vec<String>,
    pub creator: String,
    pub is_active: bool,
}

/// Request body for updating an existing team.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Body of `POST /teams/{id}/add-member` and `remove-member`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberChange {
    pub user_id: String,
}

impl Entity for Team {
    type Draft = TeamDraft;
    type Patch = TeamPatch;
    type Filters = TeamFilters;

    const KIND: &'static str = "team";

    fn id(&self) -> &str {
        &self.id
    }

    // Teams carry no timestamps.
    fn from_draft(id: String, draft: &TeamDraft, _now: DateTime<Utc>) -> Self {
        Team {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            members: draft.members.clone(),
            creator: draft.creator.clone(),
            is_active: draft.is_active,
        }
    }

    fn apply_patch(&mut self, patch: &TeamPatch, _now: DateTime<Utc>) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(active) = patch.is_active {
            self.is_active = active;
        }
    }

    fn validate(&self) -> Result<(), SyncError> {
        require_text(Self::KIND, "name", &self.name)
    }

    fn validate_patch(&self, patch: &TeamPatch) -> Result<(), SyncError> {
        match patch.name {
            Some(_) => require_text(Self::KIND, "name", &self.name),
            None => Ok(()),
        }
    }
}
