//! Project model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{require_text, variant_key, Entity};
use crate::errors::SyncError;
use crate::filter::ProjectFilters;

/// Project status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    Active,
    Completed,
    OnHold,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::OnHold => "OnHold",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match variant_key(s).as_str() {
            "active" => Ok(ProjectStatus::Active),
            "completed" => Ok(ProjectStatus::Completed),
            "onhold" => Ok(ProjectStatus::OnHold),
            _ => Err(SyncError::Validation(format!(
                "Unknown project status: {}",
                s
            ))),
        }
    }
}

/// Difficulty classification for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match variant_key(s).as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "extreme" => Ok(Difficulty::Extreme),
            _ => Err(SyncError::Validation(format!("Unknown difficulty: {}", s))),
        }
    }
}

/// Reference to a user as embedded in project records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A project grouping sprints and tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: ProjectStatus,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub team_members: Vec<UserRef>,
    #[serde(default)]
    pub sprint_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a new project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub difficulty: Difficulty,
    pub team_members: Vec<UserRef>,
}

/// Request body for updating an existing project.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_members: Option<Vec<UserRef>>,
}

impl Entity for Project {
    type Draft = ProjectDraft;
    type Patch = ProjectPatch;
    type Filters = ProjectFilters;

    const KIND: &'static str = "project";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: &ProjectDraft, now: DateTime<Utc>) -> Self {
        Project {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            status: draft.status,
            difficulty: draft.difficulty,
            team_members: draft.team_members.clone(),
            sprint_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: &ProjectPatch, now: DateTime<Utc>) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(members) = &patch.team_members {
            self.team_members = members.clone();
        }
        self.updated_at = now;
    }

    fn validate(&self) -> Result<(), SyncError> {
        require_text(Self::KIND, "name", &self.name)
    }

    fn validate_patch(&self, patch: &ProjectPatch) -> Result<(), SyncError> {
        match patch.name {
            Some(_) => require_text(Self::KIND, "name", &self.name),
            None => Ok(()),
        }
    }
}
