//! Sprint model used by the sprint store and the reorder engine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{require_text, variant_key, Entity, Task};
use crate::errors::SyncError;
use crate::filter::SprintFilters;

/// Sprint lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SprintStatus {
    Planned,
    Active,
    Completed,
}

impl SprintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SprintStatus::Planned => "Planned",
            SprintStatus::Active => "Active",
            SprintStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SprintStatus {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match variant_key(s).as_str() {
            "planned" => Ok(SprintStatus::Planned),
            "active" => Ok(SprintStatus::Active),
            "completed" => Ok(SprintStatus::Completed),
            _ => Err(SyncError::Validation(format!(
                "Unknown sprint status: {}",
                s
            ))),
        }
    }
}

/// A time-boxed iteration. `order` is its dense position in the sprint list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub goal: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: SprintStatus,
    #[serde(default)]
    pub story_points: u32,
    #[serde(default)]
    pub completed_points: u32,
    pub project_id: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub tasks: Vec<Task>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sprint {
    /// Completed points never exceed planned points.
    ///
    /// Only enforced for records the client builds; server records are taken
    /// as they come and can be checked with this.
    pub fn points_consistent(&self) -> bool {
        self.completed_points <= self.story_points
    }

    /// Share of planned points already completed, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.story_points == 0 {
            return 0.0;
        }
        (f64::from(self.completed_points) / f64::from(self.story_points)).min(1.0)
    }

    fn check_dates(&self) -> Result<(), SyncError> {
        if self.end_date < self.start_date {
            return Err(SyncError::Validation(format!(
                "Sprint {} ends before it starts",
                self.name
            )));
        }
        Ok(())
    }

    fn check_points(&self) -> Result<(), SyncError> {
        if !self.points_consistent() {
            return Err(SyncError::Validation(format!(
                "Sprint {} has {} completed points but only {} planned",
                self.name, self.completed_points, self.story_points
            )));
        }
        Ok(())
    }
}

/// Request body for creating a new sprint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintDraft {
    pub name: String,
    pub goal: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: SprintStatus,
    pub story_points: u32,
    pub completed_points: u32,
    pub project_id: String,
    pub order: u32,
}

impl SprintDraft {
    /// A planned sprint with no points, placed at `order`.
    pub fn new(
        name: impl Into<String>,
        project_id: impl Into<String>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        order: u32,
    ) -> Self {
        Self {
            name: name.into(),
            goal: String::new(),
            start_date,
            end_date,
            status: SprintStatus::Planned,
            story_points: 0,
            completed_points: 0,
            project_id: project_id.into(),
            order,
        }
    }
}

/// Request body for updating an existing sprint.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SprintStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_points: Option<u32>,
}

/// One entry of the `PUT /sprints/reorder` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintOrder {
    pub id: String,
    pub new_order: u32,
}

impl Entity for Sprint {
    type Draft = SprintDraft;
    type Patch = SprintPatch;
    type Filters = SprintFilters;

    const KIND: &'static str = "sprint";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: &SprintDraft, now: DateTime<Utc>) -> Self {
        Sprint {
            id,
            name: draft.name.clone(),
            goal: draft.goal.clone(),
            start_date: draft.start_date,
            end_date: draft.end_date,
            status: draft.status,
            story_points: draft.story_points,
            completed_points: draft.completed_points,
            project_id: draft.project_id.clone(),
            order: draft.order,
            tasks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: &SprintPatch, now: DateTime<Utc>) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(goal) = &patch.goal {
            self.goal = goal.clone();
        }
        if let Some(start) = patch.start_date {
            self.start_date = start;
        }
        if let Some(end) = patch.end_date {
            self.end_date = end;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(points) = patch.story_points {
            self.story_points = points;
        }
        if let Some(points) = patch.completed_points {
            self.completed_points = points;
        }
        self.updated_at = now;
    }

    fn validate(&self) -> Result<(), SyncError> {
        require_text(Self::KIND, "name", &self.name)?;
        self.check_dates()?;
        self.check_points()
    }

    fn validate_patch(&self, patch: &SprintPatch) -> Result<(), SyncError> {
        if patch.name.is_some() {
            require_text(Self::KIND, "name", &self.name)?;
        }
        if patch.start_date.is_some() || patch.end_date.is_some() {
            self.check_dates()?;
        }
        if patch.story_points.is_some() || patch.completed_points.is_some() {
            self.check_points()?;
        }
        Ok(())
    }

    fn arrange(items: &mut [Self]) {
        items.sort_by_key(|s| s.order);
    }
}
