//! Task model used by the task store and the Kanban board.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{require_text, variant_key, Entity};
use crate::errors::SyncError;
use crate::filter::TaskFilters;

/// Kanban column a task sits in.
///
/// Every status is reachable from every other status; the board applies no
/// workflow guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    ToDo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "ToDo",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Done => "Done",
        }
    }

    /// Whether a task may move from `self` to `next`. Always true.
    pub fn can_transition_to(self, _next: TaskStatus) -> bool {
        true
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match variant_key(s).as_str() {
            "todo" => Ok(TaskStatus::ToDo),
            "inprogress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(SyncError::Validation(format!("Unknown task status: {}", s))),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Critical => "Critical",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match variant_key(s).as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            "critical" => Ok(TaskPriority::Critical),
            _ => Err(SyncError::Validation(format!(
                "Unknown task priority: {}",
                s
            ))),
        }
    }
}

/// A unit of work on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default)]
    pub story_points: u32,
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a new task.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub story_points: u32,
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
}

impl TaskDraft {
    /// A `ToDo`, `Medium` priority task with no points.
    pub fn new(title: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: TaskStatus::ToDo,
            priority: TaskPriority::Medium,
            story_points: 0,
            project_id: project_id.into(),
            sprint_id: None,
            assignee_id: None,
        }
    }
}

/// Request body for updating an existing task.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// `Some(None)` moves the task back to the backlog (sent as `null`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<Option<String>>,
    /// `Some(None)` unassigns the task (sent as `null`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Option<String>>,
}

/// Body of `PATCH /tasks/{id}/status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusChange {
    pub status: TaskStatus,
}

/// Body of `PATCH /tasks/{id}/assign`. A null assignee unassigns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub assignee_id: Option<String>,
}

impl Entity for Task {
    type Draft = TaskDraft;
    type Patch = TaskPatch;
    type Filters = TaskFilters;

    const KIND: &'static str = "task";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: &TaskDraft, now: DateTime<Utc>) -> Self {
        Task {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: draft.status,
            priority: draft.priority,
            story_points: draft.story_points,
            project_id: draft.project_id.clone(),
            sprint_id: draft.sprint_id.clone(),
            assignee_id: draft.assignee_id.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: &TaskPatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(points) = patch.story_points {
            self.story_points = points;
        }
        if let Some(project_id) = &patch.project_id {
            self.project_id = project_id.clone();
        }
        if let Some(sprint_id) = &patch.sprint_id {
            self.sprint_id = sprint_id.clone();
        }
        if let Some(assignee_id) = &patch.assignee_id {
            self.assignee_id = assignee_id.clone();
        }
        self.updated_at = now;
    }

    fn validate(&self) -> Result<(), SyncError> {
        require_text(Self::KIND, "title", &self.title)
    }

    fn validate_patch(&self, patch: &TaskPatch) -> Result<(), SyncError> {
        if patch.title.is_some() {
            require_text(Self::KIND, "title", &self.title)?;
        }
        Ok(())
    }
}
