//! Client-side filter layer.
//!
//! Each entity kind has a filter state; the visible view of a store is the
//! raw collection narrowed by the logical AND of every active predicate.
//! Views are recomputed on every read.

use std::str::FromStr;

use crate::models::{
    Difficulty, Project, ProjectStatus, Sprint, SprintStatus, Task, TaskPriority, TaskStatus, Team,
};

/// A filter state that can be evaluated against one entity kind.
pub trait Query<T> {
    fn matches(&self, item: &T) -> bool;

    /// Derived view: the items that match, in collection order.
    fn apply(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        items.iter().filter(|item| self.matches(item)).cloned().collect()
    }
}

/// A single-valued filter that is either unset or pinned to one value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }

    /// Optional fields only match a pinned selection when they are set.
    pub fn admits_opt(&self, value: Option<&T>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => value == Some(expected),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Selection::Only(v),
            None => Selection::All,
        }
    }
}

/// `"all"` and `""` are the unset sentinels used by the filter controls.
impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Selection::All);
        }
        trimmed.parse().map(Selection::Only)
    }
}

/// Case-insensitive substring match over any of `fields`. An empty query
/// matches everything.
pub fn matches_search(query: &str, fields: &[&str]) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Filters over the task collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    pub search: String,
    pub status: Selection<TaskStatus>,
    pub priority: Selection<TaskPriority>,
    pub assignee: Selection<String>,
    pub project: Selection<String>,
}

impl TaskFilters {
    fn matches_search(&self, task: &Task) -> bool {
        matches_search(&self.search, &[task.title.as_str(), task.description.as_str()])
    }

    fn matches_status(&self, task: &Task) -> bool {
        self.status.admits(&task.status)
    }

    fn matches_priority(&self, task: &Task) -> bool {
        self.priority.admits(&task.priority)
    }

    fn matches_assignee(&self, task: &Task) -> bool {
        self.assignee.admits_opt(task.assignee_id.as_ref())
    }

    fn matches_project(&self, task: &Task) -> bool {
        self.project.admits(&task.project_id)
    }
}

impl Query<Task> for TaskFilters {
    fn matches(&self, task: &Task) -> bool {
        self.matches_search(task)
            && self.matches_status(task)
            && self.matches_priority(task)
            && self.matches_assignee(task)
            && self.matches_project(task)
    }
}

/// Filters over the sprint collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SprintFilters {
    pub search: String,
    pub status: Selection<SprintStatus>,
    pub project: Selection<String>,
}

impl Query<Sprint> for SprintFilters {
    fn matches(&self, sprint: &Sprint) -> bool {
        matches_search(&self.search, &[sprint.name.as_str(), sprint.goal.as_str()])
            && self.status.admits(&sprint.status)
            && self.project.admits(&sprint.project_id)
    }
}

/// Filters over the project collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilters {
    pub search: String,
    pub status: Selection<ProjectStatus>,
    pub difficulty: Selection<Difficulty>,
}

impl Query<Project> for ProjectFilters {
    fn matches(&self, project: &Project) -> bool {
        matches_search(&self.search, &[project.name.as_str(), project.description.as_str()])
            && self.status.admits(&project.status)
            && self.difficulty.admits(&project.difficulty)
    }
}

/// Filters over the team collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamFilters {
    pub search: String,
    pub active: Selection<bool>,
}

impl Query<Team> for TeamFilters {
    fn matches(&self, team: &Team) -> bool {
        matches_search(&self.search, &[team.name.as_str(), team.description.as_str()])
            && self.active.admits(&team.is_active)
    }
}
