//! Project filters.

use super::EntityStore;
use crate::filter::Selection;
use crate::models::{Difficulty, Project, ProjectStatus};

impl EntityStore<Project> {
    pub fn set_search(&self, search: impl Into<String>) {
        let search = search.into();
        self.update_filters(|f| f.search = search);
    }

    pub fn set_status(&self, status: Selection<ProjectStatus>) {
        self.update_filters(|f| f.status = status);
    }

    pub fn set_difficulty(&self, difficulty: Selection<Difficulty>) {
        self.update_filters(|f| f.difficulty = difficulty);
    }
}
