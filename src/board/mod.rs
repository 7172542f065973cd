//! Kanban board.
//!
//! Translates a drag-end gesture into a task status change. The board keeps
//! no state of its own; columns are read from the task store's filtered view.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::SyncError;
use crate::models::{Task, TaskStatus};
use crate::store::TaskStore;

/// Where a dragged item was picked up or dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    pub droppable_id: String,
    pub index: usize,
}

/// End of a drag gesture. No destination means the drag was cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEnd {
    pub draggable_id: String,
    pub source: DragLocation,
    #[serde(default)]
    pub destination: Option<DragLocation>,
}

impl DragEnd {
    pub fn new(draggable_id: impl Into<String>, source: DragLocation) -> Self {
        Self {
            draggable_id: draggable_id.into(),
            source,
            destination: None,
        }
    }

    pub fn to(mut self, destination: DragLocation) -> Self {
        self.destination = Some(destination);
        self
    }
}

impl DragLocation {
    pub fn new(droppable_id: impl Into<String>, index: usize) -> Self {
        Self {
            droppable_id: droppable_id.into(),
            index,
        }
    }
}

/// One status column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub status: TaskStatus,
    pub tasks: Vec<Task>,
}

impl Column {
    /// Sum of story points in the column.
    pub fn points(&self) -> u32 {
        self.tasks.iter().map(|t| t.story_points).sum()
    }
}

/// What a drop on the board did.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// Dropped outside any column; nothing happened.
    Cancelled,
    /// The dragged task is no longer in the store.
    Missing,
    Moved { task: Task, from: TaskStatus },
}

pub struct KanbanBoard {
    tasks: Arc<TaskStore>,
}

impl KanbanBoard {
    pub fn new(tasks: Arc<TaskStore>) -> Self {
        Self { tasks }
    }

    /// ToDo, InProgress and Done columns over the filtered task view.
    pub fn columns(&self) -> Vec<Column> {
        let visible = self.tasks.filtered();
        TaskStatus::ALL
            .iter()
            .map(|status| Column {
                status: *status,
                tasks: visible
                    .iter()
                    .filter(|task| task.status == *status)
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    /// Apply a drop: one status move per drop that has a destination.
    pub async fn handle_drag_end(&self, event: &DragEnd) -> Result<DropOutcome, SyncError> {
        let Some(destination) = &event.destination else {
            tracing::debug!("Drag of task {} cancelled", event.draggable_id);
            return Ok(DropOutcome::Cancelled);
        };

        let status: TaskStatus = destination.droppable_id.parse()?;
        let Some(before) = self.tasks.get(&event.draggable_id) else {
            tracing::warn!("Dropped task {} is not on the board", event.draggable_id);
            return Ok(DropOutcome::Missing);
        };

        if self.tasks.move_task(&event.draggable_id, status).await?.is_none() {
            return Ok(DropOutcome::Missing);
        }

        let task = self.tasks.get(&event.draggable_id).unwrap_or_else(|| before.clone());
        tracing::info!(
            "Moved task {} from {} to {}",
            event.draggable_id,
            before.status,
            status
        );
        Ok(DropOutcome::Moved {
            task,
            from: before.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_end_from_ui_json() {
        let event: DragEnd = serde_json::from_value(serde_json::json!({
            "draggableId": "1",
            "source": { "droppableId": "ToDo", "index": 0 },
            "destination": null
        }))
        .unwrap();
        assert_eq!(event.destination, None);

        let event: DragEnd = serde_json::from_value(serde_json::json!({
            "draggableId": "1",
            "source": { "droppableId": "ToDo", "index": 0 },
            "destination": { "droppableId": "Done", "index": 2 }
        }))
        .unwrap();
        assert_eq!(event, DragEnd::new("1", DragLocation::new("ToDo", 0)).to(DragLocation::new("Done", 2)));
    }
}
