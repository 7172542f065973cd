//! Sprint list reordering.
//!
//! A drag moves one sprint from one position to another. Every sprint then
//! gets its new zero-based position as `order`, the store shows the new
//! sequence immediately, and the `(id, newOrder)` pairs of every synced
//! sprint are sent to the backend. If that request fails each sprint that took
//! part goes back to its old `order`; anything created or fetched while the
//! request was in flight is left alone.

use std::collections::HashMap;
use std::sync::Arc;

use crate::board::DragEnd;
use crate::errors::SyncError;
use crate::models::{Sprint, SprintOrder};
use crate::store::{EntityStore, SprintStore};

/// Move the element at `from` so it ends up at index `to`.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), SyncError> {
    let len = items.len();
    if from >= len || to >= len {
        return Err(SyncError::Validation(format!(
            "Cannot move position {} to {} in a list of {}",
            from, to, len
        )));
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

/// Dense reindexing: `order` becomes the position in the slice.
pub fn reindex(sprints: &mut [Sprint]) {
    for (position, sprint) in sprints.iter_mut().enumerate() {
        sprint.order = position as u32;
    }
}

/// `order` of every sprint, by id.
fn orders_by_id(sprints: &[Sprint]) -> HashMap<String, u32> {
    sprints.iter().map(|s| (s.id.clone(), s.order)).collect()
}

/// Set `order` on every sprint listed in `orders`; others keep theirs.
fn apply_orders(sprints: &mut [Sprint], orders: &HashMap<String, u32>) {
    for sprint in sprints.iter_mut() {
        if let Some(order) = orders.get(&sprint.id) {
            sprint.order = *order;
        }
    }
}

/// Position in the full sequence of the sprint shown at `index`.
fn full_index(visible: &[Sprint], all: &[Sprint], index: usize) -> Result<usize, SyncError> {
    visible
        .get(index)
        .and_then(|shown| all.iter().position(|s| s.id == shown.id))
        .ok_or_else(|| {
            SyncError::Validation(format!(
                "No sprint at position {} of {} shown",
                index,
                visible.len()
            ))
        })
}

/// Body of the persistence call for a sequence.
pub fn order_pairs(sprints: &[Sprint]) -> Vec<SprintOrder> {
    sprints
        .iter()
        .map(|s| SprintOrder {
            id: s.id.clone(),
            new_order: s.order,
        })
        .collect()
}

impl EntityStore<Sprint> {
    /// Move the sprint at `from` to `to` and persist the new order.
    ///
    /// Indices refer to the list sorted by `order`. `from == to` changes
    /// nothing and sends nothing.
    ///
    /// Sprints whose create is still in flight move locally but are left out
    /// of the request, since the backend does not know their ids yet.
    pub async fn reorder(&self, from: usize, to: usize) -> Result<(), SyncError> {
        let mut sequence = self.sorted();
        if from == to && from < sequence.len() {
            return Ok(());
        }

        let previous = orders_by_id(&sequence);
        move_item(&mut sequence, from, to)?;
        reindex(&mut sequence);
        let next = orders_by_id(&sequence);
        self.edit_items(|items| apply_orders(items, &next));

        let pending = self.pending_ids();
        let orders: Vec<SprintOrder> = order_pairs(&sequence)
            .into_iter()
            .filter(|pair| !pending.contains(&pair.id))
            .collect();
        if orders.is_empty() {
            return Ok(());
        }

        match self.resource().reorder(&orders).await {
            Ok(()) => {
                tracing::info!("Reordered sprints: moved {} to {}", from, to);
                Ok(())
            }
            Err(err) => {
                tracing::error!("Failed to persist sprint order, reverting: {}", err);
                self.edit_items(|items| apply_orders(items, &previous));
                self.record_error(&err);
                Err(err)
            }
        }
    }
}

/// What a drop on the sprint list did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// Dropped outside the list.
    Cancelled,
    /// Dropped where it started.
    Unchanged,
    Reordered { from: usize, to: usize },
}

/// Drag-and-drop handler for the sprint list.
///
/// Drag indices are positions in the list the user sees, which is the sprint
/// store's filtered view. They are mapped back to the full sequence before
/// reordering.
pub struct SprintList {
    sprints: Arc<SprintStore>,
}

impl SprintList {
    pub fn new(sprints: Arc<SprintStore>) -> Self {
        Self { sprints }
    }

    /// The rows on screen, in order.
    pub fn sprints(&self) -> Vec<Sprint> {
        self.sprints.visible()
    }

    pub async fn handle_drag_end(&self, event: &DragEnd) -> Result<ReorderOutcome, SyncError> {
        let Some(destination) = &event.destination else {
            tracing::debug!("Sprint drag of {} cancelled", event.draggable_id);
            return Ok(ReorderOutcome::Cancelled);
        };

        let from = event.source.index;
        let to = destination.index;
        if from == to {
            return Ok(ReorderOutcome::Unchanged);
        }

        let visible = self.sprints.visible();
        let all = self.sprints.sorted();
        let full_from = full_index(&visible, &all, from)?;
        let full_to = full_index(&visible, &all, to)?;

        self.sprints.reorder(full_from, full_to).await?;
        Ok(ReorderOutcome::Reordered { from, to })
    }
}
