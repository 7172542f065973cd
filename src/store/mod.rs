//! Optimistic entity stores.
//!
//! A store owns one collection. Every mutation is applied to memory first,
//! then sent to the backend; when the request fails the touched entity is put
//! back the way it was and the error is returned to the caller.
//!
//! The collection lock is never held across an `.await`.

mod projects;
mod sprints;
mod tasks;
mod teams;

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::api::{ListParams, Resource};
use crate::errors::SyncError;
use crate::filter::Query;
use crate::models::{Entity, Project, Sprint, Task, Team};

pub type TaskStore = EntityStore<Task>;
pub type SprintStore = EntityStore<Sprint>;
pub type ProjectStore = EntityStore<Project>;
pub type TeamStore = EntityStore<Team>;

struct StoreState<T: Entity> {
    items: Vec<T>,
    /// Local ids whose create request has not resolved yet.
    pending: HashSet<String>,
    fetches_in_flight: usize,
    last_error: Option<SyncError>,
    filters: T::Filters,
}

/// In-memory collection of `T` mirrored to a REST resource.
pub struct EntityStore<T: Entity> {
    resource: Resource<T>,
    default_limit: Option<u32>,
    state: Mutex<StoreState<T>>,
}

impl<T: Entity> EntityStore<T> {
    pub fn new(resource: Resource<T>, default_limit: Option<u32>) -> Self {
        Self {
            resource,
            default_limit,
            state: Mutex::new(StoreState {
                items: Vec::new(),
                pending: HashSet::new(),
                fetches_in_flight: 0,
                last_error: None,
                filters: T::Filters::default(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn resource(&self) -> &Resource<T> {
        &self.resource
    }

    // ==================== READS ====================

    /// Snapshot of the raw collection in display order.
    pub fn items(&self) -> Vec<T> {
        self.lock().items.clone()
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.lock().items.iter().find(|item| item.id() == id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().items.iter().any(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    /// True while at least one `fetch_all` is waiting on the backend.
    pub fn is_loading(&self) -> bool {
        self.lock().fetches_in_flight > 0
    }

    /// The most recent failure, cleared by the next successful fetch.
    pub fn last_error(&self) -> Option<SyncError> {
        self.lock().last_error.clone()
    }

    /// Whether `id` is a local id still waiting for its create to resolve.
    pub fn is_pending(&self, id: &str) -> bool {
        self.lock().pending.contains(id)
    }

    // ==================== FILTERS ====================

    pub fn filters(&self) -> T::Filters {
        self.lock().filters.clone()
    }

    pub fn set_filters(&self, filters: T::Filters) {
        self.lock().filters = filters;
    }

    pub fn update_filters(&self, change: impl FnOnce(&mut T::Filters)) {
        change(&mut self.lock().filters);
    }

    pub fn reset_filters(&self) {
        self.lock().filters = T::Filters::default();
    }

    /// Derived view: the collection narrowed by the current filters.
    pub fn filtered(&self) -> Vec<T> {
        let state = self.lock();
        state.filters.apply(&state.items)
    }

    // ==================== SYNC ====================

    /// Replace the collection with the backend's listing.
    ///
    /// Entities created locally whose create is still in flight are kept at
    /// the end of the new collection. On failure the collection is left as it
    /// was.
    pub async fn fetch_all(&self, params: &ListParams) -> Result<(), SyncError> {
        let mut params = params.clone();
        if params.limit.is_none() {
            params.limit = self.default_limit;
        }

        self.lock().fetches_in_flight += 1;
        let result = self.resource.list(&params).await;

        let mut guard = self.lock();
        let state = &mut *guard;
        state.fetches_in_flight -= 1;

        match result {
            Ok(mut items) => {
                T::arrange(&mut items);
                let optimistic: Vec<T> = state
                    .items
                    .iter()
                    .filter(|item| state.pending.contains(item.id()))
                    .cloned()
                    .collect();
                items.extend(optimistic);
                tracing::debug!("Fetched {} {} records", items.len(), T::KIND);
                state.items = items;
                state.last_error = None;
                Ok(())
            }
            Err(err) => {
                tracing::error!("Failed to fetch {} records: {}", T::KIND, err);
                state.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Fetch with no filters beyond the default page size.
    pub async fn refresh(&self) -> Result<(), SyncError> {
        self.fetch_all(&ListParams::default()).await
    }

    /// Create an entity.
    ///
    /// A local copy with a timestamp id is visible before the request goes
    /// out. On success it is replaced by the backend's record (server id); on
    /// failure it is removed again.
    pub async fn create(&self, draft: T::Draft) -> Result<T, SyncError> {
        let now = Utc::now();
        let local_id = {
            let mut state = self.lock();
            let id = next_local_id(&state.items, now);
            let entity = T::from_draft(id.clone(), &draft, now);
            entity.validate()?;
            state.items.push(entity);
            state.pending.insert(id.clone());
            T::arrange(&mut state.items);
            id
        };

        let result = self.resource.create(&draft).await;

        let mut state = self.lock();
        state.pending.remove(&local_id);
        let local_pos = state.items.iter().position(|item| item.id() == local_id);

        match result {
            Ok(created) => {
                let server_pos = state.items.iter().position(|item| item.id() == created.id());
                match (local_pos, server_pos) {
                    (Some(local), None) => state.items[local] = created.clone(),
                    (Some(local), Some(server)) => {
                        state.items[server] = created.clone();
                        state.items.remove(local);
                    }
                    (None, Some(server)) => state.items[server] = created.clone(),
                    (None, None) => {
                        tracing::warn!(
                            "{} {} was removed locally before the backend confirmed it as {}",
                            T::KIND,
                            local_id,
                            created.id()
                        );
                    }
                }
                T::arrange(&mut state.items);
                tracing::info!("Created {} {}", T::KIND, created.id());
                Ok(created)
            }
            Err(err) => {
                tracing::error!("Failed to create {} {}: {}", T::KIND, local_id, err);
                if let Some(local) = local_pos {
                    state.items.remove(local);
                }
                state.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Shallow-merge `patch` into entity `id`.
    ///
    /// Returns `Ok(None)` without contacting the backend when `id` is unknown.
    /// Only the fields the patch sets are validated.
    pub async fn update(&self, id: &str, patch: T::Patch) -> Result<Option<T>, SyncError> {
        let now = Utc::now();
        if let Some(mut preview) = self.get(id) {
            preview.apply_patch(&patch, now);
            preview.validate_patch(&patch)?;
        }
        self.mutate(
            id,
            "update",
            |item| item.apply_patch(&patch, now),
            || self.resource.update(id, &patch),
        )
        .await
    }

    /// Remove entity `id`. Unknown ids are a no-op.
    ///
    /// Entities whose create is still in flight only exist locally, so they
    /// are dropped without a request.
    pub async fn delete(&self, id: &str) -> Result<(), SyncError> {
        let (position, removed) = {
            let mut state = self.lock();
            let Some(position) = state.items.iter().position(|item| item.id() == id) else {
                tracing::debug!("Delete {} {}: not in store, skipping", T::KIND, id);
                return Ok(());
            };
            let removed = state.items.remove(position);
            if state.pending.contains(id) {
                tracing::warn!("Dropped unsynced {} {} before its create resolved", T::KIND, id);
                return Ok(());
            }
            (position, removed)
        };

        match self.resource.delete(id).await {
            Ok(()) => {
                tracing::info!("Deleted {} {}", T::KIND, id);
                Ok(())
            }
            Err(err) => {
                tracing::error!("Failed to delete {} {}: {}", T::KIND, id, err);
                let mut state = self.lock();
                // A fetch that finished meanwhile may already have brought it back.
                if !state.items.iter().any(|item| item.id() == id) {
                    let position = position.min(state.items.len());
                    state.items.insert(position, removed);
                }
                state.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    // ==================== HELPERS ====================

    /// Apply `change` to entity `id`, then run `remote`; restore the entity's
    /// previous value if `remote` fails.
    ///
    /// No validation happens here: status, assignment and membership changes
    /// must go through whatever else the record holds.
    pub(crate) async fn mutate<R, Fut>(
        &self,
        id: &str,
        action: &str,
        change: impl FnOnce(&mut T),
        remote: impl FnOnce() -> Fut,
    ) -> Result<Option<R>, SyncError>
    where
        Fut: Future<Output = Result<R, SyncError>>,
    {
        let snapshot = {
            let mut state = self.lock();
            let Some(item) = state.items.iter_mut().find(|item| item.id() == id) else {
                tracing::debug!("{} {} {}: not in store, skipping", action, T::KIND, id);
                return Ok(None);
            };
            let snapshot = item.clone();
            change(item);
            snapshot
        };

        match remote().await {
            Ok(response) => Ok(Some(response)),
            Err(err) => {
                tracing::error!("Failed to {} {} {}: {}", action, T::KIND, id, err);
                let mut state = self.lock();
                if let Some(item) = state.items.iter_mut().find(|item| item.id() == id) {
                    *item = snapshot;
                }
                state.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Edit the collection in place under the lock, then restore display order.
    pub(crate) fn edit_items(&self, edit: impl FnOnce(&mut [T])) {
        let mut state = self.lock();
        edit(state.items.as_mut_slice());
        T::arrange(&mut state.items);
    }

    /// Local ids whose create has not resolved yet.
    pub(crate) fn pending_ids(&self) -> HashSet<String> {
        self.lock().pending.clone()
    }

    pub(crate) fn record_error(&self, err: &SyncError) {
        self.lock().last_error = Some(err.clone());
    }
}

/// Local id for an optimistic entity: the current time in milliseconds,
/// bumped until it is unique within the collection.
fn next_local_id<T: Entity>(items: &[T], now: DateTime<Utc>) -> String {
    let mut candidate = now.timestamp_millis();
    while items.iter().any(|item| item.id() == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}
