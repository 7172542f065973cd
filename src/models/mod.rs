//! Data models for the Sprintboard client.
//!
//! These models match the backend JSON contract (camelCase fields, PascalCase
//! enum variants) so they can be sent and received without extra mapping.

mod project;
mod session;
mod sprint;
mod task;
mod team;

pub use project::*;
pub use session::*;
pub use sprint::*;
pub use task::*;
pub use team::*;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::SyncError;
use crate::filter::Query;

/// A record held by an entity store and mirrored by a REST collection.
pub trait Entity:
    Clone + std::fmt::Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Everything needed to create the record, minus id and timestamps.
    type Draft: Serialize + Clone + Send + Sync;
    /// Partial update; unset fields are left unchanged.
    type Patch: Serialize + Clone + Send + Sync;
    /// Filter state used to derive the visible view of a store.
    type Filters: Query<Self> + Default + Clone + Send;

    /// Singular name used in log lines and error messages.
    const KIND: &'static str;

    fn id(&self) -> &str;

    /// Build the optimistic local copy shown while the create request is in flight.
    fn from_draft(id: String, draft: &Self::Draft, now: DateTime<Utc>) -> Self;

    /// Shallow-merge a patch and refresh the modification timestamp.
    fn apply_patch(&mut self, patch: &Self::Patch, now: DateTime<Utc>);

    /// Reject records the client must never construct.
    fn validate(&self) -> Result<(), SyncError> {
        Ok(())
    }

    /// Check the fields a patch sets on the already patched record. Fields
    /// the patch leaves alone are not checked, so a record the server sent
    /// in an odd state can still be edited.
    fn validate_patch(&self, _patch: &Self::Patch) -> Result<(), SyncError> {
        Ok(())
    }

    /// Put a freshly fetched collection into display order.
    fn arrange(_items: &mut [Self]) {}
}

/// Reject blank names and titles.
pub(crate) fn require_text(kind: &str, field: &str, value: &str) -> Result<(), SyncError> {
    if value.trim().is_empty() {
        return Err(SyncError::Validation(format!(
            "{} {} is required",
            kind, field
        )));
    }
    Ok(())
}

/// Normalize a user-facing variant name so "In Progress", "in-progress" and
/// "InProgress" compare equal.
pub(crate) fn variant_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}
