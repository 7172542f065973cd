//! REST sync adapter.
//!
//! Maps domain drafts and patches onto the backend's collection endpoints and
//! unwraps the response envelope back into domain records.

mod client;
mod projects;
mod resource;
mod sprints;
mod tasks;
mod teams;

pub use client::*;
pub use resource::*;

use serde::Deserialize;

use crate::errors::SyncError;

/// How a resource wraps its payloads on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeShape {
    /// `{ "data": ..., "message": ..., "success": true }`
    Wrapped,
    /// The payload itself, no wrapper.
    Bare,
}

/// Success response envelope. Missing fields decode as `None`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: Option<bool>,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Reject `success: false` even when the HTTP status was 2xx.
    pub fn check(&self, status: u16) -> Result<(), SyncError> {
        if self.success == Some(false) {
            return Err(SyncError::Api {
                status,
                message: self
                    .message
                    .clone()
                    .unwrap_or_else(|| "Request was not successful".to_string()),
            });
        }
        Ok(())
    }

    /// The payload, failing when the backend sent none.
    pub fn into_data(self, status: u16) -> Result<T, SyncError> {
        self.check(status)?;
        self.data
            .ok_or_else(|| SyncError::Decode("Response envelope has no data".to_string()))
    }
}

/// A list payload: either a bare array or a paginated page.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Items(Vec<T>),
    Page(Page<T>),
}

/// One page of a paginated listing.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(
        alias = "data",
        alias = "tasks",
        alias = "sprints",
        alias = "projects",
        alias = "teams"
    )]
    pub items: Vec<T>,
    pub total: Option<u64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl<T> ListPayload<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListPayload::Items(items) => items,
            ListPayload::Page(page) => page.items,
        }
    }
}

/// Query parameters for a collection listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    filters: Vec<(String, String)>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter parameter; a later value for the same key replaces the earlier one.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.filters.retain(|(k, _)| *k != key);
        self.filters.push((key, value.into()));
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Flatten into query pairs, pagination last.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = self.filters.clone();
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use serde_json::Value;

    #[test]
    fn test_envelope_success_false_is_error() {
        let env: Envelope<Value> =
            serde_json::from_str(r#"{"success":false,"message":"Sprint is locked","data":null}"#)
                .unwrap();
        assert_eq!(
            env.into_data(200),
            Err(SyncError::Api {
                status: 200,
                message: "Sprint is locked".to_string()
            })
        );
    }

    #[test]
    fn test_envelope_without_success_flag() {
        let env: Envelope<Vec<u32>> = serde_json::from_str(r#"{"data":[1,2]}"#).unwrap();
        assert_eq!(env.into_data(200).unwrap(), vec![1, 2]);
    }

    fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, SyncError> {
        let envelope: Envelope<T> = serde_json::from_str(body)?;
        envelope.into_data(200)
    }

    #[test]
    fn test_envelope_decodes_payload_without_default() {
        let status: TaskStatus = decode(r#"{"success":true,"data":"InProgress"}"#).unwrap();
        assert_eq!(status, TaskStatus::InProgress);

        assert!(matches!(
            decode::<TaskStatus>(r#"{"success":true,"message":"OK"}"#),
            Err(SyncError::Decode(_))
        ));
    }

    #[test]
    fn test_list_payload_shapes() {
        let plain: ListPayload<u32> = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(plain.into_items(), vec![1, 2, 3]);

        let paged: ListPayload<u32> =
            serde_json::from_str(r#"{"tasks":[4,5],"total":12,"page":2,"limit":2}"#).unwrap();
        assert_eq!(paged.into_items(), vec![4, 5]);
    }

    #[test]
    fn test_list_params_query() {
        let params = ListParams::new()
            .with("status", "ToDo")
            .with("sprintId", "s1")
            .with("status", "Done")
            .page(2)
            .limit(50);

        assert_eq!(params.get("status"), Some("Done"));
        assert_eq!(
            params.to_query(),
            vec![
                ("sprintId".to_string(), "s1".to_string()),
                ("status".to_string(), "Done".to_string()),
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "50".to_string()),
            ]
        );
    }
}
