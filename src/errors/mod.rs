//! Error handling module for the sync layer.
//!
//! Provides a single error type for transport, API, decoding and local
//! precondition failures, each mapped to a stable error code.

use serde::Deserialize;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const API_ERROR: &str = "API_ERROR";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// Sync layer error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Transport failure: connection refused, timeout, TLS, ...
    Network(String),
    /// The backend answered with a non-2xx status or `success: false`
    Api { status: u16, message: String },
    /// Response body did not match the expected shape
    Decode(String),
    /// The backend no longer has the entity (HTTP 404)
    NotFound(String),
    /// Client-side validation rejected a record or an index
    Validation(String),
    /// Local session storage failure
    Storage(String),
    /// Invalid configuration
    Config(String),
}

impl SyncError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            SyncError::Network(_) => codes::NETWORK_ERROR,
            SyncError::Api { status: 401, .. } => codes::UNAUTHORIZED,
            SyncError::Api { .. } => codes::API_ERROR,
            SyncError::Decode(_) => codes::DECODE_ERROR,
            SyncError::NotFound(_) => codes::NOT_FOUND,
            SyncError::Validation(_) => codes::VALIDATION_ERROR,
            SyncError::Storage(_) => codes::STORAGE_ERROR,
            SyncError::Config(_) => codes::CONFIG_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            SyncError::Network(msg) => msg.clone(),
            SyncError::Api { message, .. } => message.clone(),
            SyncError::Decode(msg) => msg.clone(),
            SyncError::NotFound(msg) => msg.clone(),
            SyncError::Validation(msg) => msg.clone(),
            SyncError::Storage(msg) => msg.clone(),
            SyncError::Config(msg) => msg.clone(),
        }
    }

    /// HTTP status carried by the error, if the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Api { status, .. } => Some(*status),
            SyncError::NotFound(_) => Some(404),
            _ => None,
        }
    }

    /// Whether the failure happened before any response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, SyncError::Network(_))
    }
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::Api { status, message } => {
                write!(f, "{} ({}): {}", self.error_code(), status, message)
            }
            _ => write!(f, "{}: {}", self.error_code(), self.message()),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP error: {:?}", err);
        if err.is_decode() {
            return SyncError::Decode(format!("Response decode error: {}", err));
        }
        match err.status() {
            Some(status) => SyncError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => SyncError::Network(format!("Request failed: {}", err)),
        }
    }
}

impl From<sqlx::Error> for SyncError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Session storage error: {:?}", err);
        SyncError::Storage(format!("Database error: {}", err))
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        SyncError::Decode(format!("JSON error: {}", err))
    }
}

/// Error body shapes the backend is known to send.
///
/// Most endpoints answer `{ success: false, message }`; some nest the message
/// under `error`, either as a string or as `{ code, message }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Flat {
        message: String,
    },
    Nested {
        error: NestedError,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NestedError {
    Detailed { message: String },
    Plain(String),
}

/// Build an API error from a non-2xx status and the raw response body.
/// A 404 becomes [`SyncError::NotFound`].
pub fn api_error(status: u16, body: &str) -> SyncError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody::Flat { message }) => message,
        Ok(ErrorBody::Nested {
            error: NestedError::Detailed { message },
        }) => message,
        Ok(ErrorBody::Nested {
            error: NestedError::Plain(message),
        }) => message,
        Err(_) if body.trim().is_empty() => format!("Request failed with status {}", status),
        Err(_) => body.trim().to_string(),
    };

    match status {
        404 => SyncError::NotFound(message),
        _ => SyncError::Api { status, message },
    }
}
