//! Configuration module for the sync client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://127.0.0.1:3000/api";
const DEFAULT_SESSION_DB: &str = "./data/session.sqlite";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST API, without a trailing slash
    pub api_base_url: String,
    /// Path to the SQLite file holding the persisted session
    pub session_db_path: PathBuf,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Page size used by `fetch_all` when the caller does not set one
    pub page_limit: u32,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit JSON log lines instead of the human-readable format
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("SPRINTBOARD_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let session_db_path = env::var("SPRINTBOARD_SESSION_DB")
            .unwrap_or_else(|_| DEFAULT_SESSION_DB.to_string())
            .into();

        let request_timeout = Duration::from_secs(parse_or_default(
            "SPRINTBOARD_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        ));

        let page_limit = parse_or_default("SPRINTBOARD_PAGE_LIMIT", DEFAULT_PAGE_LIMIT);

        let log_level = env::var("SPRINTBOARD_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_json = env::var("SPRINTBOARD_LOG_JSON")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            api_base_url,
            session_db_path,
            request_timeout,
            page_limit,
            log_level,
            log_json,
        }
    }

    /// Configuration pointing at an explicit API and session file.
    pub fn for_endpoint(api_base_url: impl Into<String>, session_db_path: PathBuf) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            session_db_path,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_limit: DEFAULT_PAGE_LIMIT,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

fn parse_or_default<T: std::str::FromStr + std::fmt::Display + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("SPRINTBOARD_API_URL");
        env::remove_var("SPRINTBOARD_SESSION_DB");
        env::remove_var("SPRINTBOARD_TIMEOUT_SECS");
        env::remove_var("SPRINTBOARD_PAGE_LIMIT");
        env::remove_var("SPRINTBOARD_LOG_LEVEL");
        env::remove_var("SPRINTBOARD_LOG_JSON");

        let config = Config::from_env();

        assert_eq!(config.api_base_url, "http://127.0.0.1:3000/api");
        assert_eq!(config.session_db_path, PathBuf::from("./data/session.sqlite"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.page_limit, 100);
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
    }

    #[test]
    fn test_for_endpoint_trims_trailing_slash() {
        let config = Config::for_endpoint("http://localhost:9000/api/", PathBuf::from("s.db"));
        assert_eq!(config.api_base_url, "http://localhost:9000/api");
        assert_eq!(config.page_limit, 100);
    }
}
