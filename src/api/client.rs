//! HTTP transport shared by every resource.

use std::sync::Arc;

use reqwest::Method;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;

use super::{Envelope, EnvelopeShape};
use crate::config::Config;
use crate::errors::{api_error, SyncError};
use crate::session::TokenProvider;

/// Thin wrapper around `reqwest::Client` that knows the API base URL and
/// attaches the bearer token from the injected provider.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    tokens: Arc<dyn TokenProvider>,
}

impl RestClient {
    pub fn new(config: &Config, tokens: Arc<dyn TokenProvider>) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SyncError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: Arc::from(config.api_base_url.trim_end_matches('/')),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue a request and return the status with the raw body text.
    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> Result<(u16, String), SyncError> {
        tracing::debug!("{} {}", method, path);

        let mut request = self.http.request(method.clone(), self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.tokens.bearer_token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let err = api_error(status.as_u16(), &text);
            tracing::warn!("{} {} failed: {}", method, path, err);
            return Err(err);
        }

        Ok((status.as_u16(), text))
    }

    /// Send a request and decode its payload.
    pub async fn send<B, R>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
        shape: EnvelopeShape,
    ) -> Result<R, SyncError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let (status, text) = self.execute(method, path, query, body).await?;

        match shape {
            EnvelopeShape::Wrapped => {
                let envelope: Envelope<R> = serde_json::from_str(&text)?;
                envelope.into_data(status)
            }
            EnvelopeShape::Bare => Ok(serde_json::from_str(&text)?),
        }
    }

    /// Send a request whose payload the caller does not need.
    pub async fn send_unit<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        shape: EnvelopeShape,
    ) -> Result<(), SyncError>
    where
        B: Serialize + ?Sized,
    {
        let (status, text) = self.execute(method, path, &[], body).await?;

        if shape == EnvelopeShape::Bare || text.trim().is_empty() {
            return Ok(());
        }

        let envelope: Envelope<IgnoredAny> = serde_json::from_str(&text)?;
        envelope.check(status)
    }
}
