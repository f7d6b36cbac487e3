//! REST transport for communicating with the chat-platform API.
//!
//! The cache layer talks to the network only through the [`Transport`]
//! trait, which resolves an endpoint path to a raw JSON payload. The
//! default implementation, [`RestTransport`], wraps a `reqwest` client
//! with bearer-token auth and a bounded retry for rate-limited requests.

use std::time::Duration;

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Network access used by managers when an explicit refresh is requested.
///
/// A `get` resolves the endpoint path to the raw payload for one entity,
/// or fails with a transport error. Cache state is never touched here;
/// callers decide what to do with the payload.
pub trait Transport: Send + Sync {
    fn get<'a>(&'a self, endpoint: &'a str) -> BoxFuture<'a, Result<Value>>;
}

/// Transport backed by a real HTTP client.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct RestTransport {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RestTransport {
    /// Create a transport from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Create a new transport with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    async fn request_json(&self, endpoint: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let mut request = self.client.get(&url);
            if let Some(ref token) = self.token {
                request = request.bearer_auth(token);
            }

            let response = request
                .send()
                .await
                .with_context(|| format!("Failed to send GET request to {}", url))?;

            if response.status().is_success() {
                debug!(url = %url, "GET succeeded");
                return response
                    .json()
                    .await
                    .with_context(|| format!("Failed to parse JSON response from {}", url));
            }

            if response.status().as_u16() == 429 {
                retries += 1;
                if retries > MAX_RATE_LIMIT_RETRIES {
                    return Err(ApiError::RateLimited.into());
                }
                warn!(url = %url, retry = retries, backoff_ms, "Rate limited, backing off");
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                backoff_ms *= 2;
                continue;
            }

            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body).into());
        }
    }
}

impl Transport for RestTransport {
    fn get<'a>(&'a self, endpoint: &'a str) -> BoxFuture<'a, Result<Value>> {
        Box::pin(self.request_json(endpoint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_trailing_slash_from_base_url() {
        let config = Config {
            api_base_url: "https://example.invalid/api/".into(),
            ..Default::default()
        };
        let transport = RestTransport::new(&config).unwrap();
        assert_eq!(transport.base_url, "https://example.invalid/api");
        assert!(transport.token.is_none());
    }

    #[test]
    fn test_with_token_swaps_auth_and_keeps_base_url() {
        let transport = RestTransport::new(&Config::default()).unwrap();
        let authed = transport.with_token("secret".to_string());

        assert_eq!(authed.token.as_deref(), Some("secret"));
        assert_eq!(authed.base_url, transport.base_url);
        // The original transport's auth is untouched.
        assert!(transport.token.is_none());
    }
}
