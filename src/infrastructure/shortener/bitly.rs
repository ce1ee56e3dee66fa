//! Bitly v4 API client.
//!
//! - **Endpoint**: `POST {api_url}/shorten`
//! - **Authentication**: `Authorization: Bearer <token>`
//! - **Request**: `{"long_url": "<url>"}`
//! - **Response**: `200 {"link": "<short url>", ...}`
//!
//! Any status other than `200` falls back to the long URL. There is no retry.

use super::service::{LinkShortener, ShortenerError, ShortenerResult};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default base URL for the Bitly API.
pub const DEFAULT_API_URL: &str = "https://api-ssl.bitly.com/v4";

/// Shortener client configuration.
#[derive(Debug, Clone)]
pub struct ShortenerConfig {
    /// Bearer token from `BITLY_TOKEN`. `None` disables shortening.
    pub token: Option<String>,
    /// API base URL (default: https://api-ssl.bitly.com/v4).
    pub api_url: String,
    /// Request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: None,
        }
    }
}

#[derive(Serialize)]
struct ShortenRequest<'a> {
    long_url: &'a str,
}

#[derive(Deserialize)]
struct ShortenResponse {
    link: String,
}

/// Bitly API client.
#[derive(Debug, Clone)]
pub struct BitlyShortener {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl BitlyShortener {
    /// Creates a client for the given base URL and bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::Client`] if the HTTP client cannot be built.
    pub fn new(
        api_url: &str,
        token: String,
        timeout: Option<Duration>,
    ) -> ShortenerResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ShortenerError::Client)?;

        Ok(Self {
            http,
            endpoint: format!("{}/shorten", api_url.trim_end_matches('/')),
            token,
        })
    }
}

#[async_trait]
impl LinkShortener for BitlyShortener {
    async fn shorten(&self, long_url: &str) -> ShortenerResult<String> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&ShortenRequest { long_url })
            .send()
            .await
            .map_err(ShortenerError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%status, long_url, "Shortening declined, using long URL");
            return Ok(long_url.to_string());
        }

        let body: ShortenResponse = response
            .json()
            .await
            .map_err(ShortenerError::InvalidResponse)?;

        debug!("Shortened {} -> {}", long_url, body.link);
        Ok(body.link)
    }
}
