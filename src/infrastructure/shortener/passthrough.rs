//! No-op shortener used when no credential is configured.

use super::service::{LinkShortener, ShortenerResult};
use async_trait::async_trait;
use tracing::debug;

/// A shortener that returns every URL unchanged.
pub struct PassthroughShortener;

impl PassthroughShortener {
    pub fn new() -> Self {
        debug!("Using PassthroughShortener (shortening disabled)");
        Self
    }
}

impl Default for PassthroughShortener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkShortener for PassthroughShortener {
    async fn shorten(&self, long_url: &str) -> ShortenerResult<String> {
        Ok(long_url.to_string())
    }
}
