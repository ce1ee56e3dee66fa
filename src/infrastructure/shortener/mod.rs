//! Link shortening client.
//!
//! Provides a [`LinkShortener`] trait with two implementations:
//! - [`BitlyShortener`] - Bitly v4 API over HTTPS
//! - [`PassthroughShortener`] - No-op used when no credential is configured

mod bitly;
mod passthrough;
mod service;

pub use bitly::{BitlyShortener, DEFAULT_API_URL, ShortenerConfig};
pub use passthrough::PassthroughShortener;
pub use service::{LinkShortener, ShortenerError, ShortenerResult};

#[cfg(test)]
pub use service::MockLinkShortener;

use std::sync::Arc;

/// Picks the shortener for the given configuration.
///
/// # Errors
///
/// Returns [`ShortenerError::Client`] if the Bitly HTTP client cannot be built.
pub fn from_config(config: &ShortenerConfig) -> ShortenerResult<Arc<dyn LinkShortener>> {
    match &config.token {
        Some(token) => {
            tracing::info!("Shortening enabled (Bitly at {})", config.api_url);
            Ok(Arc::new(BitlyShortener::new(
                &config.api_url,
                token.clone(),
                config.timeout,
            )?))
        }
        None => {
            tracing::info!("Shortening disabled (no BITLY_TOKEN)");
            Ok(Arc::new(PassthroughShortener::new()))
        }
    }
}
