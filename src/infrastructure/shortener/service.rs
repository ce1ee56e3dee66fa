//! Link shortener trait and error types.

use async_trait::async_trait;

/// Errors that can occur while talking to the shortening service.
///
/// A non-200 response is not an error: implementations fall back to the long
/// URL. Only transport failures and unreadable success bodies end up here.
#[derive(Debug, thiserror::Error)]
pub enum ShortenerError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("shortening request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("invalid shortening response: {0}")]
    InvalidResponse(#[source] reqwest::Error),
}

/// Result type for shortener operations.
pub type ShortenerResult<T> = Result<T, ShortenerError>;

/// Exchanges a long URL for a short one.
///
/// # Implementations
///
/// - [`crate::infrastructure::shortener::BitlyShortener`] - Bitly v4 API
/// - [`crate::infrastructure::shortener::PassthroughShortener`] - No credential configured
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkShortener: Send + Sync {
    /// Returns the short URL, or `long_url` unchanged when the service
    /// declines the request.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError`] when the service cannot be reached or its
    /// success response cannot be decoded.
    async fn shorten(&self, long_url: &str) -> ShortenerResult<String>;
}
