//! Repository trait for the persistent link cache.

use crate::domain::entities::CachedLink;
use crate::error::AppError;
use async_trait::async_trait;

/// Single-table key/value store keyed by the exact original URL.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Looks up the stored affiliate URL for an original URL.
    ///
    /// Matching is exact: no normalization is applied to the key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn get(&self, original_url: &str) -> Result<Option<String>, AppError>;

    /// Inserts or overwrites the mapping for `original_url`.
    ///
    /// Last write wins; there is no versioning.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn put(&self, original_url: &str, affiliate_url: &str) -> Result<(), AppError>;

    /// Lists stored mappings, most recently written first.
    async fn list(&self, limit: i64) -> Result<Vec<CachedLink>, AppError>;

    /// Counts stored mappings.
    async fn count(&self) -> Result<i64, AppError>;

    /// Round-trips a trivial query to check the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
