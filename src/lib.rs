//! # Affiliate Linker
//!
//! Turns e-commerce product URLs into affiliate links, optionally shortens them
//! through Bitly, and remembers every result in a local SQLite table.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, merchant rules, repository traits
//! - **Application Layer** ([`application`]) - The conversion pipeline
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite store and Bitly client
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Conversion
//!
//! 1. Cached URLs are answered from the table without rebuilding
//! 2. Amazon links are rebuilt around their ASIN with the configured tag
//! 3. Mercado Livre links get a `campaign` parameter, or must be registered by hand
//! 4. The result is shortened (when `BITLY_TOKEN` is set) and cached
//!
//! ## Quick Start
//!
//! ```bash
//! export AMAZON_TAG="meutag-20"
//! export BITLY_TOKEN="..."   # Optional
//!
//! cargo run
//!
//! curl -X POST localhost:5000/convert \
//!      -H 'Content-Type: application/json' \
//!      -d '{"url": "https://www.amazon.com.br/dp/B000123ABC"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{Conversion, LinkService};
    pub use crate::domain::affiliate::{AffiliateConfig, LinkBuilder, LinkPolicy, MerchantRules};
    pub use crate::domain::entities::{CachedLink, Merchant};
    pub use crate::domain::repositories::LinkRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::shortener::LinkShortener;
    pub use crate::state::AppState;
}
