//! Core domain entities.
//!
//! - [`CachedLink`] - A stored original → affiliate URL mapping
//! - [`Merchant`] - Merchant family detected from a product URL

pub mod cached_link;
pub mod merchant;

pub use cached_link::CachedLink;
pub use merchant::Merchant;
