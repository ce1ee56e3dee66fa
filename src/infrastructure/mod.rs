//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - SQLite link cache
//! - [`shortener`] - Bitly client and passthrough fallback

pub mod persistence;
pub mod shortener;
