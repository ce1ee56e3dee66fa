//! Domain layer: entities, merchant rules and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`affiliate`] - Per-merchant affiliate URL rules
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Orchestration lives in [`crate::application::services`].

pub mod affiliate;
pub mod entities;
pub mod repositories;
