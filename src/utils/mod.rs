//! Utility modules.
//!
//! - [`keyed_lock`] - Per-key async mutex used to collapse concurrent cache misses

pub mod keyed_lock;

pub use keyed_lock::KeyedLock;
