//! HTTP request handlers for API endpoints.

pub mod convert;
pub mod health;
pub mod manual;

pub use convert::{convert_handler, convert_query_handler};
pub use health::{health_handler, root_handler};
pub use manual::register_link_handler;
