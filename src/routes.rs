//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`         - Liveness banner
//! - `GET  /health`   - Health check
//! - `POST /convert`  - URL conversion (JSON body)
//! - `GET  /convert`  - URL conversion (query string)
//! - `POST /add_ml`   - Manual link registration
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = api::routes::routes()
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
