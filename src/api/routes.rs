//! API route configuration.

use crate::api::handlers::{
    convert_handler, convert_query_handler, health_handler, register_link_handler, root_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes. None require authentication.
///
/// # Endpoints
///
/// - `GET  /`         - Liveness banner
/// - `GET  /health`   - Database health check
/// - `POST /convert`  - Convert a URL (JSON body)
/// - `GET  /convert`  - Convert a URL (`?url=` query)
/// - `POST /add_ml`   - Register an affiliate link manually
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/convert", post(convert_handler).get(convert_query_handler))
        .route("/add_ml", post(register_link_handler))
}
