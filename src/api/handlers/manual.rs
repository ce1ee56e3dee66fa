//! Handler for manual link registration.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::manual::{RegisterLinkRequest, RegisterLinkResponse};
use crate::api::extract::ApiJson;
use crate::error::AppError;
use crate::state::AppState;

/// Stores an affiliate link produced outside the service.
///
/// Used for merchants whose affiliate links cannot be generated automatically.
/// Overwrites any previous mapping for the same original URL.
///
/// # Endpoint
///
/// `POST /add_ml`
///
/// # Request Body
///
/// ```json
/// {
///   "original": "https://produto.mercadolivre.com.br/MLB-123",
///   "affiliate": "https://mercadolivre.com/sec/1a2b3c"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if either field is missing or empty.
pub async fn register_link_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterLinkRequest>,
) -> Result<Json<RegisterLinkResponse>, AppError> {
    payload.validate()?;

    state
        .link_service
        .register_manual(&payload.original, &payload.affiliate)
        .await?;

    Ok(Json(RegisterLinkResponse {
        msg: "Link saved successfully".to_string(),
    }))
}
