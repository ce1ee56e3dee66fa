//! Handlers for URL conversion.

use axum::{Json, extract::State};
use tracing::debug;
use validator::Validate;

use crate::api::dto::convert::{
    AffiliateUrlResponse, ConvertQuery, ConvertRequest, ConvertResponse,
};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Converts a product URL into its affiliate link.
///
/// # Endpoint
///
/// `POST /convert`
///
/// # Request Body
///
/// ```json
/// { "url": "https://www.amazon.com.br/Produto/dp/B000123ABC" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "short": "https://bit.ly/3xYz",
///   "affiliate": "https://www.amazon.com.br/dp/B000123ABC/?tag=meutag-20",
///   "origem": "amazon"
/// }
/// ```
///
/// On a cache hit `short` and `affiliate` both carry the stored link.
///
/// # Errors
///
/// - 400 if `url` is missing or empty
/// - 400 with a `msg` hint if the link must be registered via `/add_ml`
/// - 400 if no rule can produce an affiliate link
pub async fn convert_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ConvertRequest>,
) -> Result<Json<ConvertResponse>, AppError> {
    payload.validate()?;

    let conversion = state.link_service.convert(&payload.url).await?;
    debug!(
        cached = conversion.cached,
        merchant = conversion.merchant.tag(),
        "Served {}", payload.url
    );

    Ok(Json(conversion.into()))
}

/// Query-string variant of [`convert_handler`].
///
/// # Endpoint
///
/// `GET /convert?url=<url>`
///
/// # Response
///
/// ```json
/// { "affiliate_url": "https://bit.ly/3xYz" }
/// ```
pub async fn convert_query_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ConvertQuery>,
) -> Result<Json<AffiliateUrlResponse>, AppError> {
    query.validate()?;

    let conversion = state.link_service.convert(&query.url).await?;
    debug!(
        cached = conversion.cached,
        merchant = conversion.merchant.tag(),
        "Served {}", query.url
    );

    Ok(Json(conversion.into()))
}
