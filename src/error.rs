//! Application error type and its HTTP representation.
//!
//! Every error leaves the service as a flat JSON object:
//!
//! ```json
//! { "error": "Mercado Livre link not registered", "msg": "Register it manually via /add_ml" }
//! ```
//!
//! The `msg` field is only present when the caller can do something about the
//! failure. Storage and upstream faults are logged with their cause and reported
//! as a generic `500`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

use crate::infrastructure::shortener::ShortenerError;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required field is missing, empty, or the body is not valid JSON.
    #[error("{message}")]
    Validation { message: String },

    /// No affiliate link can be produced for the submitted URL.
    #[error("{message}")]
    Unresolvable {
        message: String,
        hint: Option<String>,
    },

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("shortener error: {0}")]
    Shortener(#[from] ShortenerError),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unresolvable(message: impl Into<String>) -> Self {
        Self::Unresolvable {
            message: message.into(),
            hint: None,
        }
    }

    /// The merchant has no automated rule and the URL was never registered.
    pub fn manual_registration_required(merchant_name: &str) -> Self {
        Self::Unresolvable {
            message: format!("{merchant_name} link not registered"),
            hint: Some("Register it manually via /add_ml".to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::Unresolvable { .. } => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::Shortener(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its wire representation.
    ///
    /// Internal causes are not exposed to the caller.
    pub fn to_error_body(&self) -> ErrorBody {
        match self {
            Self::Validation { message } => ErrorBody {
                error: message.clone(),
                msg: None,
            },
            Self::Unresolvable { message, hint } => ErrorBody {
                error: message.clone(),
                msg: hint.clone(),
            },
            Self::Storage(_) | Self::Shortener(_) => ErrorBody {
                error: "Internal server error".to_string(),
                msg: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(self.to_error_body())).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        // Only one message is reported; DTOs share a message across related fields.
        let message = errors
            .field_errors()
            .into_values()
            .flatten()
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        Self::bad_request(message)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(format!("Invalid query string: {}", rejection.body_text()))
    }
}
