//! Extractors that report rejections in the service's error format.
//!
//! Axum's stock `Json` and `Query` extractors answer malformed input with a
//! plain-text body. These wrappers turn the rejection into an [`AppError`] so
//! the caller always gets `{"error": "..."}`.

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;

use crate::error::AppError;

/// JSON body extractor with [`AppError`] rejections.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor with [`AppError`] rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
