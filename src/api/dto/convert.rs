//! DTOs for the conversion endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::Conversion;
use crate::domain::entities::Merchant;

/// Body of `POST /convert`.
///
/// A missing `url` deserializes to an empty string so that it is reported by
/// validation instead of a JSON rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct ConvertRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "URL not provided"))]
    pub url: String,
}

/// Query string of `GET /convert`.
#[derive(Debug, Deserialize, Validate)]
pub struct ConvertQuery {
    #[serde(default)]
    #[validate(length(min = 1, message = "URL not provided"))]
    pub url: String,
}

/// Response of `POST /convert`.
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub short: String,
    pub affiliate: String,
    pub origem: Merchant,
}

impl From<Conversion> for ConvertResponse {
    fn from(conversion: Conversion) -> Self {
        Self {
            short: conversion.short,
            affiliate: conversion.affiliate,
            origem: conversion.merchant,
        }
    }
}

/// Response of `GET /convert`.
#[derive(Debug, Serialize)]
pub struct AffiliateUrlResponse {
    pub affiliate_url: String,
}

impl From<Conversion> for AffiliateUrlResponse {
    fn from(conversion: Conversion) -> Self {
        Self {
            affiliate_url: conversion.short,
        }
    }
}
