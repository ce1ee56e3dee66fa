//! DTOs for manual link registration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /add_ml`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterLinkRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Fields 'original' and 'affiliate' are required"))]
    pub original: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Fields 'original' and 'affiliate' are required"))]
    pub affiliate: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterLinkResponse {
    pub msg: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_fields_required() {
        for body in [
            r#"{}"#,
            r#"{"original": "https://a"}"#,
            r#"{"affiliate": "https://b"}"#,
            r#"{"original": "", "affiliate": "https://b"}"#,
        ] {
            let request: RegisterLinkRequest = serde_json::from_str(body).unwrap();
            assert!(request.validate().is_err(), "{body} should be rejected");
        }
    }

    #[test]
    fn test_valid_request() {
        let request: RegisterLinkRequest =
            serde_json::from_str(r#"{"original": "https://a", "affiliate": "https://b"}"#).unwrap();
        assert!(request.validate().is_ok());
    }
}
