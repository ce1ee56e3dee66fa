//! Cached link entity: one resolved URL per original URL.

use chrono::{DateTime, Utc};

/// A stored mapping from an original product URL to its affiliate form.
///
/// The `affiliate_url` is whatever the conversion pipeline produced last,
/// shortened or not, or the value registered manually by the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedLink {
    pub original_url: String,
    pub affiliate_url: String,
    pub updated_at: DateTime<Utc>,
}

impl CachedLink {
    pub fn new(original_url: String, affiliate_url: String, updated_at: DateTime<Utc>) -> Self {
        Self {
            original_url,
            affiliate_url,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_link_new() {
        let now = Utc::now();
        let link = CachedLink::new(
            "https://www.amazon.com.br/dp/B000123ABC".to_string(),
            "https://bit.ly/abc".to_string(),
            now,
        );

        assert_eq!(link.original_url, "https://www.amazon.com.br/dp/B000123ABC");
        assert_eq!(link.affiliate_url, "https://bit.ly/abc");
        assert_eq!(link.updated_at, now);
    }
}
