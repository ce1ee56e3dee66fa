//! Merchant families recognized by the link builder.

use serde::Serialize;

/// Merchant family of a product URL.
///
/// Detection is a plain substring match on the URL, checked in a fixed
/// priority order: Amazon first, then Mercado Livre. Everything else is
/// [`Merchant::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Merchant {
    Amazon,
    #[serde(rename = "mercadolivre")]
    MercadoLivre,
    Other,
}

impl Merchant {
    pub fn detect(url: &str) -> Self {
        if url.contains("amazon") {
            Self::Amazon
        } else if url.contains("mercadolivre") || url.contains("mercado") {
            Self::MercadoLivre
        } else {
            Self::Other
        }
    }

    /// Tag reported in the `origem` field of conversion responses.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Amazon => "amazon",
            Self::MercadoLivre => "mercadolivre",
            Self::Other => "other",
        }
    }

    /// Human-readable name used in error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Amazon => "Amazon",
            Self::MercadoLivre => "Mercado Livre",
            Self::Other => "Unknown merchant",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_amazon() {
        assert_eq!(
            Merchant::detect("https://www.amazon.com.br/dp/B000123ABC"),
            Merchant::Amazon
        );
    }

    #[test]
    fn test_detect_mercado_livre() {
        assert_eq!(
            Merchant::detect("https://produto.mercadolivre.com.br/MLB-123"),
            Merchant::MercadoLivre
        );
        assert_eq!(
            Merchant::detect("https://www.mercadolibre.com.ar/p/MLA1"),
            Merchant::MercadoLivre
        );
    }

    #[test]
    fn test_detect_priority_amazon_first() {
        assert_eq!(
            Merchant::detect("https://www.amazon.com.br/s?k=mercado"),
            Merchant::Amazon
        );
    }

    #[test]
    fn test_detect_other() {
        assert_eq!(Merchant::detect("https://example.com/item"), Merchant::Other);
    }

    #[test]
    fn test_serialized_tag_matches_tag() {
        for merchant in [Merchant::Amazon, Merchant::MercadoLivre, Merchant::Other] {
            let json = serde_json::to_value(merchant).unwrap();
            assert_eq!(json, merchant.tag());
        }
    }
}
