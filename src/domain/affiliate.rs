//! Affiliate URL construction per merchant family.
//!
//! [`MerchantRules`] is the production [`LinkBuilder`]. It detects the merchant
//! with [`Merchant::detect`] and applies that merchant's rule:
//!
//! - **Amazon** - extracts the ASIN from `/dp/<ASIN>` or `/gp/product/<ASIN>` and
//!   rebuilds a canonical `https://<host>/dp/<ASIN>/?tag=<tag>` URL
//! - **Mercado Livre** - sets a `campaign=<id>` query parameter
//! - **Other** - no rule
//!
//! What happens when a rule is missing its configuration (or there is no rule at
//! all) is decided by [`LinkPolicy`].

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use url::{Url, form_urlencoded};

use crate::domain::entities::Merchant;

static DP_ASIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/dp/([A-Z0-9]{10})").expect("valid ASIN regex"));

static GP_PRODUCT_ASIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/gp/product/([A-Z0-9]{10})").expect("valid ASIN regex"));

/// Default Amazon marketplace host for rebuilt links.
pub const DEFAULT_AMAZON_HOST: &str = "www.amazon.com.br";

/// Query parameter carrying the Mercado Livre campaign id.
const CAMPAIGN_PARAM: &str = "campaign";

/// Behavior when no rule (or no rule configuration) applies to a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkPolicy {
    /// Fail: missing tag or unknown merchant is an error, and Mercado Livre
    /// links require a manually registered mapping.
    #[default]
    Strict,
    /// Pass the original URL through unchanged.
    Permissive,
}

impl FromStr for LinkPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            other => Err(format!(
                "LINK_POLICY must be 'strict' or 'permissive', got '{other}'"
            )),
        }
    }
}

/// Merchant credentials and dispatch policy, read once at startup.
#[derive(Debug, Clone)]
pub struct AffiliateConfig {
    pub amazon_tag: Option<String>,
    pub amazon_host: String,
    pub campaign_id: Option<String>,
    pub policy: LinkPolicy,
}

impl Default for AffiliateConfig {
    fn default() -> Self {
        Self {
            amazon_tag: None,
            amazon_host: DEFAULT_AMAZON_HOST.to_string(),
            campaign_id: None,
            policy: LinkPolicy::default(),
        }
    }
}

/// Result of running the builder on one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Built { url: String, merchant: Merchant },
    /// The merchant has no automated rule configured; the operator must
    /// register the affiliate URL by hand.
    RequiresManual { merchant: Merchant },
    Unresolvable { merchant: Merchant },
}

/// Maps a source URL to its affiliate form.
#[cfg_attr(test, mockall::automock)]
pub trait LinkBuilder: Send + Sync {
    fn build(&self, url: &str) -> BuildOutcome;
}

/// Production builder applying the per-merchant rules.
#[derive(Debug, Clone)]
pub struct MerchantRules {
    config: AffiliateConfig,
}

impl MerchantRules {
    pub fn new(config: AffiliateConfig) -> Self {
        Self { config }
    }

    fn build_amazon(&self, url: &str) -> BuildOutcome {
        let merchant = Merchant::Amazon;

        let Some(asin) = extract_asin(url) else {
            return BuildOutcome::Unresolvable { merchant };
        };

        match (&self.config.amazon_tag, self.config.policy) {
            (Some(tag), _) => BuildOutcome::Built {
                url: format!(
                    "https://{}/dp/{}/?tag={}",
                    self.config.amazon_host, asin, tag
                ),
                merchant,
            },
            (None, LinkPolicy::Permissive) => passthrough(url, merchant),
            (None, LinkPolicy::Strict) => BuildOutcome::Unresolvable { merchant },
        }
    }

    fn build_mercado_livre(&self, url: &str) -> BuildOutcome {
        let merchant = Merchant::MercadoLivre;

        match (&self.config.campaign_id, self.config.policy) {
            (Some(campaign), _) => match with_campaign(url, campaign) {
                Some(url) => BuildOutcome::Built { url, merchant },
                None => BuildOutcome::Unresolvable { merchant },
            },
            (None, LinkPolicy::Permissive) => passthrough(url, merchant),
            (None, LinkPolicy::Strict) => BuildOutcome::RequiresManual { merchant },
        }
    }
}

impl LinkBuilder for MerchantRules {
    fn build(&self, url: &str) -> BuildOutcome {
        match Merchant::detect(url) {
            Merchant::Amazon => self.build_amazon(url),
            Merchant::MercadoLivre => self.build_mercado_livre(url),
            merchant @ Merchant::Other => match self.config.policy {
                LinkPolicy::Permissive => passthrough(url, merchant),
                LinkPolicy::Strict => BuildOutcome::Unresolvable { merchant },
            },
        }
    }
}

fn passthrough(url: &str, merchant: Merchant) -> BuildOutcome {
    BuildOutcome::Built {
        url: url.to_string(),
        merchant,
    }
}

/// Extracts the 10-character ASIN, preferring the `/dp/` path shape.
pub fn extract_asin(url: &str) -> Option<&str> {
    DP_ASIN_REGEX
        .captures(url)
        .or_else(|| GP_PRODUCT_ASIN_REGEX.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Sets the campaign query parameter, replacing any previous value.
///
/// Other query segments are kept exactly as written.
/// Returns `None` when `url` is not an absolute URL.
fn with_campaign(url: &str, campaign: &str) -> Option<String> {
    let mut parsed = Url::parse(url).ok()?;

    let campaign_pair = format!(
        "{CAMPAIGN_PARAM}={}",
        form_urlencoded::byte_serialize(campaign.as_bytes()).collect::<String>()
    );

    let mut segments: Vec<&str> = parsed
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|segment| !segment.is_empty() && !is_campaign_segment(segment))
        .collect();
    segments.push(&campaign_pair);

    let query = segments.join("&");
    parsed.set_query(Some(&query));

    Some(parsed.into())
}

fn is_campaign_segment(segment: &str) -> bool {
    let key = segment.split_once('=').map_or(segment, |(key, _)| key);
    key == CAMPAIGN_PARAM
}
