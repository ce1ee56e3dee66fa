//! Link conversion and manual registration service.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::affiliate::{BuildOutcome, LinkBuilder};
use crate::domain::entities::Merchant;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::shortener::LinkShortener;
use crate::utils::KeyedLock;

/// Result of converting one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Final link handed to the caller (shortened when shortening is enabled).
    pub short: String,
    /// Affiliate link before shortening. Equal to `short` on a cache hit.
    pub affiliate: String,
    pub merchant: Merchant,
    /// Whether the result came straight from the cache.
    pub cached: bool,
}

impl Conversion {
    fn from_cache(original_url: &str, stored: String) -> Self {
        Self {
            short: stored.clone(),
            affiliate: stored,
            merchant: Merchant::detect(original_url),
            cached: true,
        }
    }
}

/// Service turning product URLs into affiliate links.
///
/// Pipeline for [`LinkService::convert`]:
///
/// 1. Cache lookup by exact URL; a hit is returned as-is
/// 2. Per-key lock, then a second lookup (another request may have just filled it)
/// 3. Merchant rule via [`LinkBuilder`]
/// 4. Shortening via [`LinkShortener`]
/// 5. Cache write of the final link
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    builder: Arc<dyn LinkBuilder>,
    shortener: Arc<dyn LinkShortener>,
    in_flight: KeyedLock,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        builder: Arc<dyn LinkBuilder>,
        shortener: Arc<dyn LinkShortener>,
    ) -> Self {
        Self {
            repository,
            builder,
            shortener,
            in_flight: KeyedLock::new(),
        }
    }

    /// Resolves `original_url` to its affiliate link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unresolvable`] if no rule produces a link, with a
    /// hint to register it manually when the merchant requires it.
    ///
    /// Returns [`AppError::Storage`] or [`AppError::Shortener`] on
    /// infrastructure failures.
    pub async fn convert(&self, original_url: &str) -> Result<Conversion, AppError> {
        if let Some(stored) = self.repository.get(original_url).await? {
            debug!("Cache HIT: {}", original_url);
            return Ok(Conversion::from_cache(original_url, stored));
        }

        let _guard = self.in_flight.lock(original_url).await;

        if let Some(stored) = self.repository.get(original_url).await? {
            debug!("Cache filled while waiting: {}", original_url);
            return Ok(Conversion::from_cache(original_url, stored));
        }

        let (affiliate, merchant) = match self.builder.build(original_url) {
            BuildOutcome::Built { url, merchant } => (url, merchant),
            BuildOutcome::RequiresManual { merchant } => {
                return Err(AppError::manual_registration_required(
                    merchant.display_name(),
                ));
            }
            BuildOutcome::Unresolvable { merchant } => {
                debug!(merchant = merchant.tag(), "No rule for {}", original_url);
                return Err(AppError::unresolvable("Could not process this link"));
            }
        };

        let short = self.shortener.shorten(&affiliate).await?;

        self.repository.put(original_url, &short).await?;

        info!(
            merchant = merchant.tag(),
            "Converted {} -> {}", original_url, short
        );

        Ok(Conversion {
            short,
            affiliate,
            merchant,
            cached: false,
        })
    }

    /// Stores an operator-supplied affiliate link, overwriting any previous value.
    ///
    /// The builder and shortener are not involved; the next
    /// [`LinkService::convert`] for `original_url` returns `affiliate_url` verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either value is empty.
    /// Returns [`AppError::Storage`] on database errors.
    pub async fn register_manual(
        &self,
        original_url: &str,
        affiliate_url: &str,
    ) -> Result<(), AppError> {
        if original_url.is_empty() || affiliate_url.is_empty() {
            return Err(AppError::bad_request(
                "Fields 'original' and 'affiliate' are required",
            ));
        }

        self.repository.put(original_url, affiliate_url).await?;

        info!("Registered manual link {} -> {}", original_url, affiliate_url);
        Ok(())
    }

    /// Checks that the link store answers.
    pub async fn check_storage(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
