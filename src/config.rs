//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup, validated, and handed to the
//! components that need it. Nothing reads the environment after that.
//!
//! ## Variables
//!
//! ```bash
//! export DATABASE_URL="sqlite://db.sqlite"   # created if missing
//! export PORT="5000"                         # or LISTEN="127.0.0.1:8080"
//!
//! export BITLY_TOKEN="..."                   # enables shortening
//! export AMAZON_TAG="meutag-20"
//! export ML_CAMPAIGN_ID="..."
//! export LINK_POLICY="strict"                # or "permissive"
//! ```
//!
//! ## Optional Variables
//!
//! - `DB_MAX_CONNECTIONS` - SQLite pool size (default: 5)
//! - `AMAZON_HOST` - Marketplace host for rebuilt Amazon links (default: `www.amazon.com.br`)
//! - `SHORTENER_API_URL` - Shortening API base (default: `https://api-ssl.bitly.com/v4`)
//! - `SHORTENER_TIMEOUT_SECS` - Shortening request timeout (default: none)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//!
//! Empty values are treated as unset.

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::domain::affiliate::{AffiliateConfig, DEFAULT_AMAZON_HOST, LinkPolicy};
use crate::infrastructure::shortener::{DEFAULT_API_URL, ShortenerConfig};

const DEFAULT_DATABASE_URL: &str = "sqlite://db.sqlite";
const DEFAULT_PORT: u16 = 5000;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 5).
    pub db_max_connections: u32,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub affiliate: AffiliateConfig,
    pub shortener: ShortenerConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable or `LINK_POLICY` cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let database_url =
            non_empty_var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let db_max_connections = parse_var("DB_MAX_CONNECTIONS")?.unwrap_or(5);

        let listen_addr = Self::load_listen_addr()?;
        let log_level = non_empty_var("RUST_LOG").unwrap_or_else(|| "info".to_string());
        let log_format = non_empty_var("LOG_FORMAT").unwrap_or_else(|| "text".to_string());

        let policy = match non_empty_var("LINK_POLICY") {
            Some(value) => value.parse::<LinkPolicy>().map_err(anyhow::Error::msg)?,
            None => LinkPolicy::default(),
        };

        let affiliate = AffiliateConfig {
            amazon_tag: non_empty_var("AMAZON_TAG"),
            amazon_host: non_empty_var("AMAZON_HOST")
                .unwrap_or_else(|| DEFAULT_AMAZON_HOST.to_string()),
            campaign_id: non_empty_var("ML_CAMPAIGN_ID"),
            policy,
        };

        let shortener = ShortenerConfig {
            token: non_empty_var("BITLY_TOKEN"),
            api_url: non_empty_var("SHORTENER_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout: parse_var::<u64>("SHORTENER_TIMEOUT_SECS")?.map(Duration::from_secs),
        };

        Ok(Self {
            database_url,
            db_max_connections,
            listen_addr,
            log_level,
            log_format,
            affiliate,
            shortener,
        })
    }

    /// Resolves the bind address.
    ///
    /// Priority:
    /// 1. `LISTEN` (full `ip:port`)
    /// 2. `0.0.0.0:$PORT`
    /// 3. `0.0.0.0:5000`
    fn load_listen_addr() -> Result<String> {
        if let Some(listen) = non_empty_var("LISTEN") {
            return Ok(listen);
        }

        let port = parse_var::<u16>("PORT")?.unwrap_or(DEFAULT_PORT);
        Ok(format!("0.0.0.0:{}", port))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not an `ip:port` socket address
    /// - `database_url` is not a SQLite URL
    /// - `db_max_connections` is zero
    /// - the shortener URL is not HTTP(S) or its timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.listen_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!(
                "LISTEN must be an 'ip:port' socket address, got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        if !self.shortener.api_url.starts_with("http://")
            && !self.shortener.api_url.starts_with("https://")
        {
            anyhow::bail!(
                "SHORTENER_API_URL must start with 'http://' or 'https://', got '{}'",
                self.shortener.api_url
            );
        }

        if self.shortener.timeout == Some(Duration::ZERO) {
            anyhow::bail!("SHORTENER_TIMEOUT_SECS must be greater than 0");
        }

        if self.affiliate.amazon_host.is_empty() || self.affiliate.amazon_host.contains('/') {
            anyhow::bail!(
                "AMAZON_HOST must be a bare host name, got '{}'",
                self.affiliate.amazon_host
            );
        }

        Ok(())
    }

    /// Returns whether links are shortened before being returned.
    pub fn is_shortening_enabled(&self) -> bool {
        self.shortener.token.is_some()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Link policy: {:?}", self.affiliate.policy);
        tracing::info!(
            "  Amazon tag: {} (host {})",
            self.affiliate.amazon_tag.as_deref().unwrap_or("not set"),
            self.affiliate.amazon_host
        );
        tracing::info!(
            "  Mercado Livre campaign: {}",
            self.affiliate.campaign_id.as_deref().unwrap_or("not set")
        );

        if self.is_shortening_enabled() {
            tracing::info!("  Shortening: enabled ({})", self.shortener.api_url);
        } else {
            tracing::info!("  Shortening: disabled");
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads a variable, treating an empty value as unset.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    non_empty_var(key)
        .map(|v| {
            v.trim()
                .parse::<T>()
                .with_context(|| format!("{key} has an invalid value '{v}'"))
        })
        .transpose()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
