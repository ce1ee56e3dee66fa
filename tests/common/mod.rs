#![allow(dead_code)]

use affiliate_linker::application::services::LinkService;
use affiliate_linker::domain::affiliate::{AffiliateConfig, LinkPolicy, MerchantRules};
use affiliate_linker::infrastructure::persistence::{self, SqliteLinkRepository};
use affiliate_linker::infrastructure::shortener::{
    LinkShortener, PassthroughShortener, ShortenerResult,
};
use affiliate_linker::routes::app_router;
use affiliate_linker::state::AppState;
use async_trait::async_trait;
use axum::extract::Request;
use axum::routing::IntoMakeService;
use axum::{Router, ServiceExt};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower_http::normalize_path::NormalizePath;

/// Opens a private in-memory database with the schema applied.
///
/// A single connection is kept open for the whole test so the database
/// outlives individual queries.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    persistence::run_migrations(&pool).await.unwrap();
    pool
}

pub async fn insert_link(pool: &SqlitePool, original: &str, affiliate: &str) {
    sqlx::query(
        "INSERT INTO cached_links (original_url, affiliate_url, updated_at) VALUES (?, ?, ?)",
    )
    .bind(original)
    .bind(affiliate)
    .bind(chrono::Utc::now())
    .execute(pool)
    .await
    .unwrap();
}

pub async fn stored_link(pool: &SqlitePool, original: &str) -> Option<String> {
    sqlx::query_scalar("SELECT affiliate_url FROM cached_links WHERE original_url = ?")
        .bind(original)
        .fetch_optional(pool)
        .await
        .unwrap()
}

pub async fn link_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM cached_links")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn affiliate_config(policy: LinkPolicy) -> AffiliateConfig {
    AffiliateConfig {
        amazon_tag: Some("tag123".to_string()),
        campaign_id: None,
        policy,
        ..AffiliateConfig::default()
    }
}

/// Shortener that prefixes a fixed host and counts its calls.
#[derive(Default)]
pub struct CountingShortener {
    pub calls: AtomicUsize,
}

impl CountingShortener {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LinkShortener for CountingShortener {
    async fn shorten(&self, _long_url: &str) -> ShortenerResult<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("https://sho.rt/{n}"))
    }
}

pub fn create_test_state_with(
    pool: SqlitePool,
    config: AffiliateConfig,
    shortener: Arc<dyn LinkShortener>,
) -> AppState {
    let repository = Arc::new(SqliteLinkRepository::new(Arc::new(pool)));
    let builder = Arc::new(MerchantRules::new(config));

    AppState::new(Arc::new(LinkService::new(repository, builder, shortener)))
}

/// State with the strict policy, an Amazon tag, and shortening disabled.
pub fn create_test_state(pool: SqlitePool) -> AppState {
    create_test_state_with(
        pool,
        affiliate_config(LinkPolicy::Strict),
        Arc::new(PassthroughShortener::new()),
    )
}

/// Full application stack, as served by the binary.
pub fn app(state: AppState) -> IntoMakeService<NormalizePath<Router>> {
    ServiceExt::<Request>::into_make_service(app_router(state))
}
