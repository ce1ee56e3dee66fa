mod common;

use affiliate_linker::domain::affiliate::{AffiliateConfig, LinkPolicy};
use affiliate_linker::infrastructure::shortener::PassthroughShortener;
use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;

const AMAZON_URL: &str = "https://www.amazon.com.br/Livro-Exemplo/dp/B000123ABC/ref=sr_1_1";

#[tokio::test]
async fn test_convert_amazon_url() {
    let pool = common::create_test_pool().await;
    let server = TestServer::new(common::app(common::create_test_state(pool.clone()))).unwrap();

    let response = server
        .post("/convert")
        .json(&json!({ "url": AMAZON_URL }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(
        json["affiliate"],
        "https://www.amazon.com.br/dp/B000123ABC/?tag=tag123"
    );
    assert_eq!(
        json["short"],
        "https://www.amazon.com.br/dp/B000123ABC/?tag=tag123"
    );
    assert_eq!(json["origem"], "amazon");

    assert_eq!(
        common::stored_link(&pool, AMAZON_URL).await.as_deref(),
        Some("https://www.amazon.com.br/dp/B000123ABC/?tag=tag123")
    );
}

#[tokio::test]
async fn test_convert_stores_shortened_link() {
    let pool = common::create_test_pool().await;
    let shortener = Arc::new(common::CountingShortener::default());
    let state = common::create_test_state_with(
        pool.clone(),
        common::affiliate_config(LinkPolicy::Strict),
        shortener.clone(),
    );
    let server = TestServer::new(common::app(state)).unwrap();

    let response = server
        .post("/convert")
        .json(&json!({ "url": AMAZON_URL }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["short"], "https://sho.rt/1");
    assert_eq!(
        json["affiliate"],
        "https://www.amazon.com.br/dp/B000123ABC/?tag=tag123"
    );

    assert_eq!(
        common::stored_link(&pool, AMAZON_URL).await.as_deref(),
        Some("https://sho.rt/1")
    );
}

#[tokio::test]
async fn test_convert_cache_hit_skips_shortener() {
    let pool = common::create_test_pool().await;
    let shortener = Arc::new(common::CountingShortener::default());
    let state = common::create_test_state_with(
        pool,
        common::affiliate_config(LinkPolicy::Strict),
        shortener.clone(),
    );
    let server = TestServer::new(common::app(state)).unwrap();

    let first = server
        .post("/convert")
        .json(&json!({ "url": AMAZON_URL }))
        .await
        .json::<serde_json::Value>();

    let second = server
        .post("/convert")
        .json(&json!({ "url": AMAZON_URL }))
        .await
        .json::<serde_json::Value>();

    assert_eq!(shortener.calls(), 1);
    assert_eq!(first["short"], second["short"]);
    assert_eq!(second["affiliate"], "https://sho.rt/1");
    assert_eq!(second["origem"], "amazon");
}

#[tokio::test]
async fn test_convert_returns_cached_value_for_unknown_merchant() {
    let pool = common::create_test_pool().await;
    common::insert_link(&pool, "https://example.com/item", "https://aff.example/1").await;
    let server = TestServer::new(common::app(common::create_test_state(pool))).unwrap();

    let response = server
        .post("/convert")
        .json(&json!({ "url": "https://example.com/item" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["short"], "https://aff.example/1");
    assert_eq!(json["origem"], "other");
}

#[tokio::test]
async fn test_convert_missing_url() {
    let pool = common::create_test_pool().await;
    let server = TestServer::new(common::app(common::create_test_state(pool.clone()))).unwrap();

    let response = server.post("/convert").json(&json!({})).await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"], "URL not provided");

    let response = server.post("/convert").json(&json!({ "url": "" })).await;
    response.assert_status_bad_request();

    assert_eq!(common::link_count(&pool).await, 0);
}

#[tokio::test]
async fn test_convert_invalid_json_body() {
    let pool = common::create_test_pool().await;
    let server = TestServer::new(common::app(common::create_test_state(pool))).unwrap();

    let response = server
        .post("/convert")
        .bytes("{not json".into())
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn test_convert_amazon_without_asin() {
    let pool = common::create_test_pool().await;
    let server = TestServer::new(common::app(common::create_test_state(pool.clone()))).unwrap();

    let response = server
        .post("/convert")
        .json(&json!({ "url": "https://www.amazon.com.br/s?k=livros" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"], "Could not process this link");
    assert!(json.get("msg").is_none());

    assert_eq!(common::link_count(&pool).await, 0);
}

#[tokio::test]
async fn test_convert_mercado_livre_requires_registration() {
    let pool = common::create_test_pool().await;
    let server = TestServer::new(common::app(common::create_test_state(pool))).unwrap();

    let response = server
        .post("/convert")
        .json(&json!({ "url": "https://produto.mercadolivre.com.br/MLB-123" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"], "Mercado Livre link not registered");
    assert_eq!(json["msg"], "Register it manually via /add_ml");
}

#[tokio::test]
async fn test_convert_mercado_livre_with_campaign() {
    let pool = common::create_test_pool().await;
    let config = AffiliateConfig {
        campaign_id: Some("camp42".to_string()),
        ..AffiliateConfig::default()
    };
    let state =
        common::create_test_state_with(pool, config, Arc::new(PassthroughShortener::new()));
    let server = TestServer::new(common::app(state)).unwrap();

    let response = server
        .post("/convert")
        .json(&json!({ "url": "https://produto.mercadolivre.com.br/MLB-123" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(
        json["affiliate"],
        "https://produto.mercadolivre.com.br/MLB-123?campaign=camp42"
    );
    assert_eq!(json["origem"], "mercadolivre");
}

#[tokio::test]
async fn test_convert_permissive_passthrough() {
    let pool = common::create_test_pool().await;
    let config = AffiliateConfig {
        policy: LinkPolicy::Permissive,
        ..AffiliateConfig::default()
    };
    let state =
        common::create_test_state_with(pool, config, Arc::new(PassthroughShortener::new()));
    let server = TestServer::new(common::app(state)).unwrap();

    for url in [
        "https://example.com/item/1",
        "https://produto.mercadolivre.com.br/MLB-123",
        AMAZON_URL,
    ] {
        let response = server.post("/convert").json(&json!({ "url": url })).await;

        response.assert_status_ok();
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["affiliate"], url);
        assert_eq!(json["short"], url);
    }
}

#[tokio::test]
async fn test_convert_query_variant() {
    let pool = common::create_test_pool().await;
    let server = TestServer::new(common::app(common::create_test_state(pool))).unwrap();

    let response = server
        .get("/convert")
        .add_query_param("url", AMAZON_URL)
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(
        json,
        json!({ "affiliate_url": "https://www.amazon.com.br/dp/B000123ABC/?tag=tag123" })
    );
}

#[tokio::test]
async fn test_convert_query_missing_url() {
    let pool = common::create_test_pool().await;
    let server = TestServer::new(common::app(common::create_test_state(pool))).unwrap();

    let response = server.get("/convert").await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json, json!({ "error": "URL not provided" }));
}

#[tokio::test]
async fn test_concurrent_misses_shorten_once() {
    let pool = common::create_test_pool().await;
    let shortener = Arc::new(common::CountingShortener::default());
    let state = common::create_test_state_with(
        pool,
        common::affiliate_config(LinkPolicy::Strict),
        shortener.clone(),
    );

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let service = state.link_service.clone();
            tokio::spawn(async move { service.convert(AMAZON_URL).await })
        })
        .collect();

    let mut results = Vec::new();
    for task in tasks {
        results.push(task.await.unwrap().unwrap());
    }

    assert_eq!(shortener.calls(), 1);
    assert!(results.iter().all(|c| c.short == "https://sho.rt/1"));
    assert_eq!(results.iter().filter(|c| !c.cached).count(), 1);
}

#[tokio::test]
async fn test_convert_trailing_slash() {
    let pool = common::create_test_pool().await;
    let server = TestServer::new(common::app(common::create_test_state(pool))).unwrap();

    let response = server
        .post("/convert/")
        .json(&json!({ "url": AMAZON_URL }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(
        json["short"],
        "https://www.amazon.com.br/dp/B000123ABC/?tag=tag123"
    );
    assert_eq!(json["origem"], "amazon");
}

#[tokio::test]
async fn test_convert_query_trailing_slash() {
    let pool = common::create_test_pool().await;
    let server = TestServer::new(common::app(common::create_test_state(pool))).unwrap();

    let response = server
        .get("/convert/")
        .add_query_param("url", AMAZON_URL)
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(
        json["affiliate_url"],
        "https://www.amazon.com.br/dp/B000123ABC/?tag=tag123"
    );
}
