mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use geocode_proxy::api::handlers::search_handler;
use geocode_proxy::infrastructure::cache::MemoryCache;
use geocode_proxy::prelude::{AppState, CacheKey, CacheStore};
use serde_json::Value;
use std::sync::Arc;

use common::{FlakyCache, StubProvider, Upstream};

fn search_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/", get(search_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_search_miss_then_hit() {
    let provider = Arc::new(StubProvider::new(Upstream::Locations(vec![common::paris()])));
    let state = common::create_test_state(Arc::new(MemoryCache::new()), provider.clone());
    let server = search_server(state);

    let first = server.get("/").add_query_param("search", "paris").await;
    first.assert_status_ok();
    let first = first.json::<Value>();
    assert_eq!(first["cache"], false);

    let second = server.get("/").add_query_param("search", "paris").await;
    second.assert_status_ok();
    let second = second.json::<Value>();
    assert_eq!(second["cache"], true);

    assert_eq!(first["data"], second["data"]);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_search_response_shape() {
    let provider = Arc::new(StubProvider::new(Upstream::Locations(vec![common::paris()])));
    let state = common::create_test_state(Arc::new(MemoryCache::new()), provider);
    let server = search_server(state);

    let response = server.get("/").add_query_param("search", "paris").await;
    response.assert_status_ok();

    let json = response.json::<Value>();
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);

    let record = &data[0];
    assert_eq!(record["place_id"], 1);
    assert_eq!(record["osm_id"], 7444);
    assert_eq!(record["display_name"], "Paris, France");
    assert_eq!(record["lat"], "48.85");
    assert_eq!(record["lon"], "2.35");
    assert_eq!(record["type"], "administrative");
    assert_eq!(record["class"], "boundary");
    assert_eq!(record["boundingbox"].as_array().unwrap().len(), 4);
    assert!(record["importance"].is_number());
    assert!(record["icon"].is_string());
}

#[tokio::test]
async fn test_search_passes_raw_query_upstream() {
    let provider = Arc::new(StubProvider::new(Upstream::Locations(Vec::new())));
    let cache = Arc::new(MemoryCache::new());
    let state = common::create_test_state(cache.clone(), provider.clone());
    let server = search_server(state);

    server
        .get("/")
        .add_query_param("search", "new york/ny")
        .await
        .assert_status_ok();

    assert_eq!(provider.queries(), vec!["new york/ny".to_string()]);
    assert!(cache.get("new%20york%2Fny").await.unwrap().is_some());
}

#[tokio::test]
async fn test_search_escapes_comma_in_cache_key() {
    let provider = Arc::new(StubProvider::new(Upstream::Locations(vec![common::paris()])));
    let cache = Arc::new(MemoryCache::new());
    let state = common::create_test_state(cache.clone(), provider.clone());
    let server = search_server(state);

    server
        .get("/")
        .add_query_param("search", "Paris, France")
        .await
        .assert_status_ok();

    assert_eq!(provider.queries(), vec!["Paris, France".to_string()]);
    assert!(cache.get("Paris%2C%20France").await.unwrap().is_some());
    assert!(cache.get("Paris,%20France").await.unwrap().is_none());
}

#[tokio::test]
async fn test_search_missing_param_is_empty_query() {
    let provider = Arc::new(StubProvider::new(Upstream::Locations(Vec::new())));
    let state = common::create_test_state(Arc::new(MemoryCache::new()), provider.clone());
    let server = search_server(state);

    let response = server.get("/").await;
    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["cache"], false);
    assert_eq!(json["data"], serde_json::json!([]));
    assert_eq!(provider.queries(), vec![String::new()]);
}

#[tokio::test]
async fn test_search_empty_result_served_from_cache() {
    let provider = Arc::new(StubProvider::new(Upstream::Locations(Vec::new())));
    let state = common::create_test_state(Arc::new(MemoryCache::new()), provider.clone());
    let server = search_server(state);

    server.get("/").add_query_param("search", "atlantis").await;
    let response = server.get("/").add_query_param("search", "atlantis").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["cache"], true);
    assert_eq!(json["data"], serde_json::json!([]));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_search_upstream_refused() {
    let provider = Arc::new(StubProvider::new(Upstream::Refused));
    let cache = Arc::new(FlakyCache::default());
    let state = common::create_test_state(cache.clone(), provider.clone());
    let server = search_server(state);

    let response = server.get("/").add_query_param("search", "xx123").await;

    assert_eq!(response.status_code(), 502);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "upstream_unavailable");
    assert_eq!(cache.writes(), 0);

    // Nothing was cached, so the retry goes upstream again
    let retry = server.get("/").add_query_param("search", "xx123").await;
    assert_eq!(retry.status_code(), 502);
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_search_upstream_timeout() {
    let provider = Arc::new(StubProvider::new(Upstream::Timeout));
    let state = common::create_test_state(Arc::new(MemoryCache::new()), provider);
    let server = search_server(state);

    let response = server.get("/").add_query_param("search", "slow").await;

    assert_eq!(response.status_code(), 504);
    assert_eq!(response.json::<Value>()["error"]["code"], "upstream_timeout");
}

#[tokio::test]
async fn test_search_upstream_malformed() {
    let provider = Arc::new(StubProvider::new(Upstream::Malformed));
    let state = common::create_test_state(Arc::new(MemoryCache::new()), provider);
    let server = search_server(state);

    let response = server.get("/").add_query_param("search", "paris").await;

    assert_eq!(response.status_code(), 502);
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        "upstream_malformed"
    );
}

#[tokio::test]
async fn test_search_cache_unavailable() {
    let provider = Arc::new(StubProvider::new(Upstream::Locations(vec![common::paris()])));
    let state = common::create_test_state(Arc::new(FlakyCache::failing_reads()), provider.clone());
    let server = search_server(state);

    let response = server.get("/").add_query_param("search", "paris").await;

    assert_eq!(response.status_code(), 503);
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        "cache_unavailable"
    );
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_search_corrupt_cache_entry() {
    let provider = Arc::new(StubProvider::new(Upstream::Locations(vec![common::paris()])));
    let cache = Arc::new(MemoryCache::new());
    cache
        .set(
            CacheKey::normalize("paris").as_str(),
            b"{\"truncated\":",
            common::TEST_TTL,
        )
        .await
        .unwrap();

    let state = common::create_test_state(cache, provider.clone());
    let server = search_server(state);

    let response = server.get("/").add_query_param("search", "paris").await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(response.json::<Value>()["error"]["code"], "cache_corrupt");
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_search_cache_write_failure_still_returns_data() {
    let provider = Arc::new(StubProvider::new(Upstream::Locations(vec![common::paris()])));
    let cache = Arc::new(FlakyCache::failing_writes());
    let state = common::create_test_state(cache.clone(), provider.clone());
    let server = search_server(state);

    let response = server.get("/").add_query_param("search", "paris").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["cache"], false);
    assert_eq!(json["data"][0]["display_name"], "Paris, France");
    assert_eq!(cache.writes(), 1);

    // The write never landed, so the next request misses again
    let again = server.get("/").add_query_param("search", "paris").await;
    assert_eq!(again.json::<Value>()["cache"], false);
    assert_eq!(provider.calls(), 2);
}
