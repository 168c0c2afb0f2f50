//! End-to-end tests for the HTTP surface against a mocked hh.ru API.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::util::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vacstat_client::{HhClient, HhConfig};
use vacstat_core::{AppConfig, CacheDb, SalaryRules};
use vacstat_server::{AppState, router};

fn vacancies_json(items: serde_json::Value, pages: u32) -> serde_json::Value {
    serde_json::json!({
        "found": items.as_array().map(|a| a.len()).unwrap_or(0),
        "pages": pages,
        "page": 0,
        "per_page": 100,
        "items": items,
    })
}

async fn app_for(mock: &MockServer) -> Router {
    let config = AppConfig {
        hh_base_url: mock.uri(),
        page_delay_ms: 10,
        page_jitter_ms: 0,
        ..Default::default()
    };
    let db = CacheDb::open_in_memory().await.unwrap();
    let fetcher = HhClient::new(HhConfig::from_app(&config)).unwrap();
    let rules = SalaryRules::new(config.usd_rate, config.eur_rate);

    router(Arc::new(AppState { db, fetcher: Box::new(fetcher), rules }))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_liveness() {
    let mock = MockServer::start().await;
    let app = app_for(&mock).await;

    let (status, body) = get_json(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("работает"));
    assert_eq!(body["service"], "vacstat");
}

#[tokio::test]
async fn test_analytics_computes_then_serves_from_cache() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .and(query_param("text", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vacancies_json(
            serde_json::json!([
                {"name": "Engineer A", "salary": {"from": 100000, "to": null, "currency": "RUR"}},
                {"name": "Engineer B", "salary": null}
            ]),
            1,
        )))
        .expect(1) // the second request must not reach the upstream
        .mount(&mock)
        .await;

    let app = app_for(&mock).await;

    let (status, first) = get_json(app.clone(), "/analytics/rust").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["query"], "rust");
    assert_eq!(first["count"], 2);
    assert_eq!(first["avg_salary"], "100 000 ₽");
    assert_eq!(first["source"], "hh.ru official API");
    assert_eq!(first["cached"], false);
    assert_eq!(first["sample"].as_array().unwrap().len(), 2);
    assert_eq!(first["sample"][0]["salary_value"], 100_000);
    assert_eq!(first["sample"][1]["salary_display"], "Не указана");

    let (status, second) = get_json(app, "/analytics/rust").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["cached"], true);
    assert_eq!(second["avg_salary"], first["avg_salary"]);
    assert_eq!(second["updated"], first["updated"]);
}

#[tokio::test]
async fn test_cache_key_is_case_insensitive() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vacancies_json(serde_json::json!([]), 1)))
        .expect(1)
        .mount(&mock)
        .await;

    let app = app_for(&mock).await;

    let (_, first) = get_json(app.clone(), "/analytics/Rust").await;
    // original casing is echoed on first computation
    assert_eq!(first["query"], "Rust");
    assert_eq!(first["cached"], false);

    // differently-cased query maps to the same stored row
    let (_, second) = get_json(app, "/analytics/RUST").await;
    assert_eq!(second["cached"], true);
    assert_eq!(second["query"], "Rust");
}

#[tokio::test]
async fn test_url_encoded_query() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .and(query_param("text", "rust developer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vacancies_json(serde_json::json!([]), 1)))
        .mount(&mock)
        .await;

    let app = app_for(&mock).await;

    let (status, body) = get_json(app, "/analytics/rust%20developer").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "rust developer");
}

#[tokio::test]
async fn test_empty_listing_is_not_an_error() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vacancies_json(serde_json::json!([]), 1)))
        .mount(&mock)
        .await;

    let app = app_for(&mock).await;

    let (status, body) = get_json(app, "/analytics/cobol").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["avg_salary"], "Не указано");
    assert_eq!(body["sample"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_upstream_failure_is_500_with_detail() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock)
        .await;

    let app = app_for(&mock).await;

    let (status, body) = get_json(app, "/analytics/rust").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("503"));
}

#[tokio::test]
async fn test_later_page_failure_keeps_partial_results() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vacancies_json(
            serde_json::json!([
                {"name": "Engineer A", "salary": {"from": 100000, "to": null, "currency": "RUR"}}
            ]),
            3,
        )))
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock)
        .await;

    let app = app_for(&mock).await;

    let (status, body) = get_json(app, "/analytics/rust").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["avg_salary"], "100 000 ₽");
}

#[tokio::test]
async fn test_cache_stats_and_clear() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vacancies_json(serde_json::json!([]), 1)))
        .mount(&mock)
        .await;

    let app = app_for(&mock).await;

    let (_, stats) = get_json(app.clone(), "/cache/stats").await;
    assert_eq!(stats["entries"], 0);

    get_json(app.clone(), "/analytics/rust").await;

    let (_, stats) = get_json(app.clone(), "/cache/stats").await;
    assert_eq!(stats["entries"], 1);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/cache")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["deleted"], 1);

    // cleared means the next request recomputes
    let (_, after) = get_json(app, "/analytics/rust").await;
    assert_eq!(after["cached"], false);
}
