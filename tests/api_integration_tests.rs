//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bounded_lru::{api::create_router, AppState, LruCache};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app(capacity: usize) -> Router {
    create_router(AppState::new(LruCache::new(capacity).unwrap()))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn put_request(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri("/put")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// == PUT Endpoint Tests ==

#[tokio::test]
async fn test_put_endpoint_success() {
    let app = create_test_app(100);

    let response = app
        .oneshot(put_request(r#"{"key":"test_key","value":"test_value"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert!(json["message"].as_str().unwrap().contains("test_key"));
    assert_eq!(json["key"].as_str().unwrap(), "test_key");
}

#[tokio::test]
async fn test_put_overwrites_value() {
    let app = create_test_app(100);

    for body in [
        r#"{"key":"k","value":"first"}"#,
        r#"{"key":"k","value":"second"}"#,
    ] {
        let response = app.clone().oneshot(put_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.clone().oneshot(get_request("/get/k")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["value"].as_str().unwrap(), "second");

    let response = app.oneshot(get_request("/stats")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["total_entries"].as_u64().unwrap(), 1);
    assert_eq!(json["updates"].as_u64().unwrap(), 1);
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_success() {
    let app = create_test_app(100);

    let set_response = app
        .clone()
        .oneshot(put_request(r#"{"key":"get_key","value":"get_value"}"#))
        .await
        .unwrap();
    assert_eq!(set_response.status(), StatusCode::OK);

    let get_response = app.oneshot(get_request("/get/get_key")).await.unwrap();

    assert_eq!(get_response.status(), StatusCode::OK);
    let json = body_to_json(get_response.into_body()).await;
    assert_eq!(json["key"].as_str().unwrap(), "get_key");
    assert_eq!(json["value"].as_str().unwrap(), "get_value");
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app(100);

    let response = app
        .oneshot(get_request("/get/nonexistent_key"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("nonexistent_key"));
}

// == Eviction via API ==

#[tokio::test]
async fn test_eviction_via_api() {
    let app = create_test_app(2);

    for body in [
        r#"{"key":"1","value":"A"}"#,
        r#"{"key":"2","value":"B"}"#,
    ] {
        app.clone().oneshot(put_request(body)).await.unwrap();
    }

    // Touch key 1 so key 2 becomes the eviction victim
    let response = app.clone().oneshot(get_request("/get/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    app.clone()
        .oneshot(put_request(r#"{"key":"3","value":"C"}"#))
        .await
        .unwrap();

    let response = app.clone().oneshot(get_request("/get/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.clone().oneshot(get_request("/get/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("/stats")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["evictions"].as_u64().unwrap(), 1);
    assert_eq!(json["total_entries"].as_u64().unwrap(), 2);
    assert_eq!(json["capacity"].as_u64().unwrap(), 2);
}

// == DELETE Endpoint Tests ==

#[tokio::test]
async fn test_delete_endpoint_success() {
    let app = create_test_app(100);

    let set_response = app
        .clone()
        .oneshot(put_request(r#"{"key":"delete_key","value":"delete_value"}"#))
        .await
        .unwrap();
    assert_eq!(set_response.status(), StatusCode::OK);

    let del_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/del/delete_key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(del_response.status(), StatusCode::OK);

    let get_response = app.oneshot(get_request("/get/delete_key")).await.unwrap();
    assert_eq!(get_response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_endpoint_not_found() {
    let app = create_test_app(100);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/del/nonexistent_key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app(100);

    let _ = app
        .clone()
        .oneshot(put_request(r#"{"key":"stats_key","value":"stats_value"}"#))
        .await
        .unwrap();

    // Hit
    let _ = app
        .clone()
        .oneshot(get_request("/get/stats_key"))
        .await
        .unwrap();

    // Miss
    let _ = app
        .clone()
        .oneshot(get_request("/get/nonexistent"))
        .await
        .unwrap();

    let response = app.oneshot(get_request("/stats")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    assert_eq!(json["hits"].as_u64().unwrap(), 1);
    assert_eq!(json["misses"].as_u64().unwrap(), 1);
    assert_eq!(json["inserts"].as_u64().unwrap(), 1);
    assert_eq!(json["total_entries"].as_u64().unwrap(), 1);
    assert_eq!(json["hit_rate"].as_f64().unwrap(), 0.5);
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(100);

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Error Response Tests ==

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app(100);

    let response = app
        .oneshot(put_request(r#"{"invalid json"#))
        .await
        .unwrap();

    // Axum returns 400 or 422 for JSON parsing errors
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn test_empty_key_request() {
    let app = create_test_app(100);

    let response = app
        .oneshot(put_request(r#"{"key":"","value":"test"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}
