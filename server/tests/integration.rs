//! Integration tests for the relay server routes

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

use common::*;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_health_check_under_api_prefix() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_voices() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/voices")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let voices = parsed["voices"].as_array().unwrap();
    assert!(!voices.is_empty());
    assert!(voices[0]["id"].is_string());
    assert!(voices[0]["name"].is_string());
    assert!(voices[0]["lang"].is_string());
    assert!(voices[0]["gender"].is_string());
}

#[tokio::test]
async fn test_synthesize_probe() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/synthesize")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let probe: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(probe["status"], "ok");
    assert!(probe["message"].as_str().unwrap().contains("POST"));
}

#[tokio::test]
async fn test_synthesize_validation_empty_text() {
    let app = create_test_app();
    let request_body = json!({ "text": "" });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/synthesize")
                .header("content-type", "application/json")
                .body(Body::from(request_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"].is_string());
    assert_eq!(error["code"], 400);
}

#[tokio::test]
async fn test_synthesize_validation_missing_text() {
    // Absent fields are defaulted, so a missing `text` is caught by
    // validation as a 400 rather than rejected by deserialization.
    let app = create_test_app();
    let request_body = json!({ "voice_id": "zh_female_cancan_mars_bigtts" });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/synthesize")
                .header("content-type", "application/json")
                .body(Body::from(request_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_synthesize_validation_long_text() {
    let app = create_test_app();
    let request_body = json!({ "text": "a".repeat(6000) });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/synthesize")
                .header("content-type", "application/json")
                .body(Body::from(request_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_synthesize_without_credentials_is_config_error() {
    let app = create_test_app();
    let request_body = json!({ "text": "hello" });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/synthesize")
                .header("content-type", "application/json")
                .body(Body::from(request_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"].as_str().unwrap().contains("credentials"));
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/synthesize")
                .header("origin", "http://example.com")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let metrics: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(metrics["request_count"].is_number());
    assert!(metrics["uptime_seconds"].is_number());
}

#[tokio::test]
async fn test_request_id_header_is_attached() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_not_found_endpoint() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
