//! Common utilities for integration tests

#![allow(dead_code)]

use axum::Router;
use relay_core::UpstreamClient;
use server::config::ServerConfig;
use server::routes::{app, AppState};

pub fn test_config() -> ServerConfig {
    ServerConfig {
        port: 0,
        request_timeout_secs: 30,
        cors_allowed_origins: None,
        app_id: None,
        access_token: None,
        resource_id: None,
    }
}

/// Create a test app instance with no upstream configured.
pub fn create_test_app() -> Router {
    app(AppState::new(test_config()))
}

/// Create a test app that relays to a mock upstream, with deployment-default
/// credentials configured.
pub fn create_test_app_with_upstream(endpoint: &str) -> Router {
    let config = ServerConfig {
        app_id: Some("test-app".to_string()),
        access_token: Some("test-token".to_string()),
        resource_id: Some("test-resource".to_string()),
        ..test_config()
    };
    app(AppState::with_upstream(
        UpstreamClient::with_endpoint(endpoint),
        config,
    ))
}
