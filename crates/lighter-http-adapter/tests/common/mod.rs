/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for lighter-http-adapter tests

use std::time::Duration;

use lighter_http_adapter::ClientConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Successful nextNonce envelope
pub fn nonce_body(nonce: i64) -> String {
    format!(r#"{{"code":0,"message":"","nonce":{nonce}}}"#)
}

/// Mount a nextNonce responder returning `nonce`
pub async fn mount_next_nonce(server: &MockServer, nonce: i64) {
    Mock::given(method("GET"))
        .and(path("/api/v1/nextNonce"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(nonce_body(nonce), "application/json"))
        .mount(server)
        .await;
}

/// Mount the HEAD probe target
#[allow(dead_code)]
pub async fn mount_probe(server: &MockServer) {
    Mock::given(method("HEAD"))
        .and(path("/api/v1/sendTx"))
        .respond_with(ResponseTemplate::new(405))
        .mount(server)
        .await;
}

/// Number of keep-alive probes the server has seen
#[allow(dead_code)]
pub async fn probe_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.method.as_str() == "HEAD")
        .count()
}

/// Keep-alive ticking every 20ms, probing once idle for `idle`
#[allow(dead_code)]
pub fn fast_keep_alive_config(idle: Duration) -> ClientConfig {
    ClientConfig {
        keep_alive_interval: Duration::from_millis(20),
        keep_alive_idle: idle,
        ..ClientConfig::default()
    }
}
