/*
[INPUT]:  Endpoint, ClientConfig or injected reqwest client
[OUTPUT]: LighterClient session with shared request/response plumbing
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::header::HeaderValue;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::http::transport::{ProxySelector, build_transport};
use crate::http::{ClientConfig, LighterError, Result};
use crate::types::ResultCode;

/// Mutable session fields, guarded by one lock
#[derive(Debug)]
pub(crate) struct SessionState {
    pub(crate) last_connect_at: Option<Instant>,
    pub(crate) fat_finger_protection: bool,
    pub(crate) keep_alive: Option<CancellationToken>,
    pub(crate) probe_in_flight: bool,
}

/// Parts of the session shared with the keep-alive task
#[derive(Debug)]
pub(crate) struct ClientInner {
    pub(crate) http_client: Client,
    pub(crate) endpoint: String,
    pub(crate) channel_name: HeaderValue,
    pub(crate) config: ClientConfig,
    pub(crate) state: Mutex<SessionState>,
}

impl ClientInner {
    /// Endpoint plus a fixed relative path
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let base = self.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }
}

/// Session against a single Lighter API endpoint
#[derive(Debug)]
pub struct LighterClient {
    pub(crate) inner: Arc<ClientInner>,
}

impl LighterClient {
    /// Create a new client with default configuration
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_config(endpoint, ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(endpoint: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let endpoint = endpoint.into();
        let http_client = build_transport(&endpoint, &config, None)?;
        Self::from_parts(endpoint, config, http_client)
    }

    /// Create a client whose requests are routed by `selector`
    pub fn with_proxy_selector(
        endpoint: impl Into<String>,
        config: ClientConfig,
        selector: ProxySelector,
    ) -> Result<Self> {
        let endpoint = endpoint.into();
        let http_client = build_transport(&endpoint, &config, Some(selector))?;
        Self::from_parts(endpoint, config, http_client)
    }

    /// Wrap an externally built reqwest client.
    ///
    /// Transport fields of `config` are ignored; session fields
    /// (channel name, fat-finger toggle, keep-alive timing) still apply.
    pub fn with_http_client(
        endpoint: impl Into<String>,
        config: ClientConfig,
        http_client: Client,
    ) -> Result<Self> {
        Self::from_parts(endpoint.into(), config, http_client)
    }

    fn from_parts(endpoint: String, config: ClientConfig, http_client: Client) -> Result<Self> {
        if endpoint.is_empty() {
            return Err(LighterError::Config("endpoint must not be empty".to_string()));
        }
        config.validate()?;

        let channel_name = HeaderValue::from_str(&config.channel_name).map_err(|err| {
            LighterError::Config(format!("invalid channel name {:?}: {err}", config.channel_name))
        })?;

        let state = SessionState {
            last_connect_at: None,
            fat_finger_protection: config.fat_finger_protection,
            keep_alive: None,
            probe_in_flight: false,
        };

        Ok(Self {
            inner: Arc::new(ClientInner {
                http_client,
                endpoint,
                channel_name,
                config,
                state: Mutex::new(state),
            }),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    pub fn channel_name(&self) -> &str {
        &self.inner.config.channel_name
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn fat_finger_protection(&self) -> bool {
        self.inner.state.lock().fat_finger_protection
    }

    /// Disabling sends `price_protection=false` with every transaction
    pub fn set_fat_finger_protection(&self, enabled: bool) {
        self.inner.state.lock().fat_finger_protection = enabled;
    }

    /// Last request or successful keep-alive probe
    pub fn last_activity(&self) -> Option<Instant> {
        self.inner.state.lock().last_connect_at
    }

    /// Dispatch one request and decode the envelope, then the payload.
    ///
    /// The session lock is held while the request is built and the
    /// activity timestamp recorded, and released before awaiting the wire.
    pub(crate) async fn send_json<T, F>(&self, path: &str, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce(&Client, Url, &SessionState) -> RequestBuilder,
    {
        let url = self.inner.url(path)?;
        let pending = {
            let mut state = self.inner.state.lock();
            let builder = build(&self.inner.http_client, url, &*state);
            state.last_connect_at = Some(Instant::now());
            builder.send()
        };

        debug!(path, "request dispatched");
        let response = pending.await?;
        let status = response.status();
        let body = response.bytes().await?;
        if status != StatusCode::OK {
            warn!(path, status = %status, "unexpected http status");
            return Err(LighterError::status(status, &body));
        }

        parse_result_status(path, &body)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl Drop for LighterClient {
    fn drop(&mut self) {
        if let Some(token) = self.inner.state.lock().keep_alive.take() {
            token.cancel();
        }
    }
}

/// First decoding pass: only the `{code, message}` envelope
pub(crate) fn parse_result_status(path: &str, body: &[u8]) -> Result<()> {
    let envelope: ResultCode = serde_json::from_slice(body)?;
    if !envelope.is_ok() {
        warn!(path, code = envelope.code, message = %envelope.message, "api returned error");
        return Err(LighterError::api_error(envelope.code, envelope.message));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://mainnet.zklighter.elliot.ai", "api/v1/nextNonce", "https://mainnet.zklighter.elliot.ai/api/v1/nextNonce")]
    #[case("https://mainnet.zklighter.elliot.ai/", "/api/v1/sendTx", "https://mainnet.zklighter.elliot.ai/api/v1/sendTx")]
    #[case("http://10.0.0.5:8080/gateway", "/api/v1/apikeys", "http://10.0.0.5:8080/gateway/api/v1/apikeys")]
    fn test_url_joins_endpoint_and_path(
        #[case] endpoint: &str,
        #[case] path: &str,
        #[case] expected: &str,
    ) {
        let client = LighterClient::new(endpoint).expect("client init");
        assert_eq!(client.inner.url(path).expect("url").as_str(), expected);
    }

    #[test]
    fn test_empty_endpoint_rejected_for_injected_client() {
        let err = LighterClient::with_http_client("", ClientConfig::default(), Client::new())
            .unwrap_err();
        assert!(matches!(err, LighterError::Config(_)));
    }

    #[test]
    fn test_zero_keep_alive_interval_rejected() {
        let config = ClientConfig {
            keep_alive_interval: std::time::Duration::ZERO,
            ..ClientConfig::default()
        };
        let err = LighterClient::with_http_client("https://example.com", config, Client::new())
            .unwrap_err();
        assert!(matches!(err, LighterError::Config(_)));
    }

    #[test]
    fn test_invalid_channel_name_rejected() {
        let config = ClientConfig {
            channel_name: "bad\nname".to_string(),
            ..ClientConfig::default()
        };
        let err = LighterClient::with_config("https://example.com", config).unwrap_err();
        assert!(matches!(err, LighterError::Config(_)));
    }

    #[test]
    fn test_unparseable_endpoint_fails_at_request_time() {
        let client = LighterClient::new("not a url").expect("non-empty endpoint accepted");
        assert!(matches!(
            client.inner.url("api/v1/nextNonce"),
            Err(LighterError::UrlParse(_))
        ));
    }

    #[test]
    fn test_parse_result_status() {
        assert!(parse_result_status("t", br#"{"code":0,"message":""}"#).is_ok());

        let err = parse_result_status("t", br#"{"code":7,"message":"nonce too low"}"#).unwrap_err();
        assert_eq!(err.api_code(), Some(7));
        assert_eq!(err.to_string(), "API error (code 7): nonce too low");

        let err = parse_result_status("t", b"<html>gateway</html>").unwrap_err();
        assert!(matches!(err, LighterError::Serialization(_)));
    }

    #[test]
    fn test_fat_finger_toggle() {
        let client = LighterClient::new("https://example.com").expect("client init");
        assert!(client.fat_finger_protection());
        client.set_fat_finger_protection(false);
        assert!(!client.fat_finger_protection());
        assert!(client.last_activity().is_none());
    }
}
