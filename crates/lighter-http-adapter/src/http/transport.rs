/*
[INPUT]:  Base endpoint, ClientConfig, optional proxy selector
[OUTPUT]: Pooled reqwest client (HTTP/2 via ALPN, HTTP/1.1 fallback)
[POS]:    HTTP layer - transport construction, no network I/O
[UPDATE]: When changing pool, timeout, or proxy wiring
*/

use std::sync::Arc;

use reqwest::{Client, Proxy, Url};
use tracing::debug;

use crate::http::{ClientConfig, LighterError, Result};

/// Picks a proxy per outgoing request URL; `None` connects directly
pub type ProxySelector = Arc<dyn Fn(&Url) -> Option<Url> + Send + Sync>;

/// Build the pooled connection engine for one endpoint.
///
/// The idle cap applies per host; since a client only talks to its own
/// endpoint this is also the total cap.
pub fn build_transport(
    endpoint: &str,
    config: &ClientConfig,
    proxy_selector: Option<ProxySelector>,
) -> Result<Client> {
    if endpoint.is_empty() {
        return Err(LighterError::Config("endpoint must not be empty".to_string()));
    }

    let mut builder = Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .pool_idle_timeout(config.pool_idle_timeout)
        .tcp_keepalive(config.tcp_keepalive);

    if let Some(selector) = proxy_selector {
        builder = builder.proxy(Proxy::custom(move |url| selector(url)));
    }

    if let Some(address) = config.proxy.as_deref() {
        let proxy = Proxy::all(address)
            .map_err(|err| LighterError::Config(format!("invalid proxy {address}: {err}")))?;
        builder = builder.proxy(proxy);
    }

    let client = builder
        .build()
        .map_err(|err| LighterError::Config(format!("build http client: {err}")))?;

    debug!(
        endpoint,
        timeout = ?config.timeout,
        pool_max_idle_per_host = config.pool_max_idle_per_host,
        proxied = config.proxy.is_some(),
        "http transport ready"
    );

    Ok(client)
}
