/*
[INPUT]:  YAML client config path (argv[1]), endpoint, pre-signed tx payload
[OUTPUT]: Transaction hash, keep-alive running in the background
[POS]:    Examples - transaction submission with keep-alive
[UPDATE]: When the sendTx flow or config file format changes
*/

use std::time::Duration;

use lighter_http_adapter::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Example: Submit an already signed transaction
///
/// Expects `LIGHTER_TX_TYPE` and `LIGHTER_TX_INFO` from an external signer.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Lighter Send Transaction Example ===\n");

    let config = match std::env::args().nth(1) {
        Some(path) => match ClientConfig::from_yaml_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                return;
            }
        },
        None => ClientConfig::default(),
    };

    let endpoint = std::env::var("LIGHTER_ENDPOINT")
        .unwrap_or_else(|_| "https://testnet.zklighter.elliot.ai".to_string());
    let client = match LighterClient::with_config(endpoint, config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    if let Err(e) = client.start_keep_alive() {
        eprintln!("Failed to start keep-alive: {}", e);
        return;
    }
    info!(endpoint = client.endpoint(), "keep-alive running");

    let tx_type = std::env::var("LIGHTER_TX_TYPE")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(14);
    let Ok(tx_info) = std::env::var("LIGHTER_TX_INFO") else {
        eprintln!("LIGHTER_TX_INFO is not set; nothing to submit");
        return;
    };

    match client.send_raw_tx(&RawTx::new(tx_type, tx_info)).await {
        Ok(tx_hash) => println!("✓ Transaction accepted: {}", tx_hash),
        Err(e) if e.is_api_error() => println!("✗ Rejected by server: {}", e),
        Err(e) => println!("✗ Error: {}", e),
    }

    // Idle long enough for one keep-alive probe to go out.
    tokio::time::sleep(Duration::from_secs(65)).await;
    client.stop_keep_alive();

    println!("\n✓ Send transaction example complete");
}
