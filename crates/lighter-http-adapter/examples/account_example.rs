/*
[INPUT]:  Endpoint (LIGHTER_ENDPOINT), account and API-key index
[OUTPUT]: Next nonce and registered API keys
[POS]:    Examples - account read endpoints
[UPDATE]: When adding new account endpoints
*/

use lighter_http_adapter::*;
use tracing_subscriber::EnvFilter;

/// Example: Query nonce and API keys for an account
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Lighter Account Example ===\n");

    let endpoint = std::env::var("LIGHTER_ENDPOINT")
        .unwrap_or_else(|_| "https://mainnet.zklighter.elliot.ai".to_string());

    let client = match LighterClient::new(endpoint) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created for {}\n", client.endpoint());

    let account_index = 1;
    let api_key_index = 0;

    println!("Querying next nonce for account {}...", account_index);
    match client.get_next_nonce(account_index, api_key_index).await {
        Ok(nonce) => println!("✓ Next nonce: {}", nonce),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying API keys for account {}...", account_index);
    match client.get_api_key(account_index, api_key_index).await {
        Ok(keys) => println!("✓ API keys: {:?}", keys.api_keys),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Account example complete");
}
