/*
[INPUT]:  Account index and API-key index
[OUTPUT]: Next nonce and registered API keys
[POS]:    HTTP layer - account read endpoints (GET, query string)
[UPDATE]: When adding new account endpoints or changing query parameters
*/

use crate::http::{LighterClient, Result};
use crate::types::{AccountApiKeys, NextNonce};

const NEXT_NONCE_PATH: &str = "api/v1/nextNonce";
const API_KEYS_PATH: &str = "api/v1/apikeys";

impl LighterClient {
    /// Next usable nonce for an (account, API key) pair
    ///
    /// GET /api/v1/nextNonce?account_index={account_index}&api_key_index={api_key_index}
    pub async fn get_next_nonce(&self, account_index: i64, api_key_index: u8) -> Result<i64> {
        let result: NextNonce = self
            .get_json(NEXT_NONCE_PATH, &key_params(account_index, api_key_index))
            .await?;
        Ok(result.nonce)
    }

    /// API keys registered for an account
    ///
    /// GET /api/v1/apikeys?account_index={account_index}&api_key_index={api_key_index}
    pub async fn get_api_key(
        &self,
        account_index: i64,
        api_key_index: u8,
    ) -> Result<AccountApiKeys> {
        self.get_json(API_KEYS_PATH, &key_params(account_index, api_key_index))
            .await
    }

    async fn get_json<T>(&self, path: &str, params: &[(&str, String)]) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.send_json(path, |client, url, _| client.get(url).query(params))
            .await
    }
}

fn key_params(account_index: i64, api_key_index: u8) -> [(&'static str, String); 2] {
    [
        ("account_index", account_index.to_string()),
        ("api_key_index", api_key_index.to_string()),
    ]
}
