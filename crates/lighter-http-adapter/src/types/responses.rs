/*
[INPUT]:  API response bodies (JSON)
[OUTPUT]: Envelope and typed payload structs with serde support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Envelope code signaling a valid payload
pub const CODE_OK: i32 = 0;

/// Generic `{code, message}` wrapper present in every response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultCode {
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

impl ResultCode {
    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }
}

/// GET /api/v1/nextNonce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextNonce {
    pub nonce: i64,
}

/// A registered API key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKey {
    pub account_index: i64,
    pub api_key_index: u8,
    pub nonce: i64,
    pub public_key: String,
}

/// GET /api/v1/apikeys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountApiKeys {
    #[serde(default)]
    pub api_keys: Vec<ApiKey>,
}

/// POST /api/v1/sendTx
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxHash {
    pub tx_hash: String,
}
