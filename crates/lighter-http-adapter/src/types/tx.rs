/*
[INPUT]:  Transaction objects produced by an external signer
[OUTPUT]: Type code and opaque info string for POST /api/v1/sendTx
[POS]:    Data layer - signing capability abstraction
[UPDATE]: When the sendTx form fields change
*/

use crate::http::BoxError;

/// Capability that turns a transaction into its wire form.
///
/// Implement this for your signed transaction types. Serialization and
/// signing happen in `tx_info`; a failure there aborts the submission
/// before any request is sent.
pub trait TxInfo: Send + Sync {
    /// Transaction type code sent as `tx_type`
    fn tx_type(&self) -> u8;

    /// Opaque payload sent as `tx_info`
    fn tx_info(&self) -> Result<String, BoxError>;
}

/// Already-serialized transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTx {
    pub tx_type: u8,
    pub tx_info: String,
}

impl RawTx {
    pub fn new(tx_type: u8, tx_info: impl Into<String>) -> Self {
        Self {
            tx_type,
            tx_info: tx_info.into(),
        }
    }
}

impl TxInfo for RawTx {
    fn tx_type(&self) -> u8 {
        self.tx_type
    }

    fn tx_info(&self) -> Result<String, BoxError> {
        Ok(self.tx_info.clone())
    }
}
