/*
[INPUT]:  Transactions implementing TxInfo, fat-finger toggle, channel name
[OUTPUT]: Transaction hash of the accepted transaction
[POS]:    HTTP layer - transaction submission (form POST)
[UPDATE]: When sendTx form fields or headers change
*/

use tracing::debug;

use crate::http::{LighterClient, LighterError, Result};
use crate::types::{TxHash, TxInfo};

pub(crate) const SEND_TX_PATH: &str = "api/v1/sendTx";
const CHANNEL_NAME_HEADER: &str = "Channel-Name";

impl LighterClient {
    /// Submit a signed transaction
    ///
    /// POST /api/v1/sendTx (form: tx_type, tx_info[, price_protection=false])
    /// The transaction is serialized first; a signing failure sends nothing.
    /// `form` also sets the urlencoded content type.
    pub async fn send_raw_tx<T>(&self, tx: &T) -> Result<String>
    where
        T: TxInfo + ?Sized,
    {
        let tx_type = tx.tx_type();
        let tx_info = tx.tx_info().map_err(LighterError::Signing)?;
        debug!(tx_type, "submitting transaction");

        let channel_name = self.inner.channel_name.clone();
        let result: TxHash = self
            .send_json(SEND_TX_PATH, |client, url, state| {
                let mut form = vec![
                    ("tx_type", tx_type.to_string()),
                    ("tx_info", tx_info),
                ];
                if !state.fat_finger_protection {
                    form.push(("price_protection", "false".to_string()));
                }
                client
                    .post(url)
                    .header(CHANNEL_NAME_HEADER, channel_name)
                    .form(&form)
            })
            .await?;

        Ok(result.tx_hash)
    }
}
