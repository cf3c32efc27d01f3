/*
[INPUT]:  Endpoint, client configuration, transactions to submit
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod account;
pub mod client;
pub mod config;
pub mod error;
pub mod keep_alive;
pub mod transaction;
pub mod transport;

pub use error::{BoxError, LighterError, Result};

pub use client::LighterClient;
pub use config::ClientConfig;
pub use transport::{ProxySelector, build_transport};
