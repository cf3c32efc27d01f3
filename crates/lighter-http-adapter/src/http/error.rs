/*
[INPUT]:  Error sources (transport, HTTP status, envelope, decoding, signing, config)
[OUTPUT]: Structured error types with enough context for the caller to act on
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Boxed error produced by a transaction signing capability
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for the Lighter HTTP adapter
#[derive(Error, Debug)]
pub enum LighterError {
    /// Client could not be constructed or configured
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failed before a response arrived (DNS, connect, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-200 status; body kept verbatim
    #[error("HTTP status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Response body was not the expected JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Envelope carried a non-OK code
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },

    /// Transaction could not produce its type/info pair
    #[error("Transaction signing failed: {0}")]
    Signing(#[source] BoxError),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl LighterError {
    /// True for failures where the server never produced a usable 200 response
    pub fn is_transport(&self) -> bool {
        matches!(self, LighterError::Http(_) | LighterError::Status { .. })
    }

    /// True when the server rejected the request at the application level
    pub fn is_api_error(&self) -> bool {
        matches!(self, LighterError::Api { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, LighterError::Http(err) if err.is_timeout())
    }

    /// Envelope code for application-level failures
    pub fn api_code(&self) -> Option<i32> {
        match self {
            LighterError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Hint for callers that run their own retry policy.
    ///
    /// The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            LighterError::Http(err) => err.is_timeout() || err.is_connect(),
            LighterError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }

    /// Create an application error from an envelope
    pub fn api_error(code: i32, message: impl Into<String>) -> Self {
        LighterError::Api {
            code,
            message: message.into(),
        }
    }

    pub(crate) fn status(status: StatusCode, body: &[u8]) -> Self {
        LighterError::Status {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }
}

/// Result type alias for Lighter operations
pub type Result<T> = std::result::Result<T, LighterError>;
