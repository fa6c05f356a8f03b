//! Client error types.

use http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors surfaced by the Batch client.
///
/// There is no retry layer: the first error propagates to the caller and
/// ends the run.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("account key is not valid base64: {0}")]
    InvalidKey(#[from] base64::DecodeError),

    #[error("invalid endpoint url: {0}")]
    InvalidEndpoint(#[from] http::uri::InvalidUri),

    #[error("tls initialization failed: {0}")]
    Tls(#[from] std::io::Error),

    #[error("request serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("request construction failed: {0}")]
    Request(#[from] http::Error),

    #[error("http transport error: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("reading response body failed: {0}")]
    Body(#[from] hyper::Error),

    #[error("service rejected the request: {code} ({status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
}

impl BatchError {
    /// Build an [`BatchError::Api`] from a non-2xx response body.
    ///
    /// The service wraps errors in an `odata.error` envelope; anything that
    /// does not parse falls back to the raw body text.
    pub(crate) fn api(status: StatusCode, body: &[u8]) -> Self {
        let envelope: Option<ErrorEnvelope> = serde_json::from_slice(body).ok();
        let error = envelope.and_then(|e| e.error);
        let code = error
            .as_ref()
            .and_then(|e| e.code.clone())
            .unwrap_or_else(|| "UnknownError".to_string());
        let message = error
            .and_then(|e| e.message)
            .and_then(|m| m.value)
            .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned());
        BatchError::Api {
            status: status.as_u16(),
            code,
            message,
        }
    }
}

pub type BatchResult<T> = Result<T, BatchError>;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(rename = "odata.error")]
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<ErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    value: Option<String>,
}
