//! Error types for assignment-gateway

use thiserror::Error;

/// Errors that can occur while talking to the remote data service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Connection refused, DNS failure, timeout
    #[error("gateway unreachable: {0}")]
    Unreachable(String),

    /// Server-side failure (5xx)
    #[error("gateway returned HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// The service understood the request and refused it (4xx)
    #[error("gateway rejected request: {0}")]
    Rejected(String),

    /// Response body was not valid JSON
    #[error("gateway response could not be decoded: {0}")]
    Decode(String),

    /// Base URL cannot be used to build endpoint URLs
    #[error("invalid gateway URL: {0}")]
    InvalidUrl(String),

    /// HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            GatewayError::Server {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            GatewayError::Unreachable(err.to_string())
        }
    }
}
