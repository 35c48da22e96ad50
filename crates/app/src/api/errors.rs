//! Marketplace API errors.

use thiserror::Error;

/// Errors that can occur when talking to the marketplace API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body didn't have the expected shape.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The bearer token is missing, expired or was rejected.
    #[error("session expired, sign in again")]
    Unauthorized,

    /// The server returned a non-2xx response.
    #[error("{0}")]
    UnexpectedResponse(String),
}
