//! API errors.

use thiserror::Error;

/// Errors that can occur when talking to the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server refused the request and explained why (`{"error": ...}`).
    #[error("{0}")]
    Rejected(String),

    /// An HTTP transport error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with something other than the expected JSON.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The configured base URL cannot be joined with an endpoint path.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// A mutating request was attempted without an anti-forgery cookie.
    #[error("missing csrf token cookie `{0}`")]
    MissingCsrfToken(String),
}

impl ApiError {
    /// The server's own explanation, when the failure is a domain rejection.
    #[must_use]
    pub fn rejection(&self) -> Option<&str> {
        match self {
            Self::Rejected(message) => Some(message),
            _ => None,
        }
    }
}
