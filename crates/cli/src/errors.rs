//! Client errors.

use thiserror::Error;

use storefront::{api::ApiError, cart::CartError, prices::PriceError};

/// Errors that end a client run with a non-zero exit.
#[derive(Debug, Error)]
pub enum CliError {
    /// The HTTP client could not be set up.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A cart action failed; the shopper has already been told why.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The configured currency is not supported.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// The logging subscriber could not be installed.
    #[error(transparent)]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}
