//! Cart controller errors.

use thiserror::Error;

use crate::{api::ApiError, ids::ItemId};

/// Errors returned by cart operations.
///
/// By the time one is returned the shopper has already been told and the
/// view rolled back or refreshed.
#[derive(Debug, Error)]
pub enum CartError {
    /// The remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The item is not on the rendered panel.
    #[error("item {0} is not in the cart")]
    UnknownItem(ItemId),

    /// Guests cannot change cart quantities.
    #[error("log in to change the cart")]
    NotAuthenticated,

    /// A variant product was added without a resolved variant.
    #[error("select a size and color first")]
    VariantRequired,
}
