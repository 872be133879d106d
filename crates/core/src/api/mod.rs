//! Remote storefront APIs.

use async_trait::async_trait;
use mockall::automock;

use crate::cart::models::Cart;

pub mod errors;
pub mod http;
pub mod wire;

pub use errors::ApiError;
pub use http::HttpStorefrontApi;
pub use wire::{AddToCart, AddedToCart, QuantityUpdated, UpdateQuantity, VariantQuery, VariantRecord};

/// Remote cart endpoints.
#[automock]
#[async_trait]
pub trait CartApi: Send + Sync {
    /// Fetch the shopper's cart. An empty server list yields an empty cart.
    async fn list_cart(&self) -> Result<Cart, ApiError>;

    /// Add a product (optionally a specific variant) to the cart.
    async fn add_item(&self, request: AddToCart) -> Result<AddedToCart, ApiError>;

    /// Set an item's quantity; zero removes it.
    async fn update_quantity(&self, request: UpdateQuantity) -> Result<QuantityUpdated, ApiError>;
}

/// Remote variant lookup endpoint.
#[automock]
#[async_trait]
pub trait VariantApi: Send + Sync {
    /// Look up the variant matching a size/color pair.
    ///
    /// Returns `Ok(None)` when the server has no such combination.
    async fn find_variant(&self, query: VariantQuery) -> Result<Option<VariantRecord>, ApiError>;
}
