//! Product page purchase surface.

use std::sync::Arc;

use tracing::debug;

use crate::{
    api::VariantApi,
    cart::{AddOutcome, CartController, CartError},
    config::StorefrontConfig,
    ids::ProductId,
    variants::{VariantDisplay, VariantSelector, VariantState},
};

/// One product's purchase controls.
///
/// Plain products add straight to the cart. When the storefront is configured
/// for variants the page owns a [`VariantSelector`] and only adds the variant
/// it has resolved.
#[derive(Debug)]
pub struct ProductPage {
    product: ProductId,
    cart: Arc<CartController>,
    selector: Option<VariantSelector>,
}

impl ProductPage {
    /// Create the page, with a variant selector when `config.supports_variants` is set.
    #[must_use]
    pub fn new(
        config: &StorefrontConfig,
        product: ProductId,
        cart: Arc<CartController>,
        variants: Arc<dyn VariantApi>,
    ) -> Self {
        let selector = config
            .supports_variants
            .then(|| VariantSelector::new(product, variants));

        Self {
            product,
            cart,
            selector,
        }
    }

    /// Product this page sells.
    #[must_use]
    pub fn product(&self) -> ProductId {
        self.product
    }

    /// Variant selector, for variant products.
    #[must_use]
    pub fn selector(&self) -> Option<&VariantSelector> {
        self.selector.as_ref()
    }

    /// Whether add-to-cart and order-now are enabled.
    #[must_use]
    pub fn purchase_enabled(&self) -> bool {
        self.selector
            .as_ref()
            .is_none_or(|selector| selector.state().is_purchasable())
    }

    /// Picker display for variant products.
    #[must_use]
    pub fn variant_display(&self) -> Option<VariantDisplay> {
        self.selector
            .as_ref()
            .map(|selector| VariantDisplay::for_state(&selector.state(), self.cart.formatter()))
    }

    /// The add-to-cart control.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::VariantRequired`] when a variant product has no
    /// resolved variant, or any error from [`CartController::add_item`].
    pub async fn add_to_cart(&self, quantity: u32) -> Result<AddOutcome, CartError> {
        match &self.selector {
            None => self.cart.add_item(self.product, quantity, None).await,
            Some(selector) => {
                let state: VariantState = selector.state();

                debug!(?state, "adding selected variant");

                self.cart
                    .add_selected_variant(self.product, quantity, &state)
                    .await
            }
        }
    }
}
