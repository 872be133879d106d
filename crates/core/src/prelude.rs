//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    api::{ApiError, CartApi, HttpStorefrontApi, VariantApi},
    cart::{AddOutcome, CartController, CartError, CartLine, CartPanel, CartView, QuantityOutcome},
    config::StorefrontConfig,
    feedback::{Confirmation, Feedback, Notice, NoticeKind},
    ids::{ItemId, ProductId, VariantId},
    page::ProductPage,
    prices::{PriceError, PriceFormatter},
    variants::{VariantAttribute, VariantDisplay, VariantSelector, VariantState},
};
