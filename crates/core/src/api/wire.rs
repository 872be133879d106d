//! Request and response bodies for the storefront API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::{ItemId, ProductId, VariantId};

/// Message the update endpoint sends when an item left the cart.
pub const ITEM_REMOVED_MESSAGE: &str = "Item removed from cart";

/// Either a domain rejection or the endpoint's success body.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Reply<T> {
    Rejected { error: String },
    Accepted(T),
}

/// Body of `POST /cart/api/add/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddToCart {
    /// Product to add.
    pub product_id: ProductId,

    /// Units to add; always at least one.
    pub quantity: u32,

    /// Resolved size/color variant for variant products.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
}

/// Success body of `POST /cart/api/add/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddedToCart {
    /// Human-readable confirmation.
    #[serde(default)]
    pub message: String,

    /// Cart item count after the add.
    pub cart_total: u32,
}

/// Body of `POST /cart/api/update/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateQuantity {
    /// Item to change.
    pub item_id: ItemId,

    /// Desired quantity; zero removes the item.
    pub quantity: u32,
}

/// Success body of `POST /cart/api/update/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuantityUpdated {
    /// Human-readable confirmation; [`ITEM_REMOVED_MESSAGE`] signals a removal.
    pub message: String,

    /// New line total for the item.
    #[serde(default)]
    pub item_subtotal: Option<Decimal>,

    /// New cart grand total.
    #[serde(default)]
    pub cart_total_price: Option<Decimal>,

    /// New cart item count.
    #[serde(default)]
    pub cart_total: Option<u32>,
}

impl QuantityUpdated {
    /// Whether the server reports the item as gone.
    #[must_use]
    pub fn is_removal(&self) -> bool {
        self.message == ITEM_REMOVED_MESSAGE
    }
}

/// Query for `GET /products/api/variant/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantQuery {
    /// Product the variant belongs to.
    pub product_id: ProductId,

    /// Chosen size.
    pub size: String,

    /// Chosen color.
    pub color: String,
}

/// Matching variant returned by the variant endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariantRecord {
    /// Variant identifier.
    pub id: VariantId,

    /// Unit price for this variant.
    pub selling_price: Decimal,

    /// Units in stock; zero or below means out of stock.
    pub stock: i64,

    /// Stock keeping unit.
    #[serde(default)]
    pub sku: Option<String>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn error_body_is_a_rejection() -> TestResult {
        let reply: Reply<AddedToCart> = serde_json::from_str(r#"{"error": "Out of stock"}"#)?;

        assert!(
            matches!(reply, Reply::Rejected { ref error } if error == "Out of stock"),
            "expected rejection, got {reply:?}"
        );

        Ok(())
    }

    #[test]
    fn success_body_is_accepted() -> TestResult {
        let reply: Reply<QuantityUpdated> = serde_json::from_str(
            r#"{"message": "Cart updated", "item_subtotal": "59.97", "cart_total_price": "59.97", "cart_total": 3}"#,
        )?;

        let Reply::Accepted(update) = reply else {
            return Err("expected accepted reply".into());
        };

        assert!(!update.is_removal());
        assert_eq!(update.item_subtotal, Some(Decimal::from_str("59.97")?));
        assert_eq!(update.cart_total, Some(3));

        Ok(())
    }

    #[test]
    fn body_without_message_is_not_an_update() {
        let reply = serde_json::from_str::<Reply<QuantityUpdated>>(
            r#"{"detail": "CSRF Failed: CSRF token missing."}"#,
        );

        assert!(reply.is_err(), "expected a parse failure, got {reply:?}");
    }

    #[test]
    fn removal_message_is_recognised() -> TestResult {
        let update: QuantityUpdated =
            serde_json::from_str(r#"{"message": "Item removed from cart", "cart_total": 0}"#)?;

        assert!(update.is_removal());

        Ok(())
    }

    #[test]
    fn add_body_omits_missing_variant() -> TestResult {
        let body = serde_json::to_value(AddToCart {
            product_id: ProductId::new(5),
            quantity: 2,
            variant_id: None,
        })?;

        assert_eq!(body, serde_json::json!({"product_id": 5, "quantity": 2}));

        Ok(())
    }
}
