//! Cart Models

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::ids::{ItemId, VariantId};

/// Read-only copy of the shopper's server-side cart.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Cart {
    /// Sum of item quantities, as reported by the server.
    pub total_items: u32,

    /// Cart grand total, as reported by the server.
    pub total_price: Decimal,

    /// Items in display order.
    #[serde(default)]
    pub items: Vec<CartItem>,
}

/// A single line of the cart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CartItem {
    /// Server-assigned item identifier.
    pub id: ItemId,

    /// Units of the product in the cart.
    pub quantity: u32,

    /// Product snapshot.
    pub product: Product,

    /// Size/color variant chosen when the item was added.
    #[serde(default)]
    pub variant: Option<VariantSummary>,
}

/// Product fields the cart panel displays.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    /// Product name.
    pub name: String,

    /// Current unit price.
    pub selling_price: Decimal,

    /// Pre-discount unit price.
    #[serde(default)]
    pub original_price: Option<Decimal>,

    /// Discount percentage; positive values show the original price struck through.
    #[serde(default)]
    pub discount_percentage: Decimal,

    /// Primary product image.
    #[serde(default)]
    pub primary_image: Option<ProductImage>,
}

/// Product image reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductImage {
    /// Image URL.
    pub image: String,
}

/// Variant attached to a cart item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariantSummary {
    /// Variant identifier.
    pub id: VariantId,

    /// Size label.
    #[serde(default)]
    pub size: Option<String>,

    /// Color label.
    #[serde(default)]
    pub color: Option<String>,

    /// Stock keeping unit.
    #[serde(default)]
    pub sku: Option<String>,
}

impl Cart {
    /// Find an item by identifier.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

impl Product {
    /// Whether the product is currently discounted.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.discount_percentage > Decimal::ZERO
    }
}

impl VariantSummary {
    /// Human-readable `size / color` label, skipping missing parts.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        let parts: Vec<&str> = [self.size.as_deref(), self.color.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" / "))
        }
    }
}
