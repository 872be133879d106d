//! Variant selection state.

use rust_decimal::Decimal;

use crate::ids::VariantId;

/// Which choice field changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantAttribute {
    /// Size picker.
    Size,

    /// Color picker.
    Color,
}

/// The shopper's in-progress size/color choice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantChoice {
    /// Chosen size.
    pub size: Option<String>,

    /// Chosen color.
    pub color: Option<String>,
}

impl VariantChoice {
    /// Set one field; blank values clear it.
    pub fn set(&mut self, attribute: VariantAttribute, value: &str) {
        let value = Some(value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        match attribute {
            VariantAttribute::Size => self.size = value,
            VariantAttribute::Color => self.color = value,
        }
    }

    /// Both fields, once both are chosen.
    #[must_use]
    pub fn complete(&self) -> Option<(&str, &str)> {
        Some((self.size.as_deref()?, self.color.as_deref()?))
    }
}

/// A variant the server matched to the current choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVariant {
    /// Variant identifier.
    pub id: VariantId,

    /// Unit price as reported by the server.
    pub price: Decimal,

    /// Units in stock as reported by the server.
    pub stock: i64,

    /// Stock keeping unit.
    pub sku: Option<String>,
}

/// Where the selection stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantState {
    /// Size or color still missing.
    Incomplete(VariantChoice),

    /// Both chosen; lookup in flight.
    Pending(VariantChoice),

    /// Matched and in stock.
    Available(VariantChoice, ResolvedVariant),

    /// Matched but nothing left.
    OutOfStock(VariantChoice, ResolvedVariant),

    /// The server has no such combination, or the lookup failed.
    Unavailable(VariantChoice),
}

impl Default for VariantState {
    fn default() -> Self {
        Self::Incomplete(VariantChoice::default())
    }
}

impl VariantState {
    /// Choice this state was computed for.
    #[must_use]
    pub fn choice(&self) -> &VariantChoice {
        match self {
            Self::Incomplete(choice)
            | Self::Pending(choice)
            | Self::Available(choice, _)
            | Self::OutOfStock(choice, _)
            | Self::Unavailable(choice) => choice,
        }
    }

    /// Matched variant, whether or not it is in stock.
    #[must_use]
    pub fn resolved(&self) -> Option<&ResolvedVariant> {
        match self {
            Self::Available(_, variant) | Self::OutOfStock(_, variant) => Some(variant),
            _ => None,
        }
    }

    /// Identifier to add to the cart. Only set when the variant can be bought.
    #[must_use]
    pub fn resolved_id(&self) -> Option<VariantId> {
        match self {
            Self::Available(_, variant) => Some(variant.id),
            _ => None,
        }
    }

    /// Whether the purchase controls should be enabled.
    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        matches!(self, Self::Available(..))
    }
}
