//! What the variant picker shows for each state.

use crate::{prices::PriceFormatter, variants::state::VariantState};

/// Instruction shown until both choices are made.
pub const SELECT_OPTIONS_MESSAGE: &str = "Please select size and color options";

/// Message shown while a lookup is in flight.
pub const CHECKING_MESSAGE: &str = "Checking availability...";

/// Message shown when the combination does not exist.
pub const UNAVAILABLE_MESSAGE: &str = "This combination is not available";

/// Stock badge text for sold-out variants.
pub const OUT_OF_STOCK_TEXT: &str = "Out of Stock";

/// Tone of the picker message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTone {
    /// Instructional.
    Info,

    /// Waiting on the server.
    Pending,

    /// Combination unavailable.
    Error,
}

/// Stock badge style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockBadge {
    /// Units available.
    InStock,

    /// Sold out.
    OutOfStock,
}

impl StockBadge {
    /// CSS class of the badge.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::InStock => "stock-badge in-stock",
            Self::OutOfStock => "stock-badge out-of-stock",
        }
    }
}

/// Picker message with its tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantMessage {
    /// Tone.
    pub tone: MessageTone,

    /// Text.
    pub text: &'static str,
}

/// Price and stock block for a matched variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDetails {
    /// Formatted price.
    pub price: String,

    /// Stock text, e.g. `3 in stock`.
    pub stock: String,

    /// Badge style.
    pub badge: StockBadge,
}

/// Render model for the variant picker and the purchase controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDisplay {
    /// Instruction or error message; hidden when details are shown.
    pub message: Option<VariantMessage>,

    /// Price and stock; hidden when a message is shown.
    pub details: Option<VariantDetails>,

    /// Whether add-to-cart and order-now are enabled.
    pub purchase_enabled: bool,
}

impl VariantDisplay {
    /// Build the display for a state.
    #[must_use]
    pub fn for_state(state: &VariantState, formatter: &PriceFormatter) -> Self {
        match state {
            VariantState::Incomplete(_) => Self::message(MessageTone::Info, SELECT_OPTIONS_MESSAGE),
            VariantState::Pending(_) => Self::message(MessageTone::Pending, CHECKING_MESSAGE),
            VariantState::Unavailable(_) => Self::message(MessageTone::Error, UNAVAILABLE_MESSAGE),
            VariantState::Available(_, variant) => Self {
                message: None,
                details: Some(VariantDetails {
                    price: formatter.format(variant.price),
                    stock: format!("{} in stock", variant.stock),
                    badge: StockBadge::InStock,
                }),
                purchase_enabled: true,
            },
            VariantState::OutOfStock(_, variant) => Self {
                message: None,
                details: Some(VariantDetails {
                    price: formatter.format(variant.price),
                    stock: OUT_OF_STOCK_TEXT.to_string(),
                    badge: StockBadge::OutOfStock,
                }),
                purchase_enabled: false,
            },
        }
    }

    fn message(tone: MessageTone, text: &'static str) -> Self {
        Self {
            message: Some(VariantMessage { tone, text }),
            details: None,
            purchase_enabled: false,
        }
    }
}
