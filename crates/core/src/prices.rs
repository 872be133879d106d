//! Prices

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::iso::{self, Currency};
use thiserror::Error;

/// Errors that can occur while preparing price formatting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The configured currency code is not one the storefront displays.
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),
}

/// Formats server-reported amounts for display.
///
/// Amounts are never recomputed here; the formatter only rounds to two
/// decimals and prefixes the currency symbol, e.g. `৳39.98`.
#[derive(Debug, Clone, Copy)]
pub struct PriceFormatter {
    currency: &'static Currency,
}

impl PriceFormatter {
    /// Create a formatter for the given ISO 4217 code.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::UnknownCurrency`] when the code is not supported.
    pub fn for_currency(code: &str) -> Result<Self, PriceError> {
        let currency = match code.trim().to_ascii_uppercase().as_str() {
            "BDT" => iso::BDT,
            "EUR" => iso::EUR,
            "GBP" => iso::GBP,
            "INR" => iso::INR,
            "USD" => iso::USD,
            _ => return Err(PriceError::UnknownCurrency(code.to_string())),
        };

        Ok(Self { currency })
    }

    /// Currency backing this formatter.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Format an amount as `<symbol><amount>` with exactly two decimals.
    ///
    /// Halves round away from zero, so `0.125` shows as `0.13`.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        format!("{}{rounded:.2}", self.currency.symbol)
    }
}
