//! Quantity control rules.

/// What a quantity control interaction should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityIntent {
    /// Send this quantity to the server.
    Set(u32),

    /// Ask the shopper before removing the item.
    ConfirmRemoval,
}

/// The `+` control: one more unit.
#[must_use]
pub fn increment(current: u32) -> QuantityIntent {
    QuantityIntent::Set(current.saturating_add(1).max(1))
}

/// The `-` control: one fewer unit, never below 1 without confirmation.
#[must_use]
pub fn decrement(current: u32) -> QuantityIntent {
    if current > 1 {
        QuantityIntent::Set(current - 1)
    } else {
        QuantityIntent::ConfirmRemoval
    }
}

/// Direct numeric entry, clamped up to 1.
///
/// Text that is not an integer is treated as 1.
#[must_use]
pub fn clamp_input(raw: &str) -> u32 {
    let value = raw.trim().parse::<i64>().unwrap_or(1).max(1);

    u32::try_from(value).unwrap_or(u32::MAX)
}
