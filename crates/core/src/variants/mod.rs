//! Variants

pub mod display;
pub mod selector;
pub mod state;

pub use display::VariantDisplay;
pub use selector::VariantSelector;
pub use state::{ResolvedVariant, VariantAttribute, VariantChoice, VariantState};
