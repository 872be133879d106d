//! Cart

pub mod controller;
pub mod errors;
mod generations;
pub mod models;
pub mod panel;
pub mod quantity;

pub use controller::{AddOutcome, CartController, QuantityOutcome};
pub use errors::CartError;
pub use panel::{CartLine, CartPanel, CartView};
