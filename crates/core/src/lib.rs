//! Storefront
//!
//! Client-side cart synchronisation and variant selection for a storefront
//! whose cart, pricing and stock live on the server.
//!
//! The [`cart::CartController`] mirrors the server's cart into a
//! [`cart::CartView`], the [`variants::VariantSelector`] resolves size/color
//! choices, and [`page::ProductPage`] ties both to a product's purchase
//! controls. Network access goes through [`api::CartApi`] and
//! [`api::VariantApi`], implemented over HTTP by [`api::HttpStorefrontApi`].

pub mod api;
pub mod cart;
pub mod config;
pub mod feedback;
pub mod ids;
pub mod page;
pub mod prelude;
pub mod prices;
pub mod variants;
