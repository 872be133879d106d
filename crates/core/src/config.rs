//! Storefront Config

use std::time::Duration;

/// Default anti-forgery cookie name.
pub const DEFAULT_CSRF_COOKIE: &str = "csrftoken";

/// Default anti-forgery request header.
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";

/// Image shown for cart lines whose product has no primary image.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150x150?text=No+Image";

/// Client settings shared by the cart controller, variant selector and HTTP API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Storefront origin, e.g. `"https://shop.example.com"`.
    pub base_url: String,

    /// Whether the current shopper has an authenticated session. Gates every cart call.
    pub authenticated: bool,

    /// Cookie holding the anti-forgery token.
    pub csrf_cookie: String,

    /// Header the anti-forgery token is echoed in on mutating requests.
    pub csrf_header: String,

    /// ISO 4217 code used to pick the currency symbol for display.
    pub currency: String,

    /// Where guests are sent when they accept the login prompt.
    pub login_url: String,

    /// Image URL for cart lines without a product image.
    pub placeholder_image: String,

    /// Per-request timeout handed to the HTTP client.
    pub request_timeout: Duration,

    /// Whether products on this page must be added as a resolved size/color variant.
    pub supports_variants: bool,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            authenticated: false,
            csrf_cookie: DEFAULT_CSRF_COOKIE.to_string(),
            csrf_header: DEFAULT_CSRF_HEADER.to_string(),
            currency: "BDT".to_string(),
            login_url: "/users/login/".to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            request_timeout: Duration::from_secs(30),
            supports_variants: false,
        }
    }
}
