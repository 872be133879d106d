//! Connection Config

use std::time::Duration;

use clap::Args;

use storefront::config::{
    DEFAULT_CSRF_COOKIE, DEFAULT_CSRF_HEADER, DEFAULT_PLACEHOLDER_IMAGE, StorefrontConfig,
};

/// Storefront server and shopper session settings.
#[derive(Debug, Args)]
pub struct ConnectionConfig {
    /// Storefront base URL
    #[arg(
        short = 'u',
        long,
        env = "STOREFRONT_BASE_URL",
        default_value = "http://localhost:8000"
    )]
    pub base_url: String,

    /// Session cookie value of a logged-in shopper; without it the client is a guest
    #[arg(long, env = "STOREFRONT_SESSION")]
    pub session: Option<String>,

    /// Name of the session cookie
    #[arg(long, env = "STOREFRONT_SESSION_COOKIE", default_value = "sessionid")]
    pub session_cookie: String,

    /// Anti-forgery token to send with cart changes
    #[arg(long, env = "STOREFRONT_CSRF_TOKEN")]
    pub csrf_token: Option<String>,

    /// Name of the anti-forgery cookie
    #[arg(long, env = "STOREFRONT_CSRF_COOKIE", default_value = DEFAULT_CSRF_COOKIE)]
    pub csrf_cookie: String,

    /// Header the anti-forgery token is sent in
    #[arg(long, env = "STOREFRONT_CSRF_HEADER", default_value = DEFAULT_CSRF_HEADER)]
    pub csrf_header: String,

    /// ISO 4217 currency code used for display
    #[arg(long, env = "STOREFRONT_CURRENCY", default_value = "BDT")]
    pub currency: String,

    /// Login page guests are sent to
    #[arg(long, env = "STOREFRONT_LOGIN_URL", default_value = "/users/login/")]
    pub login_url: String,

    /// Require a size/color variant when adding products
    #[arg(long, env = "STOREFRONT_VARIANTS", default_value_t = false)]
    pub supports_variants: bool,

    /// Request timeout in seconds
    #[arg(long, env = "STOREFRONT_TIMEOUT_SECONDS", default_value_t = 30_u64)]
    pub timeout_seconds: u64,
}

impl ConnectionConfig {
    /// Library settings for this connection.
    #[must_use]
    pub fn storefront(&self) -> StorefrontConfig {
        StorefrontConfig {
            base_url: self.base_url.clone(),
            authenticated: self.session.is_some(),
            csrf_cookie: self.csrf_cookie.clone(),
            csrf_header: self.csrf_header.clone(),
            currency: self.currency.clone(),
            login_url: self.login_url.clone(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            request_timeout: Duration::from_secs(self.timeout_seconds),
            supports_variants: self.supports_variants,
        }
    }

    /// `name=value` cookies to seed the client's jar with.
    #[must_use]
    pub fn cookies(&self) -> Vec<String> {
        [
            (&self.session_cookie, &self.session),
            (&self.csrf_cookie, &self.csrf_token),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_ref().map(|value| format!("{name}={value}")))
        .collect()
    }
}
