//! Storefront terminal client
//!
//! Shows the shopper's cart, changes quantities and resolves size/color
//! variants against a running storefront.

use std::{io, process, sync::Arc};

use tracing::error;

use storefront::{api::HttpStorefrontApi, cart::CartController};

use crate::{
    commands::Session,
    config::CliConfig,
    errors::CliError,
    terminal::{TableView, TerminalFeedback},
};

mod commands;
mod config;
mod errors;
mod logging;
mod terminal;

/// Storefront client entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = CliConfig::load().unwrap_or_else(|error| error.exit());

    if let Err(init_error) = logging::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        process::exit(1);
    }

    if let Err(run_error) = run(config).await {
        error!("{run_error}");

        process::exit(1);
    }
}

async fn run(config: CliConfig) -> Result<(), CliError> {
    let storefront = config.connection.storefront();

    let api = config
        .connection
        .cookies()
        .iter()
        .fold(HttpStorefrontApi::new(&storefront)?, |api, cookie| {
            api.with_cookie(cookie)
        });

    let api = Arc::new(api);

    let cart = CartController::new(
        &storefront,
        Arc::clone(&api) as _,
        Arc::new(TableView::stdout()),
        Arc::new(TerminalFeedback::stdout(config.yes)),
    )?;

    let mut session = Session {
        config: storefront,
        api,
        cart: Arc::new(cart),
        out: io::stdout(),
    };

    config.command.run(&mut session).await
}
