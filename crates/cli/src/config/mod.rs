//! Client configuration module

use clap::Parser;

use crate::{
    commands::Command,
    config::{connection::ConnectionConfig, observability::LoggingConfig},
};

pub(crate) mod connection;
pub(crate) mod observability;

/// Storefront terminal client configuration
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront cart client", long_about = None)]
pub struct CliConfig {
    /// Storefront connection and session settings.
    #[command(flatten)]
    pub connection: ConnectionConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Answer yes to every confirmation prompt.
    #[arg(short = 'y', long, global = true, default_value_t = false)]
    pub yes: bool,

    /// Action to perform.
    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
