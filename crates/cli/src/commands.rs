//! Client subcommands.

use std::{io::Write, sync::Arc};

use clap::{Args, Subcommand};
use tracing::{info, warn};

use storefront::{
    api::HttpStorefrontApi,
    cart::CartController,
    config::StorefrontConfig,
    ids::{ItemId, ProductId},
    page::ProductPage,
    variants::{VariantDisplay, VariantSelector},
};

use crate::{errors::CliError, terminal::render_variant};

/// Action to perform against the storefront.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the cart.
    Show,

    /// Add a product to the cart.
    Add(AddArgs),

    /// Type a quantity into an item's quantity field.
    Set {
        /// Cart item id
        #[arg(long)]
        item: u64,

        /// New quantity; anything below 1 is sent as 1
        #[arg(long, allow_hyphen_values = true)]
        quantity: String,
    },

    /// Press an item's `+` control.
    Increment {
        /// Cart item id
        #[arg(long)]
        item: u64,
    },

    /// Press an item's `-` control.
    Decrement {
        /// Cart item id
        #[arg(long)]
        item: u64,
    },

    /// Remove an item from the cart.
    Remove {
        /// Cart item id
        #[arg(long)]
        item: u64,
    },

    /// Check price and stock of a size/color combination.
    Variant(VariantArgs),
}

/// Arguments for [`Command::Add`].
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Product id
    #[arg(long)]
    pub product: u64,

    /// Units to add
    #[arg(long, default_value_t = 1)]
    pub quantity: u32,

    /// Size, for variant products
    #[arg(long)]
    pub size: Option<String>,

    /// Color, for variant products
    #[arg(long)]
    pub color: Option<String>,
}

/// Arguments for [`Command::Variant`].
#[derive(Debug, Args)]
pub struct VariantArgs {
    /// Product id
    #[arg(long)]
    pub product: u64,

    /// Size
    #[arg(long)]
    pub size: String,

    /// Color
    #[arg(long)]
    pub color: String,
}

/// Everything a command needs to talk to the storefront.
#[derive(Debug)]
pub struct Session<W> {
    /// Library settings.
    pub config: StorefrontConfig,

    /// HTTP client shared by the cart and variant lookups.
    pub api: Arc<HttpStorefrontApi>,

    /// Cart controller drawing into the terminal.
    pub cart: Arc<CartController>,

    /// Where variant displays are printed.
    pub out: W,
}

impl Command {
    /// Run the command.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart action fails. The shopper has already
    /// been shown a notice by then.
    pub async fn run<W: Write>(self, session: &mut Session<W>) -> Result<(), CliError> {
        let cart = Arc::clone(&session.cart);

        match self {
            Self::Show => {
                if !session.config.authenticated {
                    warn!("no session configured; the cart is only shown to logged-in shoppers");
                }

                cart.load_cart().await?;
            }
            Self::Add(args) => args.run(session).await?,
            Self::Set { item, quantity } => {
                cart.load_cart().await?;

                let outcome = cart.input_quantity(ItemId::new(item), &quantity).await?;

                info!(?outcome, "quantity set");
            }
            Self::Increment { item } => {
                cart.load_cart().await?;

                let outcome = cart.increment(ItemId::new(item)).await?;

                info!(?outcome, "quantity incremented");
            }
            Self::Decrement { item } => {
                cart.load_cart().await?;

                let outcome = cart.decrement(ItemId::new(item)).await?;

                info!(?outcome, "quantity decremented");
            }
            Self::Remove { item } => {
                cart.load_cart().await?;

                let outcome = cart.request_removal(ItemId::new(item)).await?;

                info!(?outcome, "removal requested");
            }
            Self::Variant(args) => args.run(session).await,
        }

        Ok(())
    }
}

impl AddArgs {
    async fn run<W: Write>(self, session: &mut Session<W>) -> Result<(), CliError> {
        let page = ProductPage::new(
            &session.config,
            ProductId::new(self.product),
            Arc::clone(&session.cart),
            Arc::clone(&session.api) as _,
        );

        if let Some(selector) = page.selector() {
            if let Some(size) = &self.size {
                selector.select_size(size).await;
            }

            if let Some(color) = &self.color {
                selector.select_color(color).await;
            }
        }

        if let Some(display) = page.variant_display() {
            print_variant(&mut session.out, &display);
        }

        let outcome = page.add_to_cart(self.quantity).await?;

        info!(?outcome, "add to cart finished");

        Ok(())
    }
}

impl VariantArgs {
    async fn run<W: Write>(self, session: &mut Session<W>) {
        let selector = VariantSelector::new(
            ProductId::new(self.product),
            Arc::clone(&session.api) as _,
        );

        selector.select_size(&self.size).await;

        let state = selector.select_color(&self.color).await;
        let display = VariantDisplay::for_state(&state, session.cart.formatter());

        print_variant(&mut session.out, &display);
    }
}

fn print_variant(out: &mut impl Write, display: &VariantDisplay) {
    if let Err(error) = out.write_all(render_variant(display).as_bytes()) {
        warn!("failed to write variant display: {error}");
    }
}
