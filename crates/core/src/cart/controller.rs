//! Cart view controller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, instrument, warn};

use crate::{
    api::{
        AddToCart, CartApi, QuantityUpdated, UpdateQuantity, wire::ITEM_REMOVED_MESSAGE,
    },
    cart::{
        errors::CartError,
        generations::Generations,
        models::Cart,
        panel::{CartLine, CartPanel, CartView},
        quantity::{self, QuantityIntent},
    },
    config::StorefrontConfig,
    feedback::{Confirmation, Feedback, Notice, SELECT_VARIANT_WARNING},
    ids::{ItemId, ProductId, VariantId},
    prices::{PriceError, PriceFormatter},
    variants::VariantState,
};

/// Default toast text when the add endpoint does not send one.
const ITEM_ADDED: &str = "Item added to cart";

/// Result of an add-to-cart attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The server accepted the item; the cart now holds `cart_total` units.
    Added {
        /// Server-reported item count.
        cart_total: u32,
    },

    /// The shopper is a guest; nothing was sent.
    LoginRequired,
}

/// Result of a quantity change that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityOutcome {
    /// The line was patched in place.
    Updated {
        /// Quantity the server accepted.
        quantity: u32,
    },

    /// The item left the cart and the panel was refreshed.
    Removed,

    /// A newer change for the same item was issued before this one settled.
    Superseded,

    /// The shopper declined the removal prompt.
    Cancelled,
}

#[derive(Debug, Default)]
struct CartState {
    panel: Option<CartPanel>,
    generations: Generations<ItemId>,
}

/// Keeps the cart panel in step with the server.
///
/// Every mutation goes to the [`CartApi`]; the controller only mirrors what the
/// server reports into the [`CartView`] and asks the shopper through
/// [`Feedback`] before anything destructive.
pub struct CartController {
    api: Arc<dyn CartApi>,
    view: Arc<dyn CartView>,
    feedback: Arc<dyn Feedback>,
    formatter: PriceFormatter,
    authenticated: bool,
    login_url: String,
    placeholder_image: String,
    state: Mutex<CartState>,
}

impl std::fmt::Debug for CartController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartController")
            .field("authenticated", &self.authenticated)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl CartController {
    /// Create a controller.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured currency is unknown.
    pub fn new(
        config: &StorefrontConfig,
        api: Arc<dyn CartApi>,
        view: Arc<dyn CartView>,
        feedback: Arc<dyn Feedback>,
    ) -> Result<Self, PriceError> {
        Ok(Self {
            api,
            view,
            feedback,
            formatter: PriceFormatter::for_currency(&config.currency)?,
            authenticated: config.authenticated,
            login_url: config.login_url.clone(),
            placeholder_image: config.placeholder_image.clone(),
            state: Mutex::new(CartState::default()),
        })
    }

    /// Formatter used for every price this controller displays.
    #[must_use]
    pub fn formatter(&self) -> &PriceFormatter {
        &self.formatter
    }

    /// Snapshot of the last rendered panel.
    #[must_use]
    pub fn panel(&self) -> Option<CartPanel> {
        self.lock().panel.clone()
    }

    /// Quantity currently shown for an item.
    #[must_use]
    pub fn quantity(&self, item: ItemId) -> Option<u32> {
        self.lock()
            .panel
            .as_ref()
            .and_then(|panel| panel.line(item))
            .map(|line| line.quantity)
    }

    /// Fetch the cart and render it. Guests are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be fetched; the panel is left as it was.
    #[instrument(skip(self))]
    pub async fn load_cart(&self) -> Result<(), CartError> {
        if !self.authenticated {
            debug!("guest session, not loading cart");

            return Ok(());
        }

        let cart = self.api.list_cart().await.inspect_err(|error| {
            warn!("failed to fetch cart: {error}");
        })?;

        self.render(&cart);

        Ok(())
    }

    /// Add a product to the cart.
    ///
    /// Guests are offered the login page instead. `quantity` below 1 is sent as 1.
    ///
    /// # Errors
    ///
    /// Returns an error when the server rejects the item or cannot be reached.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        product: ProductId,
        quantity: u32,
        variant: Option<VariantId>,
    ) -> Result<AddOutcome, CartError> {
        if !self.authenticated {
            if self.feedback.confirm(Confirmation::Login).await {
                self.feedback.redirect(&self.login_url);
            }

            return Ok(AddOutcome::LoginRequired);
        }

        let request = AddToCart {
            product_id: product,
            quantity: quantity.max(1),
            variant_id: variant,
        };

        let added = match self.api.add_item(request).await {
            Ok(added) => added,
            Err(error) => {
                warn!("add to cart failed: {error}");

                self.feedback.notify(Notice::failure(&error));

                return Err(error.into());
            }
        };

        info!(cart_total = added.cart_total, "item added to cart");

        let text = if added.message.is_empty() {
            ITEM_ADDED.to_string()
        } else {
            added.message
        };

        self.feedback.notify(Notice::success(text));
        self.view.update_count(added.cart_total);

        if let Err(error) = self.load_cart().await {
            debug!("cart refresh after add failed: {error}");
        }

        Ok(AddOutcome::Added {
            cart_total: added.cart_total,
        })
    }

    /// Add the variant currently resolved by a selector.
    ///
    /// Only an available variant may be added; anything else warns the
    /// shopper and sends nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::VariantRequired`] without a resolved variant, or
    /// any error from [`Self::add_item`].
    pub async fn add_selected_variant(
        &self,
        product: ProductId,
        quantity: u32,
        selection: &VariantState,
    ) -> Result<AddOutcome, CartError> {
        let Some(variant) = selection.resolved_id() else {
            self.feedback.notify(Notice::warning(SELECT_VARIANT_WARNING));

            return Err(CartError::VariantRequired);
        };

        self.add_item(product, quantity, Some(variant)).await
    }

    /// Send a new quantity for an item; zero removes it.
    ///
    /// The control shows the requested value while the request is out. On
    /// success the line total, grand total and count are patched in place, or
    /// the whole cart is refetched when the item was removed. On failure the
    /// control goes back to the value it showed before this call.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotAuthenticated`] for guests, or an error when the
    /// server rejects the change or cannot be reached.
    #[instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        item: ItemId,
        quantity: u32,
    ) -> Result<QuantityOutcome, CartError> {
        self.require_session()?;

        let (generation, previous) = self.stage(item, quantity);

        let result = self
            .api
            .update_quantity(UpdateQuantity {
                item_id: item,
                quantity,
            })
            .await;

        match result {
            Ok(update) if update.is_removal() || quantity == 0 => {
                if !self.lock().generations.is_current(&item, generation) {
                    debug!("dropping superseded removal response");

                    return Ok(QuantityOutcome::Superseded);
                }

                info!("item removed from cart");

                let text = if update.message.is_empty() {
                    ITEM_REMOVED_MESSAGE.to_string()
                } else {
                    update.message
                };

                self.feedback.notify(Notice::success(text));

                if let Err(error) = self.load_cart().await {
                    debug!("cart refresh after removal failed: {error}");
                }

                Ok(QuantityOutcome::Removed)
            }
            Ok(update) => Ok(self.patch(item, generation, quantity, &update)),
            Err(error) => {
                warn!("quantity update failed: {error}");

                if self.rollback(item, generation, previous) {
                    self.feedback.notify(Notice::failure(&error));
                }

                Err(error.into())
            }
        }
    }

    /// The `+` control.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownItem`] for items not on the panel, or any
    /// error from [`Self::set_quantity`].
    pub async fn increment(&self, item: ItemId) -> Result<QuantityOutcome, CartError> {
        let current = self.current_quantity(item)?;

        self.apply(item, quantity::increment(current)).await
    }

    /// The `-` control. From 1 this asks to remove the item instead.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownItem`] for items not on the panel, or any
    /// error from [`Self::set_quantity`].
    pub async fn decrement(&self, item: ItemId) -> Result<QuantityOutcome, CartError> {
        let current = self.current_quantity(item)?;

        self.apply(item, quantity::decrement(current)).await
    }

    /// Direct entry in the quantity field. Values below 1 are sent as 1.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::set_quantity`].
    pub async fn input_quantity(&self, item: ItemId, raw: &str) -> Result<QuantityOutcome, CartError> {
        self.set_quantity(item, quantity::clamp_input(raw)).await
    }

    /// The remove control: confirm, then set the quantity to zero.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotAuthenticated`] for guests without prompting,
    /// or any error from [`Self::set_quantity`].
    pub async fn request_removal(&self, item: ItemId) -> Result<QuantityOutcome, CartError> {
        self.require_session()?;

        if !self.feedback.confirm(Confirmation::RemoveItem(item)).await {
            debug!(%item, "removal cancelled");

            return Ok(QuantityOutcome::Cancelled);
        }

        self.set_quantity(item, 0).await
    }

    async fn apply(&self, item: ItemId, intent: QuantityIntent) -> Result<QuantityOutcome, CartError> {
        match intent {
            QuantityIntent::Set(quantity) => self.set_quantity(item, quantity).await,
            QuantityIntent::ConfirmRemoval => self.request_removal(item).await,
        }
    }

    fn require_session(&self) -> Result<(), CartError> {
        if self.authenticated {
            Ok(())
        } else {
            debug!("guest session, not changing the cart");

            Err(CartError::NotAuthenticated)
        }
    }

    fn lock(&self) -> MutexGuard<'_, CartState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_quantity(&self, item: ItemId) -> Result<u32, CartError> {
        self.quantity(item).ok_or(CartError::UnknownItem(item))
    }

    fn render(&self, cart: &Cart) {
        let panel = CartPanel::build(cart, &self.formatter, &self.placeholder_image);

        {
            let mut state = self.lock();

            state
                .generations
                .retain(|item| panel.line(*item).is_some());
            state.panel = Some(panel.clone());
        }

        self.view.render(&panel);
        self.view.update_count(panel.total_items);
    }

    /// Start a request: bump the generation and show the requested value.
    fn stage(&self, item: ItemId, quantity: u32) -> (u64, Option<u32>) {
        let (generation, staged) = {
            let mut state = self.lock();
            let generation = state.generations.begin(item);

            let staged = state
                .panel
                .as_mut()
                .and_then(|panel| panel.line_mut(item))
                .map(|line| {
                    let previous = line.quantity;

                    if quantity > 0 {
                        line.quantity = quantity;
                    }

                    line.pending = true;

                    (previous, line.clone())
                });

            (generation, staged)
        };

        match staged {
            Some((previous, line)) => {
                self.view.update_line(&line);

                (generation, Some(previous))
            }
            None => (generation, None),
        }
    }

    fn patch(
        &self,
        item: ItemId,
        generation: u64,
        quantity: u32,
        update: &QuantityUpdated,
    ) -> QuantityOutcome {
        let (line, total) = {
            let mut state = self.lock();

            if !state.generations.is_current(&item, generation) {
                debug!("dropping superseded quantity response");

                return QuantityOutcome::Superseded;
            }

            let Some(panel) = state.panel.as_mut() else {
                return QuantityOutcome::Updated { quantity };
            };

            let total = update
                .cart_total_price
                .map(|price| self.formatter.format(price));

            if let Some(total) = &total {
                panel.total.clone_from(total);
            }

            if let Some(count) = update.cart_total {
                panel.set_total_items(count);
            }

            let line = panel.line_mut(item).map(|line| {
                line.quantity = quantity;
                line.pending = false;

                if let Some(subtotal) = update.item_subtotal {
                    line.line_total = Some(self.formatter.format(subtotal));
                }

                line.clone()
            });

            (line, total)
        };

        if let Some(line) = &line {
            self.view.update_line(line);
        }

        if let Some(total) = &total {
            self.view.update_total(total);
        }

        if let Some(count) = update.cart_total {
            self.view.update_count(count);
        }

        info!(quantity, "quantity updated");

        QuantityOutcome::Updated { quantity }
    }

    /// Put the control back to its pre-request value. Returns `false` when the
    /// response was superseded and nothing was touched.
    fn rollback(&self, item: ItemId, generation: u64, previous: Option<u32>) -> bool {
        let line = {
            let mut state = self.lock();

            if !state.generations.is_current(&item, generation) {
                debug!("dropping superseded failure");

                return false;
            }

            state
                .panel
                .as_mut()
                .and_then(|panel| panel.line_mut(item))
                .map(|line| {
                    if let Some(previous) = previous {
                        line.quantity = previous;
                    }

                    line.pending = false;

                    line.clone()
                })
        };

        if let Some(line) = &line {
            self.view.update_line(line);
        }

        true
    }
}
