//! Variant selector.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::{
    api::{VariantApi, VariantQuery, VariantRecord},
    ids::ProductId,
    variants::state::{ResolvedVariant, VariantAttribute, VariantChoice, VariantState},
};

#[derive(Debug, Default)]
struct Selection {
    choice: VariantChoice,
    generation: u64,
}

/// Owns one product's size/color selection and resolves it against the server.
///
/// Every change publishes a new [`VariantState`] to subscribers. Lookups that
/// settle after a newer change are dropped.
pub struct VariantSelector {
    api: Arc<dyn VariantApi>,
    product: ProductId,
    selection: Mutex<Selection>,
    state: watch::Sender<VariantState>,
}

impl std::fmt::Debug for VariantSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantSelector")
            .field("product", &self.product)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl VariantSelector {
    /// Create a selector for a product, starting with nothing chosen.
    #[must_use]
    pub fn new(product: ProductId, api: Arc<dyn VariantApi>) -> Self {
        let (state, _) = watch::channel(VariantState::default());

        Self {
            api,
            product,
            selection: Mutex::new(Selection::default()),
            state,
        }
    }

    /// Product this selector resolves variants for.
    #[must_use]
    pub fn product(&self) -> ProductId {
        self.product
    }

    /// Latest published state.
    #[must_use]
    pub fn state(&self) -> VariantState {
        self.state.borrow().clone()
    }

    /// Receive every state change from now on.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<VariantState> {
        self.state.subscribe()
    }

    /// Choose a size. See [`Self::select`].
    pub async fn select_size(&self, size: &str) -> VariantState {
        self.select(VariantAttribute::Size, size).await
    }

    /// Choose a color. See [`Self::select`].
    pub async fn select_color(&self, color: &str) -> VariantState {
        self.select(VariantAttribute::Color, color).await
    }

    /// Change one field and re-evaluate the whole selection.
    ///
    /// Any previously resolved variant is discarded immediately. With both
    /// fields set, a pending state is published and the server is asked for a
    /// match; otherwise the selection is incomplete. Returns the state
    /// published once this change settles, which is the newer state if this
    /// lookup was superseded.
    #[instrument(skip(self), fields(product = %self.product))]
    pub async fn select(&self, attribute: VariantAttribute, value: &str) -> VariantState {
        let (generation, query) = {
            let mut selection = self.lock();

            selection.choice.set(attribute, value);
            selection.generation += 1;

            let Some((size, color)) = selection.choice.complete() else {
                let state = VariantState::Incomplete(selection.choice.clone());

                self.state.send_replace(state.clone());

                return state;
            };

            let query = VariantQuery {
                product_id: self.product,
                size: size.to_string(),
                color: color.to_string(),
            };

            self.state
                .send_replace(VariantState::Pending(selection.choice.clone()));

            (selection.generation, query)
        };

        let found = self.api.find_variant(query).await;

        let selection = self.lock();

        if selection.generation != generation {
            debug!("dropping superseded variant lookup");

            return self.state();
        }

        let state = resolve(selection.choice.clone(), found.unwrap_or_else(|error| {
            warn!("variant lookup failed: {error}");

            None
        }));

        self.state.send_replace(state.clone());

        state
    }

    fn lock(&self) -> MutexGuard<'_, Selection> {
        self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn resolve(choice: VariantChoice, record: Option<VariantRecord>) -> VariantState {
    let Some(record) = record else {
        return VariantState::Unavailable(choice);
    };

    let variant = ResolvedVariant {
        id: record.id,
        price: record.selling_price,
        stock: record.stock,
        sku: record.sku,
    };

    if variant.stock > 0 {
        VariantState::Available(choice, variant)
    } else {
        VariantState::OutOfStock(choice, variant)
    }
}
