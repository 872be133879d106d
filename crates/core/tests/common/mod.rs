//! Shared fakes for the integration tests.

#![expect(dead_code, reason = "each test binary uses a different subset")]

use std::{
    collections::VecDeque,
    str::FromStr,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::Notify;

use storefront::{
    api::{
        AddToCart, AddedToCart, ApiError, CartApi, QuantityUpdated, UpdateQuantity, VariantApi,
        VariantQuery, VariantRecord,
    },
    cart::{CartLine, CartPanel, CartView, models::Cart},
    config::StorefrontConfig,
    feedback::{Confirmation, Feedback, Notice},
};

/// What the controller asked the view to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Render(CartPanel),
    Line(CartLine),
    Total(String),
    Count(u32),
}

#[derive(Debug, Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn renders(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, ViewEvent::Render(_)))
            .count()
    }

    pub fn last_count(&self) -> Option<u32> {
        self.events().iter().rev().find_map(|event| match event {
            ViewEvent::Count(count) => Some(*count),
            _ => None,
        })
    }

    pub fn last_total(&self) -> Option<String> {
        self.events().iter().rev().find_map(|event| match event {
            ViewEvent::Total(total) => Some(total.clone()),
            ViewEvent::Render(panel) => Some(panel.total.clone()),
            _ => None,
        })
    }

    fn push(&self, event: ViewEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl CartView for RecordingView {
    fn render(&self, panel: &CartPanel) {
        self.push(ViewEvent::Render(panel.clone()));
    }

    fn update_line(&self, line: &CartLine) {
        self.push(ViewEvent::Line(line.clone()));
    }

    fn update_total(&self, total: &str) {
        self.push(ViewEvent::Total(total.to_string()));
    }

    fn update_count(&self, count: u32) {
        self.push(ViewEvent::Count(count));
    }
}

/// Answers confirmations from a script and records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedFeedback {
    answers: Mutex<VecDeque<bool>>,
    pub notices: Mutex<Vec<Notice>>,
    pub confirmations: Mutex<Vec<Confirmation>>,
    pub redirects: Mutex<Vec<String>>,
}

impl ScriptedFeedback {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            ..Self::default()
        }
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn confirmations(&self) -> Vec<Confirmation> {
        self.confirmations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Feedback for ScriptedFeedback {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }

    async fn confirm(&self, confirmation: Confirmation) -> bool {
        self.confirmations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(confirmation);

        self.answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(false)
    }

    fn redirect(&self, location: &str) {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(location.to_string());
    }
}

/// Cart server whose first quantity update waits until released.
#[derive(Debug)]
pub struct GatedCartApi {
    cart: Cart,
    gate: Notify,
    updates: AtomicUsize,
}

impl GatedCartApi {
    pub fn new(cart: Cart) -> Self {
        Self {
            cart,
            gate: Notify::new(),
            updates: AtomicUsize::new(0),
        }
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl CartApi for GatedCartApi {
    async fn list_cart(&self) -> Result<Cart, ApiError> {
        Ok(self.cart.clone())
    }

    async fn add_item(&self, _request: AddToCart) -> Result<AddedToCart, ApiError> {
        Err(ApiError::Rejected("not supported".to_string()))
    }

    async fn update_quantity(&self, request: UpdateQuantity) -> Result<QuantityUpdated, ApiError> {
        if self.updates.fetch_add(1, Ordering::SeqCst) == 0 {
            self.gate.notified().await;
        }

        let subtotal = Decimal::from(request.quantity) * Decimal::from(10);

        Ok(QuantityUpdated {
            message: "Cart updated".to_string(),
            item_subtotal: Some(subtotal),
            cart_total_price: Some(subtotal),
            cart_total: Some(request.quantity),
        })
    }
}

/// Variant server whose first lookup waits until released.
#[derive(Debug, Default)]
pub struct GatedVariantApi {
    gate: Notify,
    lookups: AtomicUsize,
}

impl GatedVariantApi {
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl VariantApi for GatedVariantApi {
    async fn find_variant(&self, query: VariantQuery) -> Result<Option<VariantRecord>, ApiError> {
        let lookup = self.lookups.fetch_add(1, Ordering::SeqCst);

        if lookup == 0 {
            self.gate.notified().await;
        }

        Ok(Some(VariantRecord {
            id: u64::try_from(lookup + 1).unwrap_or(u64::MAX).into(),
            selling_price: Decimal::from(25),
            stock: 5,
            sku: Some(format!("{}-{}", query.size, query.color)),
        }))
    }
}

pub fn config(authenticated: bool) -> StorefrontConfig {
    StorefrontConfig {
        base_url: "http://shop.test".to_string(),
        authenticated,
        ..StorefrontConfig::default()
    }
}

pub fn decimal(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap_or_default()
}

/// The two-unit T-shirt cart.
pub fn tshirt_cart() -> Cart {
    cart_json(
        r#"{
            "total_items": 2,
            "total_price": "39.98",
            "items": [{
                "id": 1,
                "quantity": 2,
                "product": {"name": "T-Shirt", "selling_price": "19.99", "discount_percentage": 0}
            }]
        }"#,
    )
}

/// The T-shirt cart with a single unit.
pub fn single_tshirt_cart() -> Cart {
    cart_json(
        r#"{
            "total_items": 1,
            "total_price": "19.99",
            "items": [{
                "id": 1,
                "quantity": 1,
                "product": {"name": "T-Shirt", "selling_price": "19.99", "discount_percentage": 0}
            }]
        }"#,
    )
}

pub fn cart_json(json: &str) -> Cart {
    serde_json::from_str(json).unwrap_or_default()
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
