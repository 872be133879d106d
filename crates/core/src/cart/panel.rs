//! Cart panel render model and the surface it is drawn on.

use crate::{
    cart::models::{Cart, CartItem},
    ids::ItemId,
    prices::PriceFormatter,
};

/// Render model for the cart panel.
///
/// Always rebuilt from a server payload; nothing here is derived from a
/// previous render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPanel {
    /// Header text, e.g. `(2 Items)`.
    pub header: String,

    /// Server-reported item count.
    pub total_items: u32,

    /// Formatted grand total.
    pub total: String,

    /// Lines in server order.
    pub lines: Vec<CartLine>,
}

/// Render model for one cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Item the line's controls act on.
    pub item: ItemId,

    /// Product name.
    pub name: String,

    /// Variant label, e.g. `M / Red`.
    pub variant: Option<String>,

    /// Image URL, or the placeholder.
    pub image_url: String,

    /// Image alt text.
    pub image_alt: String,

    /// Value shown in the quantity control.
    pub quantity: u32,

    /// Formatted unit price.
    pub unit_price: String,

    /// Formatted pre-discount price, when discounted.
    pub original_price: Option<String>,

    /// Formatted line total, once the server has reported one.
    pub line_total: Option<String>,

    /// A quantity change for this line is awaiting the server.
    pub pending: bool,
}

impl CartPanel {
    /// Build the panel for a cart payload.
    #[must_use]
    pub fn build(cart: &Cart, formatter: &PriceFormatter, placeholder_image: &str) -> Self {
        Self {
            header: items_header(cart.total_items),
            total_items: cart.total_items,
            total: formatter.format(cart.total_price),
            lines: cart
                .items
                .iter()
                .map(|item| CartLine::build(item, formatter, placeholder_image))
                .collect(),
        }
    }

    /// Find a line by item.
    #[must_use]
    pub fn line(&self, item: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item == item)
    }

    pub(crate) fn line_mut(&mut self, item: ItemId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.item == item)
    }

    pub(crate) fn set_total_items(&mut self, total_items: u32) {
        self.total_items = total_items;
        self.header = items_header(total_items);
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl CartLine {
    fn build(item: &CartItem, formatter: &PriceFormatter, placeholder_image: &str) -> Self {
        let product = &item.product;

        let (image_url, image_alt) = match &product.primary_image {
            Some(image) => (image.image.clone(), product.name.clone()),
            None => (placeholder_image.to_string(), "Default Image".to_string()),
        };

        let original_price = product
            .original_price
            .filter(|_| product.is_discounted())
            .map(|price| formatter.format(price));

        Self {
            item: item.id,
            name: product.name.clone(),
            variant: item.variant.as_ref().and_then(|variant| variant.label()),
            image_url,
            image_alt,
            quantity: item.quantity,
            unit_price: formatter.format(product.selling_price),
            original_price,
            line_total: None,
            pending: false,
        }
    }

    /// Price text the line currently shows: the line total once known, else the unit price.
    #[must_use]
    pub fn price_text(&self) -> &str {
        self.line_total.as_deref().unwrap_or(&self.unit_price)
    }
}

fn items_header(total_items: u32) -> String {
    format!("({total_items} Items)")
}

/// The surface the cart is drawn on.
///
/// `render` replaces everything; the `update_*` methods patch one piece in place.
pub trait CartView: Send + Sync {
    /// Replace the whole panel.
    fn render(&self, panel: &CartPanel);

    /// Redraw a single line (quantity control and price).
    fn update_line(&self, line: &CartLine);

    /// Replace the grand total text.
    fn update_total(&self, total: &str);

    /// Update every cart-count indicator.
    fn update_count(&self, count: u32);
}
