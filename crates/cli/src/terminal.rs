//! Terminal rendering of the cart panel, notices and prompts.

use std::{
    fmt::Write as _,
    io::{self, Write},
    sync::{Mutex, PoisonError},
};

use async_trait::async_trait;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use storefront::{
    cart::{CartLine, CartPanel, CartView},
    feedback::{Confirmation, Feedback, Notice, NoticeKind},
    variants::{VariantDisplay, display::MessageTone},
};

const STRIKE: &str = "\x1b[9m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render the whole panel as a table followed by its total.
#[must_use]
pub fn render_panel(panel: &CartPanel) -> String {
    let mut text = format!("{BOLD}Cart {}{RESET}\n", panel.header);

    if panel.is_empty() {
        text.push_str("Your cart is empty\n");
    } else {
        let mut builder = Builder::default();

        builder.push_record(["#", "Item", "Variant", "Qty", "Price"]);

        for line in &panel.lines {
            builder.push_record([
                line.item.to_string(),
                line.name.clone(),
                line.variant.clone().unwrap_or_default(),
                line.quantity.to_string(),
                price_cell(line),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..5), Alignment::right());

        text.push_str(&table.to_string());
        text.push('\n');
    }

    // Writing to a String cannot fail.
    _ = writeln!(text, "{BOLD}Total: {}{RESET}", panel.total);

    text
}

/// One-line summary of a patched cart line.
#[must_use]
pub fn render_line(line: &CartLine) -> String {
    let pending = if line.pending { " (updating)" } else { "" };

    format!(
        "#{} {} x{} {}{pending}",
        line.item,
        line.name,
        line.quantity,
        price_cell(line)
    )
}

/// Picker message, or price and stock, for a variant selection.
#[must_use]
pub fn render_variant(display: &VariantDisplay) -> String {
    let mut text = String::new();

    if let Some(message) = &display.message {
        let marker = match message.tone {
            MessageTone::Info => "i",
            MessageTone::Pending => "…",
            MessageTone::Error => "✖",
        };

        _ = writeln!(text, "{marker} {}", message.text);
    }

    if let Some(details) = &display.details {
        _ = writeln!(text, "{}  [{}]", details.price, details.stock);
    }

    let purchase = if display.purchase_enabled {
        "enabled"
    } else {
        "disabled"
    };

    _ = writeln!(text, "Add to cart / Order now: {purchase}");

    text
}

fn price_cell(line: &CartLine) -> String {
    match (&line.original_price, &line.line_total) {
        (Some(original), None) => format!("{} {STRIKE}{original}{RESET}", line.unit_price),
        _ => line.price_text().to_string(),
    }
}

/// Whether a typed answer accepts a prompt.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Writes output lines, logging instead of failing when the sink is gone.
#[derive(Debug)]
struct Sink<W> {
    out: Mutex<W>,
}

impl<W: Write> Sink<W> {
    fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn emit(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);

        if let Err(error) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            warn!("failed to write to terminal: {error}");
        }
    }

    fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

/// [`CartView`] that prints the panel as a table.
#[derive(Debug)]
pub struct TableView<W> {
    sink: Sink<W>,
}

impl<W: Write> TableView<W> {
    /// Print to the given writer.
    pub fn new(out: W) -> Self {
        Self {
            sink: Sink::new(out),
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }
}

impl TableView<io::Stdout> {
    /// Print to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> CartView for TableView<W> {
    fn render(&self, panel: &CartPanel) {
        self.sink.emit(&render_panel(panel));
    }

    fn update_line(&self, line: &CartLine) {
        self.sink.emit(&format!("{}\n", render_line(line)));
    }

    fn update_total(&self, total: &str) {
        self.sink.emit(&format!("{BOLD}Total: {total}{RESET}\n"));
    }

    fn update_count(&self, count: u32) {
        self.sink.emit(&format!("Cart ({count} Items)\n"));
    }
}

/// [`Feedback`] that prints notices and reads answers from stdin.
#[derive(Debug)]
pub struct TerminalFeedback<W> {
    sink: Sink<W>,
    assume_yes: bool,
}

impl<W: Write> TerminalFeedback<W> {
    /// Print to the given writer. With `assume_yes` every prompt is accepted without reading.
    pub fn new(out: W, assume_yes: bool) -> Self {
        Self {
            sink: Sink::new(out),
            assume_yes,
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }
}

impl TerminalFeedback<io::Stdout> {
    /// Print to stdout.
    #[must_use]
    pub fn stdout(assume_yes: bool) -> Self {
        Self::new(io::stdout(), assume_yes)
    }
}

#[async_trait]
impl<W: Write + Send> Feedback for TerminalFeedback<W> {
    fn notify(&self, notice: Notice) {
        let marker = match notice.kind {
            NoticeKind::Success => "✔",
            NoticeKind::Error => "✖",
            NoticeKind::Warning => "!",
        };

        self.sink
            .emit(&format!("{marker} {} {}\n", notice.title, notice.text));
    }

    async fn confirm(&self, confirmation: Confirmation) -> bool {
        self.sink.emit(&format!(
            "{BOLD}{}{RESET} {} [{} / {}] ",
            confirmation.title(),
            confirmation.text(),
            confirmation.confirm_label(),
            confirmation.cancel_label()
        ));

        if self.assume_yes {
            self.sink.emit("yes\n");

            return true;
        }

        let mut answer = String::new();

        match BufReader::new(tokio::io::stdin())
            .read_line(&mut answer)
            .await
        {
            Ok(_) => is_affirmative(&answer),
            Err(error) => {
                warn!("failed to read answer: {error}");

                false
            }
        }
    }

    fn redirect(&self, location: &str) {
        self.sink.emit(&format!("Continue at {location}\n"));
    }
}
