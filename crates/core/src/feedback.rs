//! Shopper-facing alerts and confirmation prompts.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;

use crate::{api::ApiError, ids::ItemId};

/// Text shown for any failure that is not a server-explained rejection.
pub const GENERIC_FAILURE: &str = "Something went wrong! Please try again.";

/// Warning shown when a variant product is added without a resolved variant.
pub const SELECT_VARIANT_WARNING: &str = "Please select size and color options";

/// How long success toasts stay visible.
const TOAST_DURATION: Duration = Duration::from_millis(1_500);

/// Tone of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Completed action.
    Success,

    /// Failed action.
    Error,

    /// Action refused before reaching the server.
    Warning,
}

/// A one-way message to the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Tone.
    pub kind: NoticeKind,

    /// Short heading.
    pub title: String,

    /// Body text.
    pub text: String,

    /// Auto-dismiss delay; `None` waits for the shopper.
    pub dismiss_after: Option<Duration>,
}

impl Notice {
    /// Transient confirmation of a completed cart change.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: "Success!".to_string(),
            text: text.into(),
            dismiss_after: Some(TOAST_DURATION),
        }
    }

    /// Error shown for a failed request.
    ///
    /// Server rejections are shown verbatim; anything else collapses to
    /// [`GENERIC_FAILURE`].
    #[must_use]
    pub fn failure(error: &ApiError) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Oops...".to_string(),
            text: error.rejection().unwrap_or(GENERIC_FAILURE).to_string(),
            dismiss_after: None,
        }
    }

    /// Warning for an action that cannot proceed yet.
    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            title: "Hold on".to_string(),
            text: text.into(),
            dismiss_after: None,
        }
    }
}

/// A proceed/cancel question. Only one is meaningful at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// Remove an item from the cart.
    RemoveItem(ItemId),

    /// Guest tried to add to cart; offer to log in.
    Login,
}

impl Confirmation {
    /// Dialog heading.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::RemoveItem(_) => "Remove Item?",
            Self::Login => "Please Login",
        }
    }

    /// Dialog body.
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::RemoveItem(_) => "Do you want to remove this item from cart?",
            Self::Login => "You need to login first to add items to cart",
        }
    }

    /// Label of the proceed control.
    #[must_use]
    pub fn confirm_label(self) -> &'static str {
        match self {
            Self::RemoveItem(_) => "Yes, remove it!",
            Self::Login => "Login",
        }
    }

    /// Label of the cancel control.
    #[must_use]
    pub fn cancel_label(self) -> &'static str {
        "Cancel"
    }
}

/// The modal and alert surface.
#[automock]
#[async_trait]
pub trait Feedback: Send + Sync {
    /// Show a notice.
    fn notify(&self, notice: Notice);

    /// Ask the shopper to proceed or cancel; resolves to `true` on proceed.
    async fn confirm(&self, confirmation: Confirmation) -> bool;

    /// Send the shopper elsewhere, e.g. to the login page.
    fn redirect(&self, location: &str);
}
