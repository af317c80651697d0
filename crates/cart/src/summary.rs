//! Cart totals and the floating cart summary widget.
//!
//! The widget is a read-only projection of the store: it derives the total
//! price and item count on every render and owns no state of its own.

use std::sync::Arc;

use gomarketplace_core::{CartItem, CurrencyCode, Price};
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::debug;

use crate::store::CartStore;

/// Totals derived from a list of line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartSummary {
    /// Sum of unit price times quantity over all lines.
    pub total_price: Decimal,
    /// Sum of quantities over all lines.
    pub item_count: u64,
}

impl CartSummary {
    /// Compute totals for `items`.
    ///
    /// The total price saturates at [`Decimal::MAX`].
    #[must_use]
    pub fn from_items(items: &[CartItem]) -> Self {
        items.iter().fold(Self::default(), |acc, item| Self {
            total_price: acc
                .total_price
                .checked_add(item.line_total())
                .unwrap_or(Decimal::MAX),
            item_count: acc.item_count.saturating_add(u64::from(item.quantity)),
        })
    }

    /// Total price in the given currency.
    #[must_use]
    pub const fn total(&self, currency: CurrencyCode) -> Price {
        Price::new(self.total_price, currency)
    }
}

/// Screens the widget can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Cart detail screen.
    Cart,
}

impl Screen {
    /// Route name registered with the navigator.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Cart => "Cart",
        }
    }
}

/// Navigation service consumed by the widget.
pub trait Navigator {
    /// Open the named screen.
    fn navigate(&self, screen: Screen);
}

impl<T: Navigator + ?Sized> Navigator for Arc<T> {
    fn navigate(&self, screen: Screen) {
        (**self).navigate(screen);
    }
}

impl<T: Navigator + ?Sized> Navigator for &T {
    fn navigate(&self, screen: Screen) {
        (**self).navigate(screen);
    }
}

/// Display data for the floating cart button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatingCartView {
    /// Item count text, e.g. "3 items".
    pub item_count_label: String,
    /// Formatted total, e.g. "$25.00".
    pub total_price_label: String,
}

/// Floating cart summary shown over product listings.
///
/// Pressing it opens the cart screen.
pub struct FloatingCart<N> {
    products: watch::Receiver<Vec<CartItem>>,
    navigator: N,
    currency: CurrencyCode,
}

impl<N: Navigator> FloatingCart<N> {
    /// Attach a widget to `store`.
    #[must_use]
    pub fn new(store: &CartStore, navigator: N, currency: CurrencyCode) -> Self {
        Self {
            products: store.subscribe(),
            navigator,
            currency,
        }
    }

    /// Current totals.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::from_items(&self.products.borrow())
    }

    /// Render the current totals.
    #[must_use]
    pub fn view(&self) -> FloatingCartView {
        let summary = self.summary();
        FloatingCartView {
            item_count_label: item_count_label(summary.item_count),
            total_price_label: summary.total(self.currency).display(),
        }
    }

    /// Handle a press on the widget.
    pub fn press(&self) {
        debug!(screen = Screen::Cart.name(), "Floating cart pressed");
        self.navigator.navigate(Screen::Cart);
    }

    /// Wait for the cart to change, then return the new view.
    ///
    /// Returns `None` once the store has been dropped.
    pub async fn next_view(&mut self) -> Option<FloatingCartView> {
        self.products.changed().await.ok()?;
        Some(self.view())
    }
}

fn item_count_label(count: u64) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}
