//! Read-only cart commands.

use gomarketplace_cart::{CartStore, CartSummary};
use gomarketplace_core::{CartItem, CurrencyCode, Price};

use super::CliError;

/// Print the cart's line items.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be serialized.
#[allow(clippy::print_stdout)]
pub fn list(store: &CartStore, json: bool) -> Result<(), CliError> {
    let items = store.products();
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        print!("{}", render_table(&items));
    }
    Ok(())
}

/// Print total price and item count.
#[allow(clippy::print_stdout)]
pub fn summary(store: &CartStore, currency: CurrencyCode) {
    println!("{}", render_summary(&store.summary(), currency));
}

fn render_table(items: &[CartItem]) -> String {
    if items.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let id_width = items
        .iter()
        .map(|item| item.id.as_str().len())
        .max()
        .unwrap_or(0)
        .max("ID".len());

    let mut out = format!("{:<id_width$}  {:>4}  {:>10}  TITLE\n", "ID", "QTY", "PRICE");
    for item in items {
        out.push_str(&format!(
            "{:<id_width$}  {:>4}  {:>10.2}  {}\n",
            item.id.as_str(),
            item.quantity,
            item.price,
            item.title
        ));
    }
    out
}

fn render_summary(summary: &CartSummary, currency: CurrencyCode) -> String {
    format!(
        "{} item(s), total {}",
        summary.item_count,
        Price::new(summary.total_price, currency)
    )
}
