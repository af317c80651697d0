//! Cart line item types.
//!
//! The serialized field names (`id`, `title`, `image_url`, `price`,
//! `quantity`) are the persisted snapshot format, so renaming a field breaks
//! carts saved by earlier sessions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A product being added to the cart, before it has a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCartItem {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    /// Unit price, written as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl NewCartItem {
    /// Create a new cart item description.
    #[must_use]
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }

    /// Turn this into a line item with a quantity of one.
    #[must_use]
    pub fn into_cart_item(self) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity: 1,
        }
    }
}

/// One product entry in the cart.
///
/// `quantity` is at least 1 for every item held by a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    /// Unit price, written as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

impl CartItem {
    /// Price of this line: unit price times quantity.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(Decimal::MAX)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: &str, price: Decimal, quantity: u32) -> CartItem {
        CartItem {
            id: ProductId::parse(id).unwrap(),
            title: format!("Product {id}"),
            image_url: format!("https://cdn.example.com/{id}.png"),
            price,
            quantity,
        }
    }

    #[test]
    fn test_new_item_starts_at_quantity_one() {
        let new = NewCartItem::new(
            ProductId::parse("a").unwrap(),
            "Mug",
            "https://cdn.example.com/mug.png",
            Decimal::new(1250, 2),
        );
        let line = new.into_cart_item();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.title, "Mug");
    }

    #[test]
    fn test_line_total() {
        let line = item("a", Decimal::new(1999, 2), 3);
        assert_eq!(line.line_total(), Decimal::new(5997, 2));
    }

    #[test]
    fn test_line_total_saturates() {
        let line = item("a", Decimal::MAX, 2);
        assert_eq!(line.line_total(), Decimal::MAX);
    }

    #[test]
    fn test_deserializes_snapshot_with_numeric_price() {
        let json = r#"{"id":"a","title":"Mug","image_url":"u","price":12.5,"quantity":2}"#;
        let line: CartItem = serde_json::from_str(json).unwrap();
        assert_eq!(line.price, Decimal::new(125, 1));
        assert_eq!(line.quantity, 2);

        let json = r#"{"id":"b","title":"Cap","image_url":"u","price":10,"quantity":1}"#;
        let line: CartItem = serde_json::from_str(json).unwrap();
        assert_eq!(line.price, Decimal::from(10));
    }

    #[test]
    fn test_serializes_price_as_number() {
        let line = item("a", Decimal::new(5, 0), 1);
        let value = serde_json::to_value(&line).unwrap();
        assert!(value["price"].is_number());
        assert_eq!(value["id"], "a");
    }
}
