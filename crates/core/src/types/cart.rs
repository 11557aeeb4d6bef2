//! The cart data model and its mutation operations.
//!
//! A [`Cart`] is an explicitly owned value: callers hold it, mutate it
//! through the methods here, and persist the result. Every mutation ends by
//! recomputing the four derived price fields, so a cart in hand always
//! satisfies the invariant that `items_price`, `shipping_price`,
//! `tax_price`, and `total_price` are derived from `items` and nothing
//! else.
//!
//! Prices are exact [`Decimal`] values internally and serialize as plain
//! two-fraction-digit strings; grouped display strings are a presentation
//! concern and live with the code that renders them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing;
use crate::types::id::ProductId;
use crate::types::money;
use crate::types::payment::PaymentMethod;

/// One product entry in a cart, with quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Catalog ID of the product.
    pub product_id: ProductId,
    /// Product name at the time it was added.
    pub name: String,
    /// Product image reference.
    pub image: String,
    /// Unit price in the currency's standard unit.
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Number of units. Mutation operations keep this positive; a quantity
    /// of zero removes the line instead.
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Shipping destination collected during checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// A customer's cart: ordered line items plus the derived price fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Ordered line items.
    pub items: Vec<CartLine>,
    /// Sum of line totals, rounded to two fraction digits.
    #[serde(with = "rust_decimal::serde::str")]
    pub items_price: Decimal,
    /// Flat fee below the free-shipping threshold, zero above it.
    #[serde(with = "rust_decimal::serde::str")]
    pub shipping_price: Decimal,
    /// Tax on the rounded items price.
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_price: Decimal,
    /// Items + shipping + tax.
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    /// Shipping destination, once the customer has provided one.
    pub shipping_address: Option<ShippingAddress>,
    /// Selected payment method.
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl Cart {
    /// Create an empty cart with all price fields at zero.
    #[must_use]
    pub fn empty() -> Self {
        let zero = money::round2(Decimal::ZERO);
        Self {
            items: Vec::new(),
            items_price: zero,
            shipping_price: zero,
            tax_price: zero,
            total_price: zero,
            shipping_address: None,
            payment_method: PaymentMethod::default(),
        }
    }

    /// Total number of units across all lines, for the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Add a line to the cart.
    ///
    /// If a line for the same product already exists it is replaced wholesale
    /// (name, image, price, and quantity all take the incoming values), so
    /// adding is also how a product's quantity gets restated from a product
    /// page.
    pub fn add_item(&mut self, line: CartLine) {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.product_id == line.product_id)
        {
            Some(existing) => *existing = line,
            None => self.items.push(line),
        }
        pricing::recompute(self);
    }

    /// Set the quantity of an existing line. A quantity of zero removes the
    /// line. Returns `false` if no line matches the product.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.product_id == *product_id)
        else {
            return false;
        };

        line.quantity = quantity;
        pricing::recompute(self);
        true
    }

    /// Remove the line for a product. Returns `false` if no line matched.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.product_id != *product_id);
        let removed = self.items.len() < before;
        if removed {
            pricing::recompute(self);
        }
        removed
    }

    /// Empty the line items after a successful order. The shipping address
    /// and payment method survive for the next order.
    pub fn clear_items(&mut self) {
        self.items.clear();
        pricing::recompute(self);
    }

    /// Record the shipping destination.
    pub fn set_shipping_address(&mut self, address: ShippingAddress) {
        self.shipping_address = Some(address);
        pricing::recompute(self);
    }

    /// Record the payment method.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
        pricing::recompute(self);
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(product_id: &str, price: &str, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(product_id),
            name: format!("product {product_id}"),
            image: format!("/images/{product_id}.jpg"),
            price: price.parse().unwrap(),
            quantity,
        }
    }

    #[test]
    fn test_empty_cart_is_all_zeros() {
        let cart = Cart::empty();
        assert!(cart.items.is_empty());
        assert_eq!(cart.items_price.to_string(), "0.00");
        assert_eq!(cart.shipping_price.to_string(), "0.00");
        assert_eq!(cart.tax_price.to_string(), "0.00");
        assert_eq!(cart.total_price.to_string(), "0.00");
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_item_appends_and_reprices() {
        let mut cart = Cart::empty();
        cart.add_item(line("a", "50", 2));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items_price.to_string(), "100.00");
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_item_replaces_existing_line() {
        let mut cart = Cart::empty();
        cart.add_item(line("a", "50", 2));
        cart.add_item(line("a", "55", 3));

        assert_eq!(cart.items.len(), 1);
        let only = cart.items.first().unwrap();
        assert_eq!(only.quantity, 3);
        assert_eq!(only.price.to_string(), "55");
        assert_eq!(cart.items_price.to_string(), "165.00");
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::empty();
        cart.add_item(line("a", "10", 1));

        assert!(cart.set_quantity(&ProductId::new("a"), 4));
        assert_eq!(cart.items_price.to_string(), "40.00");

        assert!(!cart.set_quantity(&ProductId::new("missing"), 2));
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::empty();
        cart.add_item(line("a", "10", 1));

        assert!(cart.set_quantity(&ProductId::new("a"), 0));
        assert!(cart.items.is_empty());
        assert_eq!(cart.total_price.to_string(), "0.00");
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::empty();
        cart.add_item(line("a", "10", 1));
        cart.add_item(line("b", "20", 1));

        assert!(cart.remove_item(&ProductId::new("a")));
        assert!(!cart.remove_item(&ProductId::new("a")));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items_price.to_string(), "20.00");
    }

    #[test]
    fn test_clear_items_keeps_checkout_details() {
        let mut cart = Cart::empty();
        cart.add_item(line("a", "60", 2));
        cart.set_shipping_address(ShippingAddress {
            address: "12 MG Road".to_owned(),
            city: "Bengaluru".to_owned(),
            postal_code: "560001".to_owned(),
            country: "India".to_owned(),
        });
        cart.set_payment_method(PaymentMethod::PayPal);

        cart.clear_items();

        assert!(cart.items.is_empty());
        assert_eq!(cart.total_price.to_string(), "0.00");
        assert!(cart.shipping_address.is_some());
        assert_eq!(cart.payment_method, PaymentMethod::PayPal);
    }

    #[test]
    fn test_snapshot_round_trip_preserves_prices_as_strings() {
        let mut cart = Cart::empty();
        cart.add_item(line("a", "60", 2));

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["itemsPrice"], "120.00");
        assert_eq!(json["shippingPrice"], "0.00");
        assert_eq!(json["taxPrice"], "21.60");
        assert_eq!(json["totalPrice"], "141.60");

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }
}
