//! Cart pricing: derivation of the four price fields from the line items.
//!
//! [`recompute`] is the single place prices come from. It is pure,
//! synchronous, and runs to completion on every cart mutation; callers
//! persist the cart afterwards. The rounding order matters: tax is
//! computed from the already-rounded items price, not the raw sum of line
//! totals, which can move the tax by a cent at midpoints. Downstream
//! consumers (order placement, checkout display) read the resulting fields
//! verbatim, so the order is part of the contract.

use rust_decimal::Decimal;

use crate::types::cart::{Cart, CartLine};
use crate::types::money;

/// Items-price threshold above which shipping is free. Strictly above: an
/// items price of exactly 100.00 still pays the flat fee.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Flat shipping fee charged at or below the free-shipping threshold.
pub const FLAT_SHIPPING_FEE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Tax rate applied to the rounded items price (GST 18%).
pub const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Recompute the derived price fields from the cart's line items.
///
/// An empty cart resolves every field to 0.00; this never fails.
pub fn recompute(cart: &mut Cart) {
    if cart.items.is_empty() {
        let zero = money::round2(Decimal::ZERO);
        cart.items_price = zero;
        cart.shipping_price = zero;
        cart.tax_price = zero;
        cart.total_price = zero;
        return;
    }

    let raw_items = cart
        .items
        .iter()
        .fold(Decimal::ZERO, |acc, line| acc + CartLine::line_total(line));
    let items_price = money::round2(raw_items);

    let shipping_price = money::round2(if items_price > FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        FLAT_SHIPPING_FEE
    });

    let tax_price = money::round2(items_price * TAX_RATE);

    // All three terms carry two fraction digits, so the sum is exact.
    let total_price = money::round2(items_price + shipping_price + tax_price);

    cart.items_price = items_price;
    cart.shipping_price = shipping_price;
    cart.tax_price = tax_price;
    cart.total_price = total_price;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::id::ProductId;

    fn line(product_id: &str, price: &str, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(product_id),
            name: format!("product {product_id}"),
            image: format!("/images/{product_id}.jpg"),
            price: price.parse().unwrap(),
            quantity,
        }
    }

    fn cart_with(lines: Vec<CartLine>) -> Cart {
        let mut cart = Cart::empty();
        cart.items = lines;
        recompute(&mut cart);
        cart
    }

    fn prices(cart: &Cart) -> (String, String, String, String) {
        (
            cart.items_price.to_string(),
            cart.shipping_price.to_string(),
            cart.tax_price.to_string(),
            cart.total_price.to_string(),
        )
    }

    #[test]
    fn test_empty_cart_resolves_all_fields_to_zero() {
        let cart = cart_with(Vec::new());
        assert_eq!(
            prices(&cart),
            (
                "0.00".to_owned(),
                "0.00".to_owned(),
                "0.00".to_owned(),
                "0.00".to_owned()
            )
        );
    }

    #[test]
    fn test_items_price_sums_over_lines() {
        let cart = cart_with(vec![line("a", "19.99", 2), line("b", "5.50", 3)]);
        // 39.98 + 16.50
        assert_eq!(cart.items_price.to_string(), "56.48");
    }

    #[test]
    fn test_flat_fee_at_threshold_boundary() {
        // itemsPrice == 100.00 is NOT above the threshold
        let cart = cart_with(vec![line("a", "50", 2)]);
        assert_eq!(
            prices(&cart),
            (
                "100.00".to_owned(),
                "10.00".to_owned(),
                "18.00".to_owned(),
                "128.00".to_owned()
            )
        );
    }

    #[test]
    fn test_free_shipping_above_threshold() {
        let cart = cart_with(vec![line("a", "60", 2)]);
        assert_eq!(
            prices(&cart),
            (
                "120.00".to_owned(),
                "0.00".to_owned(),
                "21.60".to_owned(),
                "141.60".to_owned()
            )
        );
    }

    #[test]
    fn test_one_cent_over_threshold_ships_free() {
        let cart = cart_with(vec![line("a", "100.01", 1)]);
        assert_eq!(cart.shipping_price.to_string(), "0.00");
    }

    #[test]
    fn test_tax_uses_rounded_items_price() {
        // Raw sum 27.8055 rounds to 27.81; 18% of 27.81 is 5.0058 -> 5.01,
        // while 18% of the raw sum would round to 5.00. The rounded-first
        // order is the contract.
        let cart = cart_with(vec![line("a", "9.2685", 3)]);
        assert_eq!(cart.items_price.to_string(), "27.81");
        assert_eq!(cart.tax_price.to_string(), "5.01");
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        let cart = cart_with(vec![line("a", "33.33", 1), line("b", "7.77", 4)]);
        assert_eq!(
            cart.total_price,
            cart.items_price + cart.shipping_price + cart.tax_price
        );
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut cart = cart_with(vec![line("a", "19.99", 2), line("b", "250", 1)]);
        let first = prices(&cart);
        recompute(&mut cart);
        assert_eq!(prices(&cart), first);
    }

    #[test]
    fn test_grouped_display_stays_parseable() {
        let cart = cart_with(vec![line("a", "99999.99", 2)]);
        let shown = money::format_grouped(cart.items_price);
        assert_eq!(shown, "1,99,999.98");
        assert_eq!(money::parse_amount(&shown).unwrap(), cart.items_price);
    }
}
