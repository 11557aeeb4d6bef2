//! Cart route handlers.
//!
//! The cart lives in the session; every mutation loads the snapshot,
//! applies the change (which reprices the cart), and writes the snapshot
//! back before responding. Product data for add/update always comes from
//! the catalog, never from the request body.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use kirana_core::{Cart, CartLine, PaymentMethod, ProductId, ShippingAddress, money};

use crate::error::{AppError, Result};
use crate::services::cart as cart_store;
use crate::services::catalog::Product;
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Cart display data.
///
/// Price strings carry grouping separators; this is the presentation
/// boundary where display formatting happens.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub items_price: String,
    pub shipping_price: String,
    pub tax_price: String,
    pub total_price: String,
    pub item_count: u32,
    pub shipping_address: Option<ShippingAddress>,
    pub payment_method: PaymentMethod,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            image: line.image.clone(),
            price: money::format_grouped(line.price),
            quantity: line.quantity,
            line_total: money::format_grouped(line.line_total()),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items.iter().map(CartLineView::from).collect(),
            items_price: money::format_grouped(cart.items_price),
            shipping_price: money::format_grouped(cart.shipping_price),
            tax_price: money::format_grouped(cart.tax_price),
            total_price: money::format_grouped(cart.total_price),
            item_count: cart.item_count(),
            shipping_address: cart.shipping_address.clone(),
            payment_method: cart.payment_method,
        }
    }
}

/// Cart count badge data.
#[derive(Debug, Clone, Serialize)]
pub struct CartCountView {
    pub count: u32,
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Update cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Check a requested quantity against the catalog's stock ceiling.
fn check_stock(product: &Product, quantity: u32) -> Result<()> {
    if quantity > product.count_in_stock {
        return Err(AppError::BadRequest(format!(
            "only {} in stock",
            product.count_in_stock
        )));
    }
    Ok(())
}

/// Display the cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = cart_store::load(&session).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Add a product to the cart.
///
/// Re-adding a product restates its line from the catalog's current data
/// and the requested quantity.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<AddToCartForm>,
) -> Result<Json<CartView>> {
    let quantity = form.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::BadRequest("quantity must be positive".to_string()));
    }

    let product = state.catalog().product(&form.product_id).await?;
    check_stock(&product, quantity)?;

    let mut cart = cart_store::load(&session).await?;
    cart.add_item(CartLine {
        product_id: product.id,
        name: product.name,
        image: product.image,
        price: product.price,
        quantity,
    });
    cart_store::save(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// Update a cart line's quantity. A quantity of zero removes the line.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<UpdateCartForm>,
) -> Result<Json<CartView>> {
    if form.quantity > 0 {
        let product = state.catalog().product(&form.product_id).await?;
        check_stock(&product, form.quantity)?;
    }

    let mut cart = cart_store::load(&session).await?;
    if !cart.set_quantity(&form.product_id, form.quantity) {
        return Err(AppError::NotFound(format!(
            "no cart line for product {}",
            form.product_id
        )));
    }
    cart_store::save(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// Remove a product from the cart. Removing an absent product is a no-op.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(form): Json<RemoveFromCartForm>,
) -> Result<Json<CartView>> {
    let mut cart = cart_store::load(&session).await?;
    if cart.remove_item(&form.product_id) {
        cart_store::save(&session, &cart).await?;
    }
    Ok(Json(CartView::from(&cart)))
}

/// Get the cart count badge value.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<CartCountView>> {
    let cart = cart_store::load(&session).await?;
    Ok(Json(CartCountView {
        count: cart.item_count(),
    }))
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
    fn test_cart_view_formats_prices_for_display() {
        let mut cart = Cart::empty();
        cart.add_item(line("a", "99999.99", 2));

        let view = CartView::from(&cart);
        assert_eq!(view.items_price, "1,99,999.98");
        assert_eq!(view.shipping_price, "0.00");
        assert_eq!(view.tax_price, "36,000.00");
        assert_eq!(view.total_price, "2,35,999.98");
        assert_eq!(view.item_count, 2);
    }

    #[test]
    fn test_cart_line_view_includes_line_total() {
        let mut cart = Cart::empty();
        cart.add_item(line("a", "19.99", 3));

        let view = CartView::from(&cart);
        let first = view.items.first().unwrap();
        assert_eq!(first.price, "19.99");
        assert_eq!(first.line_total, "59.97");
        assert_eq!(first.quantity, 3);
    }

    #[test]
    fn test_check_stock() {
        let product = Product {
            id: ProductId::new("a"),
            name: "product a".to_owned(),
            image: "/images/a.jpg".to_owned(),
            price: "10".parse().unwrap(),
            count_in_stock: 3,
        };

        assert!(check_stock(&product, 3).is_ok());
        assert!(check_stock(&product, 4).is_err());
    }
}
