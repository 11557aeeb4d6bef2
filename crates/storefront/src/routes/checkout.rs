//! Checkout route handlers.
//!
//! Checkout is a three-step flow over the session cart: save the shipping
//! address, save the payment method, then place the order. Placing an order
//! forwards the cart's derived price fields to the order API verbatim and
//! clears the line items on success.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use kirana_core::{OrderId, PaymentMethod, ShippingAddress};

use crate::error::{AppError, Result};
use crate::routes::cart::CartView;
use crate::services::cart as cart_store;
use crate::services::orders::OrderCreateRequest;
use crate::state::AppState;

/// Shipping address request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressForm {
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// Payment method request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodForm {
    pub payment_method: PaymentMethod,
}

/// Response for a successfully placed order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrderView {
    pub order_id: OrderId,
    /// The total the order was placed with, verbatim.
    pub total_price: String,
}

impl ShippingAddressForm {
    /// Reject blank fields; the order API requires a complete address.
    fn validate(&self) -> Result<()> {
        let complete = [&self.address, &self.city, &self.postal_code, &self.country]
            .iter()
            .all(|field| !field.trim().is_empty());

        if complete {
            Ok(())
        } else {
            Err(AppError::BadRequest(
                "all shipping address fields are required".to_string(),
            ))
        }
    }
}

/// Save the shipping address on the cart.
#[instrument(skip(session, form))]
pub async fn shipping(
    session: Session,
    Json(form): Json<ShippingAddressForm>,
) -> Result<Json<CartView>> {
    form.validate()?;

    let mut cart = cart_store::load(&session).await?;
    cart.set_shipping_address(ShippingAddress {
        address: form.address,
        city: form.city,
        postal_code: form.postal_code,
        country: form.country,
    });
    cart_store::save(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// Save the payment method on the cart.
#[instrument(skip(session))]
pub async fn payment(
    session: Session,
    Json(form): Json<PaymentMethodForm>,
) -> Result<Json<CartView>> {
    let mut cart = cart_store::load(&session).await?;
    cart.set_payment_method(form.payment_method);
    cart_store::save(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// Place the order.
///
/// Requires a non-empty cart and a saved shipping address. On success the
/// line items are cleared; the address and payment method stay for the
/// next order.
#[instrument(skip(state, session))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<PlacedOrderView>> {
    let mut cart = cart_store::load(&session).await?;

    if cart.items.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }
    let Some(shipping_address) = cart.shipping_address.clone() else {
        return Err(AppError::BadRequest(
            "shipping address is required".to_string(),
        ));
    };

    let request = OrderCreateRequest::from_cart(&cart, shipping_address);
    let total_price = request.total_price.clone();
    let created = state.orders().create_order(&request).await?;

    cart.clear_items();
    cart_store::save(&session, &cart).await?;

    tracing::info!(order_id = %created.id, total = %total_price, "order placed");

    Ok(Json(PlacedOrderView {
        order_id: created.id,
        total_price,
    }))
}
