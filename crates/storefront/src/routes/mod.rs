//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Cart (JSON)
//! GET  /cart                   - Cart view
//! POST /cart/add               - Add product to cart
//! POST /cart/update            - Update line quantity
//! POST /cart/remove            - Remove product from cart
//! GET  /cart/count             - Cart count badge value
//!
//! # Checkout (JSON)
//! POST /checkout/shipping      - Save shipping address
//! POST /checkout/payment       - Save payment method
//! POST /checkout/place-order   - Create the order, clear the cart
//! ```

pub mod cart;
pub mod checkout;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/shipping", post(checkout::shipping))
        .route("/payment", post(checkout::payment))
        .route("/place-order", post(checkout::place_order))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout routes
        .nest("/checkout", checkout_routes())
}
