//! Order API client.
//!
//! Creates orders from cart snapshots at checkout. The four derived price
//! fields are forwarded verbatim as their two-fraction-digit string form;
//! the order API records what the cart displayed, with no recomputation on
//! either side.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use kirana_core::{Cart, OrderId, PaymentMethod, ProductId, ShippingAddress};

use crate::config::OrdersConfig;

/// Errors that can occur when interacting with the order API.
#[derive(Debug, Error)]
pub enum OrderApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// One line item in an order-creation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Catalog ID of the ordered product.
    pub product: ProductId,
    pub name: String,
    pub image: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub qty: u32,
}

/// Payload for the order-creation endpoint.
///
/// Prices are the cart's derived fields as strings, forwarded verbatim.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateRequest {
    pub order_items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub items_price: String,
    pub shipping_price: String,
    pub tax_price: String,
    pub total_price: String,
}

impl OrderCreateRequest {
    /// Build the request from a cart snapshot and its shipping address.
    ///
    /// The caller has already established that the cart is non-empty and
    /// the address present; this is a plain projection.
    #[must_use]
    pub fn from_cart(cart: &Cart, shipping_address: ShippingAddress) -> Self {
        Self {
            order_items: cart
                .items
                .iter()
                .map(|line| OrderItem {
                    product: line.product_id.clone(),
                    name: line.name.clone(),
                    image: line.image.clone(),
                    price: line.price,
                    qty: line.quantity,
                })
                .collect(),
            shipping_address,
            payment_method: cart.payment_method,
            items_price: cart.items_price.to_string(),
            shipping_price: cart.shipping_price.to_string(),
            tax_price: cart.tax_price.to_string(),
            total_price: cart.total_price.to_string(),
        }
    }
}

/// The created order, as returned by the order API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrder {
    /// Document ID of the new order.
    #[serde(rename = "_id")]
    pub id: OrderId,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
}

/// Client for the order API.
#[derive(Clone)]
pub struct OrderClient {
    inner: Arc<OrderClientInner>,
}

struct OrderClientInner {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl OrderClient {
    /// Create a new order API client.
    #[must_use]
    pub fn new(config: &OrdersConfig) -> Self {
        Self {
            inner: Arc::new(OrderClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                api_token: config.api_token.expose_secret().to_string(),
            }),
        }
    }

    /// Create an order from the given request.
    ///
    /// # Errors
    ///
    /// Returns `OrderApiError` if the request fails or the API rejects it.
    #[instrument(skip(self, request), fields(total = %request.total_price))]
    pub async fn create_order(
        &self,
        request: &OrderCreateRequest,
    ) -> Result<CreatedOrder, OrderApiError> {
        let url = format!("{}/api/orders", self.inner.base_url);

        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(&self.inner.api_token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OrderApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| OrderApiError::Parse(e.to_string()))
    }
}
