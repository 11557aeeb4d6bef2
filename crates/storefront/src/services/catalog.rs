//! Catalog API client.
//!
//! REST client for the backend catalog (a document-store CRUD API).
//! Product lookups are cached with `moka` (5-minute TTL): cart mutations
//! re-read the product on every add/update, and the unit price and stock
//! ceiling must come from the catalog, never from the client request.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use kirana_core::ProductId;

use crate::config::CatalogConfig;

/// Cache tuning for product lookups.
const CACHE_MAX_CAPACITY: u64 = 1000;
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Errors that can occur when interacting with the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Product does not exist in the catalog.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A catalog product, as served by the backend API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Document ID.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Image reference.
    pub image: String,
    /// Unit price in the currency's standard unit.
    pub price: Decimal,
    /// Units currently in stock; the ceiling for cart quantities.
    pub count_in_stock: u32,
}

/// Client for the catalog API.
///
/// Product lookups are cached for 5 minutes.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<ProductId, Product>,
}

impl CatalogClient {
    /// Create a new catalog API client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_MAX_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                cache,
            }),
        }
    }

    /// Fetch a product by ID, serving repeats from the cache.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown product, or another
    /// `CatalogError` if the request fails.
    #[instrument(skip(self))]
    pub async fn product(&self, id: &ProductId) -> Result<Product, CatalogError> {
        if let Some(product) = self.inner.cache.get(id).await {
            debug!(product_id = %id, "catalog cache hit");
            return Ok(product);
        }

        let url = format!(
            "{}/api/products/{}",
            self.inner.base_url,
            urlencoding::encode(id.as_str())
        );

        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id.clone()));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let product: Product = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        self.inner.cache.insert(id.clone(), product.clone()).await;
        Ok(product)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_backend_document() {
        let json = r#"{
            "_id": "6643f3c6a1b2",
            "name": "Basmati Rice 5kg",
            "image": "/images/basmati.jpg",
            "price": 549.5,
            "countInStock": 12,
            "brand": "ignored",
            "rating": 4.5
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new("6643f3c6a1b2"));
        assert_eq!(product.name, "Basmati Rice 5kg");
        assert_eq!(product.price.to_string(), "549.5");
        assert_eq!(product.count_in_stock, 12);
    }
}
