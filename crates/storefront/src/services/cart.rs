//! Session-backed cart store.
//!
//! The cart is client-local, single-session state: each session holds one
//! snapshot under [`session_keys::CART`], overwritten on every mutation.
//! There is no server-side cart until checkout hands the snapshot to the
//! order API.
//!
//! A snapshot that no longer deserializes is discarded and replaced with an
//! empty cart rather than coerced; a failing store is a real error and
//! propagates to the caller.

use thiserror::Error;
use tower_sessions::Session;
use tracing::instrument;

use kirana_core::Cart;

use crate::models::session_keys;

/// Errors from loading or saving the cart snapshot.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The backing session store failed.
    #[error("session store error: {0}")]
    Store(#[from] tower_sessions::session::Error),
}

/// Load the cart snapshot from the session.
///
/// A session without a snapshot yields an empty cart. A corrupted snapshot
/// is logged and discarded, also yielding an empty cart.
///
/// # Errors
///
/// Returns `CartStoreError::Store` if the backing store cannot be read.
#[instrument(skip(session))]
pub async fn load(session: &Session) -> Result<Cart, CartStoreError> {
    match session.get::<Cart>(session_keys::CART).await {
        Ok(Some(cart)) => Ok(cart),
        Ok(None) => Ok(Cart::empty()),
        Err(tower_sessions::session::Error::SerdeJson(e)) => {
            tracing::warn!(error = %e, "corrupted cart snapshot, resetting to empty cart");
            Ok(Cart::empty())
        }
        Err(e) => Err(CartStoreError::Store(e)),
    }
}

/// Persist the cart snapshot to the session, overwriting any previous one.
///
/// # Errors
///
/// Returns `CartStoreError::Store` if the write fails; callers surface this
/// rather than silently losing cart state.
#[instrument(skip(session, cart), fields(items = cart.items.len()))]
pub async fn save(session: &Session, cart: &Cart) -> Result<(), CartStoreError> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::{MemoryStore, Session};

    use kirana_core::{CartLine, ProductId};

    use super::*;

    fn test_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn line(product_id: &str, price: &str, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(product_id),
            name: format!("product {product_id}"),
            image: format!("/images/{product_id}.jpg"),
            price: price.parse().unwrap(),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_load_without_snapshot_yields_empty_cart() {
        let session = test_session();
        let cart = load(&session).await.unwrap();
        assert!(cart.items.is_empty());
        assert_eq!(cart.total_price.to_string(), "0.00");
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let session = test_session();

        let mut cart = Cart::empty();
        cart.add_item(line("a", "60", 2));
        save(&session, &cart).await.unwrap();

        let loaded = load(&session).await.unwrap();
        assert_eq!(loaded, cart);
        assert_eq!(loaded.total_price.to_string(), "141.60");
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_snapshot() {
        let session = test_session();

        let mut cart = Cart::empty();
        cart.add_item(line("a", "10", 1));
        save(&session, &cart).await.unwrap();

        cart.clear_items();
        save(&session, &cart).await.unwrap();

        let loaded = load(&session).await.unwrap();
        assert!(loaded.items.is_empty());
    }

    #[tokio::test]
    async fn test_corrupted_snapshot_resets_to_empty_cart() {
        let session = test_session();

        // Write something that is not a cart under the cart key.
        session
            .insert(session_keys::CART, "not a cart")
            .await
            .unwrap();

        let cart = load(&session).await.unwrap();
        assert!(cart.items.is_empty());
        assert_eq!(cart.items_price.to_string(), "0.00");
    }
}
