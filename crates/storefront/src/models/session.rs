//! Session-related types.
//!
//! The session is the durable per-client store; the cart snapshot lives in
//! it under a fixed key and is overwritten on every cart mutation.

/// Session keys for stored state.
pub mod keys {
    /// Key for the persisted cart snapshot.
    pub const CART: &str = "cart";
}
