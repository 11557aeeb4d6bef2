//! Core types for Kirana.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod money;
pub mod payment;

pub use cart::{Cart, CartLine, ShippingAddress};
pub use id::*;
pub use money::MoneyError;
pub use payment::PaymentMethod;
