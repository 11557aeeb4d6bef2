//! Payment method selection.

use serde::{Deserialize, Serialize};

/// How the customer intends to pay.
///
/// Stored on the cart during checkout and forwarded verbatim to the order
/// API. `PayPal` is the default a fresh cart starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    PayPal,
    CashOnDelivery,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PayPal => write!(f, "PayPal"),
            Self::CashOnDelivery => write!(f, "CashOnDelivery"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_paypal() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::PayPal);
    }

    #[test]
    fn test_serializes_as_variant_name() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::PayPal).unwrap(),
            "\"PayPal\""
        );
        assert_eq!(
            serde_json::from_str::<PaymentMethod>("\"CashOnDelivery\"").unwrap(),
            PaymentMethod::CashOnDelivery
        );
    }
}
