//! Decimal money helpers shared by pricing and display code.
//!
//! Amounts are [`rust_decimal::Decimal`] values in the currency's standard
//! unit, always carried at two fraction digits once derived. Display
//! formatting applies Indian-system digit grouping (1,23,456.78); parsing
//! accepts the grouped form back by stripping the separators first.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Grouping separator used in display-formatted amounts.
pub const GROUPING_SEPARATOR: char = ',';

/// Errors from re-parsing a formatted amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The input was not a numeric amount after stripping separators.
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
}

/// Round an amount to two fraction digits, half-up (midpoint away from
/// zero), and rescale so the result always carries exactly two digits.
#[must_use]
pub fn round2(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Format an amount for display with two fraction digits and grouping
/// separators.
///
/// The value stays re-parseable via [`parse_amount`].
#[must_use]
pub fn format_grouped(amount: Decimal) -> String {
    let rounded = round2(amount);
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = text
        .split_once('.')
        .map_or((text.as_str(), "00"), |(int, frac)| (int, frac));

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{sign}{}.{frac_part}", group_digits(int_part))
}

/// Parse an amount from its formatted form, stripping grouping separators.
///
/// # Errors
///
/// Returns [`MoneyError::InvalidAmount`] if the stripped input is not a
/// decimal number.
pub fn parse_amount(input: &str) -> Result<Decimal, MoneyError> {
    let stripped: String = input
        .trim()
        .chars()
        .filter(|c| *c != GROUPING_SEPARATOR)
        .collect();

    if stripped.is_empty() {
        return Err(MoneyError::InvalidAmount(input.to_owned()));
    }

    stripped
        .parse::<Decimal>()
        .map_err(|_| MoneyError::InvalidAmount(input.to_owned()))
}

/// Insert Indian-system grouping separators into an unsigned digit run:
/// the last three digits form one group, every two digits before that
/// form another.
fn group_digits(digits: &str) -> String {
    let total = digits.chars().count();
    let mut out = String::with_capacity(total + total / 2);

    for (index, c) in digits.chars().enumerate() {
        out.push(c);
        let remaining = total - index - 1;
        let at_boundary = remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0);
        if remaining > 0 && at_boundary {
            out.push(GROUPING_SEPARATOR);
        }
    }

    out
}
