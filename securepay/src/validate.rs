//! Submit-time validation of the payment payload.
//!
//! Checks run in a fixed order and stop at the first failure. The
//! [`Display`](std::fmt::Display) text of each [`ValidationError`] is the
//! message shown in the error banner.

use std::sync::LazyLock;

use regex::Regex;

use crate::proto::PaymentRequest;

/// Shortest accepted card number, in digits.
pub const MIN_CARD_NUMBER_LEN: usize = 13;

/// Shortest accepted CVV.
pub const MIN_CVV_LEN: usize = 3;

static EXPIRY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[0-9]{2}/[0-9]{2}$").expect("valid expiry regex"));

/// Longest numeric prefix accepted by [`parse_amount`].
static AMOUNT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("valid amount regex")
});

/// A payload rejected before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Amount is not a finite number greater than zero.
    #[error("Please enter a valid amount greater than zero")]
    InvalidAmount,
    /// Card number has fewer than [`MIN_CARD_NUMBER_LEN`] characters.
    #[error("Please enter a valid card number")]
    InvalidCardNumber,
    /// Expiry date does not match `MM/YY`.
    #[error("Please enter a valid expiry date (MM/YY)")]
    InvalidExpiryDate,
    /// CVV has fewer than [`MIN_CVV_LEN`] characters.
    #[error("Please enter a valid CVV")]
    InvalidCvv,
}

/// Reads the amount field the way a browser's `parseFloat` does.
///
/// Leading whitespace is skipped and the longest numeric prefix is parsed, so
/// `"12.50 USD"` reads as `12.5`. Input without a numeric prefix yields `NaN`.
#[must_use]
pub fn parse_amount(raw: &str) -> f64 {
    AMOUNT_PREFIX
        .find(raw.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Checks a payload in order: amount, card number, expiry date, CVV.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate(request: &PaymentRequest) -> Result<(), ValidationError> {
    if !request.amount.is_finite() || request.amount <= 0.0 {
        return Err(ValidationError::InvalidAmount);
    }
    if request.card_number.chars().count() < MIN_CARD_NUMBER_LEN {
        return Err(ValidationError::InvalidCardNumber);
    }
    if !EXPIRY_PATTERN.is_match(&request.expiry_date) {
        return Err(ValidationError::InvalidExpiryDate);
    }
    if request.cvv.chars().count() < MIN_CVV_LEN {
        return Err(ValidationError::InvalidCvv);
    }
    Ok(())
}
