//! Rendering of the success panel.
//!
//! Turns a successful [`PaymentResponse`] into the three strings the page
//! shows: transaction id, `$<amount> <currency>`, and a localized timestamp.

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::proto::PaymentResponse;

/// Shown in place of a timestamp that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// `M/D/YYYY, h:mm:ss AM`
const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// A success reply that cannot be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReceiptError {
    /// The reply claims success but carries no amount.
    #[error("payment response is missing the amount")]
    MissingAmount,
}

/// Display strings for the success panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Text for `#transactionId`.
    pub transaction_id: String,
    /// Text for `#transactionAmount`, e.g. `$99.99 USD`.
    pub amount: String,
    /// Text for `#transactionTime`.
    pub time: String,
}

impl Receipt {
    /// Renders a success reply in the local time zone.
    ///
    /// `fallback_currency` is used when the reply omits its currency.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::MissingAmount`] if the reply has no amount.
    pub fn from_response(
        response: &PaymentResponse,
        fallback_currency: &str,
    ) -> Result<Self, ReceiptError> {
        Self::from_response_in(response, fallback_currency, &Local)
    }

    /// Renders a success reply in the given time zone.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::MissingAmount`] if the reply has no amount.
    pub fn from_response_in<Tz>(
        response: &PaymentResponse,
        fallback_currency: &str,
        tz: &Tz,
    ) -> Result<Self, ReceiptError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let amount = response.amount.ok_or(ReceiptError::MissingAmount)?;
        let currency = response.currency.as_deref().unwrap_or(fallback_currency);
        let time = response
            .timestamp
            .as_deref()
            .map_or_else(|| INVALID_DATE.to_owned(), |ts| format_timestamp_in(ts, tz));

        Ok(Self {
            transaction_id: response.transaction_id.clone().unwrap_or_default(),
            amount: format_amount(amount, currency),
            time,
        })
    }
}

/// Formats an amount with two decimals, prefixed by `$` and followed by the currency.
///
/// An amount lying exactly halfway between two cents rounds away from zero,
/// so `1.125` shows as `$1.13`.
#[must_use]
pub fn format_amount(amount: f64, currency: &str) -> String {
    format!("${} {currency}", to_fixed_2(amount))
}

/// Two-decimal rendering matching the browser's `toFixed(2)`.
///
/// `{:.2}` already rounds the exact binary value correctly; it only differs on
/// exact ties, where it picks the even cent.
fn to_fixed_2(value: f64) -> String {
    half_cent_tie(value.abs()).map_or_else(
        || format!("{value:.2}"),
        |cents| {
            let sign = if value.is_sign_negative() { "-" } else { "" };
            format!("{sign}{}.{:02}", cents / 100, cents % 100)
        },
    )
}

/// If `value` is exactly halfway between two cents, the larger one in cents.
fn half_cent_tie(value: f64) -> Option<u128> {
    if !value.is_finite() || value == 0.0 {
        return None;
    }
    let bits = value.to_bits();
    let biased_exp = (bits >> 52) & 0x7ff;
    let fraction = bits & ((1 << 52) - 1);
    // value = mantissa * 2^-shift
    let (mantissa, shift) = if biased_exp == 0 {
        (fraction, 1074)
    } else if biased_exp < 1075 {
        (fraction | (1 << 52), 1075 - biased_exp)
    } else {
        return None;
    };

    let scaled = u128::from(mantissa) * 200;
    if u64::from(scaled.trailing_zeros()) < shift {
        return None;
    }
    let half_cents = scaled >> shift;
    (half_cents % 2 == 1).then_some(half_cents / 2 + 1)
}

/// Formats a timestamp for display in the local time zone.
#[must_use]
pub fn format_timestamp(timestamp: &str) -> String {
    format_timestamp_in(timestamp, &Local)
}

/// Formats a timestamp for display in `tz`.
///
/// Accepts RFC 3339 (with offset), naive ISO-8601 date-times (read as times in
/// `tz`), and bare dates (read as UTC midnight). Anything else renders as
/// [`INVALID_DATE`].
#[must_use]
pub fn format_timestamp_in<Tz>(timestamp: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    parse_timestamp(timestamp, tz).map_or_else(
        || INVALID_DATE.to_owned(),
        |dt| dt.format(DISPLAY_FORMAT).to_string(),
    )
}

fn parse_timestamp<Tz: TimeZone>(timestamp: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let timestamp = timestamp.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.with_timezone(tz));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return tz.from_local_datetime(&naive).earliest();
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(timestamp, format) {
            return tz.from_local_datetime(&naive).earliest();
        }
    }
    let date = NaiveDate::parse_from_str(timestamp, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(tz))
}
