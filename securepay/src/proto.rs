//! Wire format types for the payment API.
//!
//! The request body uses camelCase field names (it is built by the page),
//! while everything the server produces uses snake_case. Both shapes are kept
//! exactly as the HTML page and the fake backend exchange them.
//!
//! # Key Types
//!
//! - [`PaymentRequest`] - Body of `POST /api/payment`
//! - [`PaymentResponse`] - Reply to `POST /api/payment`, success or failure
//! - [`TransactionRecord`] - A stored payment as reported by the listing endpoints
//! - [`TransactionsResponse`] / [`TransactionResponse`] - Listing endpoint replies

use serde::{Deserialize, Serialize};

/// Currency attached to every payment submitted from the form.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Status recorded for every accepted payment.
pub const STATUS_COMPLETED: &str = "completed";

/// The JSON body sent to `POST /api/payment`.
///
/// Built fresh from the form on each submit and discarded once the request
/// resolves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Card number with whitespace removed.
    pub card_number: String,
    /// Cardholder name, uppercased by the form.
    pub card_name: String,
    /// Expiry date as `MM/YY`.
    pub expiry_date: String,
    /// Card verification value, 3 or 4 digits.
    pub cvv: String,
    /// Amount to charge. May be `NaN` before validation.
    pub amount: f64,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// The JSON reply of `POST /api/payment`.
///
/// A successful payment carries the transaction fields; a failed one carries
/// `error`. A missing `success` flag reads as a failure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentResponse {
    /// Whether the payment went through.
    #[serde(default)]
    pub success: bool,
    /// Identifier of the stored transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Charged amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Charged currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// When the payment was processed, as an ISO-8601 string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Human-readable failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PaymentResponse {
    /// Builds a failure reply carrying `error`.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Builds a success reply from a stored transaction.
    #[must_use]
    pub fn completed(record: &TransactionRecord) -> Self {
        Self {
            success: true,
            transaction_id: Some(record.transaction_id.clone()),
            amount: Some(record.amount),
            currency: Some(record.currency.clone()),
            timestamp: Some(record.timestamp.clone()),
            error: None,
        }
    }
}

/// A payment accepted by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Twelve uppercase letters and digits.
    pub transaction_id: String,
    /// Charged amount.
    pub amount: f64,
    /// Charged currency.
    pub currency: String,
    /// Last four characters of the submitted card number.
    pub card_last_four: String,
    /// Cardholder name as submitted.
    pub card_name: String,
    /// Local processing time, ISO-8601 without offset.
    pub timestamp: String,
    /// Always [`STATUS_COMPLETED`].
    pub status: String,
}

/// Reply of `GET /api/transactions`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionsResponse {
    /// Always `true`.
    pub success: bool,
    /// Stored transactions in insertion order.
    pub transactions: Vec<TransactionRecord>,
}

/// Reply of `GET /api/transaction/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionResponse {
    /// Whether the transaction was found.
    #[serde(default)]
    pub success: bool,
    /// The transaction, when found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<TransactionRecord>,
    /// Failure reason, when not found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
