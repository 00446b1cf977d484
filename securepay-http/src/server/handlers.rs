//! Axum route handlers for the payment API.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use rand::{RngExt, rng};
use securepay::proto::{
    DEFAULT_CURRENCY, PaymentResponse, STATUS_COMPLETED, TransactionRecord, TransactionResponse,
    TransactionsResponse,
};
use serde_json::Value;

use super::ApiState;
use super::error::ApiError;

/// Fields a payment body must carry, checked in this order.
pub const REQUIRED_FIELDS: [&str; 5] = ["cardNumber", "cardName", "expiryDate", "cvv", "amount"];

/// Length of generated transaction ids.
pub const TRANSACTION_ID_LEN: usize = 12;

const TRANSACTION_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// `POST /api/payment` — Records a fake payment.
///
/// # Errors
///
/// Returns 400 for malformed bodies, missing fields, or a non-positive
/// amount, and 500 when the amount is not a number.
pub async fn post_payment(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<Json<PaymentResponse>, ApiError> {
    let data: Value = serde_json::from_slice(&body)?;

    if let Some(missing) = REQUIRED_FIELDS.into_iter().find(|f| data.get(f).is_none()) {
        return Err(ApiError::MissingField(missing));
    }

    let amount = read_amount(&data["amount"])?;
    if !amount.is_finite() || amount <= 0.0 {
        #[cfg(feature = "telemetry")]
        tracing::info!(amount, "Rejected non-positive amount");
        return Err(ApiError::NonPositiveAmount);
    }

    if !state.processing_delay.is_zero() {
        tokio::time::sleep(state.processing_delay).await;
    }

    let card_number = text(&data["cardNumber"]);
    let record = TransactionRecord {
        transaction_id: generate_transaction_id(),
        amount,
        currency: data
            .get("currency")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_CURRENCY)
            .to_owned(),
        card_last_four: last_chars(&card_number, 4),
        card_name: text(&data["cardName"]),
        timestamp: local_timestamp(),
        status: STATUS_COMPLETED.to_owned(),
    };

    #[cfg(feature = "telemetry")]
    tracing::info!(
        transaction_id = %record.transaction_id,
        amount = record.amount,
        currency = %record.currency,
        "Payment recorded"
    );

    let response = PaymentResponse::completed(&record);
    state.store.push(record).await;
    Ok(Json(response))
}

/// `GET /api/transactions` — Lists every recorded payment.
pub async fn get_transactions(State(state): State<ApiState>) -> Json<TransactionsResponse> {
    Json(TransactionsResponse {
        success: true,
        transactions: state.store.all().await,
    })
}

/// `GET /api/transaction/{transaction_id}` — Fetches one recorded payment.
///
/// # Errors
///
/// Returns 404 if no payment has that id.
pub async fn get_transaction(
    State(state): State<ApiState>,
    Path(transaction_id): Path<String>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let transaction = state
        .store
        .find(&transaction_id)
        .await
        .ok_or(ApiError::TransactionNotFound)?;
    Ok(Json(TransactionResponse {
        success: true,
        transaction: Some(transaction),
        error: None,
    }))
}

/// `GET /favicon.ico` — Answers with no content.
pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Twelve random uppercase letters and digits.
#[must_use]
pub fn generate_transaction_id() -> String {
    let mut rng = rng();
    (0..TRANSACTION_ID_LEN)
        .map(|_| {
            let idx = rng.random_range(0..TRANSACTION_ID_CHARSET.len());
            char::from(TRANSACTION_ID_CHARSET[idx])
        })
        .collect()
}

/// Reads an amount given as a JSON number or a numeric string.
fn read_amount(value: &Value) -> Result<f64, ApiError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| ApiError::UnreadableAmount(n.to_string())),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ApiError::UnreadableAmount(format!("{s:?}"))),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        other => Err(ApiError::UnreadableAmount(other.to_string())),
    }
}

/// String contents of a JSON value, or its JSON text for non-strings.
fn text(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), str::to_owned)
}

fn last_chars(value: &str, n: usize) -> String {
    let skip = value.chars().count().saturating_sub(n);
    value.chars().skip(skip).collect()
}

/// Local time as ISO-8601 without offset, microsecond precision.
fn local_timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
