//! Error replies of the payment API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use securepay::proto::PaymentResponse;

/// A request the payment API refuses.
///
/// Every variant renders as `{"success": false, "error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body is not JSON.
    #[error("Invalid JSON body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// A required payment field is absent.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// The amount is zero, negative, or not finite.
    #[error("Amount must be greater than zero.")]
    NonPositiveAmount,

    /// The amount cannot be read as a number.
    #[error("could not convert amount to float: {0}")]
    UnreadableAmount(String),

    /// No transaction has the requested id.
    #[error("Transaction not found")]
    TransactionNotFound,
}

impl ApiError {
    /// HTTP status of the reply.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) | Self::MissingField(_) | Self::NonPositiveAmount => {
                StatusCode::BAD_REQUEST
            }
            Self::UnreadableAmount(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::TransactionNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(PaymentResponse::failure(self.to_string()))).into_response()
    }
}
