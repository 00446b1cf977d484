//! The submit flow of the payment form.
//!
//! [`submit`] validates the form, sends the payload through a
//! [`PaymentGateway`], and applies the outcome to the [`PaymentForm`]:
//!
//! 1. Validation failure: banner, no network call.
//! 2. Gateway reply with `success: true`: success panel replaces the form.
//! 3. Gateway reply with `success: false`: banner with the server message.
//! 4. Gateway error: banner with a generic connection message.
//!
//! The submit button is disabled for the duration of the request and always
//! re-enabled afterwards. Nothing is retried.

use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use crate::form::PaymentForm;
use crate::proto::{PaymentRequest, PaymentResponse};
use crate::receipt::Receipt;
use crate::validate::{ValidationError, validate};

/// Banner text when the server rejects a payment without saying why.
pub const PAYMENT_FAILED_MESSAGE: &str = "Payment failed. Please try again.";

/// Banner text when the request itself fails.
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Connection error. Please check if the server is running.";

/// A boxed, `Send` future borrowed for `'a`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Sends a payment payload to the payment endpoint.
///
/// The HTTP implementation lives in `securepay-http`; tests substitute
/// in-memory gateways.
pub trait PaymentGateway: Send + Sync {
    /// Transport error type.
    type Error: Display + Send;

    /// Submits `request` and returns the decoded reply.
    ///
    /// Business failures are an `Ok` reply with `success: false`; `Err` is
    /// reserved for transport and decoding failures.
    fn submit_payment<'a>(
        &'a self,
        request: &'a PaymentRequest,
    ) -> BoxFuture<'a, Result<PaymentResponse, Self::Error>>;
}

/// Why a submission did not produce a receipt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    /// The form failed a client-side check.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The server answered with `success: false`.
    #[error("payment declined: {0}")]
    Declined(String),
    /// The request failed or the reply could not be used.
    #[error("payment request failed: {0}")]
    Connection(String),
}

impl CheckoutError {
    /// Text to show in the error banner.
    #[must_use]
    pub fn banner_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Declined(message) => message.clone(),
            Self::Connection(_) => CONNECTION_ERROR_MESSAGE.to_owned(),
        }
    }
}

/// Result of [`submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The submit button was disabled; nothing happened.
    Ignored,
    /// The payment went through and the success panel is shown.
    Completed(Receipt),
    /// The payment did not go through and the banner is shown.
    Failed(CheckoutError),
}

/// Runs one submission of `form` through `gateway`.
///
/// The form is left with the submit button enabled whatever the outcome.
pub async fn submit<G>(form: &mut PaymentForm, gateway: &G) -> SubmitOutcome
where
    G: PaymentGateway + ?Sized,
{
    if form.button().disabled {
        return SubmitOutcome::Ignored;
    }

    let request = form.payload();
    if let Err(err) = validate(&request) {
        form.show_error(err.to_string(), Instant::now());
        return SubmitOutcome::Failed(err.into());
    }

    form.begin_loading();
    let result = match gateway.submit_payment(&request).await {
        Ok(response) => interpret(&request, &response),
        Err(err) => Err(CheckoutError::Connection(err.to_string())),
    };
    form.finish_loading();

    match result {
        Ok(receipt) => {
            #[cfg(feature = "telemetry")]
            tracing::info!(transaction_id = %receipt.transaction_id, "Payment completed");
            form.show_receipt(receipt.clone());
            SubmitOutcome::Completed(receipt)
        }
        Err(err) => {
            #[cfg(feature = "telemetry")]
            if let CheckoutError::Connection(cause) = &err {
                tracing::error!(error = %cause, "Payment request failed");
            }
            form.show_error(err.banner_message(), Instant::now());
            SubmitOutcome::Failed(err)
        }
    }
}

/// Maps a gateway reply to a receipt or an error.
fn interpret(
    request: &PaymentRequest,
    response: &PaymentResponse,
) -> Result<Receipt, CheckoutError> {
    if !response.success {
        let message = response
            .error
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| PAYMENT_FAILED_MESSAGE.to_owned());
        return Err(CheckoutError::Declined(message));
    }
    Receipt::from_response(response, &request.currency)
        .map_err(|err| CheckoutError::Connection(err.to_string()))
}
