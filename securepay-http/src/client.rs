//! An HTTP client for the payment API.
//!
//! [`PaymentClient`] handles `POST /api/payment`, `GET /api/transactions`, and
//! `GET /api/transaction/{id}`, and implements [`PaymentGateway`] so it can be
//! passed straight to [`securepay::checkout::submit`].
//!
//! ## Error Handling
//!
//! The server reports business failures (missing fields, declined amounts,
//! unknown transactions) as 4xx replies with a JSON body, so reply bodies are
//! decoded whatever the status. Only a body that is not the expected JSON
//! becomes an error:
//! - URL construction
//! - HTTP transport failures
//! - Unreadable response bodies
//! - Undecodable JSON, reported with the HTTP status when it was not a success

use std::time::Duration;

use http::{HeaderMap, StatusCode};
use reqwest::Client;
use securepay::checkout::{BoxFuture, PaymentGateway};
use securepay::proto::{PaymentRequest, PaymentResponse, TransactionResponse, TransactionsResponse};
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::constants::{DEFAULT_BASE_URL, PAYMENT_PATH, TRANSACTION_PATH, TRANSACTIONS_PATH};

/// A client for a remote payment API.
#[derive(Clone, Debug)]
pub struct PaymentClient {
    /// Base URL of the API (e.g. `http://localhost:5000/`)
    base_url: Url,
    /// Full URL for `POST /api/payment`
    payment_url: Url,
    /// Full URL for `GET /api/transactions`
    transactions_url: Url,
    /// Prefix of `GET /api/transaction/{id}`
    transaction_url: Url,
    /// Shared reqwest client
    client: Client,
    /// Custom headers sent with each request
    headers: HeaderMap,
    /// Optional request timeout; none means the transport default
    timeout: Option<Duration>,
}

/// Errors that can occur while talking to the payment API.
#[derive(Debug, thiserror::Error)]
pub enum PaymentClientError {
    /// URL parse error.
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// HTTP transport error.
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// Failed to read the response body.
    #[error("Failed to read response body: {context}: {source}")]
    ResponseBodyRead {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// A successful reply whose body is not the expected JSON.
    #[error("Failed to deserialize JSON: {context}: {source}")]
    JsonDeserialization {
        /// Human-readable context.
        context: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// The payload's amount is NaN or infinite and would serialize as `null`.
    #[error("Payment amount must be a finite number, got {0}")]
    InvalidAmount(f64),
    /// A non-success reply whose body is not the expected JSON.
    #[error("Unexpected HTTP status {status}: {context}: {body}")]
    HttpStatus {
        /// Human-readable context.
        context: &'static str,
        /// The HTTP status code.
        status: StatusCode,
        /// The response body.
        body: String,
    },
}

impl PaymentClient {
    /// Returns the base URL used by this client.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the computed `./api/payment` URL.
    #[must_use]
    pub const fn payment_url(&self) -> &Url {
        &self.payment_url
    }

    /// Returns the computed `./api/transactions` URL.
    #[must_use]
    pub const fn transactions_url(&self) -> &Url {
        &self.transactions_url
    }

    /// Returns any custom headers configured on the client.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Constructs a new [`PaymentClient`] from a base URL.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentClientError::UrlParse`] if the base URL cannot hold
    /// paths or an endpoint URL cannot be built.
    pub fn try_new(base_url: Url) -> Result<Self, PaymentClientError> {
        if base_url.cannot_be_a_base() {
            return Err(PaymentClientError::UrlParse {
                context: "Base URL cannot carry endpoint paths",
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            });
        }
        let payment_url =
            base_url
                .join(PAYMENT_PATH)
                .map_err(|e| PaymentClientError::UrlParse {
                    context: "Failed to construct ./api/payment URL",
                    source: e,
                })?;
        let transactions_url =
            base_url
                .join(TRANSACTIONS_PATH)
                .map_err(|e| PaymentClientError::UrlParse {
                    context: "Failed to construct ./api/transactions URL",
                    source: e,
                })?;
        let transaction_url =
            base_url
                .join(TRANSACTION_PATH)
                .map_err(|e| PaymentClientError::UrlParse {
                    context: "Failed to construct ./api/transaction URL",
                    source: e,
                })?;
        Ok(Self {
            base_url,
            payment_url,
            transactions_url,
            transaction_url,
            client: Client::new(),
            headers: HeaderMap::new(),
            timeout: None,
        })
    }

    /// Constructs a client for [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`PaymentClientError::UrlParse`] if URL construction fails.
    pub fn localhost() -> Result<Self, PaymentClientError> {
        Self::try_from(DEFAULT_BASE_URL)
    }

    /// Attaches custom headers to all future requests.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets a timeout for all future requests.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses a pre-configured reqwest client.
    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Returns the `./api/transaction/{id}` URL, with `id` percent-encoded.
    #[must_use]
    pub fn transaction_url(&self, transaction_id: &str) -> Url {
        let mut url = self.transaction_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(transaction_id);
        }
        url
    }

    /// Sends a `POST /api/payment` request.
    ///
    /// A declined payment is an `Ok` reply with `success: false`.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentClientError::InvalidAmount`] without sending anything if
    /// the amount is not finite, or another [`PaymentClientError`] if the
    /// request fails or the reply is not a payment response.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "securepay.client.submit_payment", skip_all, err)
    )]
    pub async fn submit_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentResponse, PaymentClientError> {
        if !request.amount.is_finite() {
            return Err(PaymentClientError::InvalidAmount(request.amount));
        }
        let req = self.client.post(self.payment_url.clone()).json(request);
        self.send_json(req, "POST /api/payment").await
    }

    /// Sends a `GET /api/transactions` request.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentClientError`] if the request fails or the reply cannot be decoded.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "securepay.client.transactions", skip_all, err)
    )]
    pub async fn transactions(&self) -> Result<TransactionsResponse, PaymentClientError> {
        let req = self.client.get(self.transactions_url.clone());
        self.send_json(req, "GET /api/transactions").await
    }

    /// Sends a `GET /api/transaction/{id}` request.
    ///
    /// An unknown id is an `Ok` reply with `success: false`.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentClientError`] if the request fails or the reply cannot be decoded.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "securepay.client.transaction", skip(self), err)
    )]
    pub async fn transaction(
        &self,
        transaction_id: &str,
    ) -> Result<TransactionResponse, PaymentClientError> {
        let req = self.client.get(self.transaction_url(transaction_id));
        self.send_json(req, "GET /api/transaction").await
    }

    /// Applies headers and timeout, sends, and decodes the JSON body.
    ///
    /// `context` is a human-readable identifier used in error messages (e.g. `"POST /api/payment"`).
    async fn send_json<R>(
        &self,
        mut req: reqwest::RequestBuilder,
        context: &'static str,
    ) -> Result<R, PaymentClientError>
    where
        R: serde::de::DeserializeOwned,
    {
        for (key, value) in &self.headers {
            req = req.header(key, value);
        }
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        let http_response = req
            .send()
            .await
            .map_err(|e| PaymentClientError::Http { context, source: e })?;

        let status = http_response.status();
        let body = http_response
            .text()
            .await
            .map_err(|e| PaymentClientError::ResponseBodyRead { context, source: e })?;

        match serde_json::from_str::<R>(&body) {
            Ok(decoded) => Ok(decoded),
            Err(source) if status.is_success() => {
                Err(PaymentClientError::JsonDeserialization { context, source })
            }
            Err(_) => Err(PaymentClientError::HttpStatus {
                context,
                status,
                body,
            }),
        }
    }
}

impl PaymentGateway for PaymentClient {
    type Error = PaymentClientError;

    fn submit_payment<'a>(
        &'a self,
        request: &'a PaymentRequest,
    ) -> BoxFuture<'a, Result<PaymentResponse, PaymentClientError>> {
        Box::pin(Self::submit_payment(self, request))
    }
}

/// Converts a string URL into a `PaymentClient`, parsing the URL and calling `try_new`.
impl TryFrom<&str> for PaymentClient {
    type Error = PaymentClientError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Normalize: strip trailing slashes and add a single trailing slash
        let mut normalized = value.trim_end_matches('/').to_string();
        normalized.push('/');
        let url = Url::parse(&normalized).map_err(|e| PaymentClientError::UrlParse {
            context: "Failed to parse base url",
            source: e,
        })?;
        Self::try_new(url)
    }
}

/// Converts a String URL into a `PaymentClient`.
impl TryFrom<String> for PaymentClient {
    type Error = PaymentClientError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use securepay::checkout::{CONNECTION_ERROR_MESSAGE, SubmitOutcome, submit};
    use securepay::form::{ErrorBanner, PaymentForm};
    use securepay::proto::{DEFAULT_CURRENCY, TransactionRecord};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_request() -> PaymentRequest {
        PaymentRequest {
            card_number: "4532148803436467".into(),
            card_name: "TEST CARDHOLDER".into(),
            expiry_date: "12/25".into(),
            cvv: "123".into(),
            amount: 99.99,
            currency: DEFAULT_CURRENCY.into(),
        }
    }

    fn test_record() -> TransactionRecord {
        TransactionRecord {
            transaction_id: "ABC123DEF456".into(),
            amount: 25.5,
            currency: "USD".into(),
            card_last_four: "6467".into(),
            card_name: "TEST USER".into(),
            timestamp: "2024-01-01T10:00:00.000000".into(),
            status: "completed".into(),
        }
    }

    #[test]
    fn endpoint_urls_are_relative_to_base() {
        let client = PaymentClient::try_from("http://localhost:5000").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:5000/");
        assert_eq!(
            client.payment_url().as_str(),
            "http://localhost:5000/api/payment"
        );
        assert_eq!(
            client.transactions_url().as_str(),
            "http://localhost:5000/api/transactions"
        );
        assert_eq!(
            client.transaction_url("ABC123").as_str(),
            "http://localhost:5000/api/transaction/ABC123"
        );
    }

    #[test]
    fn base_path_is_preserved() {
        let client = PaymentClient::try_from("https://pay.example/shop/").unwrap();
        assert_eq!(
            client.payment_url().as_str(),
            "https://pay.example/shop/api/payment"
        );
        assert_eq!(
            client.transaction_url("a b").as_str(),
            "https://pay.example/shop/api/transaction/a%20b"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            PaymentClient::try_from("not a url"),
            Err(PaymentClientError::UrlParse { .. })
        ));
    }

    #[tokio::test]
    async fn submit_payment_posts_camel_case_payload() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/payment"))
            .and(body_json(json!({
                "cardNumber": "4532148803436467",
                "cardName": "TEST CARDHOLDER",
                "expiryDate": "12/25",
                "cvv": "123",
                "amount": 99.99,
                "currency": "USD",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "transaction_id": "T1",
                "amount": 99.99,
                "currency": "USD",
                "timestamp": "2024-01-01T00:00:00Z",
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = PaymentClient::try_from(mock_server.uri()).unwrap();
        let response = client.submit_payment(&test_request()).await.unwrap();

        assert!(response.success);
        assert_eq!(response.transaction_id.as_deref(), Some("T1"));
        assert_eq!(response.amount, Some(99.99));
    }

    #[tokio::test]
    async fn non_finite_amount_is_never_sent() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/payment"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = PaymentClient::try_from(mock_server.uri()).unwrap();
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let request = PaymentRequest {
                amount,
                ..test_request()
            };
            let err = client.submit_payment(&request).await.unwrap_err();
            assert!(matches!(err, PaymentClientError::InvalidAmount(_)), "{err}");
        }

        let received = mock_server.received_requests().await.unwrap();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn rejected_payment_body_is_decoded() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/payment"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "success": false,
                "error": "Amount must be greater than zero.",
            })))
            .mount(&mock_server)
            .await;

        let client = PaymentClient::try_from(mock_server.uri()).unwrap();
        let response = client.submit_payment(&test_request()).await.unwrap();

        assert!(!response.success);
        assert_eq!(
            response.error.as_deref(),
            Some("Amount must be greater than zero.")
        );
    }

    #[tokio::test]
    async fn non_json_error_reports_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/payment"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&mock_server)
            .await;

        let client = PaymentClient::try_from(mock_server.uri()).unwrap();
        let err = client.submit_payment(&test_request()).await.unwrap_err();

        match err {
            PaymentClientError::HttpStatus { status, body, .. } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(body, "Bad Gateway");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn non_json_success_is_a_decode_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/payment"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&mock_server)
            .await;

        let client = PaymentClient::try_from(mock_server.uri()).unwrap();
        let err = client.submit_payment(&test_request()).await.unwrap_err();

        assert!(matches!(err, PaymentClientError::JsonDeserialization { .. }));
    }

    #[tokio::test]
    async fn timeout_is_applied() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/payment"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let client = PaymentClient::try_from(mock_server.uri())
            .unwrap()
            .with_timeout(Duration::from_millis(50));
        let err = client.submit_payment(&test_request()).await.unwrap_err();

        assert!(matches!(err, PaymentClientError::Http { .. }));
    }

    #[tokio::test]
    async fn lists_transactions() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/transactions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TransactionsResponse {
                success: true,
                transactions: vec![test_record()],
            }))
            .mount(&mock_server)
            .await;

        let client = PaymentClient::try_from(mock_server.uri()).unwrap();
        let listing = client.transactions().await.unwrap();

        assert!(listing.success);
        assert_eq!(listing.transactions, vec![test_record()]);
    }

    #[tokio::test]
    async fn unknown_transaction_is_decoded() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/transaction/NOPE"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false,
                "error": "Transaction not found",
            })))
            .mount(&mock_server)
            .await;

        let client = PaymentClient::try_from(mock_server.uri()).unwrap();
        let response = client.transaction("NOPE").await.unwrap();

        assert!(!response.success);
        assert!(response.transaction.is_none());
        assert_eq!(response.error.as_deref(), Some("Transaction not found"));
    }

    #[tokio::test]
    async fn checkout_through_client_shows_receipt() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/payment"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "transaction_id": "T1",
                "amount": 99.99,
                "currency": "USD",
                "timestamp": "2024-01-01T00:00:00Z",
            })))
            .mount(&mock_server)
            .await;

        let client = PaymentClient::try_from(mock_server.uri()).unwrap();
        let mut form = PaymentForm::new();
        form.fill_test_card("4532148803436467", "12/25", "123");

        let outcome = submit(&mut form, &client).await;

        assert!(matches!(outcome, SubmitOutcome::Completed(_)));
        assert_eq!(
            form.receipt().map(|r| r.amount.as_str()),
            Some("$99.99 USD")
        );
        assert!(!form.is_form_visible());
    }

    #[tokio::test]
    async fn checkout_against_dead_server_shows_connection_error() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();
        drop(mock_server);

        let client = PaymentClient::try_from(uri).unwrap();
        let mut form = PaymentForm::new();
        form.fill_test_card("4532148803436467", "12/25", "123");

        submit(&mut form, &client).await;

        assert_eq!(
            form.banner().map(ErrorBanner::message),
            Some(CONNECTION_ERROR_MESSAGE)
        );
        assert!(!form.button().disabled);
    }
}
