//! Axum router implementing the payment API.
//!
//! A stand-in backend for prototyping the payment page: it checks the
//! payload, waits a configurable processing delay, and records the payment in
//! memory. No card is ever charged.
//!
//! Endpoints:
//! - `POST /api/payment` — record a payment
//! - `GET /api/transactions` — list recorded payments
//! - `GET /api/transaction/{id}` — fetch one recorded payment
//! - `GET /favicon.ico` — 204 No Content

use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};

pub mod error;
pub mod handlers;
pub mod store;

pub use error::ApiError;
pub use store::TransactionStore;

/// Delay before a payment is recorded, matching a slow card processor.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_secs(1);

/// Shared state of the payment API handlers.
#[derive(Debug, Clone)]
pub struct ApiState {
    /// Recorded payments.
    pub store: TransactionStore,
    /// How long each accepted payment takes to process.
    pub processing_delay: Duration,
}

impl Default for ApiState {
    fn default() -> Self {
        Self::new(TransactionStore::new())
    }
}

impl ApiState {
    /// Creates state over `store` with [`DEFAULT_PROCESSING_DELAY`].
    #[must_use]
    pub const fn new(store: TransactionStore) -> Self {
        Self {
            store,
            processing_delay: DEFAULT_PROCESSING_DELAY,
        }
    }

    /// Sets the processing delay.
    #[must_use]
    pub const fn with_processing_delay(mut self, delay: Duration) -> Self {
        self.processing_delay = delay;
        self
    }
}

/// Creates an Axum [`Router`] with all payment API endpoints.
pub fn payment_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/payment", post(handlers::post_payment))
        .route("/api/transactions", get(handlers::get_transactions))
        .route(
            "/api/transaction/{transaction_id}",
            get(handlers::get_transaction),
        )
        .route("/favicon.ico", get(handlers::favicon))
        .with_state(state)
}
