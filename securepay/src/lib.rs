#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the SecurePay card payment form.
//!
//! This crate holds everything the payment page does that does not depend on
//! a particular UI toolkit or HTTP stack: the input formatters applied while
//! the user types, the checks run on submit, the JSON wire types exchanged with
//! the payment endpoint, and a framework-independent model of the page itself.
//!
//! # Modules
//!
//! - [`format`] - Pure string transforms for card number, expiry, CVV, and name
//! - [`validate`] - Submit-time validation with user-facing messages
//! - [`proto`] - Request/response payloads for the payment API
//! - [`receipt`] - Amount and timestamp rendering for the success panel
//! - [`form`] - View state of the payment page (fields, panels, banner, button)
//! - [`checkout`] - The submit flow and the [`checkout::PaymentGateway`] seam
//! - [`ids`] - Element ids used by the HTML page
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for the submit flow

pub mod checkout;
pub mod form;
pub mod format;
pub mod ids;
pub mod proto;
pub mod receipt;
pub mod validate;

pub use checkout::{CheckoutError, PaymentGateway, SubmitOutcome};
pub use form::PaymentForm;
pub use proto::{PaymentRequest, PaymentResponse};
