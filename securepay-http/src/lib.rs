#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP transport for the SecurePay payment API.
//!
//! The client half submits payments from a [`securepay::PaymentForm`] to a
//! remote endpoint; the server half is an axum router implementing the same
//! endpoints with an in-memory transaction list, for local prototyping.
//!
//! # Modules
//!
//! - [`constants`] — Endpoint paths and default URLs
//! - [`client`] — reqwest client and [`securepay::PaymentGateway`] implementation (feature: `client`)
//! - [`server`] — axum router, handlers, and transaction store (feature: `server`)

pub mod constants;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "server")]
pub mod server;
