//! Fake payment server for the SecurePay payment page.
//!
//! Serves the payment API from `securepay-http` next to the static page
//! assets, with permissive CORS so the page can be opened from anywhere.
//!
//! # Modules
//!
//! - [`app`] — Full router: API, health check, static files, CORS, tracing
//! - [`config`] — Server configuration with environment variable expansion

pub mod app;
pub mod config;

pub use app::app;
pub use config::ServerConfig;
