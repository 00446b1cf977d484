//! Paths and defaults of the payment API.

/// Payment submission endpoint, relative to the base URL.
pub const PAYMENT_PATH: &str = "api/payment";

/// Transaction listing endpoint, relative to the base URL.
pub const TRANSACTIONS_PATH: &str = "api/transactions";

/// Single-transaction endpoint prefix, relative to the base URL.
pub const TRANSACTION_PATH: &str = "api/transaction";

/// Base URL the payment page talks to.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/";

/// Port the payment server listens on by default.
pub const DEFAULT_PORT: u16 = 5000;
