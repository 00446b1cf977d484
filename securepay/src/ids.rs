//! Element ids and class names of the payment page.

/// Card number input.
pub const CARD_NUMBER: &str = "cardNumber";
/// Cardholder name input.
pub const CARD_NAME: &str = "cardName";
/// Expiry date input.
pub const EXPIRY_DATE: &str = "expiryDate";
/// CVV input.
pub const CVV: &str = "cvv";
/// Amount input.
pub const AMOUNT: &str = "amount";

/// The `<form>` element that is submitted and reset.
pub const PAYMENT_FORM: &str = "payment-form";
/// Panel wrapping the form; hidden once a payment succeeds.
pub const PAYMENT_FORM_PANEL: &str = "paymentForm";
/// Submit button.
pub const SUBMIT_BUTTON: &str = "submitBtn";
/// Class of the submit button's label.
pub const BUTTON_TEXT_CLASS: &str = "btn-text";
/// Class of the submit button's loading indicator.
pub const BUTTON_LOADER_CLASS: &str = "btn-loader";

/// Success panel.
pub const SUCCESS_MESSAGE: &str = "successMessage";
/// Transaction id inside the success panel.
pub const TRANSACTION_ID: &str = "transactionId";
/// Formatted amount inside the success panel.
pub const TRANSACTION_AMOUNT: &str = "transactionAmount";
/// Localized timestamp inside the success panel.
pub const TRANSACTION_TIME: &str = "transactionTime";

/// Error banner.
pub const ERROR_BANNER: &str = "errorBanner";
/// Message inside the error banner.
pub const ERROR_MESSAGE: &str = "errorMessage";
