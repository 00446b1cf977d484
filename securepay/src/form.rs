//! View state of the payment page.
//!
//! [`PaymentForm`] models what the page shows without tying it to a UI
//! toolkit: the five input values, which panel is visible, the error banner,
//! the submit button, and the focus highlight. A binding layer copies this
//! state into real elements (see [`crate::ids`]) and forwards input, focus, and
//! blur events back into it.
//!
//! Time never advances on its own here. The banner records when it was shown
//! and callers drive expiry with [`PaymentForm::tick`].

use std::time::{Duration, Instant};

use crate::format::{
    format_card_name, format_card_number, format_cvv, format_expiry_date, strip_whitespace,
};
use crate::ids;
use crate::proto::{DEFAULT_CURRENCY, PaymentRequest};
use crate::receipt::Receipt;
use crate::validate::parse_amount;

/// How long the error banner stays visible.
pub const BANNER_TIMEOUT: Duration = Duration::from_secs(5);

/// Scale applied to the container of the focused input.
pub const FOCUS_SCALE: f32 = 1.01;

/// Scale of an unfocused input container.
pub const REST_SCALE: f32 = 1.0;

/// Cardholder name used by [`PaymentForm::fill_test_card`].
pub const TEST_CARDHOLDER: &str = "TEST CARDHOLDER";

/// Amount used by [`PaymentForm::fill_test_card`].
pub const TEST_AMOUNT: &str = "99.99";

/// An input of the payment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Card number, grouped by four.
    CardNumber,
    /// Cardholder name, uppercased.
    CardName,
    /// Expiry date, `MM/YY`.
    ExpiryDate,
    /// CVV, up to four digits.
    Cvv,
    /// Amount, stored as typed.
    Amount,
}

impl Field {
    /// Every field, in page order.
    pub const ALL: [Self; 5] = [
        Self::CardNumber,
        Self::CardName,
        Self::ExpiryDate,
        Self::Cvv,
        Self::Amount,
    ];

    /// Element id of the input.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::CardNumber => ids::CARD_NUMBER,
            Self::CardName => ids::CARD_NAME,
            Self::ExpiryDate => ids::EXPIRY_DATE,
            Self::Cvv => ids::CVV,
            Self::Amount => ids::AMOUNT,
        }
    }

    /// Looks a field up by element id.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.id() == id)
    }

    /// Applies the field's input formatter.
    #[must_use]
    pub fn format(self, raw: &str) -> String {
        match self {
            Self::CardNumber => format_card_number(raw),
            Self::CardName => format_card_name(raw),
            Self::ExpiryDate => format_expiry_date(raw),
            Self::Cvv => format_cvv(raw),
            Self::Amount => raw.to_owned(),
        }
    }
}

/// Current values of the form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    /// Displayed card number.
    pub card_number: String,
    /// Cardholder name.
    pub card_name: String,
    /// Expiry date.
    pub expiry_date: String,
    /// CVV.
    pub cvv: String,
    /// Amount as typed.
    pub amount: String,
}

impl FormFields {
    const fn slot(&self, field: Field) -> &String {
        match field {
            Field::CardNumber => &self.card_number,
            Field::CardName => &self.card_name,
            Field::ExpiryDate => &self.expiry_date,
            Field::Cvv => &self.cvv,
            Field::Amount => &self.amount,
        }
    }

    const fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::CardNumber => &mut self.card_number,
            Field::CardName => &mut self.card_name,
            Field::ExpiryDate => &mut self.expiry_date,
            Field::Cvv => &mut self.cvv,
            Field::Amount => &mut self.amount,
        }
    }
}

/// State of the submit button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitButton {
    /// Whether clicks are ignored.
    pub disabled: bool,
    /// Whether the loader is shown in place of the label.
    pub loading: bool,
}

/// The error banner while it is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    message: String,
    shown_at: Instant,
}

impl ErrorBanner {
    /// Text for `#errorMessage`.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// When the banner hides itself.
    #[must_use]
    pub fn expires_at(&self) -> Instant {
        self.shown_at + BANNER_TIMEOUT
    }

    /// Whether the banner should be hidden at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}

/// Scroll animation style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Animated scroll.
    Smooth,
    /// Browser default, an immediate jump.
    Auto,
}

/// Vertical alignment of the scroll target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    /// Align the element's top with the viewport top.
    Start,
    /// Center the element.
    Center,
}

/// A request for the binding layer to scroll an element into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    /// Element id to scroll to.
    pub target: &'static str,
    /// Animation style.
    pub behavior: ScrollBehavior,
    /// Alignment.
    pub block: ScrollBlock,
}

/// Framework-independent state of the payment page.
///
/// A fresh form shows the input panel with empty fields, no banner, and an
/// enabled submit button.
#[derive(Debug, Clone)]
pub struct PaymentForm {
    fields: FormFields,
    form_visible: bool,
    success_visible: bool,
    receipt: Option<Receipt>,
    banner: Option<ErrorBanner>,
    button: SubmitButton,
    focused: Option<Field>,
}

impl Default for PaymentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentForm {
    /// Creates the page in its initial display state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: FormFields::default(),
            form_visible: true,
            success_visible: false,
            receipt: None,
            banner: None,
            button: SubmitButton::default(),
            focused: None,
        }
    }

    /// Handles an input event: formats `raw` for `field` and stores the result.
    ///
    /// Returns the value to write back into the element.
    pub fn input(&mut self, field: Field, raw: &str) -> &str {
        let slot = self.fields.slot_mut(field);
        *slot = field.format(raw);
        slot
    }

    /// Sets a field without running its formatter.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        *self.fields.slot_mut(field) = value.into();
    }

    /// Current value of a field.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        self.fields.slot(field)
    }

    /// All field values.
    #[must_use]
    pub const fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Pre-fills the form with a test card and asks for the form to be scrolled into view.
    ///
    /// Only the card number is formatted; expiry and CVV are stored as given.
    pub fn fill_test_card(&mut self, card_number: &str, expiry: &str, cvv: &str) -> ScrollRequest {
        self.fields.card_number = format_card_number(card_number);
        TEST_CARDHOLDER.clone_into(&mut self.fields.card_name);
        expiry.clone_into(&mut self.fields.expiry_date);
        cvv.clone_into(&mut self.fields.cvv);
        TEST_AMOUNT.clone_into(&mut self.fields.amount);

        ScrollRequest {
            target: ids::PAYMENT_FORM_PANEL,
            behavior: ScrollBehavior::Smooth,
            block: ScrollBlock::Start,
        }
    }

    /// Clears every field and restores the initial panel visibility.
    ///
    /// The submit button and focus highlight are left as they are.
    pub fn reset(&mut self) {
        self.fields = FormFields::default();
        self.form_visible = true;
        self.success_visible = false;
        self.banner = None;
    }

    /// Builds the submission payload from the current field values.
    #[must_use]
    pub fn payload(&self) -> PaymentRequest {
        PaymentRequest {
            card_number: strip_whitespace(&self.fields.card_number),
            card_name: self.fields.card_name.clone(),
            expiry_date: self.fields.expiry_date.clone(),
            cvv: self.fields.cvv.clone(),
            amount: parse_amount(&self.fields.amount),
            currency: DEFAULT_CURRENCY.to_owned(),
        }
    }

    /// Handles a focus event.
    pub const fn focus(&mut self, field: Field) {
        self.focused = Some(field);
    }

    /// Handles a blur event.
    pub fn blur(&mut self, field: Field) {
        if self.focused == Some(field) {
            self.focused = None;
        }
    }

    /// Scale transform of the element containing `field`'s input.
    #[must_use]
    pub fn container_scale(&self, field: Field) -> f32 {
        if self.focused == Some(field) {
            FOCUS_SCALE
        } else {
            REST_SCALE
        }
    }

    /// Shows `message` in the error banner, replacing any visible one.
    pub fn show_error(&mut self, message: impl Into<String>, now: Instant) {
        self.banner = Some(ErrorBanner {
            message: message.into(),
            shown_at: now,
        });
    }

    /// Hides the banner if it has been visible for [`BANNER_TIMEOUT`].
    pub fn tick(&mut self, now: Instant) {
        if self.banner.as_ref().is_some_and(|b| b.is_expired(now)) {
            self.banner = None;
        }
    }

    /// The visible error banner, if any.
    #[must_use]
    pub const fn banner(&self) -> Option<&ErrorBanner> {
        self.banner.as_ref()
    }

    /// Fills the success panel and swaps it in for the form.
    pub fn show_receipt(&mut self, receipt: Receipt) {
        self.receipt = Some(receipt);
        self.form_visible = false;
        self.success_visible = true;
    }

    /// Contents of the success panel from the last successful payment.
    #[must_use]
    pub const fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_ref()
    }

    /// Whether the form panel is shown.
    #[must_use]
    pub const fn is_form_visible(&self) -> bool {
        self.form_visible
    }

    /// Whether the success panel is shown.
    #[must_use]
    pub const fn is_success_visible(&self) -> bool {
        self.success_visible
    }

    /// Current submit button state.
    #[must_use]
    pub const fn button(&self) -> SubmitButton {
        self.button
    }

    /// Disables the submit button and shows its loader.
    pub const fn begin_loading(&mut self) {
        self.button = SubmitButton {
            disabled: true,
            loading: true,
        };
    }

    /// Re-enables the submit button and restores its label.
    pub const fn finish_loading(&mut self) {
        self.button = SubmitButton {
            disabled: false,
            loading: false,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_form_shows_inputs_only() {
        let form = PaymentForm::new();
        assert!(form.is_form_visible());
        assert!(!form.is_success_visible());
        assert!(form.banner().is_none());
        assert_eq!(form.button(), SubmitButton::default());
    }

    #[test]
    fn input_routes_through_field_formatter() {
        let mut form = PaymentForm::new();
        assert_eq!(form.input(Field::CardNumber, "45321488"), "4532 1488");
        assert_eq!(form.input(Field::CardName, "jane"), "JANE");
        assert_eq!(form.input(Field::ExpiryDate, "1225"), "12/25");
        assert_eq!(form.input(Field::Cvv, "12a34x5"), "1234");
        assert_eq!(form.input(Field::Amount, "12.50"), "12.50");
        assert_eq!(form.value(Field::CardNumber), "4532 1488");
    }

    #[test]
    fn field_ids_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_id(field.id()), Some(field));
        }
        assert_eq!(Field::from_id("submitBtn"), None);
    }

    #[test]
    fn fill_test_card_prefills_and_scrolls() {
        let mut form = PaymentForm::new();
        let scroll = form.fill_test_card("4532148803436467", "12/25", "123");

        assert_eq!(form.value(Field::CardNumber), "4532 1488 0343 6467");
        assert_eq!(form.value(Field::CardName), TEST_CARDHOLDER);
        assert_eq!(form.value(Field::ExpiryDate), "12/25");
        assert_eq!(form.value(Field::Cvv), "123");
        assert_eq!(form.value(Field::Amount), TEST_AMOUNT);
        assert_eq!(
            scroll,
            ScrollRequest {
                target: ids::PAYMENT_FORM_PANEL,
                behavior: ScrollBehavior::Smooth,
                block: ScrollBlock::Start,
            }
        );
    }

    #[test]
    fn payload_strips_card_spaces_and_parses_amount() {
        let mut form = PaymentForm::new();
        form.fill_test_card("5425233430109903", "01/27", "999");
        let payload = form.payload();

        assert_eq!(payload.card_number, "5425233430109903");
        assert_eq!(payload.card_name, TEST_CARDHOLDER);
        assert!((payload.amount - 99.99).abs() < f64::EPSILON);
        assert_eq!(payload.currency, DEFAULT_CURRENCY);
    }

    #[test]
    fn reset_restores_initial_display() {
        let mut form = PaymentForm::new();
        let now = Instant::now();
        form.fill_test_card("4532148803436467", "12/25", "123");
        form.show_error("boom", now);
        form.show_receipt(Receipt {
            transaction_id: "T1".into(),
            amount: "$1.00 USD".into(),
            time: "1/1/2024, 12:00:00 AM".into(),
        });

        form.reset();

        assert_eq!(form.fields(), &FormFields::default());
        assert!(form.is_form_visible());
        assert!(!form.is_success_visible());
        assert!(form.banner().is_none());
    }

    #[test]
    fn banner_hides_after_timeout() {
        let mut form = PaymentForm::new();
        let shown = Instant::now();
        form.show_error("Please enter a valid CVV", shown);

        form.tick(shown + Duration::from_secs(4));
        assert_eq!(
            form.banner().map(ErrorBanner::message),
            Some("Please enter a valid CVV")
        );

        form.tick(shown + BANNER_TIMEOUT);
        assert!(form.banner().is_none());
    }

    #[test]
    fn newer_banner_gets_its_own_timeout() {
        let mut form = PaymentForm::new();
        let first = Instant::now();
        form.show_error("first", first);
        form.show_error("second", first + Duration::from_secs(3));

        form.tick(first + BANNER_TIMEOUT);
        assert_eq!(form.banner().map(ErrorBanner::message), Some("second"));
    }

    #[test]
    fn focus_scales_container() {
        let mut form = PaymentForm::new();
        form.focus(Field::Cvv);
        assert!((form.container_scale(Field::Cvv) - FOCUS_SCALE).abs() < f32::EPSILON);
        assert!((form.container_scale(Field::Amount) - REST_SCALE).abs() < f32::EPSILON);

        form.blur(Field::Cvv);
        assert!((form.container_scale(Field::Cvv) - REST_SCALE).abs() < f32::EPSILON);
    }

    #[test]
    fn loading_toggles_button() {
        let mut form = PaymentForm::new();
        form.begin_loading();
        assert_eq!(
            form.button(),
            SubmitButton {
                disabled: true,
                loading: true
            }
        );
        form.finish_loading();
        assert_eq!(form.button(), SubmitButton::default());
    }
}
