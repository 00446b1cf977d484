//! Input formatters for the payment form fields.
//!
//! Every formatter is a pure `&str -> String` transform. They run on each input
//! event, so they must be idempotent on their own output: formatting an already
//! formatted value returns it unchanged.

use std::sync::LazyLock;

use regex::Regex;

/// First run of 4 to 16 digits in a digit-only string.
static CARD_DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]{4,16}").expect("valid card digit regex"));

/// Size of each space-separated block in a formatted card number.
pub const CARD_GROUP_LEN: usize = 4;

/// Maximum number of digits kept in a CVV.
pub const CVV_MAX_LEN: usize = 4;

/// Maximum number of digits kept in an expiry date (`MMYY`).
const EXPIRY_MAX_DIGITS: usize = 4;

/// Keeps ASCII digits only.
fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Formats a card number into space-separated blocks of four digits.
///
/// Non-digit characters are dropped, and only the first 16 digits are kept.
/// When fewer than four digits are present the input is returned untouched,
/// so partially typed values are not rewritten under the user's cursor.
///
/// ```
/// use securepay::format::format_card_number;
///
/// assert_eq!(format_card_number("4532148803436467"), "4532 1488 0343 6467");
/// assert_eq!(format_card_number("3782-822463-10005"), "3782 8224 6310 005");
/// assert_eq!(format_card_number("12"), "12");
/// ```
#[must_use]
pub fn format_card_number(value: &str) -> String {
    let digits = digits_only(value);
    let Some(run) = CARD_DIGIT_RUN.find(&digits) else {
        return value.to_owned();
    };

    let run = run.as_str();
    let mut formatted = String::with_capacity(run.len() + run.len() / CARD_GROUP_LEN);
    for (i, ch) in run.chars().enumerate() {
        if i > 0 && i % CARD_GROUP_LEN == 0 {
            formatted.push(' ');
        }
        formatted.push(ch);
    }
    formatted
}

/// Formats an expiry date as `MM/YY`.
///
/// Once two digits are present a slash is inserted after them; at most four
/// digits are kept. With fewer than two digits the digit-only value is returned.
///
/// ```
/// use securepay::format::format_expiry_date;
///
/// assert_eq!(format_expiry_date("1225"), "12/25");
/// assert_eq!(format_expiry_date("12"), "12/");
/// assert_eq!(format_expiry_date("1"), "1");
/// ```
#[must_use]
pub fn format_expiry_date(value: &str) -> String {
    let digits = digits_only(value);
    if digits.len() < 2 {
        return digits;
    }
    let end = digits.len().min(EXPIRY_MAX_DIGITS);
    format!("{}/{}", &digits[..2], &digits[2..end])
}

/// Keeps the digits of a CVV, truncated to [`CVV_MAX_LEN`].
#[must_use]
pub fn format_cvv(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_digit)
        .take(CVV_MAX_LEN)
        .collect()
}

/// Uppercases the cardholder name.
#[must_use]
pub fn format_card_name(value: &str) -> String {
    value.to_uppercase()
}

/// Removes all whitespace, turning a displayed card number into its payload form.
#[must_use]
pub fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_number_groups_by_four() {
        assert_eq!(format_card_number("4532148803436467"), "4532 1488 0343 6467");
        assert_eq!(format_card_number("5425 2334 3010 9903"), "5425 2334 3010 9903");
        assert_eq!(format_card_number("45321"), "4532 1");
    }

    #[test]
    fn card_number_drops_non_digits() {
        assert_eq!(format_card_number("4532-1488 abc 0343"), "4532 1488 0343");
    }

    #[test]
    fn card_number_caps_at_sixteen_digits() {
        assert_eq!(
            format_card_number("45321488034364671234"),
            "4532 1488 0343 6467"
        );
    }

    #[test]
    fn card_number_short_input_is_returned_unchanged() {
        assert_eq!(format_card_number(""), "");
        assert_eq!(format_card_number("123"), "123");
        assert_eq!(format_card_number("a1 2b"), "a1 2b");
    }

    #[test]
    fn card_number_is_idempotent() {
        for raw in ["4532148803436467", "378282246310005", "12345", "1234 5678 9"] {
            let once = format_card_number(raw);
            assert_eq!(format_card_number(&once), once);
        }
    }

    #[test]
    fn card_number_groups_are_single_spaced_and_full_except_last() {
        for raw in [
            "4",
            "4532",
            "453214",
            "4532 1488 0343 6467 99",
            "  45 32 14 88  03 ",
            "x4y5z3w2",
        ] {
            let formatted = format_card_number(raw);
            if formatted == raw && digits_only(raw).len() < 4 {
                continue;
            }
            assert!(!formatted.contains("  "), "{formatted:?}");
            let groups: Vec<&str> = formatted.split(' ').collect();
            let (last, full) = groups.split_last().expect("at least one group");
            assert!(full.iter().all(|g| g.len() == CARD_GROUP_LEN), "{formatted:?}");
            assert!(!last.is_empty() && last.len() <= CARD_GROUP_LEN, "{formatted:?}");
        }
    }

    #[test]
    fn expiry_below_two_digits_is_digit_only_input() {
        assert_eq!(format_expiry_date(""), "");
        assert_eq!(format_expiry_date("1"), "1");
        assert_eq!(format_expiry_date("a1/"), "1");
    }

    #[test]
    fn expiry_inserts_slash_and_caps_digits() {
        assert_eq!(format_expiry_date("12"), "12/");
        assert_eq!(format_expiry_date("123"), "12/3");
        assert_eq!(format_expiry_date("12/25"), "12/25");
        assert_eq!(format_expiry_date("122599"), "12/25");
        assert_eq!(format_expiry_date(" 0 8 / 2 7 "), "08/27");
    }

    #[test]
    fn cvv_is_digits_and_at_most_four() {
        for raw in ["", "1", "12a3", "12345", "9 8 7 6 5", "abc"] {
            let cvv = format_cvv(raw);
            assert!(cvv.len() <= CVV_MAX_LEN);
            assert!(cvv.chars().all(|c| c.is_ascii_digit()));
        }
        assert_eq!(format_cvv("12345"), "1234");
        assert_eq!(format_cvv("1a2b3"), "123");
    }

    #[test]
    fn name_is_uppercased() {
        assert_eq!(format_card_name("jane doe"), "JANE DOE");
    }

    #[test]
    fn strip_whitespace_removes_group_spaces() {
        assert_eq!(strip_whitespace("4532 1488 0343 6467"), "4532148803436467");
    }
}
