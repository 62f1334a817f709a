//! Phone and email key patterns.

use once_cell::sync::Lazy;
use regex::Regex;

/// `+` then 7 to 15 digits, single spaces allowed between digits.
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+(?:[0-9] ?){6,14}[0-9]$").expect("phone pattern compiles"));

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9_!#$%&’*+/=?`{|}~^.-]+",
        r"(?:\.[A-Za-z0-9_!#$%&’*+/=?`{|}~^.-]+)*",
        r"@(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,6}$",
    ))
    .expect("email pattern compiles")
});

/// Validate an international phone number such as `+55 11 98765 4321`.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

/// Validate an email address.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}
