//! Brazilian tax ID validation (CPF and CNPJ).
//!
//! Both identifiers end in two check digits. Each check digit is derived from
//! a weighted sum of the digits before it:
//!
//! ```text
//! r = sum(digit[i] * weight[i]) mod 11
//! check = if r < 2 { 0 } else { 11 - r }
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// Weights for the first CPF check digit (digits 0..=8).
const CPF_FIRST_WEIGHTS: [u32; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];

/// Weights for the second CPF check digit (digits 0..=9).
const CPF_SECOND_WEIGHTS: [u32; 10] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];

/// Weights for the first CNPJ check digit (digits 0..=11).
const CNPJ_FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Weights for the second CNPJ check digit (digits 0..=12).
const CNPJ_SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

static CPF_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2}$").expect("CPF pattern compiles")
});

static CNPJ_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}\.[0-9]{3}\.[0-9]{3}/[0-9]{4}-[0-9]{2}$").expect("CNPJ pattern compiles")
});

/// Compute a check digit from the leading `weights.len()` digits.
pub(crate) fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

/// Validate a formatted CPF such as `529.982.247-25`.
pub fn is_valid_cpf(value: &str) -> bool {
    if !CPF_PATTERN.is_match(value) {
        return false;
    }

    let digits = extract_digits(value);
    verify_check_digits(&digits, &CPF_FIRST_WEIGHTS, &CPF_SECOND_WEIGHTS)
}

/// Validate a formatted CNPJ such as `11.222.333/0001-81`.
pub fn is_valid_cnpj(value: &str) -> bool {
    if !CNPJ_PATTERN.is_match(value) {
        return false;
    }

    let digits = extract_digits(value);
    verify_check_digits(&digits, &CNPJ_FIRST_WEIGHTS, &CNPJ_SECOND_WEIGHTS)
}

/// Check both trailing check digits. `second.len()` must be `digits.len() - 1`.
fn verify_check_digits(digits: &[u32], first: &[u32], second: &[u32]) -> bool {
    if digits.len() != second.len() + 1 || is_repeated_sequence(digits) {
        return false;
    }

    check_digit(digits, first) == digits[first.len()]
        && check_digit(digits, second) == digits[second.len()]
}

fn extract_digits(value: &str) -> Vec<u32> {
    value.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// Sequences like `00000000000` pass the arithmetic but are never issued.
fn is_repeated_sequence(digits: &[u32]) -> bool {
    digits.windows(2).all(|pair| pair[0] == pair[1])
}
