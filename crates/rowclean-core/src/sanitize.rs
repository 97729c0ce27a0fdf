//! Field sanitizers — per-role scrubbing rules
//!
//! Each rule is a pure `&str -> String` function. None of them fail: input
//! that has nothing worth keeping comes back as an empty string.

/// Country prefix stripped from 12-digit phone numbers
const INDIA_PREFIX: &str = "91";
const PREFIXED_NUMBER_LEN: usize = 12;

/// Keep ASCII digits, then drop a leading `91` from a 12-digit result
pub fn phone_number(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    match digits.strip_prefix(INDIA_PREFIX) {
        Some(national) if digits.len() == PREFIXED_NUMBER_LEN => national.to_string(),
        _ => digits,
    }
}

/// Keep ASCII letters and whitespace, then trim
pub fn name(value: &str) -> String {
    let kept: String = value
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect();
    kept.trim().to_string()
}

/// Keep ASCII letters only
pub fn gender(value: &str) -> String {
    value.chars().filter(char::is_ascii_alphabetic).collect()
}

/// Keep ASCII digits only
pub fn points(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}
