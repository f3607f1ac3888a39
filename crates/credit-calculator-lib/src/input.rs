//! Lenient coercion of free-form numeric input.
//!
//! Bad entries are never reported; they become zero.

/// Parses the leading integer of `input`. Negative, empty or non-numeric
/// input yields 0, and a fractional part is dropped.
pub fn coerce_audience(input: &str) -> u64 {
    let trimmed = input.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if negative || end == 0 {
        return 0;
    }

    digits[..end]
        .bytes()
        .fold(0u64, |acc, b| acc.saturating_mul(10).saturating_add(u64::from(b - b'0')))
}

/// Parses the longest numeric prefix of `input` as a rate.
pub fn coerce_rate(input: &str) -> f64 {
    let trimmed = input.trim();
    let candidate_len = trimmed
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')))
        .unwrap_or(trimmed.len());

    (1..=candidate_len)
        .rev()
        .find_map(|len| trimmed[..len].parse::<f64>().ok())
        .map(sanitize_rate)
        .unwrap_or(0.0)
}

pub fn sanitize_rate(rate: f64) -> f64 {
    if rate.is_finite() && rate > 0.0 {
        rate
    } else {
        0.0
    }
}
