//! Plain-text views of the calculator state

pub mod catalog;
pub mod summary;

pub use catalog::*;
pub use summary::*;

/// Groups digits in threes: `4330` renders as `4,330`.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let lead = digits.len() % 3;
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.char_indices() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
