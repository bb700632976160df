//! Exact-decimal dollar amounts: parsing user input and rendering balances.
//!
//! Amounts are `rust_decimal::Decimal` throughout the crate so no binary
//! floating point ever touches a balance.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Parses a dollar amount typed by the user. Leading/trailing whitespace is
/// tolerated; anything `Decimal` cannot represent is rejected.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    Decimal::from_str(input.trim()).ok()
}

/// Renders an amount with two decimals and thousands separators, e.g.
/// `1,234.50`. Negative amounts keep a leading sign: `-5.44`. Cents are
/// rounded half-up.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let body = format!("{:.2}", rounded);
    let (sign, digits) = match body.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", body.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));
    format!("{}{}.{}", sign, group_digits(int_part), frac_part)
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}
