//! en-ZA display formatters for currency, plain numbers and percentages.
//!
//! All formatters are total: missing values render as zero, non-finite
//! values render as `NaN` / `∞`. Rounding goes through `rust_decimal` with
//! half-away-from-zero so `1.005`-style binary artifacts do not leak into
//! the rendered string.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

/// Currency symbol for South African rand.
pub const CURRENCY_SYMBOL: &str = "R";

/// Maximum fraction digits of a plain number.
const NUMBER_MAX_FRACTION_DIGITS: u32 = 3;

/// Format an amount as rand with exactly two fraction digits.
///
/// `None` renders as `R0.00`; `Some(1234.5)` renders as `R1,234.50`.
pub fn format_currency(amount: Option<f64>) -> String {
    match amount {
        None => format!("{CURRENCY_SYMBOL}0.00"),
        Some(value) => format!("{CURRENCY_SYMBOL}{}", fixed_grouped(value, 2)),
    }
}

/// Format a plain number with thousands grouping and up to three fraction digits.
pub fn format_number(number: Option<f64>) -> String {
    let Some(value) = number else {
        return "0".to_string();
    };
    if let Some(text) = non_finite(value) {
        return text;
    }

    let plain = match Decimal::from_f64(value) {
        Some(d) => d
            .round_dp_with_strategy(
                NUMBER_MAX_FRACTION_DIGITS,
                RoundingStrategy::MidpointAwayFromZero,
            )
            .normalize()
            .to_string(),
        None => {
            let text = format!("{value:.prec$}", prec = NUMBER_MAX_FRACTION_DIGITS as usize);
            text.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    };
    group_thousands(&plain)
}

/// Format a fraction as a percentage with exactly one fraction digit.
///
/// `Some(0.125)` renders as `12.5%`; `None` renders as `0%`.
pub fn format_percentage(value: Option<f64>) -> String {
    let Some(fraction) = value else {
        return "0%".to_string();
    };
    if let Some(text) = non_finite(fraction) {
        return format!("{text}%");
    }

    let scaled = Decimal::from_f64(fraction).and_then(|d| d.checked_mul(Decimal::ONE_HUNDRED));
    let plain = match scaled {
        Some(d) => fixed_decimal(d, 1),
        None => format!("{:.1}", fraction * 100.0),
    };
    format!("{}%", group_thousands(&plain))
}

/// `format_currency` over a JSON value (numbers or numeric strings).
pub fn format_currency_value(value: &Value) -> String {
    format_currency(parse_amount(value))
}

/// `format_number` over a JSON value (numbers or numeric strings).
pub fn format_number_value(value: &Value) -> String {
    format_number(parse_amount(value))
}

/// `format_percentage` over a JSON value (numbers or numeric strings).
pub fn format_percentage_value(value: &Value) -> String {
    format_percentage(parse_amount(value))
}

/// Interpret a JSON value as a number.
///
/// `null` is absent. Strings are read like a browser `parseFloat`: leading
/// whitespace is skipped and the longest numeric prefix is used. Anything
/// that does not start with a number becomes NaN.
pub fn parse_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(n) => Some(n.as_f64().unwrap_or(f64::NAN)),
        Value::String(s) => Some(parse_float_prefix(s)),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => Some(f64::NAN),
    }
}

fn parse_float_prefix(text: &str) -> f64 {
    let t = text.trim_start();
    let bytes = t.as_bytes();
    let mut end = 0;

    let negative = matches!(bytes.first(), Some(b'-'));
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if t[end..].starts_with("Infinity") {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        let frac_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        digits += end - frac_start;
    }
    if digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    t[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Render with exactly `dp` fraction digits and thousands grouping.
fn fixed_grouped(value: f64, dp: u32) -> String {
    if let Some(text) = non_finite(value) {
        return text;
    }
    let plain = match Decimal::from_f64(value) {
        Some(d) => fixed_decimal(d, dp),
        None => format!("{value:.prec$}", prec = dp as usize),
    };
    group_thousands(&plain)
}

fn fixed_decimal(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded.to_string()
}

fn non_finite(value: f64) -> Option<String> {
    if value.is_nan() {
        Some("NaN".to_string())
    } else if value.is_infinite() {
        Some(if value.is_sign_negative() { "-∞" } else { "∞" }.to_string())
    } else {
        None
    }
}

/// Insert `,` every three integer digits of a plain decimal string.
fn group_thousands(plain: &str) -> String {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
