// src/money.rs

use num_format::{Locale, ToFormattedString};

pub const CURRENCY_SUFFIX: &str = "đ";

const FRACTION_SCALE: f64 = 1000.0;

/// Formats an amount the way the storefront shows prices: vi-VN thousands
/// grouping, up to three decimals after a comma, then the currency suffix.
///
/// `45000.0` -> `45.000đ`, `1234.5` -> `1.234,5đ`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("0{CURRENCY_SUFFIX}");
    }

    let magnitude = (amount.abs() * FRACTION_SCALE).round();
    if magnitude >= u64::MAX as f64 {
        // Beyond integer range: no grouping, no fraction.
        return format!("{amount:.0}{CURRENCY_SUFFIX}");
    }
    let scaled = magnitude as u64;
    let whole = scaled / FRACTION_SCALE as u64;
    let fraction = scaled % FRACTION_SCALE as u64;

    let mut out = String::new();
    if amount < 0.0 && scaled > 0 {
        out.push('-');
    }
    out.push_str(&whole.to_formatted_string(&Locale::vi));
    if fraction > 0 {
        let digits = format!("{fraction:03}");
        out.push(',');
        out.push_str(digits.trim_end_matches('0'));
    }
    out.push_str(CURRENCY_SUFFIX);
    out
}

/// Price delta shown next to an option value, e.g. `+5.000đ`.
pub fn format_adjustment(amount: f64) -> String {
    if amount < 0.0 {
        format_currency(amount)
    } else {
        format!("+{}", format_currency(amount))
    }
}
