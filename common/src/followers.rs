//! Follower count codec.
//!
//! Operators type follower counts the way they read them on a profile page
//! ("14.7M", "2,300", "500"), and the wall shows them back in the same
//! abbreviated style. The canonical stored value is always a plain integer.
//!
//! Parsing is permissive: anything that cannot be understood becomes `0`.
//!
//! Formatting, with every rounding half-up:
//! - below 100 units of either band, one decimal with a trailing `.0` dropped
//!   (`2_300 -> "2.3K"`, `20_000_000 -> "20M"`);
//! - from 100K up, the nearest multiple of 10K (`123_000 -> "120K"`), and a
//!   value that rounds up to 1000K is shown as `"1M"`;
//! - from 100M up, whole millions, with no billion suffix
//!   (`155_000_000 -> "155M"`, `1_234_000_000 -> "1234M"`).
//!
//! `parse_followers_str(&format_followers(n))` is therefore within 5% of `n`.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

const THOUSAND: u64 = 1_000;
const MILLION: u64 = 1_000_000;
const BILLION: u64 = 1_000_000_000;

/// `<digits with an optional decimal point><optional K|M|B>`, applied to the
/// upper-cased input with thousands separators removed.
static ABBREVIATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d*)?|\.\d+)\s*([KMB]?)$").expect("follower pattern is valid")
});

/// Longest numeric prefix, used when the input is not a clean abbreviation
/// (`"1.5 MILLION"`, `"12 FOLLOWERS"`).
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:E[+-]?\d+)?").expect("number pattern is valid")
});

/// Parses a follower count from a JSON value.
///
/// Numbers pass through (fractions are rounded, negatives become 0), strings
/// go through [`parse_followers_str`], and every other shape is 0.
pub fn parse_followers(input: &Value) -> u64 {
    match input {
        Value::Number(n) => match n.as_u64() {
            Some(count) => count,
            None => n.as_f64().map(round_to_count).unwrap_or(0),
        },
        Value::String(s) => parse_followers_str(s),
        _ => 0,
    }
}

/// Parses an operator-entered follower count such as `"14.7M"` or `"2,300"`.
pub fn parse_followers_str(input: &str) -> u64 {
    let cleaned = input.replace(',', "").trim().to_uppercase();

    if let Some(caps) = ABBREVIATED.captures(&cleaned) {
        let amount: f64 = caps[1].parse().unwrap_or(0.0);
        let multiplier = match &caps[2] {
            "K" => THOUSAND,
            "M" => MILLION,
            "B" => BILLION,
            _ => 1,
        };
        return round_to_count(amount * multiplier as f64);
    }

    LEADING_NUMBER
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(round_to_count)
        .unwrap_or(0)
}

/// Formats a follower count for display (`14_700_000 -> "14.7M"`).
pub fn format_followers(count: u64) -> String {
    if count >= 100 * MILLION {
        format!("{}M", div_round(count, MILLION))
    } else if count >= MILLION {
        one_decimal(count, MILLION, "M")
    } else if count >= 100 * THOUSAND {
        let tens = div_round(count, 10 * THOUSAND);
        if tens >= 100 {
            return "1M".to_string();
        }
        format!("{}K", tens * 10)
    } else if count >= THOUSAND {
        one_decimal(count, THOUSAND, "K")
    } else {
        count.to_string()
    }
}

fn one_decimal(count: u64, unit: u64, suffix: &str) -> String {
    let tenths = div_round(count, unit / 10);
    if tenths % 10 == 0 {
        format!("{}{}", tenths / 10, suffix)
    } else {
        format!("{}.{}{}", tenths / 10, tenths % 10, suffix)
    }
}

/// Integer division rounding half up. Does not overflow near `u64::MAX`.
fn div_round(value: u64, divisor: u64) -> u64 {
    let quotient = value / divisor;
    if (value % divisor) * 2 >= divisor {
        quotient + 1
    } else {
        quotient
    }
}

/// Rounds half away from zero; negatives, NaN and infinities become 0.
fn round_to_count(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    // `as` saturates at u64::MAX.
    value.round() as u64
}
