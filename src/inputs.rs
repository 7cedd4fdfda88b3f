//! Inputs
//!
//! Normalisation applied when the user commits a value in one of the entry
//! fields. The payout engine accepts raw values; these helpers only keep the
//! editing ranges sane.

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::ToPrimitive,
};

/// Lowest PPW accepted on commit.
pub const PPW_MIN: f64 = 2.4;

/// Highest PPW accepted on commit.
pub const PPW_MAX: f64 = 5.0;

/// Smallest system size (watts) accepted on commit.
pub const WATTS_MIN: u32 = 4001;

/// Largest system size (watts) accepted on commit.
pub const WATTS_MAX: u32 = 30_000;

/// Largest deal count the deal picker allows.
pub const DEALS_MAX: u32 = 50;

/// Commit PPW text.
///
/// The leading number of `text` is parsed leniently (`"3.1x"` reads as 3.1).
/// Text without a leading number commits as `0` without clamping; anything
/// else is clamped to [`PPW_MIN`]..=[`PPW_MAX`] and rounded to two decimal
/// places.
pub fn commit_ppw(text: &str) -> f64 {
    let Some(value) = parse_leading_float(text) else {
        return 0.0;
    };

    round_cents(value.clamp(PPW_MIN, PPW_MAX))
}

/// Commit watts text.
///
/// Non-digit characters are dropped (`"8,400 W"` reads as 8400). Text with no
/// digits commits as `0` without clamping; anything else is clamped to
/// [`WATTS_MIN`]..=[`WATTS_MAX`].
pub fn commit_watts(text: &str) -> u32 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();

    if digits.is_empty() {
        return 0;
    }

    // Only overflow can fail here, which clamps to the top of the range.
    let watts = digits.parse::<u64>().unwrap_or(u64::MAX);

    u32::try_from(watts.clamp(u64::from(WATTS_MIN), u64::from(WATTS_MAX))).unwrap_or(WATTS_MAX)
}

/// Clamp a deal count to `0..=DEALS_MAX`.
pub fn clamp_deals(deals: i64) -> u32 {
    u32::try_from(deals.clamp(0, i64::from(DEALS_MAX))).unwrap_or(0)
}

/// Round to two decimal places using the exact binary value of `value`,
/// so `2.675` (stored as `2.67499…`) rounds down.
fn round_cents(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|exact| exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_f64())
        .unwrap_or(value)
}

/// Parse the longest prefix of `text` (after leading whitespace) that reads
/// as a decimal number with an optional sign, fraction and exponent, or as a
/// signed `Infinity`.
fn parse_leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes
            .iter()
            .skip(start)
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if text.get(end..).is_some_and(|rest| rest.starts_with("Infinity")) {
        return Some(if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let integer_digits = digits_from(end);
    end += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = digits_from(end + 1);
        if integer_digits > 0 || fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }

    if integer_digits == 0 && fraction_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent_digits = digits_from(end + 1 + sign);

        if exponent_digits > 0 {
            end += 1 + sign + exponent_digits;
        }
    }

    text.get(..end)?.parse().ok()
}
