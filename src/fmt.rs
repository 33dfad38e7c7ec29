use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{AdRowsError, Result};

const MICROS_PER_UNIT: i64 = 1_000_000;

/// Report downloads use `--` (sometimes ` --`) for "no value".
pub fn is_null_cell(raw: &str) -> bool {
    let s = raw.trim();
    s.is_empty() || s == "--"
}

/// Parse a numeric report cell into a decimal.
///
/// Accepts grouping commas, a trailing `%` and the `<`/`>` prefixes used for
/// bucketed shares (`< 10%` parses as `10`).
pub fn parse_decimal(raw: &str) -> Result<Option<Decimal>> {
    if is_null_cell(raw) {
        return Ok(None);
    }
    let s = raw.trim();
    let s = s
        .strip_prefix('<')
        .or_else(|| s.strip_prefix('>'))
        .unwrap_or(s)
        .trim();
    let s = s.strip_suffix('%').unwrap_or(s).trim();
    let s = s.replace(',', "");
    Decimal::from_str(&s)
        .map(Some)
        .map_err(|_| AdRowsError::invalid(raw, "a decimal number"))
}

/// Two fraction digits, half away from zero, plain notation: `1234.50`.
pub fn format_readable(val: Decimal) -> String {
    let mut rounded = val.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(2);
    rounded.to_string()
}

pub fn format_percent(val: Decimal) -> String {
    format!("{}%", format_readable(val))
}

pub fn micros_to_units(micros: Decimal) -> Decimal {
    micros / Decimal::new(MICROS_PER_UNIT, 0)
}

/// Format a decimal as a dollar amount with thousands separators: $1,234.56
pub fn money(val: Decimal) -> String {
    let negative = val.is_sign_negative() && !val.is_zero();
    let cents = format_readable(val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}
