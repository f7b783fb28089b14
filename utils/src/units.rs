//! Conversion between human decimal quantities and smallest-unit integers.
//!
//! A token with `decimals = 18` displays `1.5` for `1_500_000_000_000_000_000`
//! smallest units. Scaling works on the decimal digits directly, so any
//! `decimals` value is accepted and only the final integer must fit in `u128`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitsError {
    #[error("empty amount")]
    Empty,

    #[error("malformed amount '{0}'")]
    Malformed(String),

    #[error("amount '{input}' has more than {decimals} fractional digits")]
    TooPrecise { input: String, decimals: u8 },

    #[error("amount '{0}' does not fit in 128 bits")]
    Overflow(String),
}

/// Scale a human decimal string like `"1.5"` by `10^decimals`.
pub fn parse_units(text: &str, decimals: u8) -> Result<u128, UnitsError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(UnitsError::Empty);
    }

    let (whole, frac) = match text.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (text, ""),
    };
    let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !digits_only(whole) || !digits_only(frac) {
        return Err(UnitsError::Malformed(text.to_string()));
    }

    // Trailing zeros past the precision carry no value.
    let frac = frac.trim_end_matches('0');
    if frac.len() > usize::from(decimals) {
        return Err(UnitsError::TooPrecise {
            input: text.to_string(),
            decimals,
        });
    }

    let mut scaled = String::with_capacity(whole.len() + usize::from(decimals) + 1);
    scaled.push_str(whole);
    scaled.push_str(frac);
    scaled.extend(std::iter::repeat('0').take(usize::from(decimals) - frac.len()));
    let scaled = scaled.trim_start_matches('0');
    if scaled.is_empty() {
        return Ok(0);
    }
    scaled
        .parse::<u128>()
        .map_err(|_| UnitsError::Overflow(text.to_string()))
}

/// Render `value` smallest units as a decimal string, trimming trailing
/// fractional zeros (`1_500` with 3 decimals is `"1.5"`).
pub fn format_units(value: u128, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = usize::from(decimals);
    if decimals == 0 {
        return digits;
    }

    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals + 1 - digits.len()), digits)
    } else {
        digits
    };
    let (whole, frac) = padded.split_at(padded.len() - decimals);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{frac}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_whole_and_fractional() {
        assert_eq!(parse_units("1000", 0), Ok(1000));
        assert_eq!(parse_units("1.5", 3), Ok(1500));
        assert_eq!(parse_units("0.001", 3), Ok(1));
        assert_eq!(parse_units(".5", 1), Ok(5));
        assert_eq!(parse_units("2.", 2), Ok(200));
        assert_eq!(parse_units("100", 18), Ok(100 * 10u128.pow(18)));
    }

    #[test]
    fn parse_ignores_trailing_fractional_zeros() {
        assert_eq!(parse_units("1.500000", 1), Ok(15));
        assert_eq!(parse_units("7.0", 0), Ok(7));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(parse_units("", 18), Err(UnitsError::Empty));
        assert!(matches!(parse_units("1.2.3", 18), Err(UnitsError::Malformed(_))));
        assert!(matches!(parse_units("-1", 18), Err(UnitsError::Malformed(_))));
        assert!(matches!(parse_units(".", 18), Err(UnitsError::Malformed(_))));
        assert!(matches!(parse_units("1e5", 18), Err(UnitsError::Malformed(_))));
        assert!(matches!(
            parse_units("0.0001", 3),
            Err(UnitsError::TooPrecise { decimals: 3, .. })
        ));
    }

    #[test]
    fn parse_rejects_overflow() {
        let max = u128::MAX.to_string();
        assert_eq!(parse_units(&max, 0), Ok(u128::MAX));
        assert!(matches!(parse_units(&max, 1), Err(UnitsError::Overflow(_))));
        assert!(matches!(parse_units("1", 39), Err(UnitsError::Overflow(_))));
        assert_eq!(parse_units("0", 255), Ok(0));
    }

    #[test]
    fn format_trims_and_pads() {
        assert_eq!(format_units(1500, 3), "1.5");
        assert_eq!(format_units(1000, 3), "1");
        assert_eq!(format_units(1, 3), "0.001");
        assert_eq!(format_units(0, 18), "0");
        assert_eq!(format_units(1100, 0), "1100");
        assert_eq!(format_units(1100 * 10u128.pow(18), 18), "1100");
    }

    #[test]
    fn format_then_parse_is_identity() {
        for (value, decimals) in [(0u128, 0u8), (1, 18), (123_456_789, 4), (u128::MAX, 38)] {
            assert_eq!(parse_units(&format_units(value, decimals), decimals), Ok(value));
        }
    }
}
