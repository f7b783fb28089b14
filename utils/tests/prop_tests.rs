use proptest::prelude::*;

use slp_utils::{format_units, parse_units};

proptest! {
    /// Formatting then parsing returns the original smallest-unit value.
    #[test]
    fn format_parse_roundtrip(value in any::<u128>(), decimals in 0u8..=38) {
        let text = format_units(value, decimals);
        prop_assert_eq!(parse_units(&text, decimals), Ok(value));
    }

    /// Formatted output never ends in a fractional zero or a bare point.
    #[test]
    fn format_is_trimmed(value in any::<u128>(), decimals in 1u8..=38) {
        let text = format_units(value, decimals);
        if text.contains('.') {
            prop_assert!(!text.ends_with('0') && !text.ends_with('.'), "untrimmed: {}", text);
        }
    }

    /// Scaling a whole number multiplies by 10^decimals.
    #[test]
    fn whole_numbers_scale(whole in 0u64.., decimals in 0u8..=18) {
        let expected = u128::from(whole) * 10u128.pow(u32::from(decimals));
        prop_assert_eq!(parse_units(&whole.to_string(), decimals), Ok(expected));
    }
}
