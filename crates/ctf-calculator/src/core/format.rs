//! Number parsing and display formatting

use crate::core::{CalcError, CalcResult};

/// Text shown in place of the entry after a division by zero
pub const ERROR_MARKER: &str = "Error";

/// Formats a value with the shortest decimal text that parses back to the
/// same `f64`, capped at 16 significant digits.
///
/// The cap only affects values whose round trip needs all 17 digits, so
/// `0.1 + 0.2` renders as `0.3` while `1 / 3` keeps its 16 threes. Such
/// values do not survive the round trip: `12345678901234567` renders as
/// `12345678901234570`.
/// Never uses exponent notation, padding or digit grouping:
/// `1e21` renders as `1000000000000000000000`, `0.5` as `0.5`.
/// Non-finite values render as `+Inf`, `-Inf` and `NaN`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        }
    } else {
        // f64's Display is the shortest round-trip representation
        let rounded = format!("{value:.15e}").parse::<f64>().unwrap_or(value);
        format!("{rounded}")
    }
}

/// Formats a value rounded to zero decimal places (used for the first
/// operand in the expression line)
#[must_use]
pub fn format_whole(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.0}")
    } else {
        format_number(value)
    }
}

/// Parses an entry string as a finite number.
///
/// The error marker, a lone `-` left behind by backspace, malformed text and
/// values that overflow to infinity are all parse failures.
pub fn parse_entry(entry: &str) -> CalcResult<f64> {
    match entry.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::parse_failure(entry)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== format_number tests =====

    #[test]
    fn test_format_integers() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-7.0), "-7");
        assert_eq!(format_number(2674.0), "2674");
    }

    #[test]
    fn test_format_fractions() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333333333");
    }

    #[test]
    fn test_format_is_shortest_round_trip() {
        assert_eq!(format_number(0.3), "0.3");
        assert_eq!(format_number(2.0 / 3.0), "0.6666666666666666");
        assert_eq!(format_number(1.1), "1.1");
        let parsed: f64 = format_number(2.0 / 3.0).parse().unwrap();
        assert_eq!(parsed, 2.0 / 3.0);
    }

    #[test]
    fn test_format_caps_significant_digits() {
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(1.1 * 3.0), "3.3");
    }

    #[test]
    fn test_format_rounds_seventeen_digit_integers() {
        let value: f64 = "12345678901234567".parse().unwrap();
        assert_eq!(format_number(value), "12345678901234570");
        // the shown text parses to a neighbouring f64
        assert_ne!(parse_entry(&format_number(value)), Ok(value));
    }

    #[test]
    fn test_format_never_uses_exponent() {
        assert_eq!(format_number(1e21), "1000000000000000000000");
        assert_eq!(format_number(1e-7), "0.0000001");
    }

    #[test]
    fn test_format_negative_zero() {
        assert_eq!(format_number(-0.0), "-0");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_number(f64::INFINITY), "+Inf");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Inf");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    // ===== format_whole tests =====

    #[test]
    fn test_format_whole_rounds() {
        assert_eq!(format_whole(12.0), "12");
        assert_eq!(format_whole(12.4), "12");
        assert_eq!(format_whole(12.6), "13");
        assert_eq!(format_whole(0.05), "0");
    }

    // ===== parse_entry tests =====

    #[test]
    fn test_parse_valid_entries() {
        assert_eq!(parse_entry("0"), Ok(0.0));
        assert_eq!(parse_entry("1337"), Ok(1337.0));
        assert_eq!(parse_entry("3."), Ok(3.0));
        assert_eq!(parse_entry(".5"), Ok(0.5));
        assert_eq!(parse_entry("-2.5"), Ok(-2.5));
    }

    #[test]
    fn test_parse_invalid_entries() {
        assert!(parse_entry(ERROR_MARKER).is_err());
        assert!(parse_entry("-").is_err());
        assert!(parse_entry(".").is_err());
        assert!(parse_entry("").is_err());
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        assert!(parse_entry("+Inf").is_err());
        assert!(parse_entry("NaN").is_err());
        assert!(parse_entry(&"9".repeat(400)).is_err());
    }
}
