//! Number formatting for terminal output.

const BILLION: f64 = 1_000_000_000.0;
const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;

/// Format a dollar amount with a B/M/K suffix.
///
/// The sign goes before the dollar sign; `None` renders as `"N/A"`.
///
/// ```
/// use altman_output::format_currency;
///
/// assert_eq!(format_currency(Some(352_583_000_000.0)), "$352.58B");
/// assert_eq!(format_currency(Some(-1_500_000.0)), "-$1.50M");
/// assert_eq!(format_currency(None), "N/A");
/// ```
pub fn format_currency(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return "N/A".to_string();
    };

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    let (scaled, suffix) = if magnitude >= BILLION {
        (magnitude / BILLION, "B")
    } else if magnitude >= MILLION {
        (magnitude / MILLION, "M")
    } else if magnitude >= THOUSAND {
        (magnitude / THOUSAND, "K")
    } else {
        (magnitude, "")
    };
    format!("{sign}${scaled:.2}{suffix}")
}

/// Format a ratio with four decimals.
pub fn format_ratio(value: f64) -> String {
    format!("{value:.4}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(1_000_000_000.0), "$1.00B")]
    #[case(Some(999_999_999.0), "$1000.00M")]
    #[case(Some(2_500_000.0), "$2.50M")]
    #[case(Some(1_000.0), "$1.00K")]
    #[case(Some(999.5), "$999.50")]
    #[case(Some(0.0), "$0.00")]
    #[case(Some(-143_600_000_000.0), "-$143.60B")]
    #[case(Some(-12.0), "-$12.00")]
    #[case(None, "N/A")]
    #[case(Some(f64::NAN), "N/A")]
    fn test_format_currency(#[case] value: Option<f64>, #[case] expected: &str) {
        assert_eq!(format_currency(value), expected);
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(0.123456), "0.1235");
        assert_eq!(format_ratio(-2.0), "-2.0000");
    }
}
