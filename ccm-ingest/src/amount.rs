//! European amount normalization ("1.234,56" -> "1234,56").

const THOUSANDS_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';

/// Parse a European-formatted amount into a number.
///
/// Thousands separators are dropped and the decimal comma becomes a period.
/// Anything left over that is not a finite number gives `None`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != THOUSANDS_SEPARATOR)
        .map(|c| if c == DECIMAL_SEPARATOR { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Normalize an amount column to its canonical form: two fractional digits,
/// comma decimal separator, no thousands separator.
///
/// Blank or unparseable input means "no amount" and yields `None`.
pub fn normalize_amount(raw: &str) -> Option<String> {
    let value = parse_amount(raw)?;
    Some(format!("{value:.2}").replace('.', ","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_and_decimal_separators() {
        assert_eq!(normalize_amount("1.234,56").as_deref(), Some("1234,56"));
        assert_eq!(normalize_amount("1.234,5").as_deref(), Some("1234,50"));
        assert_eq!(normalize_amount("12.345.678,9").as_deref(), Some("12345678,90"));
    }

    #[test]
    fn test_plain_amounts_get_two_digits() {
        assert_eq!(normalize_amount("12,50").as_deref(), Some("12,50"));
        assert_eq!(normalize_amount("7").as_deref(), Some("7,00"));
        assert_eq!(normalize_amount("0,00").as_deref(), Some("0,00"));
    }

    #[test]
    fn test_padding_is_ignored() {
        assert_eq!(normalize_amount("      45,10   ").as_deref(), Some("45,10"));
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(normalize_amount("-1.000,25").as_deref(), Some("-1000,25"));
    }

    #[test]
    fn test_blank_is_absent_not_zero() {
        assert_eq!(normalize_amount(""), None);
        assert_eq!(normalize_amount("   "), None);
    }

    #[test]
    fn test_garbage_is_absent() {
        assert_eq!(normalize_amount("abc"), None);
        assert_eq!(normalize_amount("12,50 EUR"), None);
        assert_eq!(normalize_amount("1,2,3"), None);
        assert_eq!(normalize_amount("12,50      3"), None);
    }

    #[test]
    fn test_non_finite_is_absent() {
        assert_eq!(normalize_amount("inf"), None);
        assert_eq!(normalize_amount("NaN"), None);
    }

    #[test]
    fn test_parse_amount_value() {
        assert_eq!(parse_amount("1.234,56"), Some(1234.56));
        assert_eq!(parse_amount(","), None);
    }
}
