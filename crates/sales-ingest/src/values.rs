//! Parsing of list-field elements.
//!
//! Every parser returns `None` on malformed input; the caller skips that
//! element and carries on with the rest of the line.

use chrono::NaiveDate;

/// Parses a unit price. Non-finite values (`NaN`, `inf`) are rejected.
pub fn parse_unit_price(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|price| price.is_finite())
}

/// Parses an integer quantity.
pub fn parse_quantity(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Parses an 8-digit `YYYYMMDD` order date.
pub fn parse_order_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.len() != 8 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y%m%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prices() {
        assert_eq!(parse_unit_price("9.99"), Some(9.99));
        assert_eq!(parse_unit_price(" 5 "), Some(5.0));
        assert_eq!(parse_unit_price("1e2"), Some(100.0));
        assert_eq!(parse_unit_price(""), None);
        assert_eq!(parse_unit_price("abc"), None);
        assert_eq!(parse_unit_price("NaN"), None);
        assert_eq!(parse_unit_price("inf"), None);
    }

    #[test]
    fn test_quantities() {
        assert_eq!(parse_quantity("3"), Some(3));
        assert_eq!(parse_quantity("+3"), Some(3));
        assert_eq!(parse_quantity("3.0"), None);
        assert_eq!(parse_quantity("three"), None);
        assert_eq!(parse_quantity(""), None);
    }

    #[test]
    fn test_dates() {
        assert_eq!(
            parse_order_date("20230115"),
            NaiveDate::from_ymd_opt(2023, 1, 15)
        );
        assert_eq!(parse_order_date("20231301"), None);
        assert_eq!(parse_order_date("20230230"), None);
        assert_eq!(parse_order_date("2023-01-15"), None);
        assert_eq!(parse_order_date("2023115"), None);
        assert_eq!(parse_order_date(""), None);
    }
}
