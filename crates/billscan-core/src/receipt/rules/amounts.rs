//! Amount parsing for receipt totals and item costs.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::receipt::ParseMiss;

/// Parse a receipt amount such as `"1,234.50"`.
///
/// Comma thousands separators are dropped. Negative values are rejected:
/// receipt amounts are never below zero.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned)
        .ok()
        .filter(|amount| !amount.is_sign_negative())
}

/// [`FieldRule`](super::FieldRule) normalizer for amounts.
pub fn normalize_amount(field: &'static str, raw: &str) -> Result<Decimal, ParseMiss> {
    parse_amount(raw).ok_or_else(|| ParseMiss::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("20.00"), Some(Decimal::from_str("20.00").unwrap()));
        assert_eq!(parse_amount("1,234.56"), Some(Decimal::from_str("1234.56").unwrap()));
        assert_eq!(
            parse_amount("12,34,567.89"),
            Some(Decimal::from_str("1234567.89").unwrap())
        );
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount(",,,"), None);
        assert_eq!(parse_amount("1.2.3"), None);
        assert_eq!(parse_amount("-5.00"), None);
    }

    #[test]
    fn test_normalize_amount_reports_field() {
        assert_eq!(
            normalize_amount("cost", "1..2"),
            Err(ParseMiss::InvalidNumber { field: "cost", value: "1..2".to_string() })
        );
    }
}
