//! Best-effort parser for receipts from unknown stores.

use std::time::Instant;

use lazy_static::lazy_static;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::receipt::{BillDate, ReceiptRecord, UNKNOWN_STORE};

use super::rules::{
    amounts::normalize_amount, dates::keep_raw_date, first_match, patterns::*, FieldRule,
};
use super::{ExtractionResult, ReceiptParser};

lazy_static! {
    static ref TOTAL_RULES: Vec<FieldRule<Decimal>> = vec![
        FieldRule { name: "labeled_total", pattern: &GENERIC_TOTAL_LABELED, normalize: normalize_amount },
        FieldRule { name: "currency_prefixed", pattern: &GENERIC_TOTAL_CURRENCY, normalize: normalize_amount },
        FieldRule { name: "total_payable", pattern: &GENERIC_TOTAL_PAYABLE, normalize: normalize_amount },
    ];

    // Raw text is kept; see `BillDate::Raw`.
    static ref DATE_RULES: Vec<FieldRule<BillDate>> = vec![
        FieldRule { name: "dd/mm/yyyy", pattern: &DATE_SLASH_LONG, normalize: keep_raw_date },
        FieldRule { name: "dd-mm-yyyy", pattern: &DATE_DASH_LONG, normalize: keep_raw_date },
        FieldRule { name: "dd/mm/yy", pattern: &DATE_SLASH_SHORT, normalize: keep_raw_date },
        FieldRule { name: "dd mon yyyy", pattern: &DATE_MONTH_NAME, normalize: keep_raw_date },
    ];
}

/// Fallback parser used when no store layout is recognized.
///
/// Extracts only a total and a raw date; items are never extracted.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericParser;

impl GenericParser {
    pub fn new() -> Self {
        Self
    }
}

impl ReceiptParser for GenericParser {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut misses = Vec::new();
        let mut record = ReceiptRecord::new(UNKNOWN_STORE);

        info!("Parsing generic receipt from {} characters of text", text.len());

        if let Some(total) = first_match("total_amount", &TOTAL_RULES, text, &mut misses) {
            record.total_amount = total;
        }
        record.bill_date = first_match("bill_date", &DATE_RULES, text, &mut misses);

        debug!(
            "Generic parse: total {}, date {:?}",
            record.total_amount, record.bill_date
        );

        ExtractionResult {
            record,
            parser: self.name(),
            misses,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn parse(text: &str) -> ReceiptRecord {
        GenericParser::new().parse(text).record
    }

    #[test]
    fn test_nothing_recognized() {
        let result = GenericParser::new().parse("Thank you for shopping with us!");

        assert_eq!(result.parser, "generic");
        assert_eq!(result.record.shop_name, "Unknown Store");
        assert!(result.record.items.is_empty());
        assert_eq!(result.record.total_amount, Decimal::ZERO);
        assert_eq!(result.record.bill_date, None);
        assert_eq!(result.record.bill_number, None);
    }

    #[test]
    fn test_labeled_totals() {
        assert_eq!(parse("GRAND TOTAL: 1,499.00").total_amount, dec("1499.00"));
        assert_eq!(parse("Net Amount 250.50").total_amount, dec("250.50"));
        assert_eq!(parse("amount due : 99.90").total_amount, dec("99.90"));
    }

    #[test]
    fn test_currency_prefixed_total() {
        assert_eq!(parse("Paid Rs. 340.00 by UPI").total_amount, dec("340.00"));
        assert_eq!(parse("Paid ₹1,020.00").total_amount, dec("1020.00"));
    }

    #[test]
    fn test_labeled_total_beats_currency_prefix() {
        let record = parse("Rs. 10.00 tip\nTOTAL: 120.00");
        assert_eq!(record.total_amount, dec("120.00"));
    }

    #[test]
    fn test_raw_dates_in_priority_order() {
        assert_eq!(
            parse("on 05-01-2024 and 06/01/2024").bill_date,
            Some(BillDate::Raw("06/01/2024".to_string()))
        );
        assert_eq!(
            parse("Date 05-01-2024").bill_date,
            Some(BillDate::Raw("05-01-2024".to_string()))
        );
        assert_eq!(
            parse("Date 05/01/24").bill_date,
            Some(BillDate::Raw("05/01/24".to_string()))
        );
        assert_eq!(
            parse("Billed 05 Jan 2024").bill_date,
            Some(BillDate::Raw("05 Jan 2024".to_string()))
        );
    }

    #[test]
    fn test_items_are_never_extracted() {
        let record = parse("123456 Sample Item 2.0 10.00 20.00 0.00 20.00");
        assert!(record.items.is_empty());
    }
}
