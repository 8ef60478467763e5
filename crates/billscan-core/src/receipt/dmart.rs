//! Parser for D-Mart (Avenue E-Commerce) invoices.

use std::time::Instant;

use lazy_static::lazy_static;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::receipt::{BillDate, ReceiptRecord};

use super::rules::{
    amounts::normalize_amount,
    dates::normalize_slash_date,
    first_match,
    items::extract_store_items,
    keep_raw,
    patterns::*,
    FieldRule,
};
use super::{ExtractionResult, ParseMiss, ReceiptParser};

/// Shop label stamped on every D-Mart record.
pub const DMART_SHOP_NAME: &str = "D-Mart (Avenue E-Commerce)";

lazy_static! {
    static ref BILL_NUMBER_RULES: Vec<FieldRule<String>> = vec![FieldRule {
        name: "order_or_invoice_number",
        pattern: &DMART_BILL_NUMBER,
        normalize: keep_raw,
    }];

    static ref BILL_DATE_RULES: Vec<FieldRule<BillDate>> = vec![FieldRule {
        name: "invoice_or_order_date",
        pattern: &DMART_BILL_DATE,
        normalize: normalize_slash_date,
    }];

    static ref TOTAL_RULES: Vec<FieldRule<Decimal>> = vec![
        FieldRule { name: "amount", pattern: &DMART_TOTAL_AMOUNT, normalize: normalize_amount },
        FieldRule { name: "to_be_collected", pattern: &DMART_TOTAL_COLLECTED, normalize: normalize_amount },
        FieldRule { name: "summary_line", pattern: &DMART_TOTAL_SUMMARY, normalize: normalize_amount },
    ];
}

/// D-Mart invoice parser.
///
/// Handles both the current item table (HSN, particulars and five numeric
/// columns) and the older numbered layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct DMartParser;

impl DMartParser {
    pub fn new() -> Self {
        Self
    }
}

impl ReceiptParser for DMartParser {
    fn name(&self) -> &'static str {
        "dmart"
    }

    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut misses = Vec::new();
        let mut record = ReceiptRecord::new(DMART_SHOP_NAME);

        info!("Parsing D-Mart receipt from {} characters of text", text.len());

        record.bill_number = first_match("bill_number", &BILL_NUMBER_RULES, text, &mut misses);
        record.bill_date = first_match("bill_date", &BILL_DATE_RULES, text, &mut misses);

        let (items, layout) = extract_store_items(text, &mut misses);
        debug!("Extracted {} items using {:?} layout", items.len(), layout);
        record.items = items;

        if let Some(total) = first_match("total_amount", &TOTAL_RULES, text, &mut misses) {
            record.total_amount = total;
        }
        if record.needs_item_total() {
            match record.items_total() {
                Some(sum) => {
                    debug!("Total derived from {} item costs", record.items.len());
                    record.total_amount = sum;
                }
                None => {
                    debug!("Item costs overflow, total left at zero");
                    misses.push(ParseMiss::InvalidNumber {
                        field: "total_amount",
                        value: format!("sum of {} item costs", record.items.len()),
                    });
                }
            }
        }

        debug!(
            "Extracted D-Mart bill {:?} with {} items, total {}",
            record.bill_number,
            record.items.len(),
            record.total_amount
        );

        ExtractionResult {
            record,
            parser: self.name(),
            misses,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}
