//! Normalized receipt record produced by the parsers.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shop label used when no store layout was recognized.
pub const UNKNOWN_STORE: &str = "Unknown Store";

/// A parsed receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// Order or invoice identifier.
    pub bill_number: Option<String>,

    /// Bill date, ISO-normalized by store parsers, raw for the generic parser.
    pub bill_date: Option<BillDate>,

    /// Store name or parser-specific label.
    pub shop_name: String,

    /// Final payable amount.
    pub total_amount: Decimal,

    /// Line items in order of appearance.
    pub items: Vec<LineItem>,
}

impl ReceiptRecord {
    /// Create an empty record for the given shop label.
    pub fn new(shop_name: impl Into<String>) -> Self {
        Self {
            bill_number: None,
            bill_date: None,
            shop_name: shop_name.into(),
            total_amount: Decimal::ZERO,
            items: Vec::new(),
        }
    }

    /// Sum of all item costs, `None` if it does not fit in a `Decimal`.
    pub fn items_total(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.cost))
    }

    /// Whether the total should be derived from the items.
    pub fn needs_item_total(&self) -> bool {
        self.total_amount.is_zero() && !self.items.is_empty()
    }

    /// Whether anything at all was recognized.
    pub fn is_empty(&self) -> bool {
        self.bill_number.is_none()
            && self.bill_date.is_none()
            && self.items.is_empty()
            && self.total_amount.is_zero()
    }
}

impl Default for ReceiptRecord {
    fn default() -> Self {
        Self::new(UNKNOWN_STORE)
    }
}

/// One product row on a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Single-line product description.
    pub name: String,

    /// Quantity as printed ("1.0", "400Gm", ...).
    pub quantity: String,

    /// Net value of the row.
    pub cost: Decimal,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>, cost: Decimal) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            cost,
        }
    }
}

/// Date printed on a bill.
///
/// Store parsers normalize to a calendar date; the generic parser keeps the
/// matched text untouched. Both serialize as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BillDate {
    /// Normalized date (`YYYY-MM-DD` when serialized).
    Iso(NaiveDate),
    /// Raw matched text.
    Raw(String),
}

impl BillDate {
    /// The normalized date, if this is one.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Iso(date) => Some(*date),
            Self::Raw(_) => None,
        }
    }
}

impl fmt::Display for BillDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iso(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_items_total() {
        let mut record = ReceiptRecord::new("Shop");
        record.items.push(LineItem::new("A", "1", Decimal::from_str("10.50").unwrap()));
        record.items.push(LineItem::new("B", "2", Decimal::from_str("4.25").unwrap()));

        assert!(record.needs_item_total());
        assert_eq!(record.items_total(), Some(Decimal::from_str("14.75").unwrap()));

        record.total_amount = Decimal::ONE;
        assert!(!record.needs_item_total());
    }

    #[test]
    fn test_items_total_overflow() {
        let mut record = ReceiptRecord::new("Shop");
        record.items.push(LineItem::new("A", "1", Decimal::MAX));
        record.items.push(LineItem::new("B", "1", Decimal::MAX));

        assert_eq!(record.items_total(), None);
    }

    #[test]
    fn test_empty_record_keeps_zero_total() {
        let record = ReceiptRecord::default();
        assert!(!record.needs_item_total());
        assert_eq!(record.items_total(), Some(Decimal::ZERO));
        assert!(record.total_amount.is_zero());
        assert_eq!(record.shop_name, UNKNOWN_STORE);
        assert!(record.is_empty());
    }

    #[test]
    fn test_bill_date_serializes_as_string() {
        let iso = BillDate::Iso(NaiveDate::from_ymd_opt(2023, 12, 25).unwrap());
        let raw = BillDate::Raw("25 DEC 2023".to_string());

        assert_eq!(serde_json::to_string(&iso).unwrap(), "\"2023-12-25\"");
        assert_eq!(serde_json::to_string(&raw).unwrap(), "\"25 DEC 2023\"");
        assert_eq!(iso.to_string(), "2023-12-25");

        let back: BillDate = serde_json::from_str("\"2023-12-25\"").unwrap();
        assert_eq!(back, iso);
        let back: BillDate = serde_json::from_str("\"25/12/23\"").unwrap();
        assert_eq!(back, BillDate::Raw("25/12/23".to_string()));
    }
}
