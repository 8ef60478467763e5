//! Storage-ready bill drafts built from parsed receipts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bill header plus its procurement rows, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillDraft {
    /// Bill number, parsed or generated.
    pub bill_no: String,

    /// Bill date.
    pub bill_date: NaiveDate,

    /// Shop name.
    pub shop_name: String,

    /// Bill total.
    pub total_amount: Decimal,

    /// Floor the bill is booked against.
    pub floor: String,

    /// How the bill entered the system.
    pub source: BillSource,

    /// Name of the uploaded file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,

    /// One row per receipt line item.
    pub items: Vec<ProcurementDraft>,
}

/// Origin of an imported bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillSource {
    PdfImport,
    ImageImport,
    TextImport,
}

/// A completed procurement row derived from a receipt line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcurementDraft {
    pub item_name: String,
    pub quantity: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub actual_cost: Decimal,
}
