//! Mapping parsed receipts onto storage-ready bill drafts.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::ImportError;
use crate::models::bill::{BillDraft, BillSource, ProcurementDraft};
use crate::models::config::ImportConfig;
use crate::models::receipt::{BillDate, LineItem};
use crate::receipt::rules::parse_loose_date;
use crate::receipt::ExtractionResult;

/// Booking details that do not come from the receipt itself.
#[derive(Debug, Clone)]
pub struct ImportContext {
    /// Floor the purchase is booked against.
    pub floor: String,
    pub original_filename: Option<String>,
    pub source: BillSource,
    /// Clock used for generated bill numbers and missing dates.
    pub now: DateTime<Utc>,
}

impl ImportContext {
    pub fn new(floor: impl Into<String>, source: BillSource) -> Self {
        Self {
            floor: floor.into(),
            original_filename: None,
            source,
            now: Utc::now(),
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.original_filename = Some(filename.into());
        self
    }
}

impl BillDraft {
    /// Build a draft bill from a parsed receipt.
    ///
    /// Fails only when the receipt carries a date that cannot be read.
    pub fn from_receipt(
        result: &ExtractionResult,
        ctx: &ImportContext,
        config: &ImportConfig,
    ) -> Result<Self, ImportError> {
        let record = &result.record;

        let bill_no = match &record.bill_number {
            Some(number) if !number.trim().is_empty() => number.trim().to_string(),
            _ => format!("{}-{}", config.bill_no_prefix, ctx.now.timestamp()),
        };

        let bill_date = match &record.bill_date {
            Some(BillDate::Iso(date)) => *date,
            Some(BillDate::Raw(raw)) => {
                parse_loose_date(raw).ok_or_else(|| ImportError::InvalidDate(raw.clone()))?
            }
            None => ctx.now.date_naive(),
        };

        let shop_name = if record.shop_name.trim().is_empty() {
            config.default_shop_name.clone()
        } else {
            record.shop_name.clone()
        };

        debug!("Drafting bill {} with {} items", bill_no, record.items.len());

        Ok(Self {
            bill_no,
            bill_date,
            shop_name,
            total_amount: record.total_amount,
            floor: ctx.floor.clone(),
            source: ctx.source,
            original_filename: ctx.original_filename.clone(),
            items: record.items.iter().map(ProcurementDraft::from_item).collect(),
        })
    }
}

impl ProcurementDraft {
    /// A completed, medium-priority row for an already purchased item.
    pub fn from_item(item: &LineItem) -> Self {
        Self {
            item_name: item.name.clone(),
            quantity: item.quantity.clone(),
            category: "other".to_string(),
            priority: "medium".to_string(),
            status: "completed".to_string(),
            actual_cost: item.cost,
        }
    }
}
