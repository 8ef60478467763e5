//! Line item extraction for store receipts.

use regex::Captures;
use tracing::debug;

use super::amounts::parse_amount;
use super::patterns::{DMART_ITEM, DMART_ITEM_LEGACY};
use crate::models::receipt::LineItem;
use crate::receipt::ParseMiss;

/// Markers of tax-summary rows that the permissive item patterns pick up.
const NON_ITEM_MARKERS: &[&str] = &["CGST@", "SGST@", "TOTAL"];

/// Which item table layout produced the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLayout {
    /// HSN, particulars, qty, rate, value, discount, net value.
    Current,
    /// Sr., HSN, tax code, name, qty, rate, value.
    Legacy,
}

/// Collapse runs of whitespace (newlines included) into single spaces.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether a collapsed description is a summary row rather than a product.
pub fn is_non_item(name: &str) -> bool {
    if name.is_empty() {
        return true;
    }
    let upper = name.to_uppercase();
    NON_ITEM_MARKERS.iter().any(|marker| upper.contains(marker))
}

/// Extract rows using the current layout, falling back to the legacy
/// layout only when the current one yields nothing.
pub fn extract_store_items(text: &str, misses: &mut Vec<ParseMiss>) -> (Vec<LineItem>, ItemLayout) {
    let items = extract_rows(text, ItemLayout::Current, misses);
    if !items.is_empty() {
        return (items, ItemLayout::Current);
    }

    debug!("no current-layout rows, trying legacy layout");
    (extract_rows(text, ItemLayout::Legacy, misses), ItemLayout::Legacy)
}

/// Extract all rows of one layout.
pub fn extract_rows(text: &str, layout: ItemLayout, misses: &mut Vec<ParseMiss>) -> Vec<LineItem> {
    let pattern = match layout {
        ItemLayout::Current => &*DMART_ITEM,
        ItemLayout::Legacy => &*DMART_ITEM_LEGACY,
    };

    pattern
        .captures_iter(text)
        .filter_map(|caps| row_to_item(&caps, layout, misses))
        .collect()
}

fn row_to_item(caps: &Captures<'_>, layout: ItemLayout, misses: &mut Vec<ParseMiss>) -> Option<LineItem> {
    // Capture group indices per layout: (name, quantity, cost)
    let (name_idx, qty_idx, cost_idx) = match layout {
        ItemLayout::Current => (2, 3, 7),
        ItemLayout::Legacy => (4, 5, 7),
    };

    let name = collapse_whitespace(&caps[name_idx]);
    if is_non_item(&name) {
        debug!(name = %name, "skipping summary row");
        misses.push(ParseMiss::RejectedItem { name });
        return None;
    }

    let raw_cost = &caps[cost_idx];
    let Some(cost) = parse_amount(raw_cost) else {
        debug!(name = %name, cost = raw_cost, "skipping row with unreadable cost");
        misses.push(ParseMiss::InvalidNumber {
            field: "item_cost",
            value: raw_cost.to_string(),
        });
        return None;
    };

    Some(LineItem::new(name, &caps[qty_idx], cost))
}
