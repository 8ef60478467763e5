//! Rendering of parsed receipts and bill drafts.

use billscan_core::models::bill::BillDraft;
use billscan_core::models::receipt::ReceiptRecord;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per item
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_record(record: &ReceiptRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => record_csv(record),
        OutputFormat::Text => Ok(record_text(record)),
    }
}

pub fn format_draft(draft: &BillDraft, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(draft)?),
        OutputFormat::Csv => draft_csv(draft),
        OutputFormat::Text => Ok(draft_text(draft)),
    }
}

fn record_csv(record: &ReceiptRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "bill_number",
        "bill_date",
        "shop_name",
        "total_amount",
        "item_name",
        "quantity",
        "cost",
    ])?;

    let bill_number = record.bill_number.clone().unwrap_or_default();
    let bill_date = record.bill_date.as_ref().map(|d| d.to_string()).unwrap_or_default();
    let total = record.total_amount.to_string();

    if record.items.is_empty() {
        wtr.write_record([bill_number.as_str(), &bill_date, &record.shop_name, &total, "", "", ""])?;
    }

    for item in &record.items {
        wtr.write_record([
            &bill_number,
            &bill_date,
            &record.shop_name,
            &total,
            &item.name,
            &item.quantity,
            &item.cost.to_string(),
        ])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn record_text(record: &ReceiptRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Shop: {}\n", record.shop_name));
    output.push_str(&format!(
        "Bill: {}\n",
        record.bill_number.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!(
        "Date: {}\n",
        record.bill_date.as_ref().map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
    ));

    if !record.items.is_empty() {
        output.push_str("\nItems:\n");
        for item in &record.items {
            output.push_str(&format!("  {:<40} {:>8} {:>10}\n", item.name, item.quantity, item.cost));
        }
    }

    output.push_str(&format!("\nTotal: {}\n", record.total_amount));
    output
}

fn draft_csv(draft: &BillDraft) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "bill_no",
        "bill_date",
        "shop_name",
        "total_amount",
        "floor",
        "source",
        "item_name",
        "quantity",
        "category",
        "priority",
        "status",
        "actual_cost",
    ])?;

    let bill_date = draft.bill_date.to_string();
    let total = draft.total_amount.to_string();
    let source = serde_json::to_value(draft.source)?
        .as_str()
        .unwrap_or_default()
        .to_string();

    for item in &draft.items {
        wtr.write_record([
            &draft.bill_no,
            &bill_date,
            &draft.shop_name,
            &total,
            &draft.floor,
            &source,
            &item.item_name,
            &item.quantity,
            &item.category,
            &item.priority,
            &item.status,
            &item.actual_cost.to_string(),
        ])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn draft_text(draft: &BillDraft) -> String {
    let mut output = String::new();

    output.push_str(&format!("Bill {} ({})\n", draft.bill_no, draft.bill_date));
    output.push_str(&format!("Shop: {}\n", draft.shop_name));
    output.push_str(&format!("Floor: {}\n", draft.floor));
    output.push_str(&format!("Total: {}\n", draft.total_amount));
    output.push_str(&format!("Procurements: {}\n", draft.items.len()));

    for item in &draft.items {
        output.push_str(&format!(
            "  {} x{} {} [{}]\n",
            item.item_name, item.quantity, item.actual_cost, item.status
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ReceiptRecord {
        serde_json::from_value(serde_json::json!({
            "bill_number": "12345",
            "bill_date": null,
            "shop_name": "D-Mart (Avenue E-Commerce)",
            "total_amount": "20.00",
            "items": [{ "name": "Sample, Item", "quantity": "2.0", "cost": "20.00" }]
        }))
        .unwrap()
    }

    #[test]
    fn test_csv_quotes_and_rows() {
        let csv = format_record(&record(), OutputFormat::Csv).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "12345,,D-Mart (Avenue E-Commerce),20.00,\"Sample, Item\",2.0,20.00"
        );
    }

    #[test]
    fn test_csv_without_items_keeps_header_row() {
        let csv = format_record(&ReceiptRecord::default(), OutputFormat::Csv).unwrap();
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn test_text_summary() {
        let text = format_record(&record(), OutputFormat::Text).unwrap();
        assert!(text.contains("Bill: 12345"));
        assert!(text.contains("Date: -"));
        assert!(text.contains("Total: 20.00"));
    }
}
