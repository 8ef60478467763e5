//! Regex patterns for receipt field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // D-Mart header fields
    pub static ref DMART_BILL_NUMBER: Regex = Regex::new(
        r"(?i)(?:ORDER\s+NUMBER|Invoice\s+No)[\s:]*([A-Z0-9]+)"
    ).unwrap();

    pub static ref DMART_BILL_DATE: Regex = Regex::new(
        r"(?i)(?:INVOICE|ORDER)\s+DATE[\s:]*(\d{2}/\d{2}/\d{2,4})"
    ).unwrap();

    // D-Mart item rows: [HSN] [particulars, may wrap] [qty] [rate] [value] [discount] [net value]
    pub static ref DMART_ITEM: Regex = Regex::new(
        r"(?s)(\d{6,10})\s*(.*?)\s+(\d+(?:\.\d+)?)\s+(\d+\.\d{2})\s+(\d+\.\d{2})\s+(\d+\.\d{2})\s+(\d+\.\d{2})"
    ).unwrap();

    // Older D-Mart rows: [sr.] [HSN] [tax code] [name] [qty] [rate] [value]
    pub static ref DMART_ITEM_LEGACY: Regex = Regex::new(
        r"(?m)^(\d+)\.\s+(\d{4,10})\s+(\d+)\s+(.*?)\s+(\d+(?:\.\d+)?)\s+([\d,]+\.\d+)\s+([\d,]+\.\d+)"
    ).unwrap();

    // D-Mart totals, in priority order
    pub static ref DMART_TOTAL_AMOUNT: Regex = Regex::new(
        r"(?i)Amount\s+([\d,]+\.\d+)"
    ).unwrap();

    pub static ref DMART_TOTAL_COLLECTED: Regex = Regex::new(
        r"(?i)₹\s*([\d,]+\.\d+)\s+to\s+be\s+collected"
    ).unwrap();

    // Summary line: "Items:11 Qty:13 Amt: <a> <b> <total>"
    pub static ref DMART_TOTAL_SUMMARY: Regex = Regex::new(
        r"(?i)Amt:\s*[\d.]+\s+[\d.]+\s+([\d.]+)"
    ).unwrap();

    // Generic totals, in priority order
    pub static ref GENERIC_TOTAL_LABELED: Regex = Regex::new(
        r"(?i)(?:TOTAL|GRAND\s+TOTAL|NET\s+AMOUNT|AMOUNT\s+DUE)[\s:]+([\d,]+\.\d{2})"
    ).unwrap();

    pub static ref GENERIC_TOTAL_CURRENCY: Regex = Regex::new(
        r"(?i)(?:RS\.?|₹)\s*([\d,]+\.\d{2})"
    ).unwrap();

    pub static ref GENERIC_TOTAL_PAYABLE: Regex = Regex::new(
        r"(?i)TOTAL\s+PAYABLE[\s:]+([\d,]+\.\d{2})"
    ).unwrap();

    // Generic dates, in priority order
    pub static ref DATE_SLASH_LONG: Regex = Regex::new(
        r"(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref DATE_DASH_LONG: Regex = Regex::new(
        r"(\d{2}-\d{2}-\d{4})"
    ).unwrap();

    pub static ref DATE_SLASH_SHORT: Regex = Regex::new(
        r"(\d{2}/\d{2}/\d{2})"
    ).unwrap();

    pub static ref DATE_MONTH_NAME: Regex = Regex::new(
        r"(?i)(\d{2}\s+(?:JAN|FEB|MAR|APR|MAY|JUN|JUL|AUG|SEP|OCT|NOV|DEC)\s+\d{4})"
    ).unwrap();
}
