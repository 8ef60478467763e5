//! Receipt field extraction.
//!
//! A [`ParserSelector`] picks a [`ReceiptParser`] for a piece of text and
//! the parser turns it into a [`ReceiptRecord`]. Parsers never fail: every
//! field that cannot be read falls back to its default and is reported as a
//! [`ParseMiss`] in the [`ExtractionResult`].

mod dmart;
mod generic;
pub mod rules;
mod selector;

pub use dmart::DMartParser;
pub use generic::GenericParser;
pub use selector::{MarkerDetector, ParserSelector, StoreDetector};

use thiserror::Error;

use crate::models::receipt::ReceiptRecord;

/// A field-level extraction miss.
///
/// Misses never abort a parse; they are kept for observability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMiss {
    /// No pattern for the field matched.
    #[error("no match for {field}")]
    NoMatch { field: &'static str },

    /// A pattern matched but the number could not be read.
    #[error("invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    /// A date was matched but is not a valid calendar date.
    #[error("invalid date: {value}")]
    InvalidDate { value: String },

    /// A row matched the item pattern but is a summary/tax row.
    #[error("rejected non-item row: {name:?}")]
    RejectedItem { name: String },
}

/// Result of parsing one receipt text.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Parsed receipt.
    pub record: ReceiptRecord,
    /// Name of the parser variant that produced the record.
    pub parser: &'static str,
    /// Field-level misses, in the order they occurred.
    pub misses: Vec<ParseMiss>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// A store-specific or generic receipt parsing strategy.
pub trait ReceiptParser: Send + Sync {
    /// Variant name, e.g. `"dmart"` or `"generic"`.
    fn name(&self) -> &'static str;

    /// Parse receipt text. Never fails; see [`ParseMiss`].
    fn parse(&self, text: &str) -> ExtractionResult;
}
