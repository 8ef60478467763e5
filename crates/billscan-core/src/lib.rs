//! Core library for receipt ingestion.
//!
//! This crate provides:
//! - Text sources for uploads (PDF text layer, OCR for images, plain text)
//! - Store detection and receipt field extraction (D-Mart, generic fallback)
//! - Mapping of parsed receipts onto storage-ready bill drafts

pub mod error;
pub mod import;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod pipeline;
pub mod receipt;
pub mod source;

pub use error::{BillscanError, ImportError, Result};
pub use import::ImportContext;
pub use models::bill::{BillDraft, BillSource, ProcurementDraft};
pub use models::config::BillscanConfig;
pub use models::receipt::{BillDate, LineItem, ReceiptRecord};
pub use ocr::{OcrBackend, OcrResult, TextBox};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use pdf::{PdfExtractor, PdfProcessor};
pub use pipeline::ReceiptPipeline;
pub use receipt::{
    DMartParser, ExtractionResult, GenericParser, ParseMiss, ParserSelector, ReceiptParser,
};
pub use source::SourceKind;
