//! Error types for the billscan-core library.
//!
//! Parsing itself never fails; these errors come from the text sources
//! (PDF, OCR) and the bill import step.

use thiserror::Error;

/// Main error type for the billscan library.
#[derive(Error, Debug)]
pub enum BillscanError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Bill import error.
    #[error("import error: {0}")]
    Import(#[from] ImportError),

    /// The upload's MIME type has no text source.
    #[error("unsupported MIME type: {0}")]
    UnsupportedMime(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// No OCR engine is available in this build.
    #[error("OCR engine unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while turning a parsed receipt into a bill draft.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The receipt date could not be read as a calendar date.
    #[error("unrecognized bill date: {0}")]
    InvalidDate(String),
}

/// Result type for the billscan library.
pub type Result<T> = std::result::Result<T, BillscanError>;
