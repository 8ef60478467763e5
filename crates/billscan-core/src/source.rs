//! Text sources: turn an uploaded file into plain text.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{BillscanError, OcrError, Result};
use crate::models::bill::BillSource;
use crate::models::config::PdfConfig;
use crate::ocr::OcrBackend;
use crate::pdf::PdfExtractor;

/// Which extraction route an upload takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `application/pdf`
    Pdf,
    /// `image/*`
    Image,
    /// `text/plain`, already-extracted text
    PlainText,
}

impl SourceKind {
    /// Route by MIME type. Parameters such as `; charset=utf-8` are ignored.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
        match essence.as_str() {
            "application/pdf" => Some(Self::Pdf),
            "text/plain" => Some(Self::PlainText),
            _ if essence.starts_with("image/") => Some(Self::Image),
            _ => None,
        }
    }

    /// Route by file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "png" | "jpg" | "jpeg" | "tif" | "tiff" | "bmp" | "webp" => Some(Self::Image),
            "txt" => Some(Self::PlainText),
            _ => None,
        }
    }

    /// Canonical MIME type of the route.
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Image => "image/*",
            Self::PlainText => "text/plain",
        }
    }

    /// How a bill from this route is booked.
    pub fn bill_source(&self) -> BillSource {
        match self {
            Self::Pdf => BillSource::PdfImport,
            Self::Image => BillSource::ImageImport,
            Self::PlainText => BillSource::TextImport,
        }
    }
}

/// Turns raw upload bytes into text.
pub trait TextSource {
    fn extract_text(&self, data: &[u8]) -> Result<String>;
}

/// Text from digitally generated PDFs.
#[derive(Debug, Clone, Default)]
pub struct PdfTextSource {
    config: PdfConfig,
}

impl PdfTextSource {
    pub fn new(config: PdfConfig) -> Self {
        Self { config }
    }
}

impl TextSource for PdfTextSource {
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        let text = PdfExtractor::text_from_bytes(data)?;
        let meaningful = text.chars().filter(|c| !c.is_whitespace()).count();

        if meaningful < self.config.min_text_length {
            info!(chars = meaningful, "PDF has no usable embedded text");
            return Ok(String::new());
        }

        debug!(chars = meaningful, "Extracted PDF text");
        Ok(text)
    }
}

/// Text from receipt photos and scans via an [`OcrBackend`].
pub struct ImageTextSource<B> {
    backend: B,
}

impl<B: OcrBackend> ImageTextSource<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }
}

impl<B: OcrBackend> TextSource for ImageTextSource<B> {
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        let image = image::load_from_memory(data)?;
        Ok(self.backend.extract_text(&image)?)
    }
}

/// Image source used when no OCR engine could be set up.
#[derive(Debug, Clone)]
pub struct UnavailableOcr {
    reason: String,
}

impl UnavailableOcr {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl TextSource for UnavailableOcr {
    fn extract_text(&self, _data: &[u8]) -> Result<String> {
        Err(BillscanError::Ocr(OcrError::Unavailable(self.reason.clone())))
    }
}

/// UTF-8 text passed through untouched (lossy on invalid bytes).
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        Ok(String::from_utf8_lossy(data).into_owned())
    }
}
