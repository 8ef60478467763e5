//! Upload-to-record pipeline: text source, store selection, parsing.

use tracing::{debug, info, warn};

use crate::error::{BillscanError, Result};
use crate::models::config::{BillscanConfig, ParsingConfig};
use crate::ocr::OcrBackend;
use crate::receipt::{ExtractionResult, ParserSelector};
use crate::source::{
    ImageTextSource, PdfTextSource, PlainTextSource, SourceKind, TextSource, UnavailableOcr,
};

/// Turns uploaded bytes into a parsed receipt.
pub struct ReceiptPipeline {
    selector: ParserSelector,
    pdf: PdfTextSource,
    image: Box<dyn TextSource>,
    parsing: ParsingConfig,
}

impl ReceiptPipeline {
    /// Pipeline with default settings and no OCR engine.
    pub fn new() -> Self {
        Self {
            selector: ParserSelector::new(),
            pdf: PdfTextSource::default(),
            image: Box::new(UnavailableOcr::new("no OCR engine configured")),
            parsing: ParsingConfig::default(),
        }
    }

    /// Build from configuration, loading the OCR models if they are present.
    pub fn from_config(config: &BillscanConfig) -> Self {
        let pipeline = Self {
            pdf: PdfTextSource::new(config.pdf.clone()),
            parsing: config.parsing.clone(),
            ..Self::new()
        };

        #[cfg(feature = "native")]
        let pipeline = if !config.ocr.models_present() {
            debug!("No OCR models in {}", config.ocr.model_dir.display());
            pipeline.with_image_source(UnavailableOcr::new(format!(
                "OCR models not found in {}",
                config.ocr.model_dir.display()
            )))
        } else {
            match crate::ocr::PureOcrEngine::from_config(config.ocr.clone()) {
                Ok(engine) => pipeline.with_ocr(engine),
                Err(e) => {
                    warn!("OCR disabled: {}", e);
                    pipeline.with_image_source(UnavailableOcr::new(e.to_string()))
                }
            }
        };

        pipeline
    }

    /// Use `backend` for image uploads.
    pub fn with_ocr<B: OcrBackend + 'static>(self, backend: B) -> Self {
        self.with_image_source(ImageTextSource::new(backend))
    }

    /// Use `source` for image uploads.
    pub fn with_image_source<S: TextSource + 'static>(mut self, source: S) -> Self {
        self.image = Box::new(source);
        self
    }

    /// Replace the store registry.
    pub fn with_selector(mut self, selector: ParserSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn selector(&self) -> &ParserSelector {
        &self.selector
    }

    /// Extract text from an upload, routed by MIME type.
    pub fn extract_text(&self, data: &[u8], mime: &str) -> Result<String> {
        let kind = SourceKind::from_mime(mime)
            .ok_or_else(|| BillscanError::UnsupportedMime(mime.to_string()))?;

        debug!("Extracting text from {} bytes as {:?}", data.len(), kind);

        match kind {
            SourceKind::Pdf => self.pdf.extract_text(data),
            SourceKind::Image => self.image.extract_text(data),
            SourceKind::PlainText => PlainTextSource.extract_text(data),
        }
    }

    /// Extract and parse an upload.
    ///
    /// Returns `None` when no text could be obtained; the reason is logged.
    pub fn process(&self, data: &[u8], mime: &str) -> Option<ExtractionResult> {
        match self.extract_text(data, mime) {
            Ok(text) => self.process_text(&text),
            Err(e) => {
                warn!("Text extraction failed for {}: {}", mime, e);
                None
            }
        }
    }

    /// Parse text that was already extracted.
    pub fn process_text(&self, text: &str) -> Option<ExtractionResult> {
        if text.trim().is_empty() {
            info!("No text to parse");
            return None;
        }

        let text = self.bounded(text);
        let parser = self.selector.select(text);
        debug!("Selected {} parser", parser.name());

        let result = parser.parse(text);
        info!(
            "Parsed receipt with {} parser: {} items, {} misses",
            result.parser,
            result.record.items.len(),
            result.misses.len()
        );
        Some(result)
    }

    /// Name of the parser that would handle `text`.
    pub fn detect(&self, text: &str) -> &'static str {
        self.selector.select(self.bounded(text)).name()
    }

    fn bounded<'a>(&self, text: &'a str) -> &'a str {
        let limit = self.parsing.max_input_chars;
        match text.char_indices().nth(limit) {
            Some((cut, _)) => {
                warn!("Input truncated to {} characters", limit);
                &text[..cut]
            }
            None => text,
        }
    }
}

impl Default for ReceiptPipeline {
    fn default() -> Self {
        Self::new()
    }
}
