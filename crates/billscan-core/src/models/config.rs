//! Configuration structures for the ingestion pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the billscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BillscanConfig {
    /// PDF text source configuration.
    pub pdf: PdfConfig,

    /// OCR text source configuration.
    pub ocr: OcrConfig,

    /// Receipt parsing configuration.
    pub parsing: ParsingConfig,

    /// Bill import configuration.
    pub import: ImportConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Below this many non-whitespace characters the PDF is treated as
    /// having no usable text.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 1 }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Keep `[UNK]` tokens in recognized text instead of blanking them.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            keep_unk: false,
        }
    }
}

impl OcrConfig {
    /// Get full path to a model file.
    pub fn model_path(&self, file_name: &str) -> PathBuf {
        self.model_dir.join(file_name)
    }

    /// Whether the detection and recognition models are present on disk.
    pub fn models_present(&self) -> bool {
        self.model_path(&self.detection_model).exists()
            && self.model_path(&self.recognition_model).exists()
            && self.model_path(&self.dictionary).exists()
    }
}

/// Receipt parsing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Extracted text is cut to this many characters before parsing.
    pub max_input_chars: usize,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 1 << 20,
        }
    }
}

/// Bill import configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Shop name used when the receipt carries none.
    pub default_shop_name: String,

    /// Prefix of generated bill numbers (`<prefix>-<unix seconds>`).
    pub bill_no_prefix: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            default_shop_name: "D-Mart".to_string(),
            bill_no_prefix: "DM".to_string(),
        }
    }
}

impl BillscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = BillscanConfig::default();
        config.parsing.max_input_chars = 4096;
        config.import.bill_no_prefix = "RL".to_string();
        config.save(&path).unwrap();

        let loaded = BillscanConfig::from_file(&path).unwrap();
        assert_eq!(loaded.parsing.max_input_chars, 4096);
        assert_eq!(loaded.import.bill_no_prefix, "RL");
        assert_eq!(loaded.ocr.detection_model, "det.onnx");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: BillscanConfig =
            serde_json::from_str(r#"{ "import": { "default_shop_name": "Reliance" } }"#).unwrap();

        assert_eq!(config.import.default_shop_name, "Reliance");
        assert_eq!(config.import.bill_no_prefix, "DM");
        assert_eq!(config.parsing.max_input_chars, 1 << 20);
    }

    #[test]
    fn test_invalid_config_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let err = BillscanConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
