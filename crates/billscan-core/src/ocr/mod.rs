//! OCR text recognition for receipt images.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Anything that can turn an image into text.
pub trait OcrBackend {
    /// Recognize text boxes in the image.
    fn process(&self, image: &DynamicImage) -> Result<OcrResult, OcrError>;

    /// Convenience: extract text only.
    fn extract_text(&self, image: &DynamicImage) -> Result<String, OcrError> {
        Ok(self.process(image)?.text)
    }
}

/// A detected text box with its coordinates and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4) for quadrilateral.
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Result of OCR processing on an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Detected and recognized text boxes, in reading order.
    pub boxes: Vec<TextBox>,

    /// Full text: boxes on the same row joined with spaces, rows with newlines.
    pub text: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Build a result from unordered boxes.
    pub fn from_boxes(mut boxes: Vec<TextBox>, processing_time_ms: u64, image_size: (u32, u32)) -> Self {
        sort_by_reading_order(&mut boxes);
        let text = join_rows(&boxes);
        Self {
            boxes,
            text,
            processing_time_ms,
            image_size,
        }
    }
}

/// Rows are bands of this many pixels.
const ROW_BAND: f32 = 20.0;

fn row_of(text_box: &TextBox) -> i32 {
    let (_, y, _, _) = text_box.rect();
    (y / ROW_BAND) as i32
}

/// Sort boxes top-to-bottom, then left-to-right within a row.
fn sort_by_reading_order(boxes: &mut [TextBox]) {
    boxes.sort_by(|a, b| {
        let (row_a, row_b) = (row_of(a), row_of(b));
        if row_a != row_b {
            row_a.cmp(&row_b)
        } else {
            let (ax, _, _, _) = a.rect();
            let (bx, _, _, _) = b.rect();
            ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
        }
    });
}

/// Receipt rows (name, qty, rate, ...) come back as separate boxes; keep a
/// row on one line so the item patterns can see it.
fn join_rows(boxes: &[TextBox]) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current_row = None;

    for text_box in boxes {
        let row = row_of(text_box);
        if current_row == Some(row) {
            if let Some(line) = lines.last_mut() {
                line.push(' ');
                line.push_str(&text_box.text);
            }
        } else {
            lines.push(text_box.text.clone());
            current_row = Some(row);
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_box(x: f32, y: f32, text: &str) -> TextBox {
        TextBox {
            bbox: [x, y, x + 40.0, y, x + 40.0, y + 10.0, x, y + 10.0],
            text: text.to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_reading_order_and_row_joining() {
        let boxes = vec![
            text_box(200.0, 41.0, "20.00"),
            text_box(10.0, 5.0, "ORDER NUMBER: 12345"),
            text_box(10.0, 42.0, "Sample Item"),
            text_box(120.0, 43.0, "2.0"),
        ];

        let result = OcrResult::from_boxes(boxes, 12, (300, 100));

        assert_eq!(result.text, "ORDER NUMBER: 12345\nSample Item 2.0 20.00");
        assert_eq!(result.boxes[0].text, "ORDER NUMBER: 12345");
        assert_eq!(result.image_size, (300, 100));
    }

    #[test]
    fn test_empty_boxes() {
        let result = OcrResult::from_boxes(Vec::new(), 0, (1, 1));
        assert!(result.text.is_empty());
    }
}
