use crate::error::OcrError;
use crate::preprocessing::io::load_image;
use image::DynamicImage;
use std::path::Path;

/// OCR processing result
#[derive(Debug, Clone)]
pub struct OcrResult {
    pub text: String,
    /// Mean confidence in 0.0-1.0, logged only
    pub confidence: f32,
}

/// Trait that all OCR engines must implement
pub trait OcrEngine: Send + Sync {
    /// Returns the engine identifier (e.g., "tesseract")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the engine
    fn description(&self) -> &'static str;

    /// Recognize the text in an already decoded image
    fn recognize_image(&self, image: &DynamicImage) -> Result<OcrResult, OcrError>;

    /// Load an image file and recognize its text
    fn recognize(&self, path: &Path) -> Result<OcrResult, OcrError> {
        let (image, _) = load_image(path)?;
        self.recognize_image(&image)
    }

    /// Get supported languages
    fn supported_languages(&self) -> Vec<String>;
}
