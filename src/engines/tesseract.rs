//! Tesseract engine with Japanese traineddata
//!
//! tesseract-static links Tesseract and leptonica into the binary; the
//! traineddata files are fetched into the tessdata directory on first use.

use crate::config::Config;
use crate::engine::{OcrEngine, OcrResult};
use crate::error::OcrError;
use crate::models;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use tesseract_static::tesseract::Tesseract;

pub struct TesseractEngine {
    tessdata_path: String,
    /// e.g. "jpn" or "jpn+jpn_vert"
    language: String,
}

impl TesseractEngine {
    /// Fetch missing traineddata and check that Tesseract accepts it
    pub fn new(config: &Config) -> Result<Self, OcrError> {
        let language = config.language.clone();
        let dir = models::tessdata_dir(config);

        models::ensure_tessdata_available(&dir, &language)?;

        let tessdata_path = dir
            .to_str()
            .map(str::to_string)
            .ok_or_else(|| {
                OcrError::InitializationError(format!("Non UTF-8 tessdata path: {:?}", dir))
            })?;

        let engine = Self {
            tessdata_path,
            language,
        };
        engine.load(OcrError::InitializationError)?;

        tracing::debug!(
            "Tesseract ready (tessdata: {}, language: {})",
            engine.tessdata_path,
            engine.language
        );
        Ok(engine)
    }

    fn load(&self, wrap: fn(String) -> OcrError) -> Result<Tesseract, OcrError> {
        Tesseract::new(Some(self.tessdata_path.as_str()), Some(self.language.as_str())).map_err(
            |e| {
                wrap(format!(
                    "Tesseract rejected language '{}': {}",
                    self.language, e
                ))
            },
        )
    }
}

/// Leptonica reads BMP from memory without extra codecs
fn encode_bmp(img: &DynamicImage) -> Result<Vec<u8>, OcrError> {
    let mut bmp = Vec::new();
    img.to_rgb8()
        .write_to(&mut Cursor::new(&mut bmp), ImageFormat::Bmp)
        .map_err(|e| OcrError::ProcessingError(format!("BMP encoding failed: {}", e)))?;
    Ok(bmp)
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn description(&self) -> &'static str {
        "Tesseract OCR engine with Japanese traineddata"
    }

    fn recognize_image(&self, img: &DynamicImage) -> Result<OcrResult, OcrError> {
        let bmp = encode_bmp(img)?;
        tracing::debug!(
            "Handing {}x{} image to Tesseract ({} bytes)",
            img.width(),
            img.height(),
            bmp.len()
        );

        let mut tess = self
            .load(OcrError::ProcessingError)?
            .set_image_from_mem(&bmp)
            .map_err(|e| OcrError::ProcessingError(format!("Tesseract refused image: {}", e)))?
            .recognize()
            .map_err(|e| OcrError::ProcessingError(format!("Recognition failed: {}", e)))?;

        let text = tess
            .get_text()
            .map_err(|e| OcrError::ProcessingError(format!("Reading text failed: {}", e)))?;
        let confidence = tess.mean_text_conf() as f32 / 100.0;

        Ok(OcrResult {
            text: text.trim().to_string(),
            confidence,
        })
    }

    fn supported_languages(&self) -> Vec<String> {
        models::language_components(&self.language)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
