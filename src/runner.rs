use crate::engine::OcrEngine;
use crate::error::OcrError;
use crate::preprocessing::{io, Pipeline};
use crate::text;
use image::DynamicImage;
use std::path::Path;

/// Per-invocation recognition switches
#[derive(Debug, Clone, Copy)]
pub struct RecognizeOptions {
    /// Run the binarization pipeline in memory first
    pub preprocess: bool,
    /// Apply Japanese text cleanup to the engine output
    pub post_process: bool,
}

impl Default for RecognizeOptions {
    fn default() -> Self {
        Self {
            preprocess: false,
            post_process: true,
        }
    }
}

/// Recognize the text in the image at `path` with an initialized engine
pub fn perform_ocr(
    engine: &dyn OcrEngine,
    path: &Path,
    options: RecognizeOptions,
) -> Result<String, OcrError> {
    tracing::info!("Performing OCR on image: {}", path.display());

    let result = if options.preprocess {
        let (image, _) = io::load_image(path)?;
        let preprocessed = Pipeline::new().process(image)?;
        engine.recognize_image(&DynamicImage::ImageLuma8(preprocessed.image))?
    } else {
        engine.recognize(path)?
    };

    tracing::debug!(
        "{} returned {} chars (confidence {:.2})",
        engine.name(),
        result.text.chars().count(),
        result.confidence
    );

    let text = if options.post_process {
        text::post_process(&result.text)
    } else {
        result.text
    };

    tracing::info!("OCR result: {}", text);
    Ok(text)
}
