//! Image preprocessing module for OCR enhancement
//!
//! A fixed binarization pipeline plus the file handling around it.

pub mod io;
pub mod pipeline;
pub mod steps;

pub use pipeline::{Pipeline, PreprocessingResult, StepTiming};
pub use steps::threshold::Polarity;

use crate::error::OcrError;
use image::DynamicImage;
use std::path::Path;

/// Preprocess the image at `input` and write the result to `output`.
///
/// `output` may equal `input`. Nothing is written unless every step
/// succeeds, and the write itself replaces the file atomically.
pub fn preprocess_file(input: &Path, output: &Path) -> Result<PreprocessingResult, OcrError> {
    let (image, format) = io::load_image(input)?;

    let result = Pipeline::new().process(image)?;

    tracing::info!(
        "Preprocessed {} in {}ms (polarity: {}, white ratio: {:.3}, contrast: {})",
        input.display(),
        result.total_time_ms,
        result.polarity.as_str(),
        result.white_ratio,
        result.contrast_enhanced
    );
    for step in &result.steps {
        tracing::debug!("  {}: {}ms", step.name, step.time_ms);
    }

    io::save_image_atomic(&DynamicImage::ImageLuma8(result.image.clone()), output, format)?;

    Ok(result)
}
