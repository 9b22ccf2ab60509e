//! OCR engine implementations
//!
//! Engines are conditionally compiled based on feature flags.

#[cfg(feature = "engine-tesseract")]
pub mod tesseract;

use crate::config::Config;
use crate::engine::OcrEngine;
use crate::error::OcrError;

/// Load the OCR model described by `config`.
///
/// The returned handle is the only model state; callers pass it to
/// recognition explicitly.
pub fn initialize(config: &Config) -> Result<Box<dyn OcrEngine>, OcrError> {
    tracing::info!("Initializing OCR model");

    let engine = load_engine(config)?;

    tracing::info!(
        "OCR model initialized successfully ({}: {}, languages: {})",
        engine.name(),
        engine.description(),
        engine.supported_languages().join(", ")
    );

    Ok(engine)
}

#[cfg(feature = "engine-tesseract")]
fn load_engine(config: &Config) -> Result<Box<dyn OcrEngine>, OcrError> {
    Ok(Box::new(tesseract::TesseractEngine::new(config)?))
}

#[cfg(not(feature = "engine-tesseract"))]
fn load_engine(_config: &Config) -> Result<Box<dyn OcrEngine>, OcrError> {
    Err(OcrError::InitializationError(
        "No OCR engines available. Build with --features engine-tesseract".to_string(),
    ))
}
