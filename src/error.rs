use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Failed to initialize OCR engine: {0}")]
    InitializationError(String),

    #[error("Failed to load image: {0}")]
    ImageLoadError(String),

    #[error("Preprocessing failed: {0}")]
    PreprocessingError(String),

    #[error("Failed to process image: {0}")]
    ProcessingError(String),

    #[error("Failed to save image: {0}")]
    ImageSaveError(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
}
