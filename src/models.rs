//! Tessdata (Tesseract training data) location and download helpers

use crate::config::Config;
use crate::error::OcrError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Directory name under the user cache directory
const CACHE_DIR_NAME: &str = "jp-ocr-tools";

/// Resolve the tessdata directory: explicit path first, then the user cache
pub fn tessdata_dir(config: &Config) -> PathBuf {
    match &config.tessdata_path {
        Some(path) => path.clone(),
        None => dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(CACHE_DIR_NAME)
            .join("tessdata"),
    }
}

/// Split a Tesseract language string ("jpn+jpn_vert") into its components
pub fn language_components(language: &str) -> Vec<&str> {
    language
        .split('+')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Get tessdata download URL for a language
pub fn tessdata_url(language: &str) -> String {
    // tessdata_fast keeps downloads small
    format!(
        "https://github.com/tesseract-ocr/tessdata_fast/raw/main/{}.traineddata",
        language
    )
}

/// Ensure every traineddata file for `language` exists in `dir`,
/// downloading missing ones.
pub fn ensure_tessdata_available(dir: &Path, language: &str) -> Result<(), OcrError> {
    let components = language_components(language);
    if components.is_empty() {
        return Err(OcrError::InitializationError(format!(
            "Invalid language: {:?}",
            language
        )));
    }

    fs::create_dir_all(dir).map_err(|e| {
        OcrError::InitializationError(format!("Failed to create tessdata directory: {}", e))
    })?;

    for component in components {
        let traineddata_path = dir.join(format!("{}.traineddata", component));

        if traineddata_path.exists() {
            tracing::debug!("Using cached tessdata {:?}", traineddata_path);
            continue;
        }

        tracing::info!(
            "Downloading tessdata for '{}' (this may take a moment)...",
            component
        );
        download_file(&tessdata_url(component), &traineddata_path)?;
        tracing::info!("Downloaded tessdata to {:?}", traineddata_path);
    }

    Ok(())
}

/// Download a file from URL to path using ureq.
///
/// The body lands in a temporary file next to `path` first, so an
/// interrupted download never leaves a truncated traineddata behind.
fn download_file(url: &str, path: &Path) -> Result<(), OcrError> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| OcrError::InitializationError(format!("Failed to download tessdata: {}", e)))?;

    let buffer = response.into_body().read_to_vec().map_err(|e| {
        OcrError::InitializationError(format!("Failed to read tessdata response: {}", e))
    })?;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
        OcrError::InitializationError(format!("Failed to create tessdata file: {}", e))
    })?;

    file.write_all(&buffer).map_err(|e| {
        OcrError::InitializationError(format!("Failed to write tessdata file: {}", e))
    })?;

    file.persist(path).map_err(|e| {
        OcrError::InitializationError(format!("Failed to store tessdata file: {}", e.error))
    })?;

    Ok(())
}
