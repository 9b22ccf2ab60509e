//! Loading and atomically saving images

use crate::error::OcrError;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Load an image, detecting its format from the file contents
///
/// Returns the decoded image and the detected format, if known.
pub fn load_image(path: &Path) -> Result<(DynamicImage, Option<ImageFormat>), OcrError> {
    let reader = ImageReader::open(path)
        .map_err(|e| OcrError::ImageLoadError(format!("{}: {}", path.display(), e)))?
        .with_guessed_format()
        .map_err(|e| OcrError::ImageLoadError(format!("{}: {}", path.display(), e)))?;

    let format = reader.format();
    let image = reader
        .decode()
        .map_err(|e| OcrError::ImageLoadError(format!("{}: {}", path.display(), e)))?;

    tracing::debug!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        format
    );

    Ok((image, format))
}

/// Write `image` to `path` without ever leaving a partially written file
///
/// The encoded image goes to a temporary file in the destination directory,
/// which then replaces `path` in a single rename. A symlink at `path` is
/// followed, so its target is replaced and the link stays. The format
/// follows the extension of `path`, falling back to `fallback`.
pub fn save_image_atomic(
    image: &DynamicImage,
    path: &Path,
    fallback: Option<ImageFormat>,
) -> Result<(), OcrError> {
    let format = ImageFormat::from_path(path)
        .ok()
        .or(fallback)
        .ok_or_else(|| OcrError::UnsupportedFormat(path.display().to_string()))?;

    let resolved = fs::canonicalize(path).ok();
    let target = resolved.as_deref().unwrap_or(path);

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".preprocess-")
        .tempfile_in(dir)
        .map_err(|e| OcrError::ImageSaveError(format!("{}: {}", dir.display(), e)))?;

    // GIF has no 8-bit grayscale encoding
    let encodable = match format {
        ImageFormat::Gif => DynamicImage::ImageRgba8(image.to_rgba8()),
        _ => image.clone(),
    };

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        encodable
            .write_to(&mut writer, format)
            .map_err(|e| OcrError::ImageSaveError(format!("{}: {}", path.display(), e)))?;
        writer
            .flush()
            .map_err(|e| OcrError::ImageSaveError(format!("{}: {}", path.display(), e)))?;
    }

    // Keep the permissions of the file being replaced
    if let Ok(metadata) = fs::metadata(target) {
        if let Err(e) = fs::set_permissions(tmp.path(), metadata.permissions()) {
            tracing::warn!("Failed to copy permissions to {}: {}", path.display(), e);
        }
    }

    tmp.persist(target)
        .map_err(|e| OcrError::ImageSaveError(format!("{}: {}", target.display(), e.error)))?;

    Ok(())
}
