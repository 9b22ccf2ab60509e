use crate::error::OcrError;
use image::{DynamicImage, GrayImage, Luma};

/// Convert image to single-channel 8-bit grayscale
/// This is the foundation for every later step
///
/// Colour uses the ITU-R 601-2 luma weights; 8-bit gray input is kept as is.
pub fn apply(image: DynamicImage) -> Result<GrayImage, OcrError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(OcrError::PreprocessingError(
            "Image has no pixels".to_string(),
        ));
    }

    match image {
        DynamicImage::ImageLuma8(gray) => Ok(gray),
        other => {
            let rgb = other.into_rgb8();
            Ok(GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let [r, g, b] = rgb.get_pixel(x, y).0;
                Luma([luma_601(r, g, b)])
            }))
        }
    }
}

/// ITU-R 601-2 luma: (299 R + 587 G + 114 B) / 1000
fn luma_601(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

/// Mean brightness of a grayscale image (0.0 for an empty image)
pub fn mean_brightness(img: &GrayImage) -> f64 {
    let total = img.width() as u64 * img.height() as u64;
    if total == 0 {
        return 0.0;
    }
    let sum: u64 = img.pixels().map(|p| p.0[0] as u64).sum();
    sum as f64 / total as f64
}
