use super::grayscale::mean_brightness;
use image::{GrayImage, Luma};

/// Pixels brighter than this count as white background
pub const WHITE_PIXEL_THRESHOLD: u8 = 250;
/// Images with a smaller white share get a contrast boost
pub const WHITE_RATIO_CUTOFF: f64 = 0.5;
/// Contrast boost factor
pub const CONTRAST_FACTOR: f32 = 2.0;

/// Fraction of pixels above `WHITE_PIXEL_THRESHOLD`
pub fn white_ratio(img: &GrayImage) -> f64 {
    let total = img.width() as u64 * img.height() as u64;
    if total == 0 {
        return 0.0;
    }
    let white = img
        .pixels()
        .filter(|p| p.0[0] > WHITE_PIXEL_THRESHOLD)
        .count() as u64;
    white as f64 / total as f64
}

/// Whether the image is not mostly background and should be boosted
pub fn needs_enhancement(white_ratio: f64) -> bool {
    white_ratio < WHITE_RATIO_CUTOFF
}

/// Stretch contrast around the rounded mean by `CONTRAST_FACTOR`
pub fn apply(img: &GrayImage) -> GrayImage {
    enhance(img, CONTRAST_FACTOR)
}

fn enhance(img: &GrayImage, factor: f32) -> GrayImage {
    let mean = (mean_brightness(img) + 0.5).floor() as f32;

    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let pixel = img.get_pixel(x, y).0[0] as f32;
        let value = mean + factor * (pixel - mean);
        Luma([value.clamp(0.0, 255.0) as u8])
    })
}
