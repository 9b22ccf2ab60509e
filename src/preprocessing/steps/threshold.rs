use super::grayscale::mean_brightness;
use image::{GrayImage, Luma};

/// Neighborhood size for the local threshold (must be odd)
pub const BLOCK_SIZE: usize = 11;
/// Subtracted from the local mean before comparison
pub const OFFSET: i16 = 2;
/// Mean brightness above which text is assumed dark on a light page
pub const POLARITY_CUTOFF: f64 = 127.0;

/// Which way round text and background are
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Dark text on a light page: normal binary threshold
    DarkOnLight,
    /// Light text on a dark page: inverted threshold
    LightOnDark,
}

impl Polarity {
    /// Pick polarity from the mean brightness of the image
    pub fn detect(img: &GrayImage) -> Self {
        if mean_brightness(img) > POLARITY_CUTOFF {
            Self::DarkOnLight
        } else {
            Self::LightOnDark
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DarkOnLight => "dark-on-light",
            Self::LightOnDark => "light-on-dark",
        }
    }
}

/// Apply Gaussian adaptive thresholding
///
/// Each pixel is compared against the Gaussian-weighted mean of its
/// `BLOCK_SIZE` x `BLOCK_SIZE` neighborhood. With `DarkOnLight`, pixels with
/// `src - mean > -OFFSET` become white and the rest black; `LightOnDark`
/// swaps the two outputs.
pub fn apply(img: &GrayImage, polarity: Polarity) -> GrayImage {
    let mean = gaussian_mean(img, BLOCK_SIZE);
    let (above, below) = match polarity {
        Polarity::DarkOnLight => (255u8, 0u8),
        Polarity::LightOnDark => (0u8, 255u8),
    };

    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let diff = img.get_pixel(x, y).0[0] as i16 - mean.get_pixel(x, y).0[0] as i16;
        if diff > -OFFSET {
            Luma([above])
        } else {
            Luma([below])
        }
    })
}

/// Sigma used for a Gaussian kernel of `size` taps when none is given
fn default_sigma(size: usize) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1-D Gaussian kernel
fn gaussian_kernel(size: usize) -> Vec<f32> {
    let sigma = default_sigma(size);
    let half = (size / 2) as f32;
    let weights: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - half;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let total: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Gaussian-blurred copy of `img`, borders replicated, rounded back to 8 bits
fn gaussian_mean(img: &GrayImage, size: usize) -> GrayImage {
    let (width, height) = img.dimensions();
    let (w, h) = (width as usize, height as usize);
    let kernel = gaussian_kernel(size);
    let half = (size / 2) as isize;

    let clamp = |v: isize, len: usize| v.clamp(0, len as isize - 1) as usize;

    // Horizontal pass
    let mut horizontal = vec![0.0f32; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, weight) in kernel.iter().enumerate() {
                let sx = clamp(x as isize + k as isize - half, w);
                acc += weight * img.get_pixel(sx as u32, y as u32).0[0] as f32;
            }
            horizontal[y * w + x] = acc;
        }
    }

    // Vertical pass
    GrayImage::from_fn(width, height, |x, y| {
        let (x, y) = (x as usize, y as usize);
        let mut acc = 0.0f32;
        for (k, weight) in kernel.iter().enumerate() {
            let sy = clamp(y as isize + k as isize - half, h);
            acc += weight * horizontal[sy * w + x];
        }
        Luma([acc.round().clamp(0.0, 255.0) as u8])
    })
}
