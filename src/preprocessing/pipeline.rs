use crate::error::OcrError;
use image::{DynamicImage, GrayImage};
use std::time::Instant;

use super::steps;
use super::steps::threshold::Polarity;

/// Timing information for a single preprocessing step
#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Result of preprocessing including timing stats
#[derive(Debug, Clone)]
pub struct PreprocessingResult {
    /// Final 8-bit grayscale image, same dimensions as the input
    pub image: GrayImage,
    /// Polarity chosen from the grayscale mean
    pub polarity: Polarity,
    /// White ratio measured after closing
    pub white_ratio: f64,
    /// Whether the contrast boost ran
    pub contrast_enhanced: bool,
    /// Total preprocessing time in milliseconds
    pub total_time_ms: u64,
    /// Individual step timings
    pub steps: Vec<StepTiming>,
}

/// Fixed binarization pipeline for scanned text
///
/// grayscale, adaptive threshold (polarity from mean brightness),
/// 3x3 closing, then a contrast boost when the page is not mostly white.
#[derive(Debug, Default)]
pub struct Pipeline;

impl Pipeline {
    pub fn new() -> Self {
        Self
    }

    /// Process an image
    pub fn process(&self, image: DynamicImage) -> Result<PreprocessingResult, OcrError> {
        let start = Instant::now();
        let mut steps_timing = Vec::new();

        let (width, height) = (image.width(), image.height());

        let gray = self.run_step("grayscale", image, &mut steps_timing, steps::grayscale::apply)?;

        let polarity = Polarity::detect(&gray);
        tracing::debug!("Detected polarity: {}", polarity.as_str());

        let binary = self.run_step("threshold", gray, &mut steps_timing, |img| {
            Ok(steps::threshold::apply(&img, polarity))
        })?;

        let closed = self.run_step("close", binary, &mut steps_timing, |img| {
            Ok(steps::morphology::apply(&img))
        })?;

        let white_ratio = steps::contrast::white_ratio(&closed);
        let contrast_enhanced = steps::contrast::needs_enhancement(white_ratio);
        tracing::debug!(
            "White ratio {:.3}, contrast enhancement: {}",
            white_ratio,
            contrast_enhanced
        );

        let result = if contrast_enhanced {
            self.run_step("contrast", closed, &mut steps_timing, |img| {
                Ok(steps::contrast::apply(&img))
            })?
        } else {
            closed
        };

        if result.dimensions() != (width, height) {
            return Err(OcrError::PreprocessingError(format!(
                "Dimensions changed from {}x{} to {}x{}",
                width,
                height,
                result.width(),
                result.height()
            )));
        }

        Ok(PreprocessingResult {
            image: result,
            polarity,
            white_ratio,
            contrast_enhanced,
            total_time_ms: start.elapsed().as_millis() as u64,
            steps: steps_timing,
        })
    }

    fn run_step<I, F>(
        &self,
        name: &str,
        img: I,
        timings: &mut Vec<StepTiming>,
        step_fn: F,
    ) -> Result<GrayImage, OcrError>
    where
        F: FnOnce(I) -> Result<GrayImage, OcrError>,
    {
        let step_start = Instant::now();
        let result = step_fn(img)?;
        timings.push(StepTiming {
            name: name.to_string(),
            time_ms: step_start.elapsed().as_millis() as u64,
        });
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// 50x30 page with a full-width band on rows 10..14
    fn page_with_band(background: u8, band: u8) -> DynamicImage {
        let img = GrayImage::from_fn(50, 30, |_, y| {
            if (10..14).contains(&y) {
                Luma([band])
            } else {
                Luma([background])
            }
        });
        DynamicImage::ImageLuma8(img)
    }

    fn step_names(result: &PreprocessingResult) -> Vec<&str> {
        result.steps.iter().map(|s| s.name.as_str()).collect()
    }

    /// Rows whose pixels are all white; panics on a row that is not uniform
    fn white_rows(img: &GrayImage) -> Vec<u32> {
        (0..img.height())
            .filter(|&y| {
                let first = img.get_pixel(0, y).0[0];
                assert!(
                    (0..img.width()).all(|x| img.get_pixel(x, y).0[0] == first),
                    "row {} is not uniform",
                    y
                );
                first == 255
            })
            .collect()
    }

    #[test]
    fn test_light_page_uses_normal_threshold() {
        let result = Pipeline::new().process(page_with_band(240, 20)).unwrap();

        assert_eq!(result.polarity, Polarity::DarkOnLight);
        assert_eq!(result.image.dimensions(), (50, 30));
        // Only the band itself turns black
        let expected: Vec<u32> = (0..30).filter(|y| !(10..14).contains(y)).collect();
        assert_eq!(white_rows(&result.image), expected);
        assert!((result.white_ratio - 26.0 / 30.0).abs() < 1e-9);
        assert!(!result.contrast_enhanced);
        assert_eq!(step_names(&result), vec!["grayscale", "threshold", "close"]);
    }

    #[test]
    fn test_dark_page_uses_inverted_threshold() {
        let result = Pipeline::new().process(page_with_band(20, 230)).unwrap();

        assert_eq!(result.polarity, Polarity::LightOnDark);
        assert_eq!(result.image.dimensions(), (50, 30));
        // Flat background and the bright band go black; the five rows on
        // each side of the band, darker than their neighborhood, go white
        let expected: Vec<u32> = (5..10).chain(14..19).collect();
        assert_eq!(white_rows(&result.image), expected);
        assert!((result.white_ratio - 10.0 / 30.0).abs() < 1e-9);
        assert!(result.contrast_enhanced);
        assert_eq!(
            step_names(&result),
            vec!["grayscale", "threshold", "close", "contrast"]
        );
    }

    #[test]
    fn test_color_page_polarity_uses_601_luma() {
        // 601 luma 117 (dark); 709 luma would be 143 (light)
        let img = image::RgbImage::from_pixel(40, 40, image::Rgb([0, 200, 0]));

        let result = Pipeline::new()
            .process(DynamicImage::ImageRgb8(img))
            .unwrap();

        assert_eq!(result.polarity, Polarity::LightOnDark);
    }

    #[test]
    fn test_output_is_binary_grayscale() {
        let img = image::RgbImage::from_fn(40, 40, |x, y| {
            image::Rgb([(x * 6) as u8, (y * 6) as u8, 128])
        });

        let result = Pipeline::new()
            .process(DynamicImage::ImageRgb8(img))
            .unwrap();

        assert_eq!(result.image.dimensions(), (40, 40));
        assert!(result.image.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn test_blank_page_is_left_white() {
        let blank = DynamicImage::ImageLuma8(GrayImage::from_pixel(30, 30, Luma([255])));

        let result = Pipeline::new().process(blank).unwrap();

        assert!(result.image.pixels().all(|p| p.0[0] == 255));
        assert!((result.white_ratio - 1.0).abs() < f64::EPSILON);
        assert!(!result.contrast_enhanced);
    }

    #[test]
    fn test_empty_image_fails() {
        let empty = DynamicImage::ImageLuma8(GrayImage::new(0, 0));
        let err = Pipeline::new().process(empty).unwrap_err();
        assert!(matches!(err, OcrError::PreprocessingError(_)));
    }
}
