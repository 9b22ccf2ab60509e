use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::morphology::close;

/// Apply a morphological closing with a 3x3 square structuring element
/// Merges white regions separated by gaps of one pixel
pub fn apply(image: &GrayImage) -> GrayImage {
    // LInf radius 1 is the 3x3 square
    close(image, Norm::LInf, 1)
}
