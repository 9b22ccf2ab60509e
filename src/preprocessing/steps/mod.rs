//! Individual preprocessing steps

pub mod contrast;
pub mod grayscale;
pub mod morphology;
pub mod threshold;
