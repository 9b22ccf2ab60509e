//! Japanese OCR runner and scan preprocessor
//!
//! The `ocr` binary recognizes Japanese text with a pretrained Tesseract
//! model; the `preprocess` binary binarizes a scanned image in place so the
//! recognizer has less noise to deal with.

pub mod cli;
pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod logging;
pub mod models;
pub mod preprocessing;
pub mod runner;
pub mod text;
