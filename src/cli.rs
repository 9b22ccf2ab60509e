//! Command-line arguments for the `ocr` and `preprocess` binaries

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "ocr")]
#[command(about = "Recognize Japanese text in an image")]
#[command(version)]
pub struct OcrArgs {
    #[command(subcommand)]
    pub action: Action,

    /// Tesseract language(s) to load (e.g., "jpn", "jpn_vert", "jpn+jpn_vert")
    #[arg(long, env = "OCR_LANGUAGE", default_value = "jpn", global = true)]
    pub language: String,

    /// Path to tessdata directory (defaults to a per-user cache directory)
    #[arg(long, env = "TESSDATA_PREFIX", global = true)]
    pub tessdata_path: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Action {
    /// Load the OCR model and report whether it is usable
    Init,

    /// Recognize the text in an image and print it
    Ocr {
        /// Image to recognize
        image_path: PathBuf,

        /// Binarize the image in memory before recognition
        #[arg(long)]
        preprocess: bool,

        /// Print the engine output without Japanese text cleanup
        #[arg(long)]
        raw: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "preprocess")]
#[command(about = "Binarize a scanned image in place to improve OCR accuracy")]
#[command(version)]
pub struct PreprocessArgs {
    /// Image to preprocess (overwritten unless --output is given)
    pub image_path: PathBuf,

    /// Write the result here instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

/// Parse process arguments, mapping every usage error to exit status 1.
///
/// Help and version output exit with status 0.
pub fn parse_args<T: Parser>() -> Result<T, ExitCode> {
    T::try_parse().map_err(|err| {
        let _ = err.print();
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
            _ => ExitCode::FAILURE,
        }
    })
}
