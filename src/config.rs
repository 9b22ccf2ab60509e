use crate::cli::OcrArgs;
use std::path::PathBuf;

/// OCR runner configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub language: String,
    pub tessdata_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "jpn".to_string(),
            tessdata_path: None,
        }
    }
}

impl From<&OcrArgs> for Config {
    fn from(args: &OcrArgs) -> Self {
        Self {
            language: args.language.clone(),
            tessdata_path: args.tessdata_path.clone(),
        }
    }
}
