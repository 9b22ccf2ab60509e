use jp_ocr_tools::cli::{self, Action, OcrArgs};
use jp_ocr_tools::config::Config;
use jp_ocr_tools::engines;
use jp_ocr_tools::logging;
use jp_ocr_tools::runner::{self, RecognizeOptions};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: OcrArgs = match cli::parse_args() {
        Ok(args) => args,
        Err(code) => return code,
    };

    logging::init(&args.log_level);

    let config = Config::from(&args);

    let engine = match engines::initialize(&config) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("Error initializing OCR model: {}", e);
            eprintln!("Error: OCR model initialization failed");
            return ExitCode::FAILURE;
        }
    };

    match args.action {
        Action::Init => {
            println!("OCR model initialized");
            ExitCode::SUCCESS
        }
        Action::Ocr {
            image_path,
            preprocess,
            raw,
        } => {
            let options = RecognizeOptions {
                preprocess,
                post_process: !raw,
            };
            match runner::perform_ocr(engine.as_ref(), &image_path, options) {
                Ok(text) => {
                    println!("{}", text);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    tracing::error!("Error performing OCR: {}", e);
                    eprintln!("Error: OCR failed");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
