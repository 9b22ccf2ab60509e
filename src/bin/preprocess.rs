use anyhow::Context;
use jp_ocr_tools::cli::{self, PreprocessArgs};
use jp_ocr_tools::logging;
use jp_ocr_tools::preprocessing;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: PreprocessArgs = match cli::parse_args() {
        Ok(args) => args,
        Err(code) => return code,
    };

    logging::init(&args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error processing image: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &PreprocessArgs) -> anyhow::Result<()> {
    let output = args.output.as_deref().unwrap_or(&args.image_path);

    preprocessing::preprocess_file(&args.image_path, output)
        .with_context(|| format!("preprocessing {}", args.image_path.display()))?;

    Ok(())
}
