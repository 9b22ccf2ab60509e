use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn preprocess(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_preprocess"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run preprocess")
}

fn ocr(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ocr"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run ocr")
}

/// Light page with a dark 4-row stroke
fn write_light_page(dir: &Path, name: &str) -> PathBuf {
    let mut img = GrayImage::from_pixel(60, 40, Luma([235]));
    for y in 18..22 {
        for x in 10..50 {
            img.put_pixel(x, y, Luma([25]));
        }
    }
    let path = dir.join(name);
    img.save(&path).expect("Failed to write fixture");
    path
}

#[test]
fn test_preprocess_without_arguments_exits_1() {
    let output = preprocess(&[]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_preprocess_help_exits_0() {
    let output = preprocess(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_preprocess_overwrites_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_light_page(dir.path(), "page.png");

    let output = preprocess(&[path.to_str().unwrap()]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let result = image::open(&path).unwrap();
    assert!(matches!(result, DynamicImage::ImageLuma8(_)));
    let gray = result.to_luma8();
    assert_eq!(gray.dimensions(), (60, 40));
    assert!(gray.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    assert_eq!(gray.get_pixel(30, 20).0[0], 0);
    assert_eq!(gray.get_pixel(30, 5).0[0], 255);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_preprocess_output_leaves_input_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_light_page(dir.path(), "page.png");
    let output_path = dir.path().join("clean.bmp");
    let before = fs::read(&input).unwrap();

    let output = preprocess(&[
        input.to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read(&input).unwrap(), before);
    let written = image::ImageReader::open(&output_path)
        .unwrap()
        .with_guessed_format()
        .unwrap();
    assert_eq!(written.format(), Some(ImageFormat::Bmp));
}

#[test]
fn test_preprocess_corrupt_image_leaves_file_unmodified() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.png");
    let garbage = b"\x89PNG\r\n\x1a\nthis is not really a png".to_vec();
    fs::write(&path, &garbage).unwrap();

    let output = preprocess(&[path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(fs::read(&path).unwrap(), garbage);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error processing image"));
    // Only the corrupt file remains; no temporary files were left
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_preprocess_missing_file_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.png");

    let output = preprocess(&[path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!path.exists());
}

#[test]
fn test_ocr_without_arguments_exits_1() {
    let output = ocr(&[]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_ocr_unknown_action_exits_1() {
    let output = ocr(&["translate", "page.png"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_ocr_action_without_image_path_exits_1() {
    let output = ocr(&["ocr"]);
    assert_eq!(output.status.code(), Some(1));
}

/// Needs network access the first time to fetch jpn.traineddata
#[test]
#[ignore]
fn test_ocr_blank_image_prints_near_empty_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.png");
    GrayImage::from_pixel(200, 100, Luma([255]))
        .save(&path)
        .unwrap();

    let output = ocr(&["ocr", path.to_str().unwrap()]);

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.trim().chars().count() <= 2, "unexpected text: {:?}", text);
}

/// Needs network access the first time to fetch jpn.traineddata
#[test]
#[ignore]
fn test_ocr_init_reports_success() {
    let output = ocr(&["init"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "OCR model initialized"
    );
}
