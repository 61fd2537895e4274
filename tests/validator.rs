//! Asset Validator Integration Tests
//!
//! End-to-end validation of asset directories built on disk.

mod common;

use assetval::{AssetValidator, ValidationSettings};
use common::*;
use image::RgbImage;
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_valid_image_asset_has_no_findings() {
    let temp = TempDir::new().unwrap();
    image_asset(temp.path());

    let result = AssetValidator::default().validate(temp.path());

    assert!(result.is_valid(), "errors: {:?}", result.errors());
    assert!(result.warnings().is_empty(), "warnings: {:?}", result.warnings());
}

#[test]
fn test_valid_dataset_asset_has_no_errors() {
    let temp = TempDir::new().unwrap();
    dataset_asset(temp.path());

    let result = AssetValidator::default().validate(temp.path());
    assert!(result.is_valid(), "errors: {:?}", result.errors());
    assert!(result.warnings().is_empty(), "warnings: {:?}", result.warnings());
}

#[test]
fn test_json_dataset_matches_declared_mime() {
    let temp = TempDir::new().unwrap();
    let content = r#"{"rows": [1, 2, 3]}"#;
    std::fs::write(temp.path().join("data.json"), content).unwrap();
    write_metadata(
        temp.path(),
        &metadata(
            "dataset",
            vec![format_entry("data.json", "application/json", content.len() as u64)],
        ),
    );

    let result = AssetValidator::default().validate(temp.path());
    assert!(!result.has_findings(), "{:?}", result);
}

#[test]
fn test_size_mismatch_scenario() {
    let temp = TempDir::new().unwrap();
    let png = temp.path().join("logo.png");
    write_png(&png, 1920, 1080);
    pad_to(&png, 400_000);

    write_metadata(
        temp.path(),
        &metadata("image", vec![format_entry("logo.png", "image/png", 500_000)]),
    );

    let result = AssetValidator::default().validate(temp.path());

    assert_eq!(result.errors().len(), 1, "errors: {:?}", result.errors());
    let message = &result.errors()[0].message;
    assert!(message.contains("500000"));
    assert!(message.contains("400000"));
    assert_eq!(result.errors()[0].file.as_deref(), Some("logo.png"));
}

#[test]
fn test_single_tag_mit_scenario() {
    let temp = TempDir::new().unwrap();
    dataset_asset(temp.path());

    let mut doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp.path().join("metadata.json")).unwrap())
            .unwrap();
    doc["tags"] = json!(["logo"]);
    doc["license"] = json!({"type": "MIT", "url": "https://opensource.org/licenses/MIT"});
    write_metadata(temp.path(), &doc);

    let result = AssetValidator::default().validate(temp.path());

    assert!(result.is_valid(), "errors: {:?}", result.errors());
    assert_eq!(result.warnings().len(), 1, "warnings: {:?}", result.warnings());
    assert!(result.warnings()[0].message.contains("more descriptive tags"));
}

#[test]
fn test_missing_metadata_scenario() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("photo.png"), "pixels").unwrap();
    std::fs::write(temp.path().join("checksums.txt"), "deadbeef photo.png\n").unwrap();

    let result = AssetValidator::default().validate(temp.path());

    assert_eq!(messages(result.errors()), vec!["Missing required metadata.json file"]);
    assert!(result.warnings().is_empty());
}

#[test]
fn test_cc_by_without_attribution_is_error() {
    let temp = TempDir::new().unwrap();
    dataset_asset(temp.path());

    let mut doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp.path().join("metadata.json")).unwrap())
            .unwrap();
    doc["license"] = json!({"type": "CC-BY", "url": "https://creativecommons.org/licenses/by/4.0/", "attribution": ""});
    write_metadata(temp.path(), &doc);

    let result = AssetValidator::default().validate(temp.path());
    assert_eq!(
        messages(result.errors()),
        vec!["License CC-BY requires attribution field"]
    );
}

#[test]
fn test_low_resolution_image_only_warns() {
    let temp = TempDir::new().unwrap();
    let png = temp.path().join("thumb.png");
    let size = write_png(&png, 640, 480);

    let mut entry = format_entry("thumb.png", "image/png", size);
    entry["dimensions"] = json!({"width": 640, "height": 480});
    write_metadata(temp.path(), &metadata("image", vec![entry]));

    let result = AssetValidator::default().validate(temp.path());

    assert!(result.is_valid(), "errors: {:?}", result.errors());
    assert_eq!(
        messages(result.warnings()),
        vec!["Image thumb.png below recommended minimum resolution (1920x1080): 640x480"]
    );
}

#[test]
fn test_bmp_image_is_decoded() {
    let temp = TempDir::new().unwrap();
    let bmp = temp.path().join("pic.bmp");
    RgbImage::new(2, 2).save(&bmp).unwrap();
    let size = std::fs::metadata(&bmp).unwrap().len();

    let mut entry = format_entry("pic.bmp", "image/bmp", size);
    entry["dimensions"] = json!({"width": 2, "height": 2});
    write_metadata(temp.path(), &metadata("image", vec![entry]));

    let result = AssetValidator::default().validate(temp.path());

    assert!(result.is_valid(), "errors: {:?}", result.errors());
    assert_eq!(
        messages(result.warnings()),
        vec!["Image pic.bmp below recommended minimum resolution (1920x1080): 2x2"]
    );
}

#[test]
fn test_configured_minimum_resolution() {
    let temp = TempDir::new().unwrap();
    let png = temp.path().join("thumb.png");
    let size = write_png(&png, 640, 480);
    write_metadata(
        temp.path(),
        &metadata("image", vec![format_entry("thumb.png", "image/png", size)]),
    );

    let settings = ValidationSettings {
        min_image_width: 640,
        min_image_height: 480,
        ..Default::default()
    };
    let result = AssetValidator::new(settings).validate(temp.path());
    assert!(!result.has_findings());
}

#[test]
fn test_dimension_mismatch_is_error() {
    let temp = TempDir::new().unwrap();
    image_asset(temp.path());

    let mut doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp.path().join("metadata.json")).unwrap())
            .unwrap();
    doc["formats"][0]["dimensions"] = json!({"width": 3840, "height": 2160});
    write_metadata(temp.path(), &doc);

    let result = AssetValidator::default().validate(temp.path());
    assert_eq!(
        messages(result.errors()),
        vec!["Image dimensions mismatch for frame.png: actual=1920x1080, metadata=3840x2160"]
    );
}

#[test]
fn test_undecodable_image() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("broken.png"), "not really a png").unwrap();
    write_metadata(
        temp.path(),
        &metadata("image", vec![format_entry("broken.png", "image/png", 16)]),
    );

    let result = AssetValidator::default().validate(temp.path());

    assert_eq!(result.errors().len(), 1);
    assert!(result.errors()[0]
        .message
        .starts_with("Could not validate image broken.png"));
    assert_eq!(
        messages(result.warnings()),
        vec!["MIME type mismatch for broken.png: actual=text/plain, metadata=image/png"]
    );
}

#[test]
fn test_missing_and_orphan_files() {
    let temp = TempDir::new().unwrap();
    dataset_asset(temp.path());
    std::fs::write(temp.path().join("notes.txt"), "extra").unwrap();

    let mut doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp.path().join("metadata.json")).unwrap())
            .unwrap();
    doc["formats"]
        .as_array_mut()
        .unwrap()
        .push(format_entry("missing.zip", "application/zip", 10));
    write_metadata(temp.path(), &doc);

    let result = AssetValidator::default().validate(temp.path());

    assert_eq!(
        messages(result.errors()),
        vec!["File listed in metadata not found: missing.zip"]
    );
    assert_eq!(
        messages(result.warnings()),
        vec!["File not listed in metadata: notes.txt"]
    );
}

#[test]
fn test_schema_failure_skips_file_checks() {
    let temp = TempDir::new().unwrap();
    dataset_asset(temp.path());
    std::fs::write(temp.path().join("orphan.bin"), [0u8, 1, 2]).unwrap();

    let mut doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp.path().join("metadata.json")).unwrap())
            .unwrap();
    doc["version"] = json!("v1");
    write_metadata(temp.path(), &doc);

    let result = AssetValidator::default().validate(temp.path());

    assert_eq!(result.errors().len(), 1);
    assert!(result.errors()[0]
        .message
        .starts_with("Metadata schema validation failed"));
    assert!(result.warnings().is_empty());
}

#[test]
fn test_validation_is_idempotent() {
    let temp = TempDir::new().unwrap();
    dataset_asset(temp.path());
    std::fs::write(temp.path().join("b.txt"), "b").unwrap();
    std::fs::write(temp.path().join("a.txt"), "a").unwrap();
    std::fs::write(temp.path().join("checksums.txt"), "abc data.csv\n").unwrap();

    let validator = AssetValidator::default();
    let first = validator.validate(temp.path());
    let second = validator.validate(temp.path());

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert!(first.has_findings());
}
