//! Shared fixtures for building asset directories on disk.

#![allow(dead_code)]

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use image::RgbImage;
use serde_json::{json, Value};

/// Write a PNG of the given size and return its byte length
pub fn write_png(path: &Path, width: u32, height: u32) -> u64 {
    RgbImage::new(width, height).save(path).unwrap();
    std::fs::metadata(path).unwrap().len()
}

/// Pad an existing file with zero bytes up to exactly `len` bytes
pub fn pad_to(path: &Path, len: u64) {
    let current = std::fs::metadata(path).unwrap().len();
    assert!(current <= len, "fixture already larger than {}", len);

    let mut file = OpenOptions::new().append(true).open(path).unwrap();
    file.write_all(&vec![0u8; (len - current) as usize]).unwrap();
}

/// Format descriptor JSON
pub fn format_entry(filename: &str, mimetype: &str, size: u64) -> Value {
    json!({
        "format": filename.rsplit('.').next().unwrap_or("bin"),
        "filename": filename,
        "mimetype": mimetype,
        "size": size,
    })
}

/// Metadata document that passes the schema
pub fn metadata(asset_type: &str, formats: Vec<Value>) -> Value {
    json!({
        "id": "sample-asset",
        "title": "Sample asset",
        "description": "An asset built for integration tests",
        "category": "testing",
        "type": asset_type,
        "version": "1.0.0",
        "license": {
            "type": "CC-BY-4.0",
            "url": "https://creativecommons.org/licenses/by/4.0/",
            "attribution": "Test Studio"
        },
        "creator": {"name": "Test Studio"},
        "tags": ["sample", "fixture", "test"],
        "formats": formats,
    })
}

pub fn write_metadata(dir: &Path, metadata: &Value) {
    std::fs::write(
        dir.join("metadata.json"),
        serde_json::to_string_pretty(metadata).unwrap(),
    )
    .unwrap();
}

/// A dataset asset with one CSV file; returns the CSV path
pub fn dataset_asset(dir: &Path) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let csv = dir.join("data.csv");
    std::fs::write(&csv, "id,name\n1,alpha\n2,beta\n").unwrap();
    let size = std::fs::metadata(&csv).unwrap().len();

    write_metadata(
        dir,
        &metadata("dataset", vec![format_entry("data.csv", "text/csv", size)]),
    );
    csv
}

/// A full-HD image asset with matching declared dimensions
pub fn image_asset(dir: &Path) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let png = dir.join("frame.png");
    let size = write_png(&png, 1920, 1080);

    let mut entry = format_entry("frame.png", "image/png", size);
    entry["dimensions"] = json!({"width": 1920, "height": 1080});
    write_metadata(dir, &metadata("image", vec![entry]));
    png
}

pub fn messages(findings: &[assetval::Finding]) -> Vec<&str> {
    findings.iter().map(|f| f.message.as_str()).collect()
}
