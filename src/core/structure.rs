//! Directory layout checks for a single asset.
//!
//! An asset directory must hold a `metadata.json` and at least one content
//! file besides the sidecars. Failures here are recorded but do not stop the
//! caller from attempting the remaining stages.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::domain::metadata::{is_sidecar, METADATA_FILE};
use crate::domain::ValidationResult;

/// Names of the regular files directly inside `dir`, sorted
pub fn list_files(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names.sort();
    Ok(names)
}

/// Content files of an asset: regular files that are not sidecars
pub fn content_files(dir: &Path) -> io::Result<Vec<String>> {
    Ok(list_files(dir)?
        .into_iter()
        .filter(|name| !is_sidecar(name))
        .collect())
}

/// Check the directory layout of the asset at `path`
pub fn check_structure(path: &Path, result: &mut ValidationResult) {
    if !path.is_dir() {
        result.error(format!("Asset path is not a directory: {}", path.display()));
        return;
    }

    if !path.join(METADATA_FILE).is_file() {
        result.error("Missing required metadata.json file");
    }

    match content_files(path) {
        Ok(files) if files.is_empty() => result.error("No asset files found in directory"),
        Ok(files) => debug!(asset = %path.display(), count = files.len(), "found content files"),
        Err(e) => result.error(format!("Could not read asset directory: {}", e)),
    }
}
