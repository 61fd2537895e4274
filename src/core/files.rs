//! Cross-checks between format descriptors and the files on disk.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::{debug, warn};

use crate::adapters::{ImageProbe, MimeDetector};
use crate::domain::{AssetType, FormatDescriptor, MetadataRecord, ValidationResult};

use super::checksum::{file_digest, DigestAlgorithm};
use super::settings::ValidationSettings;
use super::structure::content_files;

/// Codecs the file checks depend on
pub struct FileProbes<'a> {
    pub mime: &'a dyn MimeDetector,
    pub images: &'a dyn ImageProbe,
}

/// Check every declared file, then report undeclared ones
pub fn check_files(
    asset: &Path,
    record: &MetadataRecord,
    settings: &ValidationSettings,
    probes: &FileProbes<'_>,
    result: &mut ValidationResult,
) {
    // Later descriptors for the same filename replace earlier ones
    let by_name: HashMap<&str, &FormatDescriptor> = record
        .formats
        .iter()
        .map(|f| (f.filename.as_str(), f))
        .collect();

    let mut seen = HashSet::new();
    for format in &record.formats {
        let name = format.filename.as_str();
        if !seen.insert(name) {
            continue;
        }

        let path = asset.join(name);
        if !path.exists() {
            result.file_error(name, format!("File listed in metadata not found: {}", name));
            continue;
        }

        check_file(&path, by_name[name], record.asset_type, settings, probes, result);
    }

    match content_files(asset) {
        Ok(files) => {
            for name in files.iter().filter(|n| !by_name.contains_key(n.as_str())) {
                result.file_warning(name, format!("File not listed in metadata: {}", name));
            }
        }
        Err(e) => {
            warn!(asset = %asset.display(), error = %e, "could not list asset files");
            result.warning(format!("Could not list asset files: {}", e));
        }
    }
}

fn check_file(
    path: &Path,
    format: &FormatDescriptor,
    asset_type: AssetType,
    settings: &ValidationSettings,
    probes: &FileProbes<'_>,
    result: &mut ValidationResult,
) {
    let name = format.filename.as_str();

    match std::fs::metadata(path) {
        Ok(meta) if meta.len() != format.size => result.file_error(
            name,
            format!(
                "File size mismatch for {}: actual={}, metadata={}",
                name,
                meta.len(),
                format.size
            ),
        ),
        Ok(_) => {}
        Err(e) => result.file_error(name, format!("Could not read file {}: {}", name, e)),
    }

    match probes.mime.detect(path) {
        Ok(actual) if actual != format.mimetype => result.file_warning(
            name,
            format!(
                "MIME type mismatch for {}: actual={}, metadata={}",
                name, actual, format.mimetype
            ),
        ),
        Ok(_) => {}
        Err(e) => result.file_warning(
            name,
            format!("Could not determine MIME type for {}: {}", name, e),
        ),
    }

    if asset_type == AssetType::Image {
        check_image(path, format, settings, probes.images, result);
    }

    if settings.verify_declared_checksums {
        check_declared_checksums(path, format, result);
    }
}

fn check_image(
    path: &Path,
    format: &FormatDescriptor,
    settings: &ValidationSettings,
    images: &dyn ImageProbe,
    result: &mut ValidationResult,
) {
    let name = format.filename.as_str();

    let size = match images.dimensions(path) {
        Ok(size) => size,
        Err(e) => {
            result.file_error(name, format!("Could not validate image {}: {}", name, e));
            return;
        }
    };
    debug!(file = %name, %size, probe = images.name(), "decoded image");

    if let Some(declared) = format.dimensions.filter(|d| !d.is_empty()) {
        if !declared.matches(size.width, size.height) {
            result.file_error(
                name,
                format!(
                    "Image dimensions mismatch for {}: actual={}, metadata={}",
                    name, size, declared
                ),
            );
        }
    }

    if size.width < settings.min_image_width || size.height < settings.min_image_height {
        result.file_warning(
            name,
            format!(
                "Image {} below recommended minimum resolution ({}x{}): {}",
                name, settings.min_image_width, settings.min_image_height, size
            ),
        );
    }
}

fn check_declared_checksums(path: &Path, format: &FormatDescriptor, result: &mut ValidationResult) {
    let Some(declared) = &format.checksum else {
        return;
    };
    let name = format.filename.as_str();

    let pairs = [
        (DigestAlgorithm::Md5, declared.md5.as_deref()),
        (DigestAlgorithm::Sha256, declared.sha256.as_deref()),
    ];

    for (algorithm, expected) in pairs {
        let Some(expected) = expected else { continue };

        match file_digest(path, algorithm) {
            Ok(actual) if actual.eq_ignore_ascii_case(expected) => {}
            Ok(actual) => result.file_error(
                name,
                format!(
                    "Declared {} checksum mismatch for {}: expected={}, actual={}",
                    algorithm, name, expected, actual
                ),
            ),
            Err(e) => result.file_warning(
                name,
                format!("Could not compute checksum for {}: {}", name, e),
            ),
        }
    }
}
