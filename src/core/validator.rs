//! Per-asset validation orchestrator.
//!
//! Runs the stages in a fixed order against one asset directory and returns
//! a fresh [`ValidationResult`]. The validator itself holds only immutable
//! settings and adapters, so a single instance can be shared across worker
//! threads.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info_span};

use crate::adapters::{ImageCrateProbe, ImageProbe, InferMimeDetector, MimeDetector};
use crate::domain::metadata::METADATA_FILE;
use crate::domain::ValidationResult;

use super::checksum::check_manifest;
use super::files::{check_files, FileProbes};
use super::policy::check_content;
use super::schema::load_metadata;
use super::settings::ValidationSettings;
use super::structure::check_structure;

/// Validates asset directories against structure, schema and content rules
#[derive(Clone)]
pub struct AssetValidator {
    settings: ValidationSettings,
    mime: Arc<dyn MimeDetector>,
    images: Arc<dyn ImageProbe>,
}

impl Default for AssetValidator {
    fn default() -> Self {
        Self::new(ValidationSettings::default())
    }
}

impl std::fmt::Debug for AssetValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetValidator")
            .field("settings", &self.settings)
            .field("mime", &self.mime.name())
            .field("images", &self.images.name())
            .finish()
    }
}

impl AssetValidator {
    /// Create a validator with the default content-sniffing and image adapters
    pub fn new(settings: ValidationSettings) -> Self {
        Self {
            settings,
            mime: Arc::new(InferMimeDetector::new()),
            images: Arc::new(ImageCrateProbe::new()),
        }
    }

    /// Replace the MIME detector
    pub fn with_mime_detector(mut self, mime: Arc<dyn MimeDetector>) -> Self {
        self.mime = mime;
        self
    }

    /// Replace the image probe
    pub fn with_image_probe(mut self, images: Arc<dyn ImageProbe>) -> Self {
        self.images = images;
        self
    }

    pub fn settings(&self) -> &ValidationSettings {
        &self.settings
    }

    /// Validate a single asset directory.
    ///
    /// A panicking adapter unwinds out of this call. Use
    /// [`validate_all`](crate::core::validate_all) to have panics reported as
    /// findings instead.
    pub fn validate(&self, asset: &Path) -> ValidationResult {
        let span = info_span!("asset", path = %asset.display());
        let _guard = span.enter();

        let mut result = ValidationResult::new(asset);

        debug!("checking directory structure");
        check_structure(asset, &mut result);

        if !asset.join(METADATA_FILE).is_file() {
            return result;
        }

        debug!("checking metadata schema");
        let Some(record) = load_metadata(asset, &mut result) else {
            return result;
        };

        debug!("checking content policy");
        check_content(&record, &self.settings, &mut result);

        debug!("checking files");
        let probes = FileProbes {
            mime: self.mime.as_ref(),
            images: self.images.as_ref(),
        };
        check_files(asset, &record, &self.settings, &probes, &mut result);

        debug!("checking checksum manifest");
        check_manifest(asset, &mut result);

        debug!(
            errors = result.errors().len(),
            warnings = result.warnings().len(),
            "asset validated"
        );
        result
    }
}
