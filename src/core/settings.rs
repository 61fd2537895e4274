//! Tunable policy thresholds for asset validation.

use serde::{Deserialize, Serialize};

/// Thresholds and whitelists applied by the validation stages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// Minimum recommended image width in pixels (default: 1920)
    #[serde(default = "default_min_image_width")]
    pub min_image_width: u32,

    /// Minimum recommended image height in pixels (default: 1080)
    #[serde(default = "default_min_image_height")]
    pub min_image_height: u32,

    /// Fewer tags than this produces a warning (default: 3)
    #[serde(default = "default_min_tags")]
    pub min_tags: usize,

    /// Licenses accepted without manual review
    #[serde(default = "default_accepted_licenses")]
    pub accepted_licenses: Vec<String>,

    /// Licenses that require `license.attribution`
    #[serde(default = "default_attribution_licenses")]
    pub attribution_licenses: Vec<String>,

    /// Recompute digests declared inline in format descriptors (default: off)
    #[serde(default)]
    pub verify_declared_checksums: bool,
}

fn default_min_image_width() -> u32 {
    1920
}
fn default_min_image_height() -> u32 {
    1080
}
fn default_min_tags() -> usize {
    3
}

fn default_accepted_licenses() -> Vec<String> {
    [
        "CC0",
        "CC-BY",
        "CC-BY-SA",
        "CC-BY-4.0",
        "CC-BY-SA-4.0",
        "MIT",
        "Apache-2.0",
        "Public Domain",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_attribution_licenses() -> Vec<String> {
    ["CC-BY", "CC-BY-SA", "CC-BY-4.0", "CC-BY-SA-4.0"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            min_image_width: default_min_image_width(),
            min_image_height: default_min_image_height(),
            min_tags: default_min_tags(),
            accepted_licenses: default_accepted_licenses(),
            attribution_licenses: default_attribution_licenses(),
            verify_declared_checksums: false,
        }
    }
}

impl ValidationSettings {
    pub fn is_accepted_license(&self, license: &str) -> bool {
        self.accepted_licenses.iter().any(|l| l == license)
    }

    pub fn requires_attribution(&self, license: &str) -> bool {
        self.attribution_licenses.iter().any(|l| l == license)
    }
}
