//! Typed view of an asset's `metadata.json`.
//!
//! These types are only built after the raw document has passed the
//! structural schema check, so they carry no validation logic of their own.

use serde::{Deserialize, Serialize};

/// Name of the metadata descriptor inside every asset directory
pub const METADATA_FILE: &str = "metadata.json";

/// Name of the optional checksum manifest inside an asset directory
pub const CHECKSUM_FILE: &str = "checksums.txt";

/// Returns true for files that describe an asset rather than belong to it
pub fn is_sidecar(name: &str) -> bool {
    name == METADATA_FILE || name == CHECKSUM_FILE
}

/// Kind of content an asset holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Image,
    Video,
    Audio,
    Dataset,
    Archive,
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetType::Image => write!(f, "image"),
            AssetType::Video => write!(f, "video"),
            AssetType::Audio => write!(f, "audio"),
            AssetType::Dataset => write!(f, "dataset"),
            AssetType::Archive => write!(f, "archive"),
        }
    }
}

impl std::str::FromStr for AssetType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "image" => Ok(AssetType::Image),
            "video" => Ok(AssetType::Video),
            "audio" => Ok(AssetType::Audio),
            "dataset" => Ok(AssetType::Dataset),
            "archive" => Ok(AssetType::Archive),
            _ => anyhow::bail!("Unknown asset type: {}", s),
        }
    }
}

/// Parsed asset descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Lowercase slug (`[a-z0-9-]+`)
    pub id: String,

    pub title: String,

    pub description: String,

    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,

    /// Asset kind; drives type-specific file checks
    #[serde(rename = "type")]
    pub asset_type: AssetType,

    /// Semantic version (`MAJOR.MINOR.PATCH`)
    pub version: String,

    pub license: License,

    pub creator: Creator,

    /// Free-form search tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// One entry per physical file belonging to the asset
    pub formats: Vec<FormatDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

/// Licensing terms for an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    /// License identifier, e.g. `CC-BY-4.0` or `MIT`
    #[serde(rename = "type")]
    pub license_type: String,

    pub url: String,

    /// Credit line required by attribution licenses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
}

impl License {
    /// Attribution text, treating an empty string as absent
    pub fn attribution(&self) -> Option<&str> {
        self.attribution.as_deref().filter(|a| !a.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Metadata entry describing one file of the asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatDescriptor {
    /// Extension-like tag (`png`, `csv`, ...)
    pub format: String,

    /// Path relative to the asset directory
    pub filename: String,

    /// Declared MIME type
    pub mimetype: String,

    /// Declared size in bytes
    pub size: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<DeclaredChecksums>,
}

/// Declared pixel dimensions; either side may be omitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl Dimensions {
    /// True when neither side was declared
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }

    /// Whether the declared sides agree with measured ones
    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width == Some(width) && self.height == Some(height)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = |v: Option<u32>| v.map_or_else(|| "?".to_string(), |v| v.to_string());
        write!(f, "{}x{}", side(self.width), side(self.height))
    }
}

/// Digests declared inline in a format descriptor
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeclaredChecksums {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}
