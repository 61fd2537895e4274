//! Core validation engine.
//!
//! This module contains:
//! - Structure: asset directory layout checks
//! - Schema: metadata.json parsing and schema validation
//! - Policy: license, attribution and tag rules
//! - Files: declared-file consistency and orphan detection
//! - Checksum: checksums.txt verification
//! - Validator: per-asset orchestration
//! - Batch: asset discovery and concurrent validation

pub mod batch;
pub mod checksum;
pub mod files;
pub mod policy;
pub mod schema;
pub mod settings;
pub mod structure;
pub mod validator;

// Re-export commonly used types
pub use batch::{discover_assets, validate_all, DiscoveryError};
pub use checksum::{file_digest, parse_manifest, ChecksumError, DigestAlgorithm, ManifestLine};
pub use schema::{parse_metadata, MetadataError};
pub use settings::ValidationSettings;
pub use validator::AssetValidator;
