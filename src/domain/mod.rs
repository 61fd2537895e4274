//! Domain data structures.
//!
//! - `metadata`: typed `metadata.json` record
//! - `findings`: errors, warnings and validation results

pub mod findings;
pub mod metadata;

pub use findings::{BatchReport, Finding, Severity, Summary, ValidationResult};
pub use metadata::{
    AssetType, Creator, DeclaredChecksums, Dimensions, FormatDescriptor, License, MetadataRecord,
    CHECKSUM_FILE, METADATA_FILE,
};
