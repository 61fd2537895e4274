//! Structural validation of `metadata.json`.
//!
//! The document is parsed, checked against the embedded JSON Schema and
//! only then converted into a typed [`MetadataRecord`]. Only the first
//! schema violation is reported; a record that fails here is never handed
//! to the content or file stages.

use std::path::Path;
use std::sync::OnceLock;

use jsonschema::{Draft, Validator};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::domain::metadata::METADATA_FILE;
use crate::domain::{Finding, MetadataRecord, Severity, ValidationResult};

/// JSON Schema (draft 7) every `metadata.json` must satisfy
pub const METADATA_SCHEMA: &str = include_str!("../../schemas/metadata.schema.json");

/// Compiled schema, built on first use
static COMPILED: OnceLock<Result<Validator, String>> = OnceLock::new();

/// Reasons a metadata document is rejected
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Could not read metadata.json: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("Invalid JSON in metadata.json: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Metadata schema validation failed: {message} (at {location})")]
    Schema { message: String, location: String },

    #[error("Metadata schema validation failed: {0}")]
    Shape(#[source] serde_json::Error),

    #[error("Metadata schema could not be compiled: {0}")]
    SchemaUnavailable(String),
}

fn compiled_schema() -> Result<&'static Validator, MetadataError> {
    let compiled = COMPILED.get_or_init(|| {
        let schema: Value = serde_json::from_str(METADATA_SCHEMA).map_err(|e| e.to_string())?;

        let mut opts = jsonschema::options();
        opts.with_draft(Draft::Draft7);
        // `format` keywords are annotations only
        opts.should_validate_formats(false);
        opts.build(&schema).map_err(|e| e.to_string())
    });

    compiled
        .as_ref()
        .map_err(|e| MetadataError::SchemaUnavailable(e.clone()))
}

/// Check a parsed document against the schema, returning the first violation
pub fn check_schema(document: &Value) -> Result<(), MetadataError> {
    let validator = compiled_schema()?;

    match validator.iter_errors(document).next() {
        None => Ok(()),
        Some(violation) => {
            let location = violation.instance_path.to_string();
            Err(MetadataError::Schema {
                message: violation.to_string(),
                location: if location.is_empty() {
                    "/".to_string()
                } else {
                    location
                },
            })
        }
    }
}

/// Parse and structurally validate metadata text
pub fn parse_metadata(text: &str) -> Result<MetadataRecord, MetadataError> {
    let document: Value = serde_json::from_str(text).map_err(MetadataError::InvalidJson)?;
    check_schema(&document)?;
    serde_json::from_value(document).map_err(MetadataError::Shape)
}

/// Read and validate `<asset>/metadata.json`.
///
/// Any failure is recorded as a single error and `None` is returned, which
/// ends validation of the record for this asset.
pub fn load_metadata(asset: &Path, result: &mut ValidationResult) -> Option<MetadataRecord> {
    let path = asset.join(METADATA_FILE);

    let parsed = std::fs::read_to_string(&path)
        .map_err(MetadataError::from)
        .and_then(|text| parse_metadata(&text));

    match parsed {
        Ok(record) => {
            debug!(asset = %asset.display(), id = %record.id, "metadata passed schema");
            Some(record)
        }
        Err(e) => {
            debug!(asset = %asset.display(), error = %e, "metadata rejected");
            result.push(Finding::new(Severity::Error, e.to_string()).with_file(METADATA_FILE));
            None
        }
    }
}
