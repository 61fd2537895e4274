//! assetval - validator for directory-based asset libraries
//!
//! Every asset is a directory holding one or more content files, a
//! `metadata.json` descriptor and, optionally, a `checksums.txt` manifest.
//! The validator decides whether such a directory is well-formed,
//! self-consistent and policy-compliant.
//!
//! # Architecture
//!
//! Validation of one asset runs a fixed sequence of stages, each adding
//! findings to a result owned by that call:
//! - directory structure
//! - metadata schema (terminal on failure)
//! - content policy (license, attribution, tags)
//! - file consistency (existence, size, MIME type, image dimensions)
//! - checksum manifest
//!
//! Findings are either errors, which fail the asset, or warnings, which
//! are advisory.
//!
//! # Modules
//!
//! - `adapters`: MIME sniffing and image probing capabilities
//! - `core`: validation stages, orchestrator and batch runner
//! - `domain`: metadata record, findings, results
//! - `config`: configuration file and environment handling
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Validate one asset
//! assetval validate --path assets/images/sunset-01
//!
//! # Validate every asset below a root, failing on warnings too
//! assetval validate --path assets --recursive --strict
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use crate::core::{discover_assets, validate_all, AssetValidator, ValidationSettings};
pub use domain::{BatchReport, Finding, MetadataRecord, Severity, ValidationResult};
