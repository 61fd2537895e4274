//! Validation findings and per-asset / per-batch results.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Correctness violation; fails the asset
    Error,

    /// Quality or best-practice deviation; advisory only
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// A single message produced while validating an asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,

    /// Human-readable description, including expected/actual values
    pub message: String,

    /// File within the asset the finding concerns, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Finding {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            file: None,
        }
    }

    /// Attach the file this finding is about
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Outcome of validating one asset directory.
///
/// Errors and warnings are kept in the order the stages produced them.
/// The verdict is derived, never stored, so `is_valid()` always equals
/// `errors().is_empty()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    path: PathBuf,
    errors: Vec<Finding>,
    warnings: Vec<Finding>,
}

impl ValidationResult {
    /// Start an empty result for an asset
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record a finding in the list matching its severity
    pub fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Error => self.errors.push(finding),
            Severity::Warning => self.warnings.push(finding),
        }
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Finding::new(Severity::Error, message));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Finding::new(Severity::Warning, message));
    }

    /// Record an error about a specific file
    pub fn file_error(&mut self, file: &str, message: impl Into<String>) {
        self.push(Finding::new(Severity::Error, message).with_file(file));
    }

    /// Record a warning about a specific file
    pub fn file_warning(&mut self, file: &str, message: impl Into<String>) {
        self.push(Finding::new(Severity::Warning, message).with_file(file));
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn errors(&self) -> &[Finding] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Finding] {
        &self.warnings
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_findings(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    /// Whether this asset fails under the given strictness
    pub fn fails(&self, strict: bool) -> bool {
        !self.is_valid() || (strict && !self.warnings.is_empty())
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 4)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("warnings", &self.warnings)?;
        state.end()
    }
}

/// Aggregated counts for a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of assets validated
    pub assets: usize,

    /// Assets that fail under the active strictness
    pub failed_assets: usize,

    /// Error count; includes promoted warnings in strict mode
    pub errors: usize,

    pub warnings: usize,

    pub strict: bool,
}

/// Results of validating a set of assets, ordered by path
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,

    pub assets: Vec<ValidationResult>,
}

impl BatchReport {
    /// Build a report, sorting results lexicographically by path
    pub fn new(mut assets: Vec<ValidationResult>) -> Self {
        assets.sort_by(|a, b| a.path.cmp(&b.path));
        Self {
            generated_at: Utc::now(),
            assets,
        }
    }

    pub fn total_errors(&self) -> usize {
        self.assets.iter().map(|a| a.errors.len()).sum()
    }

    pub fn total_warnings(&self) -> usize {
        self.assets.iter().map(|a| a.warnings.len()).sum()
    }

    /// Summarize the batch; `strict` counts warnings as errors
    pub fn summary(&self, strict: bool) -> Summary {
        let warnings = self.total_warnings();
        let errors = self.total_errors() + if strict { warnings } else { 0 };

        Summary {
            assets: self.assets.len(),
            failed_assets: self.assets.iter().filter(|a| a.fails(strict)).count(),
            errors,
            warnings,
            strict,
        }
    }

    /// Process exit code: 0 when nothing fails, 1 otherwise
    pub fn exit_code(&self, strict: bool) -> i32 {
        if self.summary(strict).errors > 0 {
            1
        } else {
            0
        }
    }
}
