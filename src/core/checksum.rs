//! Checksum manifest (`checksums.txt`) verification.
//!
//! The manifest holds one `<hex-digest> <filename>` pair per line. The
//! digest length selects the algorithm: 32 hex chars for MD5, 64 for
//! SHA-256. Verification is best-effort: problems reading or parsing the
//! manifest become warnings, and only genuine digest mismatches are errors.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use md5::Md5;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::metadata::CHECKSUM_FILE;
use crate::domain::ValidationResult;

/// Bytes read per hashing step
pub const CHUNK_SIZE: usize = 4096;

/// Errors while hashing files or reading the manifest
#[derive(Debug, Error)]
pub enum ChecksumError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Md5,
    Sha256,
}

impl DigestAlgorithm {
    /// Infer the algorithm from the length of a hex digest
    pub fn from_hex_len(len: usize) -> Option<Self> {
        match len {
            32 => Some(DigestAlgorithm::Md5),
            64 => Some(DigestAlgorithm::Sha256),
            _ => None,
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigestAlgorithm::Md5 => write!(f, "md5"),
            DigestAlgorithm::Sha256 => write!(f, "sha256"),
        }
    }
}

/// Hash a file in fixed-size chunks and return the lowercase hex digest
pub fn file_digest(path: &Path, algorithm: DigestAlgorithm) -> Result<String, ChecksumError> {
    let io_err = |source| ChecksumError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let digest = match algorithm {
        DigestAlgorithm::Md5 => stream_digest::<Md5>(file),
        DigestAlgorithm::Sha256 => stream_digest::<Sha256>(file),
    };
    digest.map_err(io_err)
}

fn stream_digest<D: Digest>(mut reader: impl Read) -> std::io::Result<String> {
    let mut hasher = D::new();
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// One non-comment line of a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestLine {
    Entry {
        line: usize,
        digest: String,
        filename: String,
    },
    Malformed {
        line: usize,
        text: String,
    },
}

/// Split manifest text into entries, skipping blanks and `#` comments.
///
/// Line numbers are 1-based.
pub fn parse_manifest(text: &str) -> Vec<ManifestLine> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            Some(match parts.as_slice() {
                [digest, filename] => ManifestLine::Entry {
                    line: idx + 1,
                    digest: digest.to_string(),
                    filename: filename.to_string(),
                },
                _ => ManifestLine::Malformed {
                    line: idx + 1,
                    text: line.to_string(),
                },
            })
        })
        .collect()
}

/// Verify `<asset>/checksums.txt`, if it exists
pub fn check_manifest(asset: &Path, result: &mut ValidationResult) {
    let manifest = asset.join(CHECKSUM_FILE);
    if !manifest.exists() {
        return;
    }

    let text = match std::fs::read_to_string(&manifest) {
        Ok(text) => text,
        Err(e) => {
            warn!(manifest = %manifest.display(), error = %e, "unreadable checksum manifest");
            result.file_warning(CHECKSUM_FILE, format!("Could not validate checksums: {}", e));
            return;
        }
    };

    for entry in parse_manifest(&text) {
        let (digest, filename) = match entry {
            ManifestLine::Entry {
                digest, filename, ..
            } => (digest, filename),
            ManifestLine::Malformed { line, text } => {
                result.file_warning(
                    CHECKSUM_FILE,
                    format!("Unparseable checksum line {}: {}", line, text),
                );
                continue;
            }
        };

        let path = asset.join(&filename);
        if !path.exists() {
            debug!(file = %filename, "manifest entry for absent file skipped");
            continue;
        }

        let Some(algorithm) = DigestAlgorithm::from_hex_len(digest.len()) else {
            result.file_warning(&filename, format!("Unknown checksum format for {}", filename));
            continue;
        };

        match file_digest(&path, algorithm) {
            Ok(actual) if actual.eq_ignore_ascii_case(&digest) => {
                debug!(file = %filename, %algorithm, "checksum ok");
            }
            Ok(actual) => result.file_error(
                &filename,
                format!(
                    "Checksum mismatch for {}: expected={}, actual={}",
                    filename, digest, actual
                ),
            ),
            Err(e) => result.file_warning(
                &filename,
                format!("Could not compute checksum for {}: {}", filename, e),
            ),
        }
    }
}
