//! Asset discovery and concurrent batch validation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::domain::metadata::METADATA_FILE;
use crate::domain::{BatchReport, ValidationResult};

use super::validator::AssetValidator;

/// Errors while locating assets to validate
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Resolve the asset directories to validate.
///
/// With `recursive` and a directory `path`, every directory at or below
/// `path` that contains a `metadata.json` is returned, sorted and
/// deduplicated. Otherwise `path` itself is the only asset.
pub fn discover_assets(path: &Path, recursive: bool) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !path.exists() {
        return Err(DiscoveryError::NotFound(path.to_path_buf()));
    }

    if !recursive || !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let root = path
        .to_str()
        .ok_or_else(|| DiscoveryError::NonUtf8Path(path.to_path_buf()))?;
    let pattern = format!("{}/**/{}", glob::Pattern::escape(root), METADATA_FILE);

    let mut assets = Vec::new();
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(metadata) => {
                if let Some(parent) = metadata.parent() {
                    assets.push(parent.to_path_buf());
                }
            }
            Err(e) => warn!(error = %e, "skipping unreadable path during discovery"),
        }
    }

    assets.sort();
    assets.dedup();
    debug!(root = %path.display(), count = assets.len(), "discovered assets");
    Ok(assets)
}

/// Validate `assets` concurrently, at most `max_parallel` at a time.
///
/// Each asset runs on a blocking worker. A worker that panics is reported
/// as an error on its own asset; the rest of the batch is unaffected.
pub async fn validate_all(
    validator: Arc<AssetValidator>,
    assets: Vec<PathBuf>,
    max_parallel: usize,
) -> BatchReport {
    let total = assets.len();
    info!(count = total, max_parallel, "validating assets");

    let semaphore = Arc::new(Semaphore::new(max_parallel.max(1)));
    let mut workers = JoinSet::new();

    for asset in assets {
        let validator = Arc::clone(&validator);
        let semaphore = Arc::clone(&semaphore);

        workers.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            let path = asset.clone();

            match tokio::task::spawn_blocking(move || validator.validate(&path)).await {
                Ok(result) => result,
                Err(e) => {
                    error!(asset = %asset.display(), error = %e, "validation worker failed");
                    let mut result = ValidationResult::new(&asset);
                    result.error(format!("Validation aborted unexpectedly: {}", e));
                    result
                }
            }
        });
    }

    let mut results = Vec::with_capacity(total);
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(result) => {
                info!(
                    asset = %result.path().display(),
                    done = results.len() + 1,
                    total,
                    valid = result.is_valid(),
                    "batch progress"
                );
                results.push(result);
            }
            Err(e) => error!(error = %e, "validation task failed"),
        }
    }

    BatchReport::new(results)
}
