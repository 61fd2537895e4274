//! Capability interfaces for the external codecs the validator relies on.
//!
//! Content sniffing and image decoding are the only places where the
//! engine depends on third-party format knowledge. Both sit behind small
//! traits so policy code stays library-independent and tests can swap in
//! fakes.

pub mod imaging;
pub mod sniff;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use imaging::ImageCrateProbe;
pub use sniff::InferMimeDetector;

/// Errors raised by capability adapters
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Image(#[from] image::ImageError),

    #[error("unsupported content in {0}")]
    Unsupported(PathBuf),
}

/// Pixel size of a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Detects the MIME type of a file from its content
pub trait MimeDetector: Send + Sync {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    /// Sniff the MIME type of the file at `path`
    fn detect(&self, path: &Path) -> Result<String, ProbeError>;
}

/// Decodes an image far enough to report its pixel dimensions
pub trait ImageProbe: Send + Sync {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    /// Open `path` as an image and return its size
    fn dimensions(&self, path: &Path) -> Result<ImageSize, ProbeError>;
}
