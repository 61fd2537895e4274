//! Image probing via the `image` crate.

use std::path::Path;

use image::ImageReader;

use super::{ImageProbe, ImageSize, ProbeError};

/// [`ImageProbe`] that guesses the format from content and reads the header
#[derive(Debug, Clone, Default)]
pub struct ImageCrateProbe;

impl ImageCrateProbe {
    pub fn new() -> Self {
        Self
    }
}

impl ImageProbe for ImageCrateProbe {
    fn name(&self) -> &str {
        "image"
    }

    fn dimensions(&self, path: &Path) -> Result<ImageSize, ProbeError> {
        let reader = ImageReader::open(path)?.with_guessed_format()?;
        if reader.format().is_none() {
            return Err(ProbeError::Unsupported(path.to_path_buf()));
        }

        let (width, height) = reader.into_dimensions()?;
        Ok(ImageSize { width, height })
    }
}
