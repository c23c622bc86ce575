pub mod filters;

use core_types::{Image, ImageError};
use std::path::{Path, PathBuf};
use tracing::debug;

pub use filters::{FilterEntry, FilterPipeline, Transform};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Failed to load image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid image: {0}")]
    Image(#[from] ImageError),

    #[error("Filter pipeline needs at least one entry")]
    EmptyPipeline,
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Default)]
pub struct ImageEngine;

impl ImageEngine {
    pub fn new() -> Self {
        Self
    }

    /// Decode a file into an RGBA8 [`Image`], whatever its on-disk pixel format.
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<Image> {
        let path = path.as_ref();
        let dyn_img = image::open(path).map_err(|source| EngineError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let rgba = dyn_img.into_rgba8();
        let (w, h) = rgba.dimensions();
        debug!("Decoded {} ({w}x{h})", path.display());

        Ok(Image::from_vec(w, h, rgba.into_raw())?)
    }
}
