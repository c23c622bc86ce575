use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    #[error("Pixel buffer size mismatch for {width}x{height} image: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, ImageError>;

/// Rectangular RGBA8 pixel grid, row-major, top-to-bottom.
///
/// The buffer always holds exactly `width * height * 4` bytes and is never
/// mutated after construction; transforms build a new `Image`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Image {
    pub const BYTES_PER_PIXEL: usize = 4;

    /// A 0x0 image with an empty buffer.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Zero-initialised image of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = buffer_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
        })
    }

    /// Copies `data` into a new image.
    pub fn from_raw(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            pixels: data.to_vec(),
        })
    }

    /// Takes ownership of `data` without copying.
    pub fn from_vec(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            pixels: data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }
}

fn buffer_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(Image::BYTES_PER_PIXEL))
        .ok_or(ImageError::InvalidDimension { width, height })
}

fn check_len(width: u32, height: u32, actual: usize) -> Result<()> {
    let expected = buffer_len(width, height)?;
    if expected != actual {
        return Err(ImageError::SizeMismatch {
            width,
            height,
            expected,
            actual,
        });
    }
    Ok(())
}
