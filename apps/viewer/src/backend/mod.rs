pub mod minifb;
pub mod text;

use app_settings::OverlaySettings;
use core_types::Image;
use std::path::PathBuf;

pub use self::minifb::MinifbBackend;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Failed to open window: {0}")]
    Window(#[from] ::minifb::Error),

    #[error("Failed to load font {}: {source}", path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load font {}: {source}", path.display())]
    FontParse {
        path: PathBuf,
        #[source]
        source: ab_glyph::InvalidFont,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Other,
}

/// Input event polled from the window, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Closed,
    KeyPressed { key: Key, code: u32 },
    KeyReleased { key: Key, code: u32 },
    MouseMoved { x: f32, y: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: [u8; 3],
    pub position: (f32, f32),
}

impl From<&OverlaySettings> for TextStyle {
    fn from(overlay: &OverlaySettings) -> Self {
        Self {
            size: overlay.size,
            color: overlay.color,
            position: (overlay.x, overlay.y),
        }
    }
}

/// Image packed as `0RGB` words, ready to blit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Texture {
    /// Composites each RGBA pixel over black, the clear colour of every frame.
    pub fn from_image(image: &Image) -> Self {
        let pixels = image
            .pixels()
            .chunks_exact(Image::BYTES_PER_PIXEL)
            .map(|px| {
                let a = px[3] as u32;
                let r = px[0] as u32 * a / 255;
                let g = px[1] as u32 * a / 255;
                let b = px[2] as u32 * a / 255;
                (r << 16) | (g << 8) | b
            })
            .collect();
        Self {
            width: image.width() as usize,
            height: image.height() as usize,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

/// Window, input and presentation surface driven by the frame loop.
pub trait Backend {
    /// Next pending event, or `None` immediately when the queue is empty.
    fn poll_event(&mut self) -> Option<Event>;

    fn clear(&mut self);

    fn draw_texture(&mut self, texture: &Texture);

    fn draw_text(&mut self, text: &str, style: &TextStyle);

    fn present(&mut self) -> Result<(), BackendError>;

    fn close(&mut self);
}
