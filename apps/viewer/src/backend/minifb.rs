use std::collections::VecDeque;

use ::minifb::{KeyRepeat, MouseMode, Window, WindowOptions};
use app_settings::ViewerSettings;
use tracing::info;

use super::text::TextRenderer;
use super::{Backend, BackendError, Event, Key, TextStyle, Texture};

/// Software framebuffer window.
///
/// minifb has no event queue of its own: OS events are pumped inside
/// `update_with_buffer`, so input is harvested into `pending` right after
/// each present and handed out one at a time by `poll_event`.
pub struct MinifbBackend {
    window: Option<Window>,
    frame: Vec<u32>,
    width: usize,
    height: usize,
    text: TextRenderer,
    pending: VecDeque<Event>,
    mouse: Option<(f32, f32)>,
    close_reported: bool,
}

impl MinifbBackend {
    /// Loads the overlay font, then opens the window; nothing is shown if the font is unusable.
    pub fn open(settings: &ViewerSettings) -> Result<Self, BackendError> {
        let text = TextRenderer::load(&settings.font_path)?;

        let mut window = Window::new(
            &settings.title,
            settings.width,
            settings.height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;
        window.set_target_fps(settings.target_fps);

        info!(
            "Opened {}x{} window \"{}\"",
            settings.width, settings.height, settings.title
        );

        Ok(Self {
            window: Some(window),
            frame: vec![0; settings.width * settings.height],
            width: settings.width,
            height: settings.height,
            text,
            pending: VecDeque::new(),
            mouse: None,
            close_reported: false,
        })
    }

    fn harvest_events(&mut self) {
        let Some(window) = &self.window else {
            return;
        };

        for key in window.get_keys_pressed(KeyRepeat::No) {
            self.pending.push_back(Event::KeyPressed {
                key: map_key(key),
                code: key as u32,
            });
        }
        for key in window.get_keys_released() {
            self.pending.push_back(Event::KeyReleased {
                key: map_key(key),
                code: key as u32,
            });
        }

        let mouse = window.get_mouse_pos(MouseMode::Discard);
        if mouse != self.mouse {
            if let Some((x, y)) = mouse {
                self.pending.push_back(Event::MouseMoved { x, y });
            }
            self.mouse = mouse;
        }

        if !window.is_open() && !self.close_reported {
            self.close_reported = true;
            self.pending.push_back(Event::Closed);
        }
    }
}

impl Backend for MinifbBackend {
    fn poll_event(&mut self) -> Option<Event> {
        self.pending.pop_front()
    }

    fn clear(&mut self) {
        self.frame.fill(0);
    }

    fn draw_texture(&mut self, texture: &Texture) {
        blit_stretched(&mut self.frame, self.width, self.height, texture);
    }

    fn draw_text(&mut self, text: &str, style: &TextStyle) {
        self.text
            .draw(&mut self.frame, self.width, self.height, text, style);
    }

    fn present(&mut self) -> Result<(), BackendError> {
        if let Some(window) = self.window.as_mut() {
            window.update_with_buffer(&self.frame, self.width, self.height)?;
        }
        self.harvest_events();
        Ok(())
    }

    fn close(&mut self) {
        // Dropping the handle destroys the native window.
        self.window = None;
        self.pending.clear();
    }
}

fn map_key(key: ::minifb::Key) -> Key {
    match key {
        ::minifb::Key::Left => Key::Left,
        ::minifb::Key::Right => Key::Right,
        _ => Key::Other,
    }
}

/// Nearest-neighbour stretch of `texture` over the whole frame.
fn blit_stretched(frame: &mut [u32], width: usize, height: usize, texture: &Texture) {
    if texture.is_empty() || width == 0 || height == 0 {
        return;
    }
    let (tw, th) = (texture.width(), texture.height());
    let src = texture.pixels();
    for y in 0..height {
        let src_row = (y * th / height) * tw;
        let dst_row = y * width;
        for x in 0..width {
            frame[dst_row + x] = src[src_row + x * tw / width];
        }
    }
}
