use std::path::Path;

use core_types::Image;
use engine::{FilterPipeline, ImageEngine};
use tracing::{debug, info};

use crate::backend::{Backend, BackendError, TextStyle, Texture};
use crate::dispatcher::dispatch;

/// Everything the dispatcher is allowed to touch.
pub struct ViewerState {
    pub(crate) pipeline: FilterPipeline,
    pub(crate) source: Image,
    pub(crate) texture: Texture,
    pub(crate) is_open: bool,
}

impl ViewerState {
    pub fn new(source: Image, pipeline: FilterPipeline) -> Self {
        let texture = Texture::from_image(&pipeline.apply(&source));
        Self {
            pipeline,
            source,
            texture,
            is_open: true,
        }
    }

    /// Re-run the selected filter over the source and replace the texture.
    pub(crate) fn refresh(&mut self) {
        self.texture = Texture::from_image(&self.pipeline.apply(&self.source));
        debug!(
            "Rendered {}x{} source through {}",
            self.source.width(),
            self.source.height(),
            self.pipeline.current_name()
        );
    }
}

/// Decode the start-up image; with no path the viewer starts on an empty 0x0 image.
pub fn load_source(engine: &ImageEngine, path: Option<&Path>) -> engine::Result<Image> {
    match path {
        Some(path) => {
            let image = engine.open(path)?;
            info!(
                "Loaded {} ({}x{})",
                path.display(),
                image.width(),
                image.height()
            );
            Ok(image)
        }
        None => {
            info!("No image given, starting empty");
            Ok(Image::empty())
        }
    }
}

pub struct WindowController<B: Backend> {
    backend: B,
    state: ViewerState,
    overlay: TextStyle,
}

impl<B: Backend> WindowController<B> {
    pub fn new(backend: B, source: Image, pipeline: FilterPipeline, overlay: TextStyle) -> Self {
        Self {
            backend,
            state: ViewerState::new(source, pipeline),
            overlay,
        }
    }

    /// Frame loop; returns once a close event has been dispatched.
    pub fn run(&mut self) -> Result<(), BackendError> {
        while self.state.is_open {
            self.drain_events();
            if !self.state.is_open {
                break;
            }
            self.render_frame()?;
        }
        Ok(())
    }

    fn drain_events(&mut self) {
        while self.state.is_open {
            let Some(event) = self.backend.poll_event() else {
                break;
            };
            dispatch(event, &mut self.state, &mut self.backend);
        }
    }

    fn render_frame(&mut self) -> Result<(), BackendError> {
        self.backend.clear();
        self.backend.draw_texture(&self.state.texture);
        self.backend
            .draw_text(self.state.pipeline.current_name(), &self.overlay);
        self.backend.present()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use crate::backend::{Backend, BackendError, Event, TextStyle, Texture};

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Clear,
        DrawTexture(Texture),
        DrawText(String),
        Present,
        Close,
    }

    /// Hands out one batch of events per frame and records every call.
    ///
    /// Once the scripted batches run out it reports `Closed`, so `run` always ends.
    #[derive(Debug, Default)]
    pub struct RecordingBackend {
        frames: VecDeque<Vec<Event>>,
        current: VecDeque<Event>,
        pub calls: Vec<Call>,
        pub closed: bool,
    }

    impl RecordingBackend {
        pub fn with_frames(frames: Vec<Vec<Event>>) -> Self {
            let mut frames: VecDeque<_> = frames.into();
            let current = frames.pop_front().unwrap_or_default().into();
            Self {
                frames,
                current,
                ..Self::default()
            }
        }

        pub fn presents(&self) -> usize {
            self.calls.iter().filter(|c| **c == Call::Present).count()
        }
    }

    impl Backend for RecordingBackend {
        fn poll_event(&mut self) -> Option<Event> {
            self.current.pop_front()
        }

        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }

        fn draw_texture(&mut self, texture: &Texture) {
            self.calls.push(Call::DrawTexture(texture.clone()));
        }

        fn draw_text(&mut self, text: &str, _style: &TextStyle) {
            self.calls.push(Call::DrawText(text.to_string()));
        }

        fn present(&mut self) -> Result<(), BackendError> {
            self.calls.push(Call::Present);
            self.current = self
                .frames
                .pop_front()
                .unwrap_or_else(|| vec![Event::Closed])
                .into();
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
            self.calls.push(Call::Close);
        }
    }
}
