//! Event → effect transition table.
//!
//! | Event                      | Effect                                   |
//! |----------------------------|------------------------------------------|
//! | `Closed`                   | close the window, `is_open = false`      |
//! | `KeyPressed(Left)`         | previous filter, re-apply, new texture   |
//! | `KeyPressed(Right)`        | next filter, re-apply, new texture       |
//! | `KeyPressed(_)`            | none                                     |
//! | anything else              | none                                     |
//!
//! Every key press is logged at debug level with its numeric code.

use tracing::{debug, info};

use crate::backend::{Backend, Event, Key};
use crate::window::ViewerState;

pub fn dispatch<B: Backend + ?Sized>(event: Event, state: &mut ViewerState, backend: &mut B) {
    match event {
        Event::Closed => on_closed(state, backend),
        Event::KeyPressed { key, code } => on_key_pressed(state, key, code),
        Event::KeyReleased { .. } | Event::MouseMoved { .. } => {}
    }
}

fn on_closed<B: Backend + ?Sized>(state: &mut ViewerState, backend: &mut B) {
    info!("Closing application...");
    backend.close();
    state.is_open = false;
    info!("Closed");
}

fn on_key_pressed(state: &mut ViewerState, key: Key, code: u32) {
    debug!("Pressed key {code}");
    match key {
        Key::Left => previous_filter(state),
        Key::Right => next_filter(state),
        Key::Other => {}
    }
}

fn previous_filter(state: &mut ViewerState) {
    state.pipeline.select_previous();
    state.refresh();
}

fn next_filter(state: &mut ViewerState) {
    state.pipeline.select_next();
    state.refresh();
}
