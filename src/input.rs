use std::collections::HashSet;

use sdl2::{event::Event, keyboard::Keycode};

/// The current state of the keyboard.
#[derive(Default)]
pub struct KeyboardState {
    pub down: HashSet<Keycode>,
    pub pressed: HashSet<Keycode>,
    pub released: HashSet<Keycode>,
}

impl KeyboardState {
    /// Forgets the per-frame edges. Call once before polling events.
    pub fn begin_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }

    /// Updates the state from one SDL event. Key repeats are ignored.
    pub fn handle_event(&mut self, event: &Event) {
        match *event {
            Event::KeyDown {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => self.press(keycode),
            Event::KeyUp {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => self.release(keycode),
            _ => {}
        }
    }

    pub fn press(&mut self, keycode: Keycode) {
        if self.down.insert(keycode) {
            self.pressed.insert(keycode);
        }
    }

    pub fn release(&mut self, keycode: Keycode) {
        if self.down.remove(&keycode) {
            self.released.insert(keycode);
        }
    }
}

/// Context handed to a lesson every frame.
pub struct FrameContext<'a> {
    pub keyboard: &'a KeyboardState,
    /// Seconds since the lesson started.
    pub time: f32,
    pub delta_time: f32,
}

impl<'a> FrameContext<'a> {
    pub fn new(keyboard: &'a KeyboardState, time: f32, delta_time: f32) -> Self {
        Self {
            keyboard,
            time,
            delta_time,
        }
    }
}
