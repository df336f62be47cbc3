use crate::key::{Key, KeyboardSnapshot};

/// This frame's keyboard snapshot alongside the previous frame's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub current: KeyboardSnapshot,
    pub previous: KeyboardSnapshot,
}

impl InputFrame {
    pub fn new(previous: KeyboardSnapshot, current: KeyboardSnapshot) -> Self {
        Self { current, previous }
    }

    /// Key is down this frame, whatever it was last frame.
    pub fn held(&self, key: Key) -> bool {
        self.current.is_down(key)
    }

    /// Key went down between the previous frame and this one.
    pub fn pressed(&self, key: Key) -> bool {
        self.current.is_down(key) && !self.previous.is_down(key)
    }

    pub fn released(&self, key: Key) -> bool {
        !self.current.is_down(key) && self.previous.is_down(key)
    }

    /// The frame that follows this one when the keyboard reads `next`.
    pub fn advance(&self, next: KeyboardSnapshot) -> Self {
        Self::new(self.current, next)
    }
}
