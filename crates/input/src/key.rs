use serde::{Deserialize, Serialize};

/// Keys the viewer can bind. Anything else the window system reports is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    O,
    Up,
    Down,
    Left,
    Right,
    Space,
    Shift,
    Tab,
    Escape,
}

impl Key {
    pub const ALL: [Key; 15] = [
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::Q,
        Key::E,
        Key::O,
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Space,
        Key::Shift,
        Key::Tab,
        Key::Escape,
    ];

    fn bit(self) -> u32 {
        1 << (self as u8)
    }
}

/// The set of keys held down at one instant.
///
/// A snapshot is a plain value: taking a new one never disturbs an old one,
/// which is what makes previous-vs-current comparisons trivial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyboardSnapshot {
    bits: u32,
}

impl KeyboardSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot with exactly the given keys held.
    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        let mut snapshot = Self::new();
        for key in keys {
            snapshot.press(key);
        }
        snapshot
    }

    pub fn press(&mut self, key: Key) {
        self.bits |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.bits &= !key.bit();
    }

    /// Record a key transition reported by the window system.
    pub fn set(&mut self, key: Key, down: bool) {
        if down {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.bits & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut s = KeyboardSnapshot::new();
        assert!(s.is_empty());
        s.press(Key::W);
        s.press(Key::Space);
        assert!(s.is_down(Key::W));
        assert!(s.is_down(Key::Space));
        assert!(!s.is_down(Key::S));
        s.release(Key::W);
        assert!(!s.is_down(Key::W));
        assert!(s.is_down(Key::Space));
    }

    #[test]
    fn snapshots_are_independent_values() {
        let mut current = KeyboardSnapshot::from_keys([Key::Tab]);
        let previous = current;
        current.release(Key::Tab);
        assert!(previous.is_down(Key::Tab));
        assert!(!current.is_down(Key::Tab));
    }

    #[test]
    fn every_key_has_a_distinct_bit() {
        let mut seen = 0;
        for key in Key::ALL {
            assert_eq!(seen & key.bit(), 0, "{key:?}");
            seen |= key.bit();
        }
        let all = KeyboardSnapshot::from_keys(Key::ALL);
        assert!(Key::ALL.into_iter().all(|k| all.is_down(k)));
    }
}
