//! Input: per-frame keyboard snapshots mapped to camera actions.
//!
//! # Invariants
//! - The host takes exactly one snapshot per frame.
//! - Edge detection compares against the previous frame's snapshot, which the
//!   caller passes in explicitly. No input state is global.
//! - Held keys produce continuous actions every frame; toggles fire once per
//!   key-down transition.

pub mod action;
pub mod bindings;
pub mod frame;
pub mod key;

pub use action::Action;
pub use bindings::{Bindings, Scheme, Speeds};
pub use frame::InputFrame;
pub use key::{Key, KeyboardSnapshot};

pub fn crate_info() -> &'static str {
    "mapviz-input v0.1.0"
}
