//! Mouse Input Module
//!
//! Mouse button identifiers and the held-button mask stamped on every
//! mouse event.

use bitflags::bitflags;

/// The three mouse buttons the engine tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Bit for this button in a [`ButtonMask`].
    pub fn mask(self) -> ButtonMask {
        match self {
            MouseButton::Left => ButtonMask::LEFT,
            MouseButton::Right => ButtonMask::RIGHT,
            MouseButton::Middle => ButtonMask::MIDDLE,
        }
    }
}

/// Native mouse button number as reported by GLFW 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeMouseButton(pub i32);

impl NativeMouseButton {
    pub const LEFT: NativeMouseButton = NativeMouseButton(0);
    pub const RIGHT: NativeMouseButton = NativeMouseButton(1);
    pub const MIDDLE: NativeMouseButton = NativeMouseButton(2);

    /// Engine button for this native button. Buttons beyond the first
    /// three have no engine counterpart.
    pub fn to_engine(self) -> Option<MouseButton> {
        match self {
            NativeMouseButton::LEFT => Some(MouseButton::Left),
            NativeMouseButton::RIGHT => Some(MouseButton::Right),
            NativeMouseButton::MIDDLE => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

bitflags! {
    /// Buttons currently held down.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ButtonMask: u32 {
        const LEFT = 0x01;
        const RIGHT = 0x02;
        const MIDDLE = 0x04;
    }
}

impl ButtonMask {
    /// Update the held state of one button.
    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        self.set(button.mask(), pressed);
    }

    /// Check if a specific button is held.
    pub fn is_pressed(self, button: MouseButton) -> bool {
        self.contains(button.mask())
    }

    /// Check if any button is held.
    pub fn any_pressed(self) -> bool {
        !self.is_empty()
    }
}

static_assertions::assert_eq_size!(ButtonMask, u32);
