//! Input Module
//!
//! Key and mouse vocabulary shared by the native side and the engine side
//! of a device, plus the pieces of input state the device keeps between
//! events.
//!
//! # Example
//!
//! ```rust
//! use glfw_device::input::{KeyCode, KeyMap, NativeKey};
//!
//! let keymap = KeyMap::new();
//! assert_eq!(keymap.lookup(NativeKey::ESCAPE), KeyCode::Escape);
//! assert_eq!(keymap.lookup(NativeKey::WORLD_1), KeyCode::Unknown);
//! ```

pub mod click;
pub mod cursor;
pub mod keyboard;
pub mod keymap;
pub mod mouse;

// Re-export commonly used types at module level
pub use click::{
    ClickRecord, ClickRunDetector, ClickSettings, DEFAULT_CLICK_TOLERANCE_PX,
    DEFAULT_DOUBLE_CLICK_MS, MAX_RUN_LENGTH,
};
pub use cursor::{CursorControl, CursorIcon};
pub use keyboard::{Action, KeyCode, Modifiers, NativeKey};
pub use keymap::{KeyMap, KeyMapping};
pub use mouse::{ButtonMask, MouseButton, NativeMouseButton};
