//! Key Map
//!
//! Sorted lookup table from native key identifiers to engine key codes.
//! Built once when a device is created and read-only afterwards.

use super::keyboard::{KeyCode, NativeKey};

/// One native-to-engine key pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMapping {
    pub native: NativeKey,
    pub engine: KeyCode,
}

impl KeyMapping {
    pub const fn new(native: NativeKey, engine: KeyCode) -> Self {
        Self { native, engine }
    }
}

/// Recognized native keys. Combined modifiers, most punctuation, the
/// keypad enter/equal keys and F16 upwards are deliberately absent and
/// resolve to [`KeyCode::Unknown`].
const KEY_MAPPINGS: [KeyMapping; 98] = [
    KeyMapping::new(NativeKey::BACKSPACE, KeyCode::Back),
    KeyMapping::new(NativeKey::TAB, KeyCode::Tab),
    KeyMapping::new(NativeKey::ENTER, KeyCode::Return),
    KeyMapping::new(NativeKey::PAUSE, KeyCode::Pause),
    KeyMapping::new(NativeKey::CAPS_LOCK, KeyCode::Capital),
    KeyMapping::new(NativeKey::ESCAPE, KeyCode::Escape),
    KeyMapping::new(NativeKey::SPACE, KeyCode::Space),
    KeyMapping::new(NativeKey::PAGE_UP, KeyCode::Prior),
    KeyMapping::new(NativeKey::PAGE_DOWN, KeyCode::Next),
    KeyMapping::new(NativeKey::END, KeyCode::End),
    KeyMapping::new(NativeKey::HOME, KeyCode::Home),
    KeyMapping::new(NativeKey::LEFT, KeyCode::Left),
    KeyMapping::new(NativeKey::UP, KeyCode::Up),
    KeyMapping::new(NativeKey::RIGHT, KeyCode::Right),
    KeyMapping::new(NativeKey::DOWN, KeyCode::Down),
    KeyMapping::new(NativeKey::PRINT_SCREEN, KeyCode::Snapshot),
    KeyMapping::new(NativeKey::INSERT, KeyCode::Insert),
    KeyMapping::new(NativeKey::DELETE, KeyCode::Delete),
    KeyMapping::new(NativeKey::NUM_0, KeyCode::Key0),
    KeyMapping::new(NativeKey::NUM_1, KeyCode::Key1),
    KeyMapping::new(NativeKey::NUM_2, KeyCode::Key2),
    KeyMapping::new(NativeKey::NUM_3, KeyCode::Key3),
    KeyMapping::new(NativeKey::NUM_4, KeyCode::Key4),
    KeyMapping::new(NativeKey::NUM_5, KeyCode::Key5),
    KeyMapping::new(NativeKey::NUM_6, KeyCode::Key6),
    KeyMapping::new(NativeKey::NUM_7, KeyCode::Key7),
    KeyMapping::new(NativeKey::NUM_8, KeyCode::Key8),
    KeyMapping::new(NativeKey::NUM_9, KeyCode::Key9),
    KeyMapping::new(NativeKey::A, KeyCode::KeyA),
    KeyMapping::new(NativeKey::B, KeyCode::KeyB),
    KeyMapping::new(NativeKey::C, KeyCode::KeyC),
    KeyMapping::new(NativeKey::D, KeyCode::KeyD),
    KeyMapping::new(NativeKey::E, KeyCode::KeyE),
    KeyMapping::new(NativeKey::F, KeyCode::KeyF),
    KeyMapping::new(NativeKey::G, KeyCode::KeyG),
    KeyMapping::new(NativeKey::H, KeyCode::KeyH),
    KeyMapping::new(NativeKey::I, KeyCode::KeyI),
    KeyMapping::new(NativeKey::J, KeyCode::KeyJ),
    KeyMapping::new(NativeKey::K, KeyCode::KeyK),
    KeyMapping::new(NativeKey::L, KeyCode::KeyL),
    KeyMapping::new(NativeKey::M, KeyCode::KeyM),
    KeyMapping::new(NativeKey::N, KeyCode::KeyN),
    KeyMapping::new(NativeKey::O, KeyCode::KeyO),
    KeyMapping::new(NativeKey::P, KeyCode::KeyP),
    KeyMapping::new(NativeKey::Q, KeyCode::KeyQ),
    KeyMapping::new(NativeKey::R, KeyCode::KeyR),
    KeyMapping::new(NativeKey::S, KeyCode::KeyS),
    KeyMapping::new(NativeKey::T, KeyCode::KeyT),
    KeyMapping::new(NativeKey::U, KeyCode::KeyU),
    KeyMapping::new(NativeKey::V, KeyCode::KeyV),
    KeyMapping::new(NativeKey::W, KeyCode::KeyW),
    KeyMapping::new(NativeKey::X, KeyCode::KeyX),
    KeyMapping::new(NativeKey::Y, KeyCode::KeyY),
    KeyMapping::new(NativeKey::Z, KeyCode::KeyZ),
    KeyMapping::new(NativeKey::LEFT_SUPER, KeyCode::LWin),
    KeyMapping::new(NativeKey::RIGHT_SUPER, KeyCode::RWin),
    // No application key in the engine set; the menu key lands on sleep.
    KeyMapping::new(NativeKey::MENU, KeyCode::Sleep),
    KeyMapping::new(NativeKey::KP_0, KeyCode::Numpad0),
    KeyMapping::new(NativeKey::KP_1, KeyCode::Numpad1),
    KeyMapping::new(NativeKey::KP_2, KeyCode::Numpad2),
    KeyMapping::new(NativeKey::KP_3, KeyCode::Numpad3),
    KeyMapping::new(NativeKey::KP_4, KeyCode::Numpad4),
    KeyMapping::new(NativeKey::KP_5, KeyCode::Numpad5),
    KeyMapping::new(NativeKey::KP_6, KeyCode::Numpad6),
    KeyMapping::new(NativeKey::KP_7, KeyCode::Numpad7),
    KeyMapping::new(NativeKey::KP_8, KeyCode::Numpad8),
    KeyMapping::new(NativeKey::KP_9, KeyCode::Numpad9),
    KeyMapping::new(NativeKey::KP_MULTIPLY, KeyCode::Multiply),
    KeyMapping::new(NativeKey::KP_ADD, KeyCode::Add),
    KeyMapping::new(NativeKey::KP_SUBTRACT, KeyCode::Subtract),
    KeyMapping::new(NativeKey::KP_DECIMAL, KeyCode::Decimal),
    KeyMapping::new(NativeKey::KP_DIVIDE, KeyCode::Divide),
    KeyMapping::new(NativeKey::F1, KeyCode::F1),
    KeyMapping::new(NativeKey::F2, KeyCode::F2),
    KeyMapping::new(NativeKey::F3, KeyCode::F3),
    KeyMapping::new(NativeKey::F4, KeyCode::F4),
    KeyMapping::new(NativeKey::F5, KeyCode::F5),
    KeyMapping::new(NativeKey::F6, KeyCode::F6),
    KeyMapping::new(NativeKey::F7, KeyCode::F7),
    KeyMapping::new(NativeKey::F8, KeyCode::F8),
    KeyMapping::new(NativeKey::F9, KeyCode::F9),
    KeyMapping::new(NativeKey::F10, KeyCode::F10),
    KeyMapping::new(NativeKey::F11, KeyCode::F11),
    KeyMapping::new(NativeKey::F12, KeyCode::F12),
    KeyMapping::new(NativeKey::F13, KeyCode::F13),
    KeyMapping::new(NativeKey::F14, KeyCode::F14),
    KeyMapping::new(NativeKey::F15, KeyCode::F15),
    KeyMapping::new(NativeKey::NUM_LOCK, KeyCode::NumLock),
    KeyMapping::new(NativeKey::SCROLL_LOCK, KeyCode::Scroll),
    KeyMapping::new(NativeKey::LEFT_SHIFT, KeyCode::LShift),
    KeyMapping::new(NativeKey::RIGHT_SHIFT, KeyCode::RShift),
    KeyMapping::new(NativeKey::LEFT_CONTROL, KeyCode::LControl),
    KeyMapping::new(NativeKey::RIGHT_CONTROL, KeyCode::RControl),
    KeyMapping::new(NativeKey::LEFT_ALT, KeyCode::LMenu),
    KeyMapping::new(NativeKey::RIGHT_ALT, KeyCode::RMenu),
    KeyMapping::new(NativeKey::COMMA, KeyCode::Comma),
    KeyMapping::new(NativeKey::MINUS, KeyCode::Minus),
    KeyMapping::new(NativeKey::PERIOD, KeyCode::Period),
];

/// Native-to-engine key lookup table.
///
/// Entries are kept sorted by native identifier so lookups are a binary
/// search. The table never changes after [`KeyMap::new`].
#[derive(Debug, Clone)]
pub struct KeyMap {
    entries: Vec<KeyMapping>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMap {
    /// Build the table from the fixed set of recognized keys.
    pub fn new() -> Self {
        let mut entries = KEY_MAPPINGS.to_vec();
        entries.sort_by_key(|m| m.native);
        Self { entries }
    }

    /// Engine code for a native key, or [`KeyCode::Unknown`] when the key
    /// is not in the table.
    pub fn lookup(&self, native: NativeKey) -> KeyCode {
        match self.entries.binary_search_by_key(&native, |m| m.native) {
            Ok(index) => self.entries[index].engine,
            Err(_) => KeyCode::Unknown,
        }
    }

    /// Whether entries are in strictly ascending native order.
    pub fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].native < w[1].native)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All mappings in native order.
    pub fn iter(&self) -> impl Iterator<Item = &KeyMapping> + '_ {
        self.entries.iter()
    }
}

static_assertions::assert_impl_all!(KeyMap: Send, Sync);
