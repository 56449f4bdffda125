//! Keyboard Input Module
//!
//! Engine key codes, native (GLFW 3) key identifiers and modifier state.
//! The engine codes follow the Win32 virtual-key numbering so that the
//! values stay stable across every platform device.

use bitflags::bitflags;

/// Engine key codes, independent of the windowing system.
///
/// Discriminants are the engine's stable numeric codes. `Unknown` (0) is
/// the sentinel for native keys that have no engine counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum KeyCode {
    /// Catch-all for unmapped keys
    #[default]
    Unknown = 0x00,

    // Control keys
    Back = 0x08,
    Tab = 0x09,
    Return = 0x0D,
    Pause = 0x13,
    Capital = 0x14,
    Escape = 0x1B,
    Space = 0x20,

    // Navigation
    Prior = 0x21,
    Next = 0x22,
    End = 0x23,
    Home = 0x24,
    Left = 0x25,
    Up = 0x26,
    Right = 0x27,
    Down = 0x28,
    Snapshot = 0x2C,
    Insert = 0x2D,
    Delete = 0x2E,

    // Number keys
    Key0 = 0x30,
    Key1 = 0x31,
    Key2 = 0x32,
    Key3 = 0x33,
    Key4 = 0x34,
    Key5 = 0x35,
    Key6 = 0x36,
    Key7 = 0x37,
    Key8 = 0x38,
    Key9 = 0x39,

    // Letter keys
    KeyA = 0x41,
    KeyB = 0x42,
    KeyC = 0x43,
    KeyD = 0x44,
    KeyE = 0x45,
    KeyF = 0x46,
    KeyG = 0x47,
    KeyH = 0x48,
    KeyI = 0x49,
    KeyJ = 0x4A,
    KeyK = 0x4B,
    KeyL = 0x4C,
    KeyM = 0x4D,
    KeyN = 0x4E,
    KeyO = 0x4F,
    KeyP = 0x50,
    KeyQ = 0x51,
    KeyR = 0x52,
    KeyS = 0x53,
    KeyT = 0x54,
    KeyU = 0x55,
    KeyV = 0x56,
    KeyW = 0x57,
    KeyX = 0x58,
    KeyY = 0x59,
    KeyZ = 0x5A,

    // System keys
    LWin = 0x5B,
    RWin = 0x5C,
    Sleep = 0x5F,

    // Numpad
    Numpad0 = 0x60,
    Numpad1 = 0x61,
    Numpad2 = 0x62,
    Numpad3 = 0x63,
    Numpad4 = 0x64,
    Numpad5 = 0x65,
    Numpad6 = 0x66,
    Numpad7 = 0x67,
    Numpad8 = 0x68,
    Numpad9 = 0x69,
    Multiply = 0x6A,
    Add = 0x6B,
    Subtract = 0x6D,
    Decimal = 0x6E,
    Divide = 0x6F,

    // Function keys
    F1 = 0x70,
    F2 = 0x71,
    F3 = 0x72,
    F4 = 0x73,
    F5 = 0x74,
    F6 = 0x75,
    F7 = 0x76,
    F8 = 0x77,
    F9 = 0x78,
    F10 = 0x79,
    F11 = 0x7A,
    F12 = 0x7B,
    F13 = 0x7C,
    F14 = 0x7D,
    F15 = 0x7E,

    // Locks and modifiers
    NumLock = 0x90,
    Scroll = 0x91,
    LShift = 0xA0,
    RShift = 0xA1,
    LControl = 0xA2,
    RControl = 0xA3,
    LMenu = 0xA4,
    RMenu = 0xA5,

    // Punctuation
    Comma = 0xBC,
    Minus = 0xBD,
    Period = 0xBE,
}

impl KeyCode {
    /// The engine's numeric code for this key.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns true for the unmapped sentinel.
    pub fn is_unknown(self) -> bool {
        self == KeyCode::Unknown
    }
}

/// Native key identifier as numbered by GLFW 3.
///
/// Printable keys use their uppercase ASCII value, which is why a
/// character codepoint and a key identifier only coincide for uppercase
/// letters, digits and a handful of punctuation marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeKey(pub i32);

impl NativeKey {
    pub const UNKNOWN: NativeKey = NativeKey(-1);

    pub const SPACE: NativeKey = NativeKey(32);
    pub const APOSTROPHE: NativeKey = NativeKey(39);
    pub const COMMA: NativeKey = NativeKey(44);
    pub const MINUS: NativeKey = NativeKey(45);
    pub const PERIOD: NativeKey = NativeKey(46);
    pub const SLASH: NativeKey = NativeKey(47);
    pub const NUM_0: NativeKey = NativeKey(48);
    pub const NUM_1: NativeKey = NativeKey(49);
    pub const NUM_2: NativeKey = NativeKey(50);
    pub const NUM_3: NativeKey = NativeKey(51);
    pub const NUM_4: NativeKey = NativeKey(52);
    pub const NUM_5: NativeKey = NativeKey(53);
    pub const NUM_6: NativeKey = NativeKey(54);
    pub const NUM_7: NativeKey = NativeKey(55);
    pub const NUM_8: NativeKey = NativeKey(56);
    pub const NUM_9: NativeKey = NativeKey(57);
    pub const SEMICOLON: NativeKey = NativeKey(59);
    pub const EQUAL: NativeKey = NativeKey(61);
    pub const A: NativeKey = NativeKey(65);
    pub const B: NativeKey = NativeKey(66);
    pub const C: NativeKey = NativeKey(67);
    pub const D: NativeKey = NativeKey(68);
    pub const E: NativeKey = NativeKey(69);
    pub const F: NativeKey = NativeKey(70);
    pub const G: NativeKey = NativeKey(71);
    pub const H: NativeKey = NativeKey(72);
    pub const I: NativeKey = NativeKey(73);
    pub const J: NativeKey = NativeKey(74);
    pub const K: NativeKey = NativeKey(75);
    pub const L: NativeKey = NativeKey(76);
    pub const M: NativeKey = NativeKey(77);
    pub const N: NativeKey = NativeKey(78);
    pub const O: NativeKey = NativeKey(79);
    pub const P: NativeKey = NativeKey(80);
    pub const Q: NativeKey = NativeKey(81);
    pub const R: NativeKey = NativeKey(82);
    pub const S: NativeKey = NativeKey(83);
    pub const T: NativeKey = NativeKey(84);
    pub const U: NativeKey = NativeKey(85);
    pub const V: NativeKey = NativeKey(86);
    pub const W: NativeKey = NativeKey(87);
    pub const X: NativeKey = NativeKey(88);
    pub const Y: NativeKey = NativeKey(89);
    pub const Z: NativeKey = NativeKey(90);
    pub const LEFT_BRACKET: NativeKey = NativeKey(91);
    pub const BACKSLASH: NativeKey = NativeKey(92);
    pub const RIGHT_BRACKET: NativeKey = NativeKey(93);
    pub const GRAVE_ACCENT: NativeKey = NativeKey(96);
    pub const WORLD_1: NativeKey = NativeKey(161);
    pub const WORLD_2: NativeKey = NativeKey(162);

    pub const ESCAPE: NativeKey = NativeKey(256);
    pub const ENTER: NativeKey = NativeKey(257);
    pub const TAB: NativeKey = NativeKey(258);
    pub const BACKSPACE: NativeKey = NativeKey(259);
    pub const INSERT: NativeKey = NativeKey(260);
    pub const DELETE: NativeKey = NativeKey(261);
    pub const RIGHT: NativeKey = NativeKey(262);
    pub const LEFT: NativeKey = NativeKey(263);
    pub const DOWN: NativeKey = NativeKey(264);
    pub const UP: NativeKey = NativeKey(265);
    pub const PAGE_UP: NativeKey = NativeKey(266);
    pub const PAGE_DOWN: NativeKey = NativeKey(267);
    pub const HOME: NativeKey = NativeKey(268);
    pub const END: NativeKey = NativeKey(269);
    pub const CAPS_LOCK: NativeKey = NativeKey(280);
    pub const SCROLL_LOCK: NativeKey = NativeKey(281);
    pub const NUM_LOCK: NativeKey = NativeKey(282);
    pub const PRINT_SCREEN: NativeKey = NativeKey(283);
    pub const PAUSE: NativeKey = NativeKey(284);
    pub const F1: NativeKey = NativeKey(290);
    pub const F2: NativeKey = NativeKey(291);
    pub const F3: NativeKey = NativeKey(292);
    pub const F4: NativeKey = NativeKey(293);
    pub const F5: NativeKey = NativeKey(294);
    pub const F6: NativeKey = NativeKey(295);
    pub const F7: NativeKey = NativeKey(296);
    pub const F8: NativeKey = NativeKey(297);
    pub const F9: NativeKey = NativeKey(298);
    pub const F10: NativeKey = NativeKey(299);
    pub const F11: NativeKey = NativeKey(300);
    pub const F12: NativeKey = NativeKey(301);
    pub const F13: NativeKey = NativeKey(302);
    pub const F14: NativeKey = NativeKey(303);
    pub const F15: NativeKey = NativeKey(304);
    pub const F16: NativeKey = NativeKey(305);
    pub const KP_0: NativeKey = NativeKey(320);
    pub const KP_1: NativeKey = NativeKey(321);
    pub const KP_2: NativeKey = NativeKey(322);
    pub const KP_3: NativeKey = NativeKey(323);
    pub const KP_4: NativeKey = NativeKey(324);
    pub const KP_5: NativeKey = NativeKey(325);
    pub const KP_6: NativeKey = NativeKey(326);
    pub const KP_7: NativeKey = NativeKey(327);
    pub const KP_8: NativeKey = NativeKey(328);
    pub const KP_9: NativeKey = NativeKey(329);
    pub const KP_DECIMAL: NativeKey = NativeKey(330);
    pub const KP_DIVIDE: NativeKey = NativeKey(331);
    pub const KP_MULTIPLY: NativeKey = NativeKey(332);
    pub const KP_SUBTRACT: NativeKey = NativeKey(333);
    pub const KP_ADD: NativeKey = NativeKey(334);
    pub const KP_ENTER: NativeKey = NativeKey(335);
    pub const KP_EQUAL: NativeKey = NativeKey(336);
    pub const LEFT_SHIFT: NativeKey = NativeKey(340);
    pub const LEFT_CONTROL: NativeKey = NativeKey(341);
    pub const LEFT_ALT: NativeKey = NativeKey(342);
    pub const LEFT_SUPER: NativeKey = NativeKey(343);
    pub const RIGHT_SHIFT: NativeKey = NativeKey(344);
    pub const RIGHT_CONTROL: NativeKey = NativeKey(345);
    pub const RIGHT_ALT: NativeKey = NativeKey(346);
    pub const RIGHT_SUPER: NativeKey = NativeKey(347);
    pub const MENU: NativeKey = NativeKey(348);

    /// Interpret a character codepoint as a key identifier.
    pub fn from_codepoint(codepoint: u32) -> Self {
        NativeKey(i32::try_from(codepoint).unwrap_or(NativeKey::UNKNOWN.0))
    }
}

bitflags! {
    /// Modifier bits as reported by GLFW 3 alongside key, character and
    /// mouse button events.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: i32 {
        const SHIFT = 0x0001;
        const CONTROL = 0x0002;
        const ALT = 0x0004;
        const SUPER = 0x0008;
        const CAPS_LOCK = 0x0010;
        const NUM_LOCK = 0x0020;
    }
}

impl Modifiers {
    /// True only when Shift is the sole modifier held.
    pub fn is_only_shift(self) -> bool {
        self == Modifiers::SHIFT
    }

    /// True only when Control is the sole modifier held.
    pub fn is_only_control(self) -> bool {
        self == Modifiers::CONTROL
    }
}

/// Native press/release state of a key or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Release,
    Press,
    Repeat,
}

impl Action {
    /// Whether the key or button is held after this action.
    pub fn is_down(self) -> bool {
        matches!(self, Action::Press | Action::Repeat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_is_zero() {
        assert_eq!(KeyCode::Unknown.code(), 0);
        assert!(KeyCode::default().is_unknown());
        assert!(!KeyCode::KeyA.is_unknown());
    }

    #[test]
    fn test_engine_codes_follow_virtual_key_numbering() {
        assert_eq!(KeyCode::KeyA.code(), b'A');
        assert_eq!(KeyCode::Key7.code(), b'7');
        assert_eq!(KeyCode::Return.code(), 0x0D);
        assert_eq!(KeyCode::F15.code(), 0x7E);
    }

    #[test]
    fn test_native_letters_match_uppercase_ascii() {
        assert_eq!(NativeKey::from_codepoint('A' as u32), NativeKey::A);
        assert_eq!(NativeKey::from_codepoint('0' as u32), NativeKey::NUM_0);
        assert_ne!(NativeKey::from_codepoint('a' as u32), NativeKey::A);
    }

    #[test]
    fn test_out_of_range_codepoint_is_unknown() {
        assert_eq!(NativeKey::from_codepoint(u32::MAX), NativeKey::UNKNOWN);
    }

    #[test]
    fn test_modifier_exact_match() {
        assert!(Modifiers::SHIFT.is_only_shift());
        assert!(Modifiers::CONTROL.is_only_control());

        let both = Modifiers::SHIFT | Modifiers::CONTROL;
        assert!(!both.is_only_shift());
        assert!(!both.is_only_control());
        assert!(!Modifiers::empty().is_only_shift());
    }

    #[test]
    fn test_action_is_down() {
        assert!(Action::Press.is_down());
        assert!(Action::Repeat.is_down());
        assert!(!Action::Release.is_down());
    }
}
