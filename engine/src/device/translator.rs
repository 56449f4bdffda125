//! Event Translator
//!
//! Turns native window-system events into engine events. Mouse buttons
//! are tracked in a [`ButtonMask`], presses go through the click-run
//! detector, and window notifications update [`WindowRuntimeState`]
//! without producing engine events.

use glam::IVec2;

use super::config::KeySource;
use super::window_state::{DeviceState, WindowRuntimeState};
use crate::event::{Event, EventSink, KeyInput, MouseEventKind, MouseInput};
use crate::input::{
    Action, ButtonMask, ClickRunDetector, ClickSettings, KeyMap, Modifiers, NativeKey,
    NativeMouseButton,
};
use crate::platform::NativeEvent;
use crate::video::VideoDriver;

/// Everything a translated event may touch, borrowed for one dispatch.
pub struct Dispatch<'a> {
    pub sink: &'a mut dyn EventSink,
    pub window: &'a mut WindowRuntimeState,
    pub device_state: &'a mut DeviceState,
    pub driver: Option<&'a mut (dyn VideoDriver + 'static)>,
    /// Timer reading used to time click runs
    pub now_ms: u32,
}

/// Native-to-engine event translation state.
#[derive(Debug, Clone)]
pub struct EventTranslator {
    keymap: KeyMap,
    buttons: ButtonMask,
    clicks: ClickRunDetector,
    key_source: KeySource,
}

impl EventTranslator {
    pub fn new(key_source: KeySource, click_settings: ClickSettings) -> Self {
        Self {
            keymap: KeyMap::new(),
            buttons: ButtonMask::empty(),
            clicks: ClickRunDetector::new(click_settings),
            key_source,
        }
    }

    /// Buttons currently held.
    pub fn buttons(&self) -> ButtonMask {
        self.buttons
    }

    pub fn clicks(&self) -> &ClickRunDetector {
        &self.clicks
    }

    pub fn key_source(&self) -> KeySource {
        self.key_source
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    /// Route one native event to its handler.
    pub fn dispatch(&mut self, event: NativeEvent, ctx: &mut Dispatch<'_>) {
        match event {
            NativeEvent::CursorPos(x, y) => self.cursor_moved(x, y, ctx),
            NativeEvent::MouseButton(button, action, mods) => {
                self.mouse_button(button, action, mods, ctx)
            }
            NativeEvent::Scroll(x, y) => self.scroll(x, y, ctx),
            NativeEvent::Char(codepoint, mods) => {
                if self.key_source == KeySource::Character {
                    self.char_input(codepoint, mods, ctx);
                }
            }
            NativeEvent::Key(key, _scancode, action, mods) => {
                if self.key_source == KeySource::PhysicalKey {
                    self.key_input(key, action, mods, ctx);
                }
            }
            NativeEvent::Focus(focused) => self.focus_changed(focused, ctx),
            NativeEvent::Iconify(iconified) => self.iconified(iconified, ctx),
            NativeEvent::Size(width, height) => self.resized(width, height, ctx),
            NativeEvent::Close => self.close_requested(ctx),
        }
    }

    fn post_mouse(&self, kind: MouseEventKind, wheel: f32, ctx: &mut Dispatch<'_>) {
        ctx.sink.post_event(Event::Mouse(MouseInput {
            kind,
            position: ctx.window.cursor_position,
            wheel,
            buttons: self.buttons,
        }));
    }

    pub fn cursor_moved(&mut self, x: f64, y: f64, ctx: &mut Dispatch<'_>) {
        ctx.window.cursor_position = IVec2::new(x as i32, y as i32);
        self.post_mouse(MouseEventKind::Moved, 0.0, ctx);
    }

    /// Press or release of a mouse button. Buttons other than left, right
    /// and middle are ignored.
    pub fn mouse_button(
        &mut self,
        button: NativeMouseButton,
        action: Action,
        _mods: Modifiers,
        ctx: &mut Dispatch<'_>,
    ) {
        let Some(button) = button.to_engine() else {
            return;
        };

        if !action.is_down() {
            self.buttons.set_button(button, false);
            self.post_mouse(MouseEventKind::Released(button), 0.0, ctx);
            return;
        }

        self.buttons.set_button(button, true);
        self.post_mouse(MouseEventKind::Pressed(button), 0.0, ctx);

        let run = self
            .clicks
            .classify(ctx.window.cursor_position, button, ctx.now_ms);
        match run {
            2 => self.post_mouse(MouseEventKind::DoubleClick(button), 0.0, ctx),
            3 => self.post_mouse(MouseEventKind::TripleClick(button), 0.0, ctx),
            _ => {}
        }
    }

    /// Wheel motion. Native downward scroll (negative) reads as +1.
    pub fn scroll(&mut self, _x_offset: f64, y_offset: f64, ctx: &mut Dispatch<'_>) {
        let wheel = if y_offset < 0.0 { 1.0 } else { -1.0 };
        self.post_mouse(MouseEventKind::Wheel, wheel, ctx);
    }

    /// A typed character. The codepoint doubles as the native key, the
    /// event is always a press, and modifier flags are exact matches.
    pub fn char_input(&mut self, codepoint: u32, mods: Modifiers, ctx: &mut Dispatch<'_>) {
        ctx.sink.post_event(Event::Key(KeyInput {
            key: self.keymap.lookup(NativeKey::from_codepoint(codepoint)),
            character: char::from_u32(codepoint),
            pressed: true,
            shift: mods.is_only_shift(),
            control: mods.is_only_control(),
        }));
    }

    /// A physical key transition.
    pub fn key_input(
        &mut self,
        key: NativeKey,
        action: Action,
        mods: Modifiers,
        ctx: &mut Dispatch<'_>,
    ) {
        ctx.sink.post_event(Event::Key(KeyInput {
            key: self.keymap.lookup(key),
            character: None,
            pressed: action.is_down(),
            shift: mods.contains(Modifiers::SHIFT),
            control: mods.contains(Modifiers::CONTROL),
        }));
    }

    pub fn focus_changed(&mut self, focused: bool, ctx: &mut Dispatch<'_>) {
        ctx.window.has_focus = focused;
    }

    pub fn iconified(&mut self, iconified: bool, ctx: &mut Dispatch<'_>) {
        ctx.window.is_minimized = iconified;
    }

    /// New client size. The driver hears about it only when it differs
    /// from the stored size.
    pub fn resized(&mut self, width: i32, height: i32, ctx: &mut Dispatch<'_>) {
        let width = width.max(0) as u32;
        let height = height.max(0) as u32;
        if width == ctx.window.width && height == ctx.window.height {
            return;
        }

        ctx.window.width = width;
        ctx.window.height = height;
        if let Some(driver) = ctx.driver.as_deref_mut() {
            driver.on_resize(width, height);
        }
    }

    pub fn close_requested(&mut self, ctx: &mut Dispatch<'_>) {
        *ctx.device_state = DeviceState::Closing;
    }
}
